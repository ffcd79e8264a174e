use std::sync::Arc;

use crate::engine::{Engine, Event};
use crate::registry::Registry;
use crate::routine::{Implementation, Routine, ScoreRecord};
use crate::{Error, Result, RUNTIME_CONFIG};

/// A feasible candidate together with the score it reported.
pub struct Selection<R: Routine> {
    pub implementation: Arc<dyn Implementation<R>>,
    pub score: R::Score,
    pub total: f32,
}

impl<R: Routine> Clone for Selection<R> {
    fn clone(&self) -> Self {
        Selection { implementation: self.implementation.clone(), score: self.score, total: self.total }
    }
}

impl<R: Routine> Selection<R> {
    pub fn name(&self) -> &'static str {
        self.implementation.name()
    }
}

impl<R: Routine> core::fmt::Debug for Selection<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Selection")
            .field("routine", &R::NAME)
            .field("implementation", &self.name())
            .field("total", &self.total)
            .finish()
    }
}

fn evaluate<R: Routine>(imp: &Arc<dyn Implementation<R>>, params: &R::Params) -> Option<Selection<R>> {
    let score = match imp.accept(params) {
        Some(score) => score,
        None => {
            log::trace!("{}: {} rejected", R::NAME, imp.name());
            return None;
        }
    };
    // per field, two negatives multiply to a positive total
    if let Some((field, value)) = score.fields().into_iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
        log::warn!("{}: {} reported invalid {} score {}, ignored", R::NAME, imp.name(), field, value);
        return None;
    }
    let total = score.total();
    if !total.is_finite() || total <= 0.0 {
        log::warn!("{}: {} total score {} out of range, ignored", R::NAME, imp.name(), total);
        return None;
    }
    log::trace!("{}: {} accepted with {}", R::NAME, imp.name(), total);
    Some(Selection { implementation: imp.clone(), score, total })
}

/// Highest total wins, on equal totals the earlier candidate stays.
pub fn select<R: Routine>(candidates: &[Arc<dyn Implementation<R>>], params: &R::Params) -> Result<Selection<R>> {
    if candidates.is_empty() {
        return Err(Error::Unimplemented { routine: R::NAME });
    }
    let mut best: Option<Selection<R>> = None;
    for imp in candidates {
        let cur = match evaluate(imp, params) {
            Some(cur) => cur,
            None => continue,
        };
        match &best {
            Some(b) if cur.total <= b.total => {}
            _ => best = Some(cur),
        }
    }
    best.ok_or(Error::NoApplicableImplementation { routine: R::NAME })
}

/// Every feasible candidate, best first. Equal totals keep registration order.
pub fn rank<R: Routine>(candidates: &[Arc<dyn Implementation<R>>], params: &R::Params) -> Vec<Selection<R>> {
    let mut ranked: Vec<Selection<R>> = candidates.iter().filter_map(|imp| evaluate(imp, params)).collect();
    // stable sort
    ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
    ranked
}

/// Registry plus engine, the entry point for running any routine.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    engine: Arc<dyn Engine>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, engine: Arc<dyn Engine>) -> Self {
        Dispatcher { registry, engine }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn select<R: Routine>(&self, params: &R::Params) -> Result<Selection<R>> {
        select(self.registry.implementations::<R>(), params)
    }

    pub fn rank<R: Routine>(&self, params: &R::Params) -> Vec<Selection<R>> {
        rank(self.registry.implementations::<R>(), params)
    }

    /// Runs the best candidate for `params` after `deps`.
    ///
    /// Empty problems return an event that only waits for `deps`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Implementation::execute`]: the blobs in `params`
    /// must outlive the returned event and written blobs must not be
    /// aliased until it completes.
    pub unsafe fn execute<R: Routine>(&self, params: &R::Params, deps: &[Event]) -> Result<Event> {
        if R::is_empty(params) {
            log::debug!("{}: empty problem, nothing submitted", R::NAME);
            return Ok(self.engine.raise_event(deps)?);
        }
        if RUNTIME_CONFIG.log_ranking {
            for (i, s) in self.rank::<R>(params).iter().enumerate() {
                log::debug!("{} rank {}: {} total {} {:?}", R::NAME, i, s.name(), s.total, s.score);
            }
        }
        let selected = self.select::<R>(params)?;
        log::debug!("{}: selected {} with total {}", R::NAME, selected.name(), selected.total);
        selected.implementation.execute(self, params, deps)
    }
}
