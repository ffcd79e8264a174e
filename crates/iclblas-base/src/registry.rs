use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::routine::{Implementation, Routine};
use crate::Config;

struct Entry {
    routine: &'static str,
    candidates: Box<dyn Any + Send + Sync>,
}

/// Ordered candidate lists, one per routine.
///
/// Filled once at startup, then shared read-only.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, Entry>,
    disabled: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registry that drops candidates the configuration disables.
    pub fn with_config(config: &Config) -> Self {
        Registry { entries: HashMap::new(), disabled: config.disabled.clone() }
    }

    /// Appends `imp` to the candidates of `R`.
    pub fn register<R, I>(&mut self, imp: I) -> &mut Self
    where
        R: Routine,
        I: Implementation<R> + 'static,
    {
        if self.disabled.iter().any(|d| d == imp.name()) {
            log::debug!("{}: {} disabled, not registered", R::NAME, imp.name());
            return self;
        }
        let entry = self
            .entries
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Entry { routine: R::NAME, candidates: Box::new(Vec::<Arc<dyn Implementation<R>>>::new()) });
        if let Some(list) = entry.candidates.downcast_mut::<Vec<Arc<dyn Implementation<R>>>>() {
            log::debug!("{}: registered {} at position {}", R::NAME, imp.name(), list.len());
            list.push(Arc::new(imp));
        }
        self
    }

    pub fn implementations<R: Routine>(&self) -> &[Arc<dyn Implementation<R>>] {
        self.entries
            .get(&TypeId::of::<R>())
            .and_then(|e| e.candidates.downcast_ref::<Vec<Arc<dyn Implementation<R>>>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn names<R: Routine>(&self) -> Vec<&'static str> {
        self.implementations::<R>().iter().map(|i| i.name()).collect()
    }

    /// Names of all routines with at least one candidate, sorted.
    pub fn routines(&self) -> Vec<&'static str> {
        let mut r: Vec<_> = self.entries.values().map(|e| e.routine).collect();
        r.sort_unstable();
        r
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
