use std::sync::Arc;

use iclblas_base::{interleave, Config, Dispatcher, Engine, Event, Registry, Result, Routine, RUNTIME_CONFIG};

/// Every candidate of both precisions bound to one engine.
///
/// Cheap to clone and safe to share, the registry is read only after construction.
///
/// The typed methods (`sasum`, `sgemv`, `cgemm`, ...) take slices that must
/// cover `n * inc` elements per vector and `ld * cols` per matrix, see
/// [operand lengths](crate#operand-lengths).
#[derive(Clone)]
pub struct Handle {
    dispatcher: Dispatcher,
}

impl Handle {
    /// Registry filtered by [`RUNTIME_CONFIG`].
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self::with_config(engine, &RUNTIME_CONFIG)
    }

    pub fn with_config(engine: Arc<dyn Engine>, config: &Config) -> Self {
        let mut registry = Registry::with_config(config);
        interleave::register(&mut registry);
        iclblas_s::register(&mut registry);
        iclblas_c::register(&mut registry);
        log::debug!("iclblas handle: {} routines registered", registry.len());
        Handle { dispatcher: Dispatcher::new(Arc::new(registry), engine) }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Validates `params` and queues the routine after `deps`, without waiting.
    ///
    /// # Safety
    ///
    /// The blobs in `params` must stay valid until the returned event
    /// completes, and nothing else may touch the blobs the routine writes
    /// in that time. On error some stages may already be queued, call
    /// [`Engine::finish`] before releasing the memory.
    pub unsafe fn submit<R: Routine>(&self, params: &R::Params, deps: &[Event]) -> Result<Event> {
        R::validate(params)?;
        self.dispatcher.execute::<R>(params, deps)
    }

    /// Validates `params`, runs the routine and waits for it.
    ///
    /// Empty problems return straight away, nothing reaches the engine. On
    /// failure the engine is drained before returning, so no queued stage
    /// outlives the call.
    ///
    /// # Safety
    ///
    /// The blobs in `params` must be valid for the whole call and not
    /// accessed elsewhere while it runs.
    pub unsafe fn run<R: Routine>(&self, params: &R::Params) -> Result<()> {
        R::validate(params)?;
        if R::is_empty(params) {
            return Ok(());
        }
        let done = self.dispatcher.execute::<R>(params, &[]).and_then(|event| event.wait());
        match done {
            Ok(elapsed) => {
                log::trace!("{} finished in {:?}", R::NAME, elapsed);
                Ok(())
            }
            Err(e) => {
                if let Err(drain) = self.dispatcher.engine().finish() {
                    log::warn!("{}: draining the engine after {} failed: {}", R::NAME, e, drain);
                }
                Err(e)
            }
        }
    }

    /// [`Handle::run`] for params built from borrowed slices.
    ///
    /// Only the typed methods call this. They build every blob from a
    /// borrow that outlives the call, read-only operands from shared ones.
    pub(crate) fn call<R: Routine>(&self, params: &R::Params) -> Result<()> {
        // SAFETY: `run` waits or drains before returning and the blobs come
        // from borrows held by the caller for the whole call.
        unsafe { self.run::<R>(params) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::{Sasum, SasumParams, Sscal, SscalParams};
    use crate::test_utils::handle;
    use crate::{Blob, Error};

    #[test]
    fn registers_everything() {
        let (_, h) = handle();
        let routines = h.dispatcher().registry().routines();
        assert_eq!(routines.len(), 23 + 28 + 2);
        assert!(routines.contains(&"CopyInterleave"));
        assert!(routines.contains(&"Strsv"));
        assert!(routines.contains(&"Ctrsm"));
    }

    #[test]
    fn disabled_candidates_never_run() {
        let engine = iclblas_dev::RecordingEngine::new();
        let config = Config { disabled: vec!["Sscal_noinc".to_string(), "Sscal_packed".to_string()], log_ranking: false };
        let h = Handle::with_config(Arc::new(engine.clone()), &config);
        let mut x = vec![1.0f32; 64];
        let p = SscalParams { n: 64, alpha: 2.0, x: Blob::from_mut_slice(&mut x), incx: 1 };
        unsafe { h.run::<Sscal>(&p).unwrap() };
        assert_eq!(engine.kernels(), vec!["Sscal_naive"]);
    }

    #[test]
    fn run_checks_before_dispatch() {
        let (engine, h) = handle();
        let x = vec![1.0f32; 4];
        let mut r = 0.0f32;
        let p = SasumParams { n: 4, x: Blob::from_slice(&x), incx: 0, result: Blob::from_mut(&mut r) };
        assert_eq!(unsafe { h.run::<Sasum>(&p) }, Err(Error::InvalidValue("incx")));
        let p = SasumParams { result: Blob::null(), incx: 1, ..p };
        assert_eq!(unsafe { h.run::<Sasum>(&p) }, Err(Error::InvalidValue("result")));
        assert!(engine.submissions().is_empty());
    }

    #[test]
    fn empty_run_touches_nothing_but_submit_raises() {
        let (engine, h) = handle();
        let mut x = vec![1.0f32; 4];
        let p = SscalParams { n: 0, alpha: 2.0, x: Blob::from_mut_slice(&mut x), incx: 1 };
        unsafe { h.run::<Sscal>(&p).unwrap() };
        assert!(engine.raised().is_empty());

        let dep = engine.ready_event();
        let ev = unsafe { h.submit::<Sscal>(&p, &[dep.clone()]).unwrap() };
        assert!(engine.submissions().is_empty());
        assert_eq!(engine.raised(), vec![ev.id()]);
        assert!(engine.depends_on(ev.id(), dep.id()));
    }

    #[test]
    fn wait_failure_reaches_caller() {
        let (engine, h) = handle();
        engine.fail_wait();
        let mut x = vec![1.0f32; 4];
        let p = SscalParams { n: 4, alpha: 2.0, x: Blob::from_mut_slice(&mut x), incx: 1 };
        let err = unsafe { h.run::<Sscal>(&p).unwrap_err() };
        assert_eq!(err.status(), crate::Status::ExecutionFailed);
        assert_eq!(engine.finish_count(), 1);
    }

    #[test]
    fn failed_stage_drains_engine() {
        let (engine, h) = handle();
        engine.fail_submit("Sasum_simd16_second_stage");
        let x = vec![1.0f32; 1 << 16];
        let mut r = 0.0f32;
        let err = h.sasum(1 << 16, &x, 1, &mut r).unwrap_err();
        assert!(matches!(err, Error::Engine(crate::EngineError::SubmissionFailed { .. })));
        assert_eq!(engine.kernels(), vec!["Sasum_simd16_first_stage"]);
        assert_eq!(engine.finish_count(), 1);
    }

    #[test]
    fn successful_run_does_not_drain() {
        let (engine, h) = handle();
        let mut x = vec![1.0f32; 8];
        h.sscal(8, 2.0, &mut x, 1).unwrap();
        assert_eq!(engine.finish_count(), 0);
    }
}
