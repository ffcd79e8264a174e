//! # Candidate selection and kernel launch protocol of iclblas
//! Every routine owns an ordered list of candidate implementations. Each call
//! asks all of them to score its parameters and runs the best one on the engine.
//!
//! Mostly for use by the iclblas crates, no semver guarantees.

pub mod blob;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod flags;
pub mod interleave;
pub mod launch;
pub mod registry;
pub mod routine;
pub mod storage;

pub use blob::{Blob, HostRegion};
pub use config::{Config, RUNTIME_CONFIG};
pub use dispatch::{rank, select, Dispatcher, Selection};
pub use engine::{Access, Buffer, Completion, Engine, EngineExt, Event, Kernel, KernelArg, KernelOptions, NdRange};
pub use error::{EngineError, Error, Result, Status};
pub use flags::{Diag, FillMode, Operation, Side};
pub use launch::Launch;
pub use registry::Registry;
pub use routine::{Implementation, Operand, Routine, ScoreRecord};

pub use num_complex::{c32, Complex32};

#[doc(hidden)]
pub use paste;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    def_routine! {
        Scal { n: i32, x: Blob<f32>, incx: i32 }
    }

    struct Naive;
    struct UnitStride;
    struct LargeN;
    struct Twin(&'static str);
    struct Never;
    struct Broken;
    struct Flipped;

    fn unreachable_exec() -> Result<Event> {
        Err(Error::NotSupported("execute"))
    }

    impl Implementation<Scal> for Naive {
        fn name(&self) -> &'static str {
            "Naive"
        }
        fn accept(&self, _: &ScalParams) -> Option<ScalScore> {
            Some(ScalScore::default())
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for UnitStride {
        fn name(&self) -> &'static str {
            "UnitStride"
        }
        fn accept(&self, p: &ScalParams) -> Option<ScalScore> {
            if p.incx != 1 {
                return None;
            }
            Some(ScalScore { incx: 1.1, ..Default::default() })
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for LargeN {
        fn name(&self) -> &'static str {
            "LargeN"
        }
        fn accept(&self, p: &ScalParams) -> Option<ScalScore> {
            if p.n < 1024 {
                return None;
            }
            Some(ScalScore { n: 1.5, ..Default::default() })
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for Twin {
        fn name(&self) -> &'static str {
            self.0
        }
        fn accept(&self, _: &ScalParams) -> Option<ScalScore> {
            Some(ScalScore { n: 2.0, incx: 1.5, ..Default::default() })
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for Never {
        fn name(&self) -> &'static str {
            "Never"
        }
        fn accept(&self, _: &ScalParams) -> Option<ScalScore> {
            None
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }
        fn accept(&self, _: &ScalParams) -> Option<ScalScore> {
            Some(ScalScore { n: 100.0, x: 0.0, ..Default::default() })
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    impl Implementation<Scal> for Flipped {
        fn name(&self) -> &'static str {
            "Flipped"
        }
        fn accept(&self, _: &ScalParams) -> Option<ScalScore> {
            Some(ScalScore { n: -4.0, incx: -2.0, ..Default::default() })
        }
        unsafe fn execute(&self, _: &Dispatcher, _: &ScalParams, _: &[Event]) -> Result<Event> {
            unreachable_exec()
        }
    }

    fn params(n: i32, incx: i32) -> ScalParams {
        ScalParams { n, x: Blob::null(), incx }
    }

    fn three() -> Registry {
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Naive).register::<Scal, _>(UnitStride).register::<Scal, _>(LargeN);
        reg
    }

    #[test]
    fn default_score_is_one() {
        let s = ScalScore::default();
        assert_eq!(s.total(), 1.0);
        assert_eq!(s.fields(), vec![("n", 1.0), ("x", 1.0), ("incx", 1.0)]);
    }

    #[test]
    fn total_is_product() {
        let s = ScalScore { n: 1.5, incx: 1.1, ..Default::default() };
        assert!((s.total() - 1.65).abs() < 1e-6);
    }

    #[test]
    fn three_candidate_scenario() {
        let reg = three();
        let c = reg.implementations::<Scal>();
        assert_eq!(select(c, &params(2000, 1)).unwrap().name(), "LargeN");
        assert_eq!(select(c, &params(10, 1)).unwrap().name(), "UnitStride");
        assert_eq!(select(c, &params(10, 2)).unwrap().name(), "Naive");
        assert_eq!(select(c, &params(2000, 2)).unwrap().name(), "LargeN");
    }

    #[test]
    fn selection_is_deterministic() {
        let reg = three();
        let c = reg.implementations::<Scal>();
        let first = select(c, &params(500, 1)).unwrap().name();
        for _ in 0..100 {
            assert_eq!(select(c, &params(500, 1)).unwrap().name(), first);
        }
    }

    #[test]
    fn ties_keep_registration_order() {
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Twin("first")).register::<Scal, _>(Twin("second")).register::<Scal, _>(Twin("third"));
        let c = reg.implementations::<Scal>();
        assert_eq!(select(c, &params(10, 1)).unwrap().name(), "first");
        let ranked: Vec<_> = rank(c, &params(10, 1)).iter().map(|s| s.name()).collect();
        assert_eq!(ranked, vec!["first", "second", "third"]);
    }

    #[test]
    fn infeasible_never_selected() {
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Never).register::<Scal, _>(Naive);
        let c = reg.implementations::<Scal>();
        for n in [1, 100, 5000] {
            assert_eq!(select(c, &params(n, 1)).unwrap().name(), "Naive");
        }
    }

    #[test]
    fn invalid_scores_are_ignored() {
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Broken).register::<Scal, _>(Naive);
        assert_eq!(select(reg.implementations::<Scal>(), &params(1, 1)).unwrap().name(), "Naive");
    }

    #[test]
    fn negative_fields_are_invalid_even_with_positive_total() {
        assert_eq!(Flipped.accept(&params(1, 1)).unwrap().total(), 8.0);
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Flipped).register::<Scal, _>(Naive);
        let c = reg.implementations::<Scal>();
        assert_eq!(select(c, &params(1, 1)).unwrap().name(), "Naive");
        let ranked: Vec<_> = rank(c, &params(1, 1)).iter().map(|s| s.name()).collect();
        assert_eq!(ranked, vec!["Naive"]);
    }

    #[test]
    fn nothing_feasible() {
        let mut reg = Registry::new();
        reg.register::<Scal, _>(Never);
        let err = select(reg.implementations::<Scal>(), &params(1, 1)).unwrap_err();
        assert_eq!(err, Error::NoApplicableImplementation { routine: "Scal" });
        let empty = Registry::new();
        let err = select(empty.implementations::<Scal>(), &params(1, 1)).unwrap_err();
        assert_eq!(err, Error::Unimplemented { routine: "Scal" });
    }

    #[test]
    fn rank_orders_by_total() {
        let reg = three();
        let ranked = rank(reg.implementations::<Scal>(), &params(4096, 1));
        let names: Vec<_> = ranked.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["LargeN", "UnitStride", "Naive"]);
        assert_eq!(ranked[2].total, 1.0);
    }

    #[test]
    fn disabled_candidates_are_skipped() {
        let config = Config { disabled: vec!["LargeN".to_string()], log_ranking: false };
        let mut reg = Registry::with_config(&config);
        reg.register::<Scal, _>(Naive).register::<Scal, _>(UnitStride).register::<Scal, _>(LargeN);
        assert_eq!(reg.names::<Scal>(), vec!["Naive", "UnitStride"]);
        assert_eq!(reg.routines(), vec!["Scal"]);
    }

    #[test]
    fn validation_by_field_name() {
        let v = vec![0f32; 4];
        let ok = ScalParams { n: 4, x: Blob::from_slice(&v), incx: 1 };
        assert!(Scal::validate(&ok).is_ok());
        assert_eq!(Scal::validate(&ScalParams { n: -1, ..ok }), Err(Error::InvalidValue("n")));
        assert_eq!(Scal::validate(&ScalParams { incx: 0, ..ok }), Err(Error::InvalidValue("incx")));
        assert_eq!(Scal::validate(&ScalParams { incx: -2, ..ok }), Err(Error::NotSupported("incx")));
        assert_eq!(Scal::validate(&ScalParams { x: Blob::null(), ..ok }), Err(Error::InvalidValue("x")));
        assert!(Scal::is_empty(&ScalParams { n: 0, ..ok }));
        assert!(!Scal::is_empty(&ok));
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
        assert_send_sync::<Dispatcher>();
        let reg = Arc::new(three());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let reg = reg.clone();
                std::thread::spawn(move || {
                    let p = ScalParams { n: 10 + i * 1000, x: Blob::null(), incx: 1 };
                    select(reg.implementations::<Scal>(), &p).map(|s| s.name()).unwrap()
                })
            })
            .collect();
        let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(names, vec!["UnitStride", "UnitStride", "LargeN", "LargeN"]);
    }
}
