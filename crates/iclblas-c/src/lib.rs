//! Single precision complex candidates of iclblas.
//!
//! Most routines have a single naive candidate, the reductions carry
//! sub group variants scored on vector length.

pub mod level1;
pub mod level2;
pub mod level3;

use iclblas_base::Registry;

pub use level1::*;
pub use level2::*;
pub use level3::*;

/// Adds every complex candidate to `registry`.
pub fn register(registry: &mut Registry) {
    level1::register(registry);
    level2::register(registry);
    level3::register(registry);
}

#[cfg(test)]
pub(crate) mod test_utils {
    use iclblas_base::Dispatcher;
    use iclblas_dev::{dispatcher_with, RecordingEngine};

    pub(crate) fn dispatcher() -> (RecordingEngine, Dispatcher) {
        let engine = RecordingEngine::new();
        let d = dispatcher_with(&engine, super::register);
        (engine, d)
    }
}
