//! # iclblas
//! BLAS routines whose kernels run on a compute engine supplied by the caller.
//!
//! Every call validates its arguments, picks the best scoring candidate
//! implementation for them and waits for the submitted kernels.
//!
//! ## Operand lengths
//!
//! Slices are bound whole up to the extent the arguments describe, not
//! just the elements the routine touches:
//!
//! - a vector of `n` elements with stride `inc` must hold at least `n * inc`
//!   elements, so `n = 4, inc = 3` needs 12 even though the last index read
//!   is 9;
//! - a full or banded matrix with leading dimension `ld` must hold
//!   `ld * cols` elements, `cols` being the stored columns;
//! - a packed triangle of order `n` must hold `n * (n + 1) / 2` elements.
//!
//! Shorter slices fail with [`Error::BufferTooSmall`] before anything is
//! submitted.
//!
//! ```ignore
//! let handle = iclblas::Handle::new(engine);
//! let mut result = 0.0;
//! handle.sasum(x.len() as i32, &x, 1, &mut result)?;
//! ```

mod handle;
mod level1;
mod level2;
mod level3;

pub use handle::Handle;

pub use iclblas_base::{
    Blob, Config, Diag, Dispatcher, Engine, EngineError, Error, Event, FillMode, Operation, Result, Routine, Side,
    Status, RUNTIME_CONFIG,
};
pub use num_complex::{c32, Complex32};

/// Routine markers and parameter records, for [`Handle::run`] and [`Handle::submit`].
pub mod routines {
    pub use iclblas_base::interleave::{
        CopyInterleave, CopyInterleaveParams, CopyInterleaveScore, SwapInterleave, SwapInterleaveParams,
        SwapInterleaveScore,
    };
    pub use iclblas_c::*;
    pub use iclblas_s::*;
}

#[inline]
pub(crate) fn check_inc(field: &'static str, inc: i32) -> Result<()> {
    if inc == 0 {
        return Err(Error::InvalidValue(field));
    }
    if inc < 0 {
        return Err(Error::NotSupported(field));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::Arc;

    use crate::{Config, Handle};
    use iclblas_dev::RecordingEngine;

    pub(crate) fn handle() -> (RecordingEngine, Handle) {
        let engine = RecordingEngine::new();
        let h = Handle::with_config(Arc::new(engine.clone()), &Config::default());
        (engine, h)
    }
}
