use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};

def_routine! {
    /// `y = alpha * A * x + beta * y` with symmetric `A`.
    Ssymv {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        a: Blob<f32>,
        lda: i32,
        x: Blob<f32>,
        incx: i32,
        beta: f32,
        y: Blob<f32>,
        incy: i32,
    }
}

/// Upper triangle only.
pub struct SsymvNaiveUpper;

impl Implementation<Ssymv> for SsymvNaiveUpper {
    fn name(&self) -> &'static str {
        "Ssymv_naive_upper"
    }

    fn accept(&self, params: &SsymvParams) -> Option<SsymvScore> {
        if params.uplo != FillMode::Upper {
            return None;
        }
        Some(SsymvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsymvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Ssymv_naive_upper", "Ssymv_naive_upper")?
            .bind(kernel_args![p.n, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Takes either triangle, preferred for the lower one.
///
/// Expands `A` into two `n x n` scratch matrices, so it binds `A` as `n * n`
/// and both vectors as `n` elements.
pub struct SsymvNaiveLower;

impl Implementation<Ssymv> for SsymvNaiveLower {
    fn name(&self) -> &'static str {
        "Ssymv_naive_lower"
    }

    fn accept(&self, params: &SsymvParams) -> Option<SsymvScore> {
        let mut score = SsymvScore::default();
        if params.uplo == FillMode::Lower {
            score.uplo = 2.0;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsymvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let square = dim(p.n) * dim(p.n);
        let a = engine.get_input_buffer(p.a, square)?;
        let x = engine.get_input_buffer(p.x, dim(p.n))?;
        let y = engine.get_inout_buffer(p.y, dim(p.n))?;
        let temp_l = engine.get_temp_buffer::<f32>(square)?;
        let temp_r = engine.get_temp_buffer::<f32>(square)?;
        Launch::new(engine, "Ssymv_naive_lower", "Ssymv_naive_lower")?
            .bind(kernel_args![p.n, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy, temp_l, temp_r])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Ssymv, _>(SsymvNaiveUpper).register::<Ssymv, _>(SsymvNaiveLower);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(uplo: FillMode) -> SsymvParams {
        SsymvParams {
            uplo,
            n: 4,
            alpha: 1.0,
            a: Blob::null(),
            lda: 4,
            x: Blob::null(),
            incx: 1,
            beta: 1.0,
            y: Blob::null(),
            incy: 1,
        }
    }

    #[test]
    fn triangle_picks_candidate() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Ssymv>(&params(FillMode::Upper)).unwrap().name(), "Ssymv_naive_upper");
        assert_eq!(d.select::<Ssymv>(&params(FillMode::Lower)).unwrap().name(), "Ssymv_naive_lower");
    }

    #[test]
    fn lower_allocates_two_scratch_matrices() {
        let a = vec![1.0f32; 16];
        let x = vec![1.0f32; 4];
        let mut y = vec![0.0f32; 4];
        let (engine, d) = dispatcher();
        let p = SsymvParams {
            a: Blob::from_slice(&a),
            x: Blob::from_slice(&x),
            y: Blob::from_mut_slice(&mut y),
            ..params(FillMode::Lower)
        };
        unsafe { d.execute::<Ssymv>(&p, &[]).unwrap() };
        let temps = engine.temps();
        assert_eq!(temps.len(), 2);
        assert!(temps.iter().all(|t| t.bytes() == 64));
        assert_eq!(engine.last().unwrap().args().len(), 11);
    }
}
