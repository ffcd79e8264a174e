use iclblas_base::storage::{dim, div_ceil, matrix_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Buffer, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Operation,
    Registry, Result,
};

def_routine! {
    /// `C = alpha * op(A) * op(B) + beta * C`
    Sgemm {
        transa: Operation,
        transb: Operation,
        m: i32,
        n: i32,
        k: i32,
        alpha: f32,
        a: Blob<f32>,
        lda: i32,
        b: Blob<f32>,
        ldb: i32,
        beta: f32,
        c: Blob<f32>,
        ldc: i32,
    }
}

const SG_SIZE: usize = 16;
const TILE_M: usize = 16;
const TILE_N: usize = 8;
const TILE_AK: usize = 16;
const TILE_BK: usize = 16;
const OPT_THRESHOLD: usize = 4;

fn operands(dispatcher: &Dispatcher, p: &SgemmParams) -> Result<[Buffer; 3]> {
    let engine = dispatcher.engine();
    Ok([
        engine.get_input_buffer(p.a, matrix_len(p.lda, p.k))?,
        engine.get_input_buffer(p.b, matrix_len(p.ldb, p.n))?,
        engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?,
    ])
}

/// One work item per element of `C`.
pub struct SgemmAsync;

impl Implementation<Sgemm> for SgemmAsync {
    fn name(&self) -> &'static str {
        "Sgemm_async"
    }

    fn accept(&self, _params: &SgemmParams) -> Option<SgemmScore> {
        Some(SgemmScore { m: 1.1, n: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgemmParams, deps: &[Event]) -> Result<Event> {
        let [a, b, c] = operands(dispatcher, p)?;
        Launch::new(dispatcher.engine(), "Sgemm_async", "Sgemm_async")?
            .bind(kernel_args![p.transa, p.transb, p.k, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n)), None)?
            .submit(deps)
    }
}

/// Sub group tiles of 16x8, neither operand transposed.
pub struct SgemmN3SgNtransAB;

impl Implementation<Sgemm> for SgemmN3SgNtransAB {
    fn name(&self) -> &'static str {
        "Sgemm_n3_sg_ntransAB"
    }

    fn accept(&self, params: &SgemmParams) -> Option<SgemmScore> {
        if params.transa != Operation::N || params.transb != Operation::N {
            return None;
        }
        let (m, n, k) = (dim(params.m), dim(params.n), dim(params.k));
        let mut score = SgemmScore { transa: 1.1, transb: 1.1, ..Default::default() };
        if m >= OPT_THRESHOLD * TILE_M && k >= OPT_THRESHOLD * TILE_AK {
            score.transa = 1.5;
        }
        if n >= OPT_THRESHOLD * TILE_N && k >= OPT_THRESHOLD * TILE_BK {
            score.transb = 1.5;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgemmParams, deps: &[Event]) -> Result<Event> {
        let [a, b, c] = operands(dispatcher, p)?;
        let tiles_m = div_ceil(dim(p.m), TILE_M);
        let tiles_n = div_ceil(dim(p.n), TILE_N);
        Launch::new(dispatcher.engine(), "Sgemm_n3_sg_ntransAB", "Sgemm_n3_sg_ntransAB")?
            .bind(kernel_args![p.m, p.n, p.k, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(SG_SIZE * tiles_m, tiles_n), Some(NdRange::d2(SG_SIZE, 1)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sgemm, _>(SgemmAsync).register::<Sgemm, _>(SgemmN3SgNtransAB);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(transa: Operation, m: i32, n: i32, k: i32) -> SgemmParams {
        SgemmParams {
            transa,
            transb: Operation::N,
            m,
            n,
            k,
            alpha: 1.0,
            a: Blob::null(),
            lda: m,
            b: Blob::null(),
            ldb: k,
            beta: 0.0,
            c: Blob::null(),
            ldc: m,
        }
    }

    #[test]
    fn tiled_kernel_needs_size() {
        let (_, d) = dispatcher();
        // 1.1 * 1.1 on both sides, the earlier candidate keeps the tie
        assert_eq!(d.select::<Sgemm>(&params(Operation::N, 16, 16, 16)).unwrap().name(), "Sgemm_async");
        assert_eq!(d.select::<Sgemm>(&params(Operation::N, 64, 16, 64)).unwrap().name(), "Sgemm_n3_sg_ntransAB");
        assert_eq!(d.select::<Sgemm>(&params(Operation::N, 16, 32, 64)).unwrap().name(), "Sgemm_n3_sg_ntransAB");
        assert_eq!(d.select::<Sgemm>(&params(Operation::T, 128, 128, 128)).unwrap().name(), "Sgemm_async");
    }

    #[test]
    fn tiled_geometry() {
        let a = vec![0.0f32; 70 * 64];
        let b = vec![0.0f32; 64 * 20];
        let mut c = vec![0.0f32; 70 * 20];
        let (engine, d) = dispatcher();
        let p = SgemmParams {
            a: Blob::from_slice(&a),
            b: Blob::from_slice(&b),
            c: Blob::from_mut_slice(&mut c),
            ..params(Operation::N, 70, 20, 64)
        };
        unsafe { d.execute::<Sgemm>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.kernel, "Sgemm_n3_sg_ntransAB");
        assert_eq!(s.global(), Some(NdRange::d2(16 * 5, 3)));
        assert_eq!(s.local(), Some(NdRange::d2(16, 1)));
    }
}
