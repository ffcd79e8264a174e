use iclblas_base::storage::{dim, matrix_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result, Side,
};

def_routine! {
    /// `C = alpha * A * B + beta * C` with symmetric `A` on `side`.
    Ssymm {
        side: Side,
        uplo: FillMode,
        m: i32,
        n: i32,
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

const BLOCK: i32 = 16;

pub struct SsymmNaive;

impl Implementation<Ssymm> for SsymmNaive {
    fn name(&self) -> &'static str {
        "Ssymm_naive"
    }

    fn accept(&self, _params: &SsymmParams) -> Option<SsymmScore> {
        Some(SsymmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsymmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a_cols = if p.side == Side::Left { p.m } else { p.n };
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, a_cols))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.ldb, p.n))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Ssymm_naive", "Ssymm_naive")?
            .bind(kernel_args![p.side, p.uplo, p.m, p.n, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n)), None)?
            .submit(deps)
    }
}

/// Left side, upper triangle, both sizes multiples of 16.
pub struct SsymmSimd116x16LeftUp;

impl Implementation<Ssymm> for SsymmSimd116x16LeftUp {
    fn name(&self) -> &'static str {
        "Ssymm_simd1_16x16_left_up"
    }

    fn accept(&self, params: &SsymmParams) -> Option<SsymmScore> {
        if params.uplo != FillMode::Upper || params.side != Side::Left || params.m % BLOCK != 0 || params.n % BLOCK != 0
        {
            return None;
        }
        Some(SsymmScore { m: 1.2, n: 1.2, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsymmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.m))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.ldb, p.n))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Ssymm_simd1_16x16_left_up", "Ssymm_simd1_16x16_left_up")?
            .bind(kernel_args![p.m, p.n, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n / BLOCK)), Some(NdRange::d2(BLOCK as usize, 1)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Ssymm, _>(SsymmNaive).register::<Ssymm, _>(SsymmSimd116x16LeftUp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(side: Side, uplo: FillMode, m: i32, n: i32) -> SsymmParams {
        SsymmParams {
            side,
            uplo,
            m,
            n,
            alpha: 1.0,
            a: Blob::null(),
            lda: m.max(n),
            b: Blob::null(),
            ldb: m,
            beta: 0.0,
            c: Blob::null(),
            ldc: m,
        }
    }

    #[test]
    fn left_up_blocks() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Ssymm>(&params(Side::Left, FillMode::Upper, 32, 48)).unwrap().name(), "Ssymm_simd1_16x16_left_up");
        assert_eq!(d.select::<Ssymm>(&params(Side::Left, FillMode::Upper, 32, 40)).unwrap().name(), "Ssymm_naive");
        assert_eq!(d.select::<Ssymm>(&params(Side::Right, FillMode::Upper, 32, 48)).unwrap().name(), "Ssymm_naive");
        assert_eq!(d.select::<Ssymm>(&params(Side::Left, FillMode::Lower, 32, 48)).unwrap().name(), "Ssymm_naive");
    }

    #[test]
    fn right_side_binds_n_columns_of_a() {
        let a = vec![0.0f32; 8 * 8];
        let b = vec![0.0f32; 4 * 8];
        let mut c = vec![0.0f32; 4 * 8];
        let (engine, d) = dispatcher();
        let p = SsymmParams {
            lda: 8,
            a: Blob::from_slice(&a),
            b: Blob::from_slice(&b),
            c: Blob::from_mut_slice(&mut c),
            ..params(Side::Right, FillMode::Lower, 4, 8)
        };
        unsafe { d.execute::<Ssymm>(&p, &[]).unwrap() };
        assert_eq!(engine.bindings()[0].buffer.bytes(), 64 * 4);
        assert_eq!(engine.last().unwrap().global(), Some(NdRange::d2(4, 8)));
    }
}
