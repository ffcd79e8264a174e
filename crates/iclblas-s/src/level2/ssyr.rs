use iclblas_base::storage::{dim, div_ceil, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};

def_routine! {
    /// Symmetric rank one update `A = alpha * x * x^T + A`.
    Ssyr {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: Blob<f32>,
        incx: i32,
        a: Blob<f32>,
        lda: i32,
    }
}

const VEC_SIZE: usize = 4;
const SIMD: usize = 16;
const TILE: usize = VEC_SIZE * SIMD;

pub struct SsyrNaive;

impl Implementation<Ssyr> for SsyrNaive {
    fn name(&self) -> &'static str {
        "Ssyr_naive"
    }

    fn accept(&self, _params: &SsyrParams) -> Option<SsyrScore> {
        Some(SsyrScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsyrParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        Launch::new(engine, "Ssyr_naive", "Ssyr_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, x, p.incx, a, p.lda])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Float4 columns, work items outside the triangle return at once.
pub struct SsyrEarlyReturnFloat4;

impl Implementation<Ssyr> for SsyrEarlyReturnFloat4 {
    fn name(&self) -> &'static str {
        "Ssyr_early_return_float4"
    }

    fn accept(&self, params: &SsyrParams) -> Option<SsyrScore> {
        if params.lda % VEC_SIZE as i32 != 0 {
            return None;
        }
        Some(SsyrScore { lda: 1.55, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsyrParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        Launch::new(engine, "Ssyr_early_return_float4", "Ssyr_early_return_float4")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, x, p.incx, a, p.lda])?
            .geometry(NdRange::d2(div_ceil(dim(p.n), VEC_SIZE), dim(p.n)), None)?
            .submit(deps)
    }
}

/// One sub group per 64x64 tile of the lower triangle.
pub struct SsyrSimd16x4x4Lower;

impl Implementation<Ssyr> for SsyrSimd16x4x4Lower {
    fn name(&self) -> &'static str {
        "Ssyr_simd16x4x4_lower"
    }

    fn accept(&self, params: &SsyrParams) -> Option<SsyrScore> {
        if params.uplo != FillMode::Lower || params.lda % VEC_SIZE as i32 != 0 {
            return None;
        }
        Some(SsyrScore { uplo: 1.1, lda: 1.4, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsyrParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        let tiles = div_ceil(dim(p.n), TILE);
        let tiles_total = (tiles + 1) * tiles / 2;
        Launch::new(engine, "Ssyr_simd16x4x4_lower", "Ssyr_simd16x4x4_lower")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, a, p.lda])?
            .geometry(NdRange::d1(tiles_total * SIMD), Some(NdRange::d1(SIMD)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Ssyr, _>(SsyrNaive)
        .register::<Ssyr, _>(SsyrEarlyReturnFloat4)
        .register::<Ssyr, _>(SsyrSimd16x4x4Lower);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(uplo: FillMode, n: i32, lda: i32) -> SsyrParams {
        SsyrParams { uplo, n, alpha: 1.0, x: Blob::null(), incx: 1, a: Blob::null(), lda }
    }

    #[test]
    fn float4_edges_out_lower_tiles() {
        let (_, d) = dispatcher();
        // 1.55 against 1.1 * 1.4
        assert_eq!(d.select::<Ssyr>(&params(FillMode::Lower, 100, 100)).unwrap().name(), "Ssyr_early_return_float4");
        assert_eq!(d.select::<Ssyr>(&params(FillMode::Upper, 100, 100)).unwrap().name(), "Ssyr_early_return_float4");
        assert_eq!(d.select::<Ssyr>(&params(FillMode::Lower, 100, 101)).unwrap().name(), "Ssyr_naive");
        let ranked: Vec<_> = d.rank::<Ssyr>(&params(FillMode::Lower, 100, 100)).iter().map(|s| s.name()).collect();
        assert_eq!(ranked, vec!["Ssyr_early_return_float4", "Ssyr_simd16x4x4_lower", "Ssyr_naive"]);
    }

    #[test]
    fn lower_tile_count() {
        let x = vec![0.0f32; 130];
        let mut a = vec![0.0f32; 132 * 130];
        let (engine, d) = dispatcher();
        let p = SsyrParams { x: Blob::from_slice(&x), a: Blob::from_mut_slice(&mut a), ..params(FillMode::Lower, 130, 132) };
        unsafe { SsyrSimd16x4x4Lower.execute(&d, &p, &[]).unwrap() };
        // 3 tiles per side, 6 in the triangle
        assert_eq!(engine.last().unwrap().global(), Some(NdRange::d1(6 * 16)));
        unsafe { SsyrEarlyReturnFloat4.execute(&d, &p, &[]).unwrap() };
        assert_eq!(engine.last().unwrap().global(), Some(NdRange::d2(33, 130)));
    }
}
