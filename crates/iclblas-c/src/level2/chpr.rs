use iclblas_base::storage::{dim, div_ceil, packed_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};
use num_complex::Complex32;

def_routine! {
    /// Packed Hermitian rank one update, `alpha` is real.
    Chpr {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: Blob<Complex32>,
        incx: i32,
        ap: Blob<Complex32>,
    }
}

def_routine! {
    /// Packed Hermitian rank two update.
    Chpr2 {
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
        ap: Blob<Complex32>,
    }
}

const SIMD: usize = 16;

/// 16 columns per row of groups, the whole triangle in one launch.
fn triangle_tiles(n: i32) -> (NdRange, NdRange) {
    let tiles = div_ceil(dim(n), SIMD);
    (NdRange::d2(tiles * SIMD, tiles), NdRange::d2(SIMD, 1))
}

pub struct ChprNaive;

impl Implementation<Chpr> for ChprNaive {
    fn name(&self) -> &'static str {
        "Chpr_naive"
    }

    fn accept(&self, _params: &ChprParams) -> Option<ChprScore> {
        Some(ChprScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ChprParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        Launch::new(engine, "Chpr_naive", "Chpr_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, x, p.incx, ap])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct ChprEarlyReturnSimd16x1x1Lower;

impl Implementation<Chpr> for ChprEarlyReturnSimd16x1x1Lower {
    fn name(&self) -> &'static str {
        "Chpr_early_return_simd16x1x1_lower"
    }

    fn accept(&self, params: &ChprParams) -> Option<ChprScore> {
        if params.uplo != FillMode::Lower {
            return None;
        }
        Some(ChprScore { uplo: 1.2, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ChprParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        let (global, local) = triangle_tiles(p.n);
        Launch::new(engine, "Chpr_early_return_simd16x1x1_lower", "Chpr_early_return_simd16x1x1_lower")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, ap])?
            .geometry(global, Some(local))?
            .submit(deps)
    }
}

pub struct Chpr2Naive;

impl Implementation<Chpr2> for Chpr2Naive {
    fn name(&self) -> &'static str {
        "Chpr2_naive"
    }

    fn accept(&self, _params: &Chpr2Params) -> Option<Chpr2Score> {
        Some(Chpr2Score::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Chpr2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        Launch::new(engine, "Chpr2_naive", "Chpr2_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, x, p.incx, y, p.incy, ap])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct Chpr2EarlyReturnSimd16x1x1Upper;

impl Implementation<Chpr2> for Chpr2EarlyReturnSimd16x1x1Upper {
    fn name(&self) -> &'static str {
        "Chpr2_early_return_simd16x1x1_upper"
    }

    fn accept(&self, params: &Chpr2Params) -> Option<Chpr2Score> {
        if params.uplo != FillMode::Upper {
            return None;
        }
        Some(Chpr2Score { uplo: 1.2, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Chpr2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        let (global, local) = triangle_tiles(p.n);
        Launch::new(engine, "Chpr2_early_return_simd16x1x1_upper", "Chpr2_early_return_simd16x1x1_upper")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, y, p.incy, ap])?
            .geometry(global, Some(local))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Chpr, _>(ChprNaive)
        .register::<Chpr, _>(ChprEarlyReturnSimd16x1x1Lower)
        .register::<Chpr2, _>(Chpr2Naive)
        .register::<Chpr2, _>(Chpr2EarlyReturnSimd16x1x1Upper);
}
