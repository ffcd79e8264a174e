use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Modified Givens rotation. `flag` is `param[0]`, read by the caller so
    /// candidates can pick the matrix form without touching device memory.
    Srotm {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        y: Blob<f32>,
        incy: i32,
        param: Blob<f32>,
        flag: f32,
    }
}

const PARAM_LEN: usize = 5;

const WI_ELEMS: usize = 4;
const SIMD: usize = 16;
const TILE: usize = WI_ELEMS * SIMD;

pub struct SrotmNaive;

impl Implementation<Srotm> for SrotmNaive {
    fn name(&self) -> &'static str {
        "Srotm_naive"
    }

    fn accept(&self, _params: &SrotmParams) -> Option<SrotmScore> {
        Some(SrotmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let len = strided_len(p.n, p.incx.min(p.incy));
        let x = engine.get_inout_buffer(p.x, len)?;
        let y = engine.get_inout_buffer(p.y, len)?;
        let param = engine.get_input_buffer(p.param, PARAM_LEN)?;
        Launch::new(engine, "Srotm_naive", "Srotm_naive")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, param])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// `flag == 1`: anti-diagonal ones, one work item per element.
pub struct SrotmAsync;

impl Implementation<Srotm> for SrotmAsync {
    fn name(&self) -> &'static str {
        "Srotm_async"
    }

    fn accept(&self, params: &SrotmParams) -> Option<SrotmScore> {
        if params.flag != 1.0 {
            return None;
        }
        Some(SrotmScore { param: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        let param = engine.get_input_buffer(p.param, PARAM_LEN)?;
        Launch::new(engine, "Srotm_async", "Srotm_async_anti_diagonal_ones")?
            .bind(kernel_args![x, p.incx, y, p.incy, param])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

/// `flag == -1`: full matrix on contiguous vectors, block reads of 64 elements.
pub struct SrotmBlockRead;

impl Implementation<Srotm> for SrotmBlockRead {
    fn name(&self) -> &'static str {
        "Srotm_block_read"
    }

    fn accept(&self, params: &SrotmParams) -> Option<SrotmScore> {
        if params.flag != -1.0 || dim(params.n) < TILE || params.incx != 1 || params.incy != 1 {
            return None;
        }
        Some(SrotmScore { param: 1.1, n: 1.1, incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, dim(p.n))?;
        let y = engine.get_inout_buffer(p.y, dim(p.n))?;
        let param = engine.get_input_buffer(p.param, PARAM_LEN)?;
        let work_groups = dim(p.n) / TILE;
        Launch::new(engine, "Srotm_block_read", "Srotm_noinc_full")?
            .bind(kernel_args![p.n, x, y, param])?
            .geometry(NdRange::d1(work_groups * SIMD), Some(NdRange::d1(SIMD)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Srotm, _>(SrotmNaive)
        .register::<Srotm, _>(SrotmAsync)
        .register::<Srotm, _>(SrotmBlockRead);
}
