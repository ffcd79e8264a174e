use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Index of the element with the largest magnitude.
    Isamax {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        result: Blob<i32>,
    }
}

const OPT_THREADS: usize = 128;

const GROUP_SIZE: usize = 256;
const GROUP_NUMBER: usize = 256;
const WORKING_THREADS: usize = GROUP_SIZE * GROUP_NUMBER;

pub struct IsamaxNaive;

impl Implementation<Isamax> for IsamaxNaive {
    fn name(&self) -> &'static str {
        "Isamax_naive"
    }

    fn accept(&self, _params: &IsamaxParams) -> Option<IsamaxScore> {
        Some(IsamaxScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IsamaxParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Isamax_naive", "Isamax_naive")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct IsamaxOpt1;

impl Implementation<Isamax> for IsamaxOpt1 {
    fn name(&self) -> &'static str {
        "Isamax_opt_1"
    }

    fn accept(&self, params: &IsamaxParams) -> Option<IsamaxScore> {
        if dim(params.n) < OPT_THREADS || params.incx != 1 {
            return None;
        }
        Some(IsamaxScore { n: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IsamaxParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, dim(p.n))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Isamax_opt_1", "Isamax_opt_1")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(OPT_THREADS), Some(NdRange::d1(OPT_THREADS)))?
            .submit(deps)
    }
}

/// Per group maximum and its index, then a single group picks the winner.
pub struct IsamaxOptSimd16TwoStage;

impl Implementation<Isamax> for IsamaxOptSimd16TwoStage {
    fn name(&self) -> &'static str {
        "Isamax_opt_simd16_2stage"
    }

    fn accept(&self, params: &IsamaxParams) -> Option<IsamaxScore> {
        if dim(params.n) < WORKING_THREADS || params.incx <= 0 {
            return None;
        }
        Some(IsamaxScore { n: 1.85, incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IsamaxParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        // value and index for every group
        let partial = engine.get_temp_buffer::<f32>(GROUP_NUMBER * 2)?;
        let first = Launch::new(engine, "Isamax_opt_simd16_2stage", "Isamax_opt_simd16_2stage")?
            .bind(kernel_args![p.n, x, p.incx, &partial])?
            .geometry(NdRange::d1(WORKING_THREADS), Some(NdRange::d1(GROUP_SIZE)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Isamax_opt_simd16_2stage_2", "Isamax_opt_simd16_2stage")?
            .bind(kernel_args![GROUP_NUMBER as i32, partial, result])?
            .geometry(NdRange::d1(GROUP_NUMBER), Some(NdRange::d1(GROUP_NUMBER)))?
            .submit(&[first])
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Isamax, _>(IsamaxNaive)
        .register::<Isamax, _>(IsamaxOpt1)
        .register::<Isamax, _>(IsamaxOptSimd16TwoStage);
}
