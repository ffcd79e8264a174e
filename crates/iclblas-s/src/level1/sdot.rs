use iclblas_base::storage::strided_len;
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    Sdot {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        y: Blob<f32>,
        incy: i32,
        result: Blob<f32>,
    }
}

const OPT_GROUPS: usize = 16;
const OPT_GROUP_SIZE: usize = 256;

pub struct SdotNaive;

impl Implementation<Sdot> for SdotNaive {
    fn name(&self) -> &'static str {
        "Sdot_naive"
    }

    fn accept(&self, _params: &SdotParams) -> Option<SdotScore> {
        Some(SdotScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SdotParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Sdot_naive", "Sdot_naive")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Sixteen groups of partial products, summed by a second kernel.
pub struct SdotOpt6;

impl Implementation<Sdot> for SdotOpt6 {
    fn name(&self) -> &'static str {
        "Sdot_opt_6"
    }

    fn accept(&self, _params: &SdotParams) -> Option<SdotScore> {
        Some(SdotScore { result: 7.0, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SdotParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let partial = engine.get_temp_buffer::<f32>(OPT_GROUPS)?;
        let first = Launch::new(engine, "Sdot_opt_6", "Sdot_opt_6")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, &partial])?
            .geometry(NdRange::d1(OPT_GROUPS * OPT_GROUP_SIZE), Some(NdRange::d1(OPT_GROUP_SIZE)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "sum", "Sdot_opt_6")?
            .bind(kernel_args![partial, result])?
            .geometry(NdRange::d1(OPT_GROUPS), Some(NdRange::d1(OPT_GROUPS)))?
            .submit(&[first])
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sdot, _>(SdotNaive).register::<Sdot, _>(SdotOpt6);
}
