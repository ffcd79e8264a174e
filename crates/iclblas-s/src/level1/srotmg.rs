use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Builds the modified Givens rotation zeroing `sqrt(d2) * b2`.
    Srotmg {
        d1: Blob<f32>,
        d2: Blob<f32>,
        b1: Blob<f32>,
        b2: f32,
        result: Blob<f32>,
    }
}

pub struct SrotmgNaive;

impl Implementation<Srotmg> for SrotmgNaive {
    fn name(&self) -> &'static str {
        "Srotmg_naive"
    }

    fn accept(&self, _params: &SrotmgParams) -> Option<SrotmgScore> {
        Some(SrotmgScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotmgParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let d1 = engine.get_inout_buffer(p.d1, 1)?;
        let d2 = engine.get_inout_buffer(p.d2, 1)?;
        let b1 = engine.get_inout_buffer(p.b1, 1)?;
        let result = engine.get_output_buffer(p.result, 5)?;
        Launch::new(engine, "Srotmg_naive", "Srotmg_naive")?
            .bind(kernel_args![d1, d2, b1, p.b2, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Srotmg, _>(SrotmgNaive);
}
