use iclblas_base::storage::strided_len;
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Index of the element with the smallest magnitude.
    Isamin {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        result: Blob<i32>,
    }
}

const WORKING_TILE: usize = 16 * 16;

pub struct IsaminNaive;

impl Implementation<Isamin> for IsaminNaive {
    fn name(&self) -> &'static str {
        "Isamin_naive"
    }

    fn accept(&self, _params: &IsaminParams) -> Option<IsaminScore> {
        Some(IsaminScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IsaminParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Isamin_naive", "Isamin_naive")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Single group search over 16 wide rows.
///
/// Switched off, `accept` never takes any parameters.
pub struct IsaminOptSimd16;

impl Implementation<Isamin> for IsaminOptSimd16 {
    fn name(&self) -> &'static str {
        "Isamin_opt_simd16"
    }

    fn accept(&self, _params: &IsaminParams) -> Option<IsaminScore> {
        None
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IsaminParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Isamin_opt_simd16", "Isamin_opt_simd16")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(WORKING_TILE), Some(NdRange::d1(WORKING_TILE)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Isamin, _>(IsaminNaive).register::<Isamin, _>(IsaminOptSimd16);
}
