use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Index of the element with the largest `|re| + |im|`.
    Icamax {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        result: Blob<i32>,
    }
}

def_routine! {
    /// Index of the element with the smallest `|re| + |im|`.
    Icamin {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        result: Blob<i32>,
    }
}

const OPT_THREADS: usize = 128;

pub struct IcamaxNaive;

impl Implementation<Icamax> for IcamaxNaive {
    fn name(&self) -> &'static str {
        "Icamax_naive"
    }

    fn accept(&self, _params: &IcamaxParams) -> Option<IcamaxScore> {
        Some(IcamaxScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IcamaxParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Icamax_naive", "Icamax_naive")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct IcaminNaive;

impl Implementation<Icamin> for IcaminNaive {
    fn name(&self) -> &'static str {
        "Icamin_naive"
    }

    fn accept(&self, _params: &IcaminParams) -> Option<IcaminScore> {
        Some(IcaminScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IcaminParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_inout_buffer(p.result, 1)?;
        Launch::new(engine, "Icamin_naive", "Icamin_naive")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// One group of 128, partial minima kept in local memory.
pub struct IcaminOpt2Stage;

impl Implementation<Icamin> for IcaminOpt2Stage {
    fn name(&self) -> &'static str {
        "Icamin_opt_2stage"
    }

    fn accept(&self, params: &IcaminParams) -> Option<IcaminScore> {
        if dim(params.n) < OPT_THREADS || params.incx != 1 {
            return None;
        }
        Some(IcaminScore { n: 1.2, incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &IcaminParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, dim(p.n))?;
        let result = engine.get_inout_buffer(p.result, 1)?;
        Launch::new(engine, "Icamin_opt_2stage", "Icamin_opt_2stage")?
            .bind(kernel_args![p.n, x, result])?
            .geometry(NdRange::d1(OPT_THREADS), Some(NdRange::d1(OPT_THREADS)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Icamax, _>(IcamaxNaive)
        .register::<Icamin, _>(IcaminNaive)
        .register::<Icamin, _>(IcaminOpt2Stage);
}
