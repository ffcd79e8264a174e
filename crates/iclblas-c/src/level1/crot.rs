use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Plane rotation of complex points with real `c` and `s`.
    Csrot {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
        c: f32,
        s: f32,
    }
}

def_routine! {
    /// Complex Givens rotation, real cosine and complex sine.
    Crotg {
        a: Blob<Complex32>,
        b: Blob<Complex32>,
        c: Blob<f32>,
        s: Blob<Complex32>,
    }
}

pub struct CsrotAsync;

impl Implementation<Csrot> for CsrotAsync {
    fn name(&self) -> &'static str {
        "Csrot_async"
    }

    fn accept(&self, _params: &CsrotParams) -> Option<CsrotScore> {
        Some(CsrotScore { n: 1.25, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CsrotParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Csrot_async", "Csrot_async")?
            .bind(kernel_args![x, p.incx, y, p.incy, p.c, p.s])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CrotgNaive;

impl Implementation<Crotg> for CrotgNaive {
    fn name(&self) -> &'static str {
        "Crotg_naive"
    }

    fn accept(&self, _params: &CrotgParams) -> Option<CrotgScore> {
        Some(CrotgScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CrotgParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_inout_buffer(p.a, 1)?;
        let b = engine.get_inout_buffer(p.b, 1)?;
        let c = engine.get_output_buffer(p.c, 1)?;
        let s = engine.get_output_buffer(p.s, 1)?;
        Launch::new(engine, "Crotg_naive", "Crotg_naive")?
            .bind(kernel_args![a, b, c, s])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Csrot, _>(CsrotAsync).register::<Crotg, _>(CrotgNaive);
}
