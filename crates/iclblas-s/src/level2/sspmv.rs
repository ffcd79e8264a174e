use iclblas_base::storage::{packed_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};

def_routine! {
    /// Symmetric packed matrix times vector.
    Sspmv {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        ap: Blob<f32>,
        x: Blob<f32>,
        incx: i32,
        beta: f32,
        y: Blob<f32>,
        incy: i32,
    }
}

pub struct SspmvNaive;

impl Implementation<Sspmv> for SspmvNaive {
    fn name(&self) -> &'static str {
        "Sspmv_naive"
    }

    fn accept(&self, _params: &SspmvParams) -> Option<SspmvScore> {
        Some(SspmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SspmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let ap = engine.get_input_buffer(p.ap, packed_len(p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Sspmv_naive", "Sspmv_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, ap, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sspmv, _>(SspmvNaive);
}
