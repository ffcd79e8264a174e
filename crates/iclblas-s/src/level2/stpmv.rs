use iclblas_base::storage::{dim, packed_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Diag, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange,
    Operation, Registry, Result,
};

def_routine! {
    /// `x = op(A) * x` with packed triangular `A`.
    Stpmv {
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: Blob<f32>,
        x: Blob<f32>,
        incx: i32,
    }
}

pub struct StpmvNaive;

impl Implementation<Stpmv> for StpmvNaive {
    fn name(&self) -> &'static str {
        "Stpmv_naive"
    }

    fn accept(&self, _params: &StpmvParams) -> Option<StpmvScore> {
        Some(StpmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &StpmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let ap = engine.get_input_buffer(p.ap, packed_len(p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        // products are staged here before x is overwritten
        let parts = engine.get_temp_buffer::<f32>(dim(p.n))?;
        Launch::new(engine, "Stpmv_naive", "Stpmv_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.diag, p.n, ap, x, p.incx, parts])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Stpmv, _>(StpmvNaive);
}
