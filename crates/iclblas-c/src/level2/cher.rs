use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};
use num_complex::Complex32;

def_routine! {
    /// Hermitian rank one update `A += alpha * x * x^H`, `alpha` is real.
    Cher {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: Blob<Complex32>,
        incx: i32,
        a: Blob<Complex32>,
        lda: i32,
    }
}

def_routine! {
    /// Hermitian rank two update.
    Cher2 {
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
        a: Blob<Complex32>,
        lda: i32,
    }
}

/// Work items outside the `uplo` triangle return straight away.
pub struct CherEarlyReturn;

impl Implementation<Cher> for CherEarlyReturn {
    fn name(&self) -> &'static str {
        "Cher_early_return"
    }

    fn accept(&self, _params: &CherParams) -> Option<CherScore> {
        Some(CherScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CherParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        Launch::new(engine, "Cher_early_return", "Cher_early_return")?
            .bind(kernel_args![p.uplo, p.alpha, x, p.incx, a, p.lda])?
            .geometry(NdRange::d2(dim(p.n), dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct Cher2Naive;

impl Implementation<Cher2> for Cher2Naive {
    fn name(&self) -> &'static str {
        "Cher2_naive"
    }

    fn accept(&self, _params: &Cher2Params) -> Option<Cher2Score> {
        Some(Cher2Score::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Cher2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        Launch::new(engine, "Cher2_naive", "Cher2_naive")?
            .bind(kernel_args![p.uplo, p.alpha, x, p.incx, y, p.incy, a, p.lda])?
            .geometry(NdRange::d2(dim(p.n), dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Cher, _>(CherEarlyReturn).register::<Cher2, _>(Cher2Naive);
}
