use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};
use num_complex::Complex32;

def_routine! {
    /// Hermitian matrix times vector.
    Chemv {
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        x: Blob<Complex32>,
        incx: i32,
        beta: Complex32,
        y: Blob<Complex32>,
        incy: i32,
    }
}

def_routine! {
    /// Hermitian band matrix with `k` super diagonals times vector.
    Chbmv {
        uplo: FillMode,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        x: Blob<Complex32>,
        incx: i32,
        beta: Complex32,
        y: Blob<Complex32>,
        incy: i32,
    }
}

pub struct ChemvNaive;

impl Implementation<Chemv> for ChemvNaive {
    fn name(&self) -> &'static str {
        "Chemv_naive"
    }

    fn accept(&self, _params: &ChemvParams) -> Option<ChemvScore> {
        Some(ChemvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ChemvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Chemv_naive", "Chemv_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct ChbmvNaive;

impl Implementation<Chbmv> for ChbmvNaive {
    fn name(&self) -> &'static str {
        "Chbmv_naive"
    }

    fn accept(&self, _params: &ChbmvParams) -> Option<ChbmvScore> {
        Some(ChbmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ChbmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Chbmv_naive", "Chbmv_naive")?
            .bind(kernel_args![p.uplo, p.n, p.k, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Chemv, _>(ChemvNaive).register::<Chbmv, _>(ChbmvNaive);
}
