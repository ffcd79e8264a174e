use iclblas_base::storage::{dim, matrix_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Diag, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange,
    Operation, Registry, Result, Side,
};
use num_complex::Complex32;

def_routine! {
    /// `C = alpha * op(A) * B` or `alpha * B * op(A)` with triangular `A`.
    Ctrmm {
        side: Side,
        uplo: FillMode,
        transa: Operation,
        diag: Diag,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        b: Blob<Complex32>,
        ldb: i32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

def_routine! {
    /// Triangular solve with many right hand sides, `B` is overwritten.
    Ctrsm {
        side: Side,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        b: Blob<Complex32>,
        ldb: i32,
    }
}

pub struct CtrmmNaive;

impl Implementation<Ctrmm> for CtrmmNaive {
    fn name(&self) -> &'static str {
        "Ctrmm_naive"
    }

    fn accept(&self, _params: &CtrmmParams) -> Option<CtrmmScore> {
        Some(CtrmmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CtrmmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (a_cols, b_cols) = match p.side {
            Side::Left => (p.m, p.n),
            Side::Right => (p.n, p.m),
        };
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, a_cols))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.ldb, b_cols))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Ctrmm_naive", "Ctrmm_naive")?
            .bind(kernel_args![
                p.side, p.uplo, p.transa, p.diag, p.m, p.n, p.alpha, a, p.lda, b, p.ldb, c, p.ldc
            ])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CtrsmNaive;

impl Implementation<Ctrsm> for CtrsmNaive {
    fn name(&self) -> &'static str {
        "Ctrsm_naive"
    }

    fn accept(&self, _params: &CtrsmParams) -> Option<CtrsmScore> {
        Some(CtrsmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CtrsmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a_cols = if p.side == Side::Left { p.m } else { p.n };
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, a_cols))?;
        let b = engine.get_inout_buffer(p.b, matrix_len(p.ldb, p.n))?;
        Launch::new(engine, "Ctrsm_naive", "Ctrsm_naive")?
            .bind(kernel_args![p.side, p.uplo, p.trans, p.diag, p.m, p.n, p.alpha, a, p.lda, b, p.ldb])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Ctrmm, _>(CtrmmNaive).register::<Ctrsm, _>(CtrsmNaive);
}
