use iclblas_base::storage::{dim, matrix_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Operation,
    Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Hermitian rank k update, real `alpha` and `beta`.
    Cherk {
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: f32,
        a: Blob<Complex32>,
        lda: i32,
        beta: f32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

def_routine! {
    /// Symmetric rank k update.
    Csyrk {
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        beta: Complex32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

def_routine! {
    /// Hermitian rank 2k update, `beta` is real.
    Cher2k {
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        b: Blob<Complex32>,
        ldb: i32,
        beta: f32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

// `A` is n x k untransposed, k x n otherwise
fn rank_k_cols(trans: Operation, n: i32, k: i32) -> i32 {
    if trans.is_trans() {
        n
    } else {
        k
    }
}

pub struct CherkNaive;

impl Implementation<Cherk> for CherkNaive {
    fn name(&self) -> &'static str {
        "Cherk_naive"
    }

    fn accept(&self, _params: &CherkParams) -> Option<CherkScore> {
        Some(CherkScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CherkParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, rank_k_cols(p.trans, p.n, p.k)))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Cherk_naive", "Cherk_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.n, p.k, p.alpha, a, p.lda, p.beta, c, p.ldc])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct CsyrkNaive;

impl Implementation<Csyrk> for CsyrkNaive {
    fn name(&self) -> &'static str {
        "Csyrk_naive"
    }

    fn accept(&self, _params: &CsyrkParams) -> Option<CsyrkScore> {
        Some(CsyrkScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CsyrkParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, rank_k_cols(p.trans, p.n, p.k)))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Csyrk_naive", "Csyrk_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.n, p.k, p.alpha, a, p.lda, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(dim(p.n), dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct Cher2kNaive;

impl Implementation<Cher2k> for Cher2kNaive {
    fn name(&self) -> &'static str {
        "Cher2k_naive"
    }

    fn accept(&self, _params: &Cher2kParams) -> Option<Cher2kScore> {
        Some(Cher2kScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Cher2kParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        // both operands bound with lda
        let cols = if p.trans.is_trans() { p.k } else { p.n };
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, cols))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.lda, cols))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Cher2k_naive", "Cher2k_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.n, p.k, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Cherk, _>(CherkNaive)
        .register::<Csyrk, _>(CsyrkNaive)
        .register::<Cher2k, _>(Cher2kNaive);
}
