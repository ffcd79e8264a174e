use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Diag, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange,
    Operation, Registry, Result,
};

use crate::level2::sgemv::{Sgemv, SgemvParams};

def_routine! {
    /// Solves `op(A) * x = b` for triangular `A`, `b` is passed in `x`.
    Strsv {
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        a: Blob<f32>,
        lda: i32,
        x: Blob<f32>,
        incx: i32,
    }
}

const LWG_SIZE: usize = 256;
const SPLIT_SIZE: i32 = 32;

pub struct StrsvNaive;

impl Implementation<Strsv> for StrsvNaive {
    fn name(&self) -> &'static str {
        "Strsv_naive"
    }

    fn accept(&self, _params: &StrsvParams) -> Option<StrsvScore> {
        Some(StrsvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &StrsvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Strsv_naive", "Strsv_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.diag, p.n, a, p.lda, x, p.incx])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Upper, non transposed, contiguous `x` on a 16 byte boundary.
pub struct StrsvSimd16x16UpperNtransNoincAligned;

impl Implementation<Strsv> for StrsvSimd16x16UpperNtransNoincAligned {
    fn name(&self) -> &'static str {
        "Strsv_simd16x16_upper_ntrans_noinc_aligned"
    }

    fn accept(&self, params: &StrsvParams) -> Option<StrsvScore> {
        if params.uplo != FillMode::Upper
            || params.trans != Operation::N
            || params.incx != 1
            || !params.x.is_aligned(16)
        {
            return None;
        }
        Some(StrsvScore { uplo: 1.1, trans: 1.1, incx: 1.2, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &StrsvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Strsv_simd16x16_upper_ntrans", "Strsv_simd16x16_upper_ntrans_noinc_aligned")?
            .bind(kernel_args![p.diag, p.n, a, p.lda, x, p.incx])?
            .geometry(NdRange::d1(LWG_SIZE), Some(NdRange::d1(LWG_SIZE)))?
            .submit(deps)
    }
}

/// Block split: solve one diagonal block, update the rest of `x` with a
/// gemv, solve the other block. Each step is dispatched again, so the blocks
/// go to whichever candidate fits them.
///
/// Switched off, `accept` never takes any parameters.
pub struct StrsvRecursive;

/// Sizes and offsets of the three steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Split {
    first: i32,
    second: i32,
    multiply_m: i32,
    multiply_n: i32,
    first_a: usize,
    multiply_a: usize,
    second_a: usize,
    solve_x: usize,
    rest_x: usize,
}

/// Largest power of two not below `n / 2`, zero for `n < 2`.
fn first_block(n: i32) -> i32 {
    let half = (n / 2).max(0) as u32;
    if half == 0 {
        return 0;
    }
    half.next_power_of_two() as i32
}

fn split(p: &StrsvParams) -> Split {
    let lda = dim(p.lda);
    let inc = dim(p.incx);
    let mut first = first_block(p.n);
    let mut second = p.n - first;
    let mut multiply_m = second;
    let mut multiply_n = first;
    let (mut first_a, mut multiply_a, mut second_a, mut solve_x, mut rest_x) = (0, 0, 0, 0, 0);

    match (p.uplo, p.trans.is_trans()) {
        (FillMode::Upper, false) => {
            std::mem::swap(&mut first, &mut second);
            std::mem::swap(&mut multiply_m, &mut multiply_n);
            let s = dim(second);
            first_a = s + s * lda;
            multiply_a = s * lda;
            solve_x = s * inc;
        }
        (FillMode::Upper, true) => {
            std::mem::swap(&mut multiply_m, &mut multiply_n);
            let f = dim(first);
            multiply_a = f * lda;
            second_a = f + f * lda;
            rest_x = f * inc;
        }
        (FillMode::Lower, false) => {
            let f = dim(first);
            multiply_a = f;
            second_a = f + f * lda;
            rest_x = f * inc;
        }
        (FillMode::Lower, true) => {
            std::mem::swap(&mut first, &mut second);
            let s = dim(second);
            first_a = s + s * lda;
            multiply_a = s;
            solve_x = s * inc;
        }
    }
    Split { first, second, multiply_m, multiply_n, first_a, multiply_a, second_a, solve_x, rest_x }
}

impl Implementation<Strsv> for StrsvRecursive {
    fn name(&self) -> &'static str {
        "Strsv_recursive"
    }

    fn accept(&self, _params: &StrsvParams) -> Option<StrsvScore> {
        None
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &StrsvParams, deps: &[Event]) -> Result<Event> {
        let s = split(p);
        log::debug!("Strsv_recursive: n {} split into {} and {}", p.n, s.first, s.second);

        let first_solve = StrsvParams { n: s.first, a: p.a.offset(s.first_a), x: p.x.offset(s.solve_x), ..*p };
        let ev = dispatcher.execute::<Strsv>(&first_solve, deps)?;

        let update = SgemvParams {
            trans: p.trans,
            m: s.multiply_m,
            n: s.multiply_n,
            alpha: -1.0,
            a: p.a.offset(s.multiply_a),
            lda: p.lda,
            x: p.x.offset(s.solve_x),
            incx: p.incx,
            beta: 1.0,
            y: p.x.offset(s.rest_x),
            incy: p.incx,
        };
        let ev = dispatcher.execute::<Sgemv>(&update, &[ev])?;

        let second_solve = StrsvParams { n: s.second, a: p.a.offset(s.second_a), x: p.x.offset(s.rest_x), ..*p };
        dispatcher.execute::<Strsv>(&second_solve, &[ev])
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Strsv, _>(StrsvNaive)
        .register::<Strsv, _>(StrsvSimd16x16UpperNtransNoincAligned)
        .register::<Strsv, _>(StrsvRecursive);
}
