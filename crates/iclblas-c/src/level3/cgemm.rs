use iclblas_base::storage::{dim, matrix_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Operation,
    Registry, Result, Side,
};
use num_complex::Complex32;

def_routine! {
    /// `C = alpha * op(A) * op(B) + beta * C`
    Cgemm {
        transa: Operation,
        transb: Operation,
        m: i32,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        b: Blob<Complex32>,
        ldb: i32,
        beta: Complex32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

def_routine! {
    /// Symmetric `A` from the left or the right of `B`.
    Csymm {
        side: Side,
        uplo: FillMode,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: Blob<Complex32>,
        lda: i32,
        b: Blob<Complex32>,
        ldb: i32,
        beta: Complex32,
        c: Blob<Complex32>,
        ldc: i32,
    }
}

pub struct CgemmNaive;

impl Implementation<Cgemm> for CgemmNaive {
    fn name(&self) -> &'static str {
        "Cgemm_naive"
    }

    fn accept(&self, _params: &CgemmParams) -> Option<CgemmScore> {
        Some(CgemmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CgemmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.k))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.ldb, p.n))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Cgemm_naive", "Cgemm_naive")?
            .bind(kernel_args![p.transa, p.transb, p.m, p.n, p.k, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct CsymmNaive;

impl Implementation<Csymm> for CsymmNaive {
    fn name(&self) -> &'static str {
        "Csymm_naive"
    }

    fn accept(&self, _params: &CsymmParams) -> Option<CsymmScore> {
        Some(CsymmScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CsymmParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a_cols = if p.side == Side::Left { p.m } else { p.n };
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, a_cols))?;
        let b = engine.get_input_buffer(p.b, matrix_len(p.ldb, p.n))?;
        let c = engine.get_inout_buffer(p.c, matrix_len(p.ldc, p.n))?;
        Launch::new(engine, "Csymm_naive", "Csymm_naive")?
            .bind(kernel_args![p.side, p.uplo, p.m, p.n, p.alpha, a, p.lda, b, p.ldb, p.beta, c, p.ldc])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Cgemm, _>(CgemmNaive).register::<Csymm, _>(CsymmNaive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::c32;
    use iclblas_dev::random_vec;

    #[test]
    fn cgemm_passes_every_field() {
        let a: Vec<Complex32> = random_vec(4 * 3);
        let b: Vec<Complex32> = random_vec(3 * 5);
        let mut c: Vec<Complex32> = random_vec(4 * 5);
        let (engine, d) = dispatcher();
        let p = CgemmParams {
            transa: Operation::N,
            transb: Operation::N,
            m: 4,
            n: 5,
            k: 3,
            alpha: c32(1.0, 0.0),
            a: Blob::from_slice(&a),
            lda: 4,
            b: Blob::from_slice(&b),
            ldb: 3,
            beta: c32(0.0, 1.0),
            c: Blob::from_mut_slice(&mut c),
            ldc: 4,
        };
        unsafe { d.execute::<Cgemm>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.args().len(), 13);
        assert_eq!(s.global(), Some(NdRange::d1(1)));
        let bytes: Vec<_> = engine.bindings().iter().map(|b| b.buffer.bytes()).collect();
        assert_eq!(bytes, vec![12 * 8, 15 * 8, 20 * 8]);
    }

    #[test]
    fn csymm_a_follows_side() {
        let a: Vec<Complex32> = random_vec(6 * 6);
        let b: Vec<Complex32> = random_vec(6 * 4);
        let mut c: Vec<Complex32> = random_vec(6 * 4);
        let (engine, d) = dispatcher();
        for (side, a_elems) in [(Side::Left, 36), (Side::Right, 24)] {
            engine.clear();
            let p = CsymmParams {
                side,
                uplo: FillMode::Upper,
                m: 6,
                n: 4,
                alpha: c32(1.0, 0.0),
                a: Blob::from_slice(&a),
                lda: 6,
                b: Blob::from_slice(&b),
                ldb: 6,
                beta: c32(0.0, 0.0),
                c: Blob::from_mut_slice(&mut c),
                ldc: 6,
            };
            unsafe { d.execute::<Csymm>(&p, &[]).unwrap() };
            assert_eq!(engine.bindings()[0].buffer.bytes(), a_elems * 8);
            assert_eq!(engine.last().unwrap().global(), Some(NdRange::d2(6, 4)));
        }
    }
}
