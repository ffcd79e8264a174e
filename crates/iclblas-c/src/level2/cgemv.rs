use iclblas_base::storage::{banded_len, dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Operation, Registry,
    Result,
};
use num_complex::Complex32;

def_routine! {
    /// `y = alpha * op(A) * x + beta * y`
    Cgemv {
        trans: Operation,
        m: i32,
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
    /// General band matrix with `kl` sub and `ku` super diagonals.
    Cgbmv {
        trans: Operation,
        m: i32,
        n: i32,
        kl: i32,
        ku: i32,
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

pub struct CgemvNaive;

impl Implementation<Cgemv> for CgemvNaive {
    fn name(&self) -> &'static str {
        "Cgemv_naive"
    }

    fn accept(&self, _params: &CgemvParams) -> Option<CgemvScore> {
        Some(CgemvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CgemvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (x_len, y_len, rows) = if p.trans.is_trans() {
            (strided_len(p.m, p.incx), strided_len(p.n, p.incy), p.n)
        } else {
            (strided_len(p.n, p.incx), strided_len(p.m, p.incy), p.m)
        };
        let a = engine.get_input_buffer(p.a, dim(p.m) * dim(p.n))?;
        let x = engine.get_input_buffer(p.x, x_len)?;
        let y = engine.get_inout_buffer(p.y, y_len)?;
        Launch::new(engine, "Cgemv_naive", "Cgemv_naive")?
            .bind(kernel_args![p.trans, p.m, p.n, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(dim(rows)), None)?
            .submit(deps)
    }
}

/// `op(A) = A^T` only, one work item per element of `y`.
pub struct CgbmvTrans;

impl Implementation<Cgbmv> for CgbmvTrans {
    fn name(&self) -> &'static str {
        "Cgbmv_trans"
    }

    fn accept(&self, params: &CgbmvParams) -> Option<CgbmvScore> {
        if params.trans != Operation::T {
            return None;
        }
        Some(CgbmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CgbmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, banded_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.m, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Cgbmv_trans", "Cgbmv_trans")?
            .bind(kernel_args![p.m, p.kl, p.ku, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CgbmvNaive;

impl Implementation<Cgbmv> for CgbmvNaive {
    fn name(&self) -> &'static str {
        "Cgbmv_naive"
    }

    fn accept(&self, _params: &CgbmvParams) -> Option<CgbmvScore> {
        Some(CgbmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CgbmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (x_len, y_len) = if p.trans.is_trans() {
            (strided_len(p.m, p.incx), strided_len(p.n, p.incy))
        } else {
            (strided_len(p.n, p.incx), strided_len(p.m, p.incy))
        };
        let a = engine.get_input_buffer(p.a, banded_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, x_len)?;
        let y = engine.get_inout_buffer(p.y, y_len)?;
        Launch::new(engine, "Cgbmv_naive", "Cgbmv_naive")?
            .bind(kernel_args![p.trans, p.m, p.n, p.kl, p.ku, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Cgemv, _>(CgemvNaive)
        // ties go to the first registered, keep the transposed kernel ahead
        .register::<Cgbmv, _>(CgbmvTrans)
        .register::<Cgbmv, _>(CgbmvNaive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{c32, KernelArg};

    fn cgbmv(trans: Operation) -> CgbmvParams {
        CgbmvParams {
            trans,
            m: 8,
            n: 6,
            kl: 1,
            ku: 2,
            alpha: c32(1.0, 0.0),
            a: Blob::null(),
            lda: 4,
            x: Blob::null(),
            incx: 1,
            beta: c32(0.0, 0.0),
            y: Blob::null(),
            incy: 1,
        }
    }

    #[test]
    fn cgbmv_trans_only_for_t() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Cgbmv>(&cgbmv(Operation::T)).unwrap().name(), "Cgbmv_trans");
        assert_eq!(d.select::<Cgbmv>(&cgbmv(Operation::N)).unwrap().name(), "Cgbmv_naive");
        assert_eq!(d.select::<Cgbmv>(&cgbmv(Operation::C)).unwrap().name(), "Cgbmv_naive");
    }

    #[test]
    fn cgbmv_trans_drops_trans_argument() {
        let a = vec![c32(0.0, 0.0); 24];
        let x = vec![c32(1.0, 0.0); 8];
        let mut y = vec![c32(0.0, 0.0); 6];
        let (engine, d) = dispatcher();
        let p = CgbmvParams {
            a: Blob::from_slice(&a),
            x: Blob::from_slice(&x),
            y: Blob::from_mut_slice(&mut y),
            ..cgbmv(Operation::T)
        };
        unsafe { d.execute::<Cgbmv>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.args().len(), 11);
        assert_eq!(s.arg(0), Some(&KernelArg::Int(8)));
        assert_eq!(s.global(), Some(NdRange::d1(6)));
        let bytes: Vec<_> = engine.bindings().iter().map(|b| b.buffer.bytes()).collect();
        assert_eq!(bytes, vec![24 * 8, 8 * 8, 6 * 8]);
    }

    #[test]
    fn cgemv_threads_follow_output_length() {
        let a = vec![c32(0.0, 0.0); 12];
        let x = vec![c32(1.0, 0.0); 4];
        let mut y = vec![c32(0.0, 0.0); 4];
        let (engine, d) = dispatcher();
        for (trans, rows) in [(Operation::N, 3), (Operation::C, 4)] {
            let p = CgemvParams {
                trans,
                m: 3,
                n: 4,
                alpha: c32(1.0, 0.0),
                a: Blob::from_slice(&a),
                lda: 3,
                x: Blob::from_slice(&x),
                incx: 1,
                beta: c32(0.0, 0.0),
                y: Blob::from_mut_slice(&mut y),
                incy: 1,
            };
            unsafe { d.execute::<Cgemv>(&p, &[]).unwrap() };
            assert_eq!(engine.last().unwrap().global(), Some(NdRange::d1(rows)));
        }
    }
}
