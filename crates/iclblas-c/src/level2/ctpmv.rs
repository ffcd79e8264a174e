use iclblas_base::storage::{dim, matrix_len, packed_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Diag, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange,
    Operation, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Packed triangular matrix times vector, in place.
    Ctpmv {
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: Blob<Complex32>,
        x: Blob<Complex32>,
        incx: i32,
    }
}

def_routine! {
    /// Packed triangular solve, in place.
    Ctpsv {
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: Blob<Complex32>,
        x: Blob<Complex32>,
        incx: i32,
    }
}

def_routine! {
    /// Triangular band solve with `k` diagonals, in place.
    Ctbsv {
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        k: i32,
        a: Blob<Complex32>,
        lda: i32,
        x: Blob<Complex32>,
        incx: i32,
    }
}

/// Single work item, partial products staged in a temporary of `n` elements.
pub struct CtpmvNaive;

impl Implementation<Ctpmv> for CtpmvNaive {
    fn name(&self) -> &'static str {
        "Ctpmv_naive"
    }

    fn accept(&self, _params: &CtpmvParams) -> Option<CtpmvScore> {
        Some(CtpmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CtpmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let ap = engine.get_input_buffer(p.ap, packed_len(p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let parts = engine.get_temp_buffer::<Complex32>(dim(p.n))?;
        Launch::new(engine, "Ctpmv_naive", "Ctpmv_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.diag, p.n, ap, x, p.incx, parts])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct CtpsvNaive;

impl Implementation<Ctpsv> for CtpsvNaive {
    fn name(&self) -> &'static str {
        "Ctpsv_naive"
    }

    fn accept(&self, _params: &CtpsvParams) -> Option<CtpsvScore> {
        Some(CtpsvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CtpsvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let ap = engine.get_input_buffer(p.ap, packed_len(p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Ctpsv_naive", "Ctpsv_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.diag, p.n, ap, x, p.incx])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct CtbsvNaive;

impl Implementation<Ctbsv> for CtbsvNaive {
    fn name(&self) -> &'static str {
        "Ctbsv_naive"
    }

    fn accept(&self, _params: &CtbsvParams) -> Option<CtbsvScore> {
        Some(CtbsvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CtbsvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Ctbsv_naive", "Ctbsv_naive")?
            .bind(kernel_args![p.uplo, p.trans, p.diag, p.n, p.k, a, p.lda, x, p.incx])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Ctpmv, _>(CtpmvNaive)
        .register::<Ctpsv, _>(CtpsvNaive)
        .register::<Ctbsv, _>(CtbsvNaive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{EngineError, Error, KernelArg};

    fn ctpmv(ap: &[Complex32], x: &mut [Complex32]) -> CtpmvParams {
        CtpmvParams {
            uplo: FillMode::Upper,
            trans: Operation::C,
            diag: Diag::Unit,
            n: 4,
            ap: Blob::from_slice(ap),
            x: Blob::from_mut_slice(x),
            incx: 1,
        }
    }

    #[test]
    fn ctpmv_stages_through_temp() {
        let ap = vec![Complex32::new(1.0, 0.0); 10];
        let mut x = vec![Complex32::new(1.0, 0.0); 4];
        let (engine, d) = dispatcher();
        unsafe { d.execute::<Ctpmv>(&ctpmv(&ap, &mut x), &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.arg(1), Some(&KernelArg::Int(Operation::C as i32)));
        assert_eq!(s.arg(2), Some(&KernelArg::Int(Diag::Unit as i32)));
        assert_eq!(s.buffer_arg(7).unwrap().id(), engine.temps()[0].id());
        assert_eq!(engine.temps()[0].bytes(), 4 * 8);
        assert_eq!(engine.bindings()[0].buffer.bytes(), 10 * 8);
    }

    #[test]
    fn ctpmv_temp_failure_is_reported() {
        let ap = vec![Complex32::new(1.0, 0.0); 10];
        let mut x = vec![Complex32::new(1.0, 0.0); 4];
        let (engine, d) = dispatcher();
        engine.fail_alloc_above(16);
        let err = unsafe { d.execute::<Ctpmv>(&ctpmv(&ap, &mut x), &[]).unwrap_err() };
        assert_eq!(err, Error::Engine(EngineError::AllocationFailed { bytes: 32 }));
        assert!(engine.submissions().is_empty());
    }

    #[test]
    fn ctbsv_single_item() {
        let a = vec![Complex32::new(1.0, 0.0); 2 * 6];
        let mut x = vec![Complex32::new(1.0, 0.0); 12];
        let (engine, d) = dispatcher();
        let p = CtbsvParams {
            uplo: FillMode::Lower,
            trans: Operation::N,
            diag: Diag::NonUnit,
            n: 6,
            k: 1,
            a: Blob::from_slice(&a),
            lda: 2,
            x: Blob::from_mut_slice(&mut x),
            incx: 2,
        };
        unsafe { d.execute::<Ctbsv>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.global(), Some(NdRange::d1(1)));
        assert_eq!(s.arg(4), Some(&KernelArg::Int(1)));
        assert_eq!(engine.bindings()[1].buffer.bytes(), 12 * 8);
    }
}
