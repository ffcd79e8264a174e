use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    Caxpy {
        n: i32,
        alpha: Complex32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
    }
}

def_routine! {
    Cscal {
        n: i32,
        alpha: Complex32,
        x: Blob<Complex32>,
        incx: i32,
    }
}

pub struct CaxpyNaive;

impl Implementation<Caxpy> for CaxpyNaive {
    fn name(&self) -> &'static str {
        "Caxpy_naive"
    }

    fn accept(&self, _params: &CaxpyParams) -> Option<CaxpyScore> {
        Some(CaxpyScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CaxpyParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Caxpy_naive", "Caxpy_naive")?
            .bind(kernel_args![p.alpha, x, p.incx, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CaxpyNoincy;

impl Implementation<Caxpy> for CaxpyNoincy {
    fn name(&self) -> &'static str {
        "Caxpy_noincy"
    }

    fn accept(&self, params: &CaxpyParams) -> Option<CaxpyScore> {
        if params.incy != 1 {
            return None;
        }
        Some(CaxpyScore { incy: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CaxpyParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, dim(p.n))?;
        Launch::new(engine, "Caxpy_noincy", "Caxpy_noincy")?
            .bind(kernel_args![p.alpha, x, p.incx, y])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CscalNaive;

impl Implementation<Cscal> for CscalNaive {
    fn name(&self) -> &'static str {
        "Cscal_naive"
    }

    fn accept(&self, _params: &CscalParams) -> Option<CscalScore> {
        Some(CscalScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CscalParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Cscal_naive", "Cscal_naive")?
            .bind(kernel_args![p.alpha, x, p.incx])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct CscalNoinc;

impl Implementation<Cscal> for CscalNoinc {
    fn name(&self) -> &'static str {
        "Cscal_noinc"
    }

    fn accept(&self, params: &CscalParams) -> Option<CscalScore> {
        if params.incx != 1 {
            return None;
        }
        Some(CscalScore { incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CscalParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, dim(p.n))?;
        Launch::new(engine, "Cscal_noinc", "Cscal_noinc")?
            .bind(kernel_args![p.alpha, x])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Caxpy, _>(CaxpyNaive)
        .register::<Caxpy, _>(CaxpyNoincy)
        .register::<Cscal, _>(CscalNaive)
        .register::<Cscal, _>(CscalNoinc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{c32, KernelArg};
    use iclblas_dev::generate_inc;

    #[test]
    fn unit_strides_pick_noinc_variants() {
        let (_, d) = dispatcher();
        for inc in generate_inc() {
            let axpy = CaxpyParams { n: 10, alpha: c32(1.0, 0.0), x: Blob::null(), incx: 3, y: Blob::null(), incy: inc };
            let scal = CscalParams { n: 10, alpha: c32(1.0, 0.0), x: Blob::null(), incx: inc };
            let unit = inc == 1;
            assert_eq!(d.select::<Caxpy>(&axpy).unwrap().name() == "Caxpy_noincy", unit);
            assert_eq!(d.select::<Cscal>(&scal).unwrap().name() == "Cscal_noinc", unit);
        }
    }

    #[test]
    fn complex_alpha_is_one_argument() {
        let mut x = vec![c32(1.0, 1.0); 4];
        let (engine, d) = dispatcher();
        let p = CscalParams { n: 4, alpha: c32(0.0, 2.0), x: Blob::from_mut_slice(&mut x), incx: 1 };
        unsafe { d.execute::<Cscal>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.arg(0), Some(&KernelArg::Complex(c32(0.0, 2.0))));
        assert_eq!(s.args().len(), 2);
    }
}
