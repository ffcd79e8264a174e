use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// `y = alpha * x + y`
    Saxpy {
        n: i32,
        alpha: f32,
        x: Blob<f32>,
        incx: i32,
        y: Blob<f32>,
        incy: i32,
    }
}

pub struct SaxpyNaive;

impl Implementation<Saxpy> for SaxpyNaive {
    fn name(&self) -> &'static str {
        "Saxpy_naive"
    }

    fn accept(&self, _params: &SaxpyParams) -> Option<SaxpyScore> {
        Some(SaxpyScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SaxpyParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Saxpy_naive", "Saxpy_naive")?
            .bind(kernel_args![p.alpha, x, p.incx, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct SaxpyNoinc;

impl Implementation<Saxpy> for SaxpyNoinc {
    fn name(&self) -> &'static str {
        "Saxpy_noinc"
    }

    fn accept(&self, params: &SaxpyParams) -> Option<SaxpyScore> {
        if params.incx != 1 || params.incy != 1 {
            return None;
        }
        Some(SaxpyScore { incx: 1.1, incy: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SaxpyParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, dim(p.n))?;
        let y = engine.get_inout_buffer(p.y, dim(p.n))?;
        Launch::new(engine, "Saxpy_noinc", "Saxpy_noinc")?
            .bind(kernel_args![p.alpha, x, y])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Saxpy, _>(SaxpyNaive).register::<Saxpy, _>(SaxpyNoinc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{Access, KernelArg};
    use iclblas_dev::generate_inc;

    fn params(incx: i32, incy: i32) -> SaxpyParams {
        SaxpyParams { n: 100, alpha: 2.0, x: Blob::null(), incx, y: Blob::null(), incy }
    }

    #[test]
    fn noinc_needs_unit_strides() {
        let (_, d) = dispatcher();
        for incx in generate_inc() {
            for incy in generate_inc() {
                let expected = if incx == 1 && incy == 1 { "Saxpy_noinc" } else { "Saxpy_naive" };
                assert_eq!(d.select::<Saxpy>(&params(incx, incy)).unwrap().name(), expected);
            }
        }
    }

    #[test]
    fn noinc_binds_y_inout() {
        let x = vec![1.0f32; 100];
        let mut y = vec![0.0f32; 100];
        let (engine, d) = dispatcher();
        let p = SaxpyParams { x: Blob::from_slice(&x), y: Blob::from_mut_slice(&mut y), ..params(1, 1) };
        unsafe { d.execute::<Saxpy>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.kernel, "Saxpy_noinc");
        assert_eq!(s.arg(0), Some(&KernelArg::Float(2.0)));
        assert_eq!(s.buffer_arg(2).unwrap().access(), Access::InOut);
        assert_eq!(s.global(), Some(NdRange::d1(100)));
    }
}
