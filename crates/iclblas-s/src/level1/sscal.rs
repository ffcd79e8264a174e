use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// `x = alpha * x`
    Sscal {
        n: i32,
        alpha: f32,
        x: Blob<f32>,
        incx: i32,
    }
}

const PACK: usize = 32;

pub struct SscalNaive;

impl Implementation<Sscal> for SscalNaive {
    fn name(&self) -> &'static str {
        "Sscal_naive"
    }

    fn accept(&self, _params: &SscalParams) -> Option<SscalScore> {
        Some(SscalScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SscalParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Sscal_naive", "Sscal_naive")?
            .bind(kernel_args![p.alpha, x, p.incx])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub struct SscalNoinc;

impl Implementation<Sscal> for SscalNoinc {
    fn name(&self) -> &'static str {
        "Sscal_noinc"
    }

    fn accept(&self, params: &SscalParams) -> Option<SscalScore> {
        if params.incx != 1 {
            return None;
        }
        Some(SscalScore { incx: 1.5, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SscalParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, dim(p.n))?;
        Launch::new(engine, "Sscal_noinc", "Sscal_noinc")?
            .bind(kernel_args![p.alpha, x])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

/// Each work item scales a run of elements, the kernel handles the tail.
pub struct SscalPacked;

impl Implementation<Sscal> for SscalPacked {
    fn name(&self) -> &'static str {
        "Sscal_packed"
    }

    fn accept(&self, params: &SscalParams) -> Option<SscalScore> {
        if dim(params.n) < PACK {
            return None;
        }
        Some(SscalScore { n: 1.6, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SscalParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let global = (dim(p.n) / PACK) * PACK;
        Launch::new(engine, "Sscal_packed", "Sscal_packed")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx])?
            .geometry(NdRange::d1(global), Some(NdRange::d1(PACK)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Sscal, _>(SscalNaive)
        .register::<Sscal, _>(SscalNoinc)
        .register::<Sscal, _>(SscalPacked);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(n: i32, incx: i32) -> SscalParams {
        SscalParams { n, alpha: 0.5, x: Blob::null(), incx }
    }

    #[test]
    fn selection_by_length_and_stride() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Sscal>(&params(10, 2)).unwrap().name(), "Sscal_naive");
        assert_eq!(d.select::<Sscal>(&params(10, 1)).unwrap().name(), "Sscal_noinc");
        assert_eq!(d.select::<Sscal>(&params(31, 1)).unwrap().name(), "Sscal_noinc");
        assert_eq!(d.select::<Sscal>(&params(32, 3)).unwrap().name(), "Sscal_packed");
        assert_eq!(d.select::<Sscal>(&params(1000, 1)).unwrap().name(), "Sscal_packed");
    }

    #[test]
    fn packed_rounds_down_to_pack() {
        let mut x = vec![1.0f32; 200];
        let (engine, d) = dispatcher();
        let p = SscalParams { x: Blob::from_mut_slice(&mut x), ..params(100, 2) };
        unsafe { d.execute::<Sscal>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.kernel, "Sscal_packed");
        assert_eq!(s.global(), Some(NdRange::d1(96)));
        assert_eq!(s.local(), Some(NdRange::d1(32)));
    }

    #[test]
    fn shared_operand_is_never_written() {
        let x = vec![1.0f32; 64];
        let (engine, d) = dispatcher();
        let p = SscalParams { x: Blob::from_slice(&x), ..params(64, 1) };
        let err = unsafe { d.execute::<Sscal>(&p, &[]).unwrap_err() };
        assert_eq!(err, iclblas_base::Error::InvalidValue("read-only operand"));
        assert!(engine.bindings().is_empty());
        assert!(engine.submissions().is_empty());
    }
}
