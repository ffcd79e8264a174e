use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Plane rotation of the points `(x[i], y[i])`.
    Srot {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        y: Blob<f32>,
        incy: i32,
        c: f32,
        s: f32,
    }
}

pub struct SrotNaive;

impl Implementation<Srot> for SrotNaive {
    fn name(&self) -> &'static str {
        "Srot_naive"
    }

    fn accept(&self, _params: &SrotParams) -> Option<SrotScore> {
        Some(SrotScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.n, p.incy))?;
        Launch::new(engine, "Srot_naive", "Srot_naive")?
            .bind(kernel_args![x, p.incx, y, p.incy, p.c, p.s])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

/// Contiguous `y`, strided `x`.
pub struct SrotNoincy;

impl Implementation<Srot> for SrotNoincy {
    fn name(&self) -> &'static str {
        "Srot_noincy"
    }

    fn accept(&self, params: &SrotParams) -> Option<SrotScore> {
        if params.incx == 1 || params.incy != 1 {
            return None;
        }
        Some(SrotScore { incy: 2.0, incx: 1.5, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, dim(p.n))?;
        Launch::new(engine, "Srot_noincy", "Srot_noincy")?
            .bind(kernel_args![x, p.incx, y, p.c, p.s])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Srot, _>(SrotNaive).register::<Srot, _>(SrotNoincy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(incx: i32, incy: i32) -> SrotParams {
        SrotParams { n: 8, x: Blob::null(), incx, y: Blob::null(), incy, c: 0.6, s: 0.8 }
    }

    #[test]
    fn noincy_only_for_strided_x_and_unit_y() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Srot>(&params(2, 1)).unwrap().name(), "Srot_noincy");
        assert_eq!(d.select::<Srot>(&params(1, 1)).unwrap().name(), "Srot_naive");
        assert_eq!(d.select::<Srot>(&params(2, 2)).unwrap().name(), "Srot_naive");
        let s = d.select::<Srot>(&params(3, 1)).unwrap();
        assert!((s.total - 3.0).abs() < 1e-6);
    }
}
