use iclblas_base::storage::{dim, packed_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange, Registry,
    Result,
};

def_routine! {
    /// Symmetric packed rank one update.
    Sspr {
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: Blob<f32>,
        incx: i32,
        ap: Blob<f32>,
    }
}

pub struct SsprNaive;

impl Implementation<Sspr> for SsprNaive {
    fn name(&self) -> &'static str {
        "Sspr_naive"
    }

    fn accept(&self, _params: &SsprParams) -> Option<SsprScore> {
        Some(SsprScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsprParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        Launch::new(engine, "Sspr_naive", "Sspr_naive")?
            .bind(kernel_args![p.uplo, p.n, p.alpha, x, p.incx, ap])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct SsprNaiveLower;

impl Implementation<Sspr> for SsprNaiveLower {
    fn name(&self) -> &'static str {
        "Sspr_naive_lower"
    }

    fn accept(&self, params: &SsprParams) -> Option<SsprScore> {
        if params.uplo != FillMode::Lower {
            return None;
        }
        Some(SsprScore { uplo: 2.0, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SsprParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let ap = engine.get_inout_buffer(p.ap, packed_len(p.n))?;
        Launch::new(engine, "Sspr_naive_lower", "Sspr_naive_lower")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, ap])?
            .geometry(NdRange::d2(dim(p.n), dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sspr, _>(SsprNaive).register::<Sspr, _>(SsprNaiveLower);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    #[test]
    fn lower_has_its_own_kernel() {
        let (_, d) = dispatcher();
        let mut p = SsprParams { uplo: FillMode::Lower, n: 9, alpha: 1.0, x: Blob::null(), incx: 1, ap: Blob::null() };
        assert_eq!(d.select::<Sspr>(&p).unwrap().name(), "Sspr_naive_lower");
        p.uplo = FillMode::Upper;
        assert_eq!(d.select::<Sspr>(&p).unwrap().name(), "Sspr_naive");
    }
}
