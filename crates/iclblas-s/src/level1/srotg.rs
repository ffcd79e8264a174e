use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Givens rotation: `a` becomes `r`, `b` becomes `z`.
    Srotg {
        a: Blob<f32>,
        b: Blob<f32>,
        c: Blob<f32>,
        s: Blob<f32>,
    }
}

pub struct SrotgNaive;

impl Implementation<Srotg> for SrotgNaive {
    fn name(&self) -> &'static str {
        "Srotg_naive"
    }

    fn accept(&self, _params: &SrotgParams) -> Option<SrotgScore> {
        Some(SrotgScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SrotgParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_inout_buffer(p.a, 1)?;
        let b = engine.get_inout_buffer(p.b, 1)?;
        let c = engine.get_output_buffer(p.c, 1)?;
        let s = engine.get_output_buffer(p.s, 1)?;
        Launch::new(engine, "Srotg_naive", "Srotg_naive")?
            .bind(kernel_args![a, b, c, s])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Srotg, _>(SrotgNaive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{Access, Routine};

    #[test]
    fn scalars_bound_one_each() {
        let (mut a, mut b, mut c, mut s) = (3.0f32, 4.0f32, 0.0f32, 0.0f32);
        let (engine, d) = dispatcher();
        let p = SrotgParams {
            a: Blob::from_mut(&mut a),
            b: Blob::from_mut(&mut b),
            c: Blob::from_mut(&mut c),
            s: Blob::from_mut(&mut s),
        };
        assert!(!Srotg::is_empty(&p));
        unsafe { d.execute::<Srotg>(&p, &[]).unwrap() };
        let access: Vec<_> = engine.bindings().iter().map(|b| b.buffer.access()).collect();
        assert_eq!(access, vec![Access::InOut, Access::InOut, Access::Output, Access::Output]);
        assert!(engine.bindings().iter().all(|b| b.buffer.bytes() == 4));
    }
}
