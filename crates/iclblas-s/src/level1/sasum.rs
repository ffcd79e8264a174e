use iclblas_base::storage::{dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Sum of absolute values of a vector.
    Sasum {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        result: Blob<f32>,
    }
}

const SIMD: usize = 16;
const SIMD_PER_GROUP: usize = 16;
const WORK_GROUPS: usize = 256;
const TILE: i32 = (SIMD * SIMD_PER_GROUP * WORK_GROUPS) as i32;

const SLM_GROUP_SIZE: usize = 256;

pub struct SasumNaive;

impl Implementation<Sasum> for SasumNaive {
    fn name(&self) -> &'static str {
        "Sasum_naive"
    }

    fn accept(&self, _params: &SasumParams) -> Option<SasumScore> {
        Some(SasumScore { n: 1.05, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SasumParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Sasum_naive", "Sasum_naive")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

/// Work group reduction repeated on the partial sums until one group is left.
pub struct SasumSlmReduction;

impl Implementation<Sasum> for SasumSlmReduction {
    fn name(&self) -> &'static str {
        "Sasum_slm_reduction"
    }

    fn accept(&self, _params: &SasumParams) -> Option<SasumScore> {
        Some(SasumScore { n: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SasumParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let n = dim(p.n);
        let mut groups = (n / SLM_GROUP_SIZE).max(1);
        let mut group_size = n.min(SLM_GROUP_SIZE);

        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        let subsum = engine.get_temp_buffer::<f32>(groups)?;

        let mut kernel = Launch::new(engine, "Sasum_slm_reduction", "Sasum_slm_reduction")?;
        let out = if groups > 1 { &subsum } else { &result };
        kernel
            .bind(kernel_args![p.n, &x, p.incx, out])?
            .geometry(NdRange::d1(groups * group_size), Some(NdRange::d1(group_size)))?;
        let mut ev = kernel.submit(deps)?;

        while groups > 1 {
            let remaining = groups;
            group_size = remaining.min(SLM_GROUP_SIZE);
            groups = (remaining / SLM_GROUP_SIZE).max(1);
            let out = if groups > 1 { &subsum } else { &result };
            kernel
                .bind(kernel_args![remaining as i32, &subsum, 1, out])?
                .geometry(NdRange::d1(groups * group_size), Some(NdRange::d1(group_size)))?;
            ev = kernel.submit(&[ev])?;
        }
        Ok(ev)
    }
}

pub struct SasumSimd16TwoStage;

impl Implementation<Sasum> for SasumSimd16TwoStage {
    fn name(&self) -> &'static str {
        "Sasum_simd16_two_stage"
    }

    fn accept(&self, params: &SasumParams) -> Option<SasumScore> {
        let mut score = SasumScore::default();
        if params.n >= TILE {
            score.n = 1.4;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SasumParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let group_sums = engine.get_temp_buffer::<f32>(WORK_GROUPS)?;
        let first = Launch::new(engine, "Sasum_simd16_first_stage", "Sasum_simd16_two_stage")?
            .bind(kernel_args![p.n, x, p.incx, &group_sums])?
            .geometry(NdRange::d3(SIMD, SIMD_PER_GROUP, WORK_GROUPS), Some(NdRange::d3(SIMD, SIMD_PER_GROUP, 1)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Sasum_simd16_second_stage", "Sasum_simd16_two_stage")?
            .bind(kernel_args![group_sums, result])?
            .geometry(NdRange::d2(SIMD, SIMD_PER_GROUP), Some(NdRange::d2(SIMD, SIMD_PER_GROUP)))?
            .submit(&[first])
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Sasum, _>(SasumNaive)
        .register::<Sasum, _>(SasumSlmReduction)
        .register::<Sasum, _>(SasumSimd16TwoStage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;
    use iclblas_base::{EngineError, Error, KernelArg};

    fn params(n: i32, x: &[f32], result: &mut f32) -> SasumParams {
        SasumParams { n, x: Blob::from_slice(x), incx: 1, result: Blob::from_mut(result) }
    }

    #[test]
    fn slm_reduction_below_tile() {
        let x = vec![1.0f32; 1000];
        let mut r = 0.0;
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Sasum>(&params(1000, &x, &mut r)).unwrap().name(), "Sasum_slm_reduction");
    }

    #[test]
    fn two_stage_from_tile() {
        let x = vec![1.0f32; TILE as usize];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        let p = params(TILE, &x, &mut r);
        assert_eq!(d.select::<Sasum>(&p).unwrap().name(), "Sasum_simd16_two_stage");

        let dep = engine.ready_event();
        let ev = unsafe { d.execute::<Sasum>(&p, &[dep.clone()]).unwrap() };
        let subs = engine.submissions();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].kernel, "Sasum_simd16_first_stage");
        assert_eq!(subs[0].deps, vec![dep.id()]);
        assert_eq!(subs[1].kernel, "Sasum_simd16_second_stage");
        assert_eq!(subs[1].deps, vec![subs[0].event]);
        assert_eq!(subs[1].event, ev.id());
        assert_eq!(subs[0].global(), Some(NdRange::d3(16, 16, 256)));
        assert_eq!(subs[0].local(), Some(NdRange::d3(16, 16, 1)));
        assert_eq!(subs[1].global(), Some(NdRange::d2(16, 16)));
        assert_eq!(engine.temps()[0].bytes(), 256 * 4);
        assert!(engine.depends_on(ev.id(), dep.id()));
    }

    #[test]
    fn failed_second_stage_is_not_retried() {
        let x = vec![1.0f32; TILE as usize];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        engine.fail_submit("Sasum_simd16_second_stage");
        let err = unsafe { d.execute::<Sasum>(&params(TILE, &x, &mut r), &[]).unwrap_err() };
        assert_eq!(
            err,
            Error::Engine(EngineError::SubmissionFailed {
                kernel: "Sasum_simd16_second_stage".into(),
                reason: "injected".into(),
            })
        );
        assert_eq!(engine.kernels(), vec!["Sasum_simd16_first_stage"]);
    }

    #[test]
    fn failed_slm_pass_stops_reduction() {
        let x = vec![1.0f32; 1000];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        engine.fail_submit("Sasum_slm_reduction");
        let err = unsafe { d.execute::<Sasum>(&params(1000, &x, &mut r), &[]).unwrap_err() };
        assert!(matches!(err, Error::Engine(EngineError::SubmissionFailed { .. })));
        assert!(engine.submissions().is_empty());
    }

    // groups: n / 256 per pass until a single group remains
    fn slm_passes(n: i32) -> usize {
        let x = vec![0.5f32; n as usize];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        let p = params(n, &x, &mut r);
        let ev = unsafe { SasumSlmReduction.execute(&d, &p, &[]).unwrap() };
        let subs = engine.submissions();
        for w in subs.windows(2) {
            assert_eq!(w[1].deps, vec![w[0].event]);
        }
        assert_eq!(subs.last().unwrap().event, ev.id());
        // final pass writes the caller's result
        let result_id = engine.bindings()[1].buffer.id();
        assert_eq!(subs.last().unwrap().buffer_arg(3).unwrap().id(), result_id);
        subs.len()
    }

    #[test]
    fn slm_reduction_trip_count() {
        assert_eq!(slm_passes(100), 1);
        assert_eq!(slm_passes(256), 1);
        assert_eq!(slm_passes(512), 2);
        assert_eq!(slm_passes(65536), 2);
        assert_eq!(slm_passes(65536 * 4), 3);
    }

    #[test]
    fn slm_reduction_geometry() {
        let x = vec![0.5f32; 1024];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        unsafe { SasumSlmReduction.execute(&d, &params(1024, &x, &mut r), &[]).unwrap() };
        let subs = engine.submissions();
        assert_eq!(subs[0].global(), Some(NdRange::d1(4 * 256)));
        assert_eq!(subs[0].local(), Some(NdRange::d1(256)));
        assert_eq!(subs[1].global(), Some(NdRange::d1(4)));
        assert_eq!(subs[1].arg(0), Some(&KernelArg::Int(4)));
        assert_eq!(subs[1].arg(2), Some(&KernelArg::Int(1)));
    }

    #[test]
    fn naive_binds_strided_input() {
        let x = vec![1.0f32; 30];
        let mut r = 0.0;
        let (engine, d) = dispatcher();
        let p = SasumParams { n: 10, x: Blob::from_slice(&x), incx: 3, result: Blob::from_mut(&mut r) };
        unsafe { SasumNaive.execute(&d, &p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(engine.bindings()[0].buffer.bytes(), 30 * 4);
        assert_eq!(s.arg(0), Some(&KernelArg::Int(10)));
        assert_eq!(s.arg(2), Some(&KernelArg::Int(3)));
        assert_eq!(s.global(), Some(NdRange::d1(10)));
    }
}
