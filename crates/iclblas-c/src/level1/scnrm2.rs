use iclblas_base::storage::strided_len;
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Euclidean norm of a complex vector.
    Scnrm2 {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        result: Blob<f32>,
    }
}

def_routine! {
    /// Sum of `|re| + |im|` over a complex vector.
    Scasum {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        result: Blob<f32>,
    }
}

const SIMD: usize = 16;
const SIMD_PER_GROUP: usize = 16;
const WORK_GROUPS: usize = 256;
const TILE: i32 = (SIMD * SIMD_PER_GROUP * WORK_GROUPS) as i32;

const LOCMEM_THREADS: usize = 256;

/// One sub group walks the whole vector.
pub struct Scnrm2Simd16SingleThread;

impl Implementation<Scnrm2> for Scnrm2Simd16SingleThread {
    fn name(&self) -> &'static str {
        "Scnrm2_simd16_single_thread"
    }

    fn accept(&self, params: &Scnrm2Params) -> Option<Scnrm2Score> {
        let mut score = Scnrm2Score::default();
        if params.n >= SIMD as i32 {
            score.n = 1.1;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Scnrm2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Scnrm2_simd16_single_thread", "Scnrm2_simd16_single_thread")?
            .bind(kernel_args![p.n, x, p.incx, result])?
            .geometry(NdRange::d1(SIMD), Some(NdRange::d1(SIMD)))?
            .submit(deps)
    }
}

pub struct Scnrm2Simd16TwoStage;

impl Implementation<Scnrm2> for Scnrm2Simd16TwoStage {
    fn name(&self) -> &'static str {
        "Scnrm2_simd16_two_stage"
    }

    fn accept(&self, params: &Scnrm2Params) -> Option<Scnrm2Score> {
        let mut score = Scnrm2Score::default();
        if params.n >= TILE {
            score.n = 1.3;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Scnrm2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let group_sums = engine.get_temp_buffer::<f32>(WORK_GROUPS)?;
        let first = Launch::new(engine, "Scnrm2_simd16_first_stage", "Scnrm2_simd16_two_stage")?
            .bind(kernel_args![p.n, x, p.incx, &group_sums])?
            .geometry(NdRange::d3(SIMD, SIMD_PER_GROUP, WORK_GROUPS), Some(NdRange::d3(SIMD, SIMD_PER_GROUP, 1)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Scnrm2_simd16_second_stage", "Scnrm2_simd16_two_stage")?
            .bind(kernel_args![group_sums, result])?
            .geometry(NdRange::d2(SIMD, SIMD_PER_GROUP), Some(NdRange::d2(SIMD, SIMD_PER_GROUP)))?
            .submit(&[first])
    }
}

/// Single work group reducing through local memory.
pub struct ScasumOptLocmem;

impl Implementation<Scasum> for ScasumOptLocmem {
    fn name(&self) -> &'static str {
        "Scasum_opt_locmem"
    }

    fn accept(&self, params: &ScasumParams) -> Option<ScasumScore> {
        if params.n < LOCMEM_THREADS as i32 || params.incx != 1 {
            return None;
        }
        Some(ScasumScore { n: 1.2, incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ScasumParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let result = engine.get_inout_buffer(p.result, 1)?;
        Launch::new(engine, "Scasum_opt_locmem", "Scasum_opt_locmem")?
            .bind(kernel_args![p.n, x, result])?
            .geometry(NdRange::d1(LOCMEM_THREADS), Some(NdRange::d1(LOCMEM_THREADS)))?
            .submit(deps)
    }
}

pub struct ScasumSimd16TwoStage;

impl Implementation<Scasum> for ScasumSimd16TwoStage {
    fn name(&self) -> &'static str {
        "Scasum_simd16_two_stage"
    }

    fn accept(&self, params: &ScasumParams) -> Option<ScasumScore> {
        let mut score = ScasumScore::default();
        if params.n >= TILE {
            score.n = 1.3;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &ScasumParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let group_sums = engine.get_temp_buffer::<f32>(WORK_GROUPS)?;
        let first = Launch::new(engine, "Scasum_simd16_two_stage_1", "Scasum_simd16_two_stage")?
            .bind(kernel_args![p.n, x, p.incx, &group_sums])?
            .geometry(NdRange::d3(SIMD, SIMD_PER_GROUP, WORK_GROUPS), Some(NdRange::d3(SIMD, SIMD_PER_GROUP, 1)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        let single_group = NdRange::d3(SIMD, SIMD_PER_GROUP, 1);
        Launch::new(engine, "Scasum_simd16_two_stage_2", "Scasum_simd16_two_stage")?
            .bind(kernel_args![group_sums, result])?
            .geometry(single_group, Some(single_group))?
            .submit(&[first])
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Scnrm2, _>(Scnrm2Simd16SingleThread)
        .register::<Scnrm2, _>(Scnrm2Simd16TwoStage)
        .register::<Scasum, _>(ScasumOptLocmem)
        .register::<Scasum, _>(ScasumSimd16TwoStage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    #[test]
    fn scnrm2_thresholds() {
        let (_, d) = dispatcher();
        let p = |n| Scnrm2Params { n, x: Blob::null(), incx: 1, result: Blob::null() };
        assert_eq!(d.select::<Scnrm2>(&p(8)).unwrap().name(), "Scnrm2_simd16_single_thread");
        assert_eq!(d.select::<Scnrm2>(&p(16)).unwrap().name(), "Scnrm2_simd16_single_thread");
        assert_eq!(d.select::<Scnrm2>(&p(65536)).unwrap().name(), "Scnrm2_simd16_two_stage");
    }

    #[test]
    fn scasum_locmem_then_two_stage() {
        let (_, d) = dispatcher();
        let p = |n, incx| ScasumParams { n, x: Blob::null(), incx, result: Blob::null() };
        assert_eq!(d.select::<Scasum>(&p(100, 1)).unwrap().name(), "Scasum_simd16_two_stage");
        assert_eq!(d.select::<Scasum>(&p(256, 1)).unwrap().name(), "Scasum_opt_locmem");
        assert_eq!(d.select::<Scasum>(&p(256, 2)).unwrap().name(), "Scasum_simd16_two_stage");
        // 1.3 against 1.2 * 1.1
        assert_eq!(d.select::<Scasum>(&p(65536, 1)).unwrap().name(), "Scasum_opt_locmem");
        assert_eq!(d.select::<Scasum>(&p(65536, 2)).unwrap().name(), "Scasum_simd16_two_stage");
    }

    #[test]
    fn scasum_partials_are_floats() {
        let x = vec![Complex32::new(1.0, -1.0); 512];
        let mut r = 0.0f32;
        let (engine, d) = dispatcher();
        let p = ScasumParams { n: 256, x: Blob::from_slice(&x), incx: 2, result: Blob::from_mut(&mut r) };
        unsafe { d.execute::<Scasum>(&p, &[]).unwrap() };
        assert_eq!(engine.kernels(), vec!["Scasum_simd16_two_stage_1", "Scasum_simd16_two_stage_2"]);
        assert_eq!(engine.temps()[0].bytes(), 256 * 4);
        let subs = engine.submissions();
        assert_eq!(subs[1].deps, vec![subs[0].event]);
    }
}
