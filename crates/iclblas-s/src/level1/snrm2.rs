use iclblas_base::storage::strided_len;
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Euclidean norm of a vector.
    Snrm2 {
        n: i32,
        x: Blob<f32>,
        incx: i32,
        result: Blob<f32>,
    }
}

const SIMD: usize = 16;
const SIMD_PER_GROUP: usize = 16;
const WORK_GROUPS: usize = 256;
const GROUP_TILE: i32 = (SIMD * SIMD_PER_GROUP) as i32;
const TILE: i32 = GROUP_TILE * WORK_GROUPS as i32;

/// One work group of 16x16.
pub struct Snrm2Simd16x16;

impl Implementation<Snrm2> for Snrm2Simd16x16 {
    fn name(&self) -> &'static str {
        "Snrm2_simd16x16"
    }

    fn accept(&self, params: &Snrm2Params) -> Option<Snrm2Score> {
        let mut score = Snrm2Score::default();
        if params.n >= GROUP_TILE {
            score.n = 1.2;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Snrm2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let result = engine.get_output_buffer(p.result, 1)?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        Launch::new(engine, "Snrm2_simd16x16", "Snrm2_simd16x16")?
            .bind(kernel_args![result, p.n, x, p.incx])?
            .geometry(NdRange::d2(SIMD, SIMD_PER_GROUP), Some(NdRange::d2(SIMD, SIMD_PER_GROUP)))?
            .submit(deps)
    }
}

pub struct Snrm2Simd16TwoStage;

impl Implementation<Snrm2> for Snrm2Simd16TwoStage {
    fn name(&self) -> &'static str {
        "Snrm2_simd16_two_stage"
    }

    fn accept(&self, params: &Snrm2Params) -> Option<Snrm2Score> {
        let mut score = Snrm2Score::default();
        if params.n >= TILE {
            score.n = 1.3;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Snrm2Params, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let group_sums = engine.get_temp_buffer::<f32>(WORK_GROUPS)?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let first = Launch::new(engine, "Snrm2_simd16_first_stage", "Snrm2_simd16_two_stage")?
            .bind(kernel_args![&group_sums, p.n, x, p.incx])?
            .geometry(NdRange::d3(SIMD, SIMD_PER_GROUP, WORK_GROUPS), Some(NdRange::d3(SIMD, SIMD_PER_GROUP, 1)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Snrm2_simd16_second_stage", "Snrm2_simd16_two_stage")?
            .bind(kernel_args![result, group_sums])?
            .geometry(NdRange::d2(SIMD, SIMD_PER_GROUP), Some(NdRange::d2(SIMD, SIMD_PER_GROUP)))?
            .submit(&[first])
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Snrm2, _>(Snrm2Simd16x16).register::<Snrm2, _>(Snrm2Simd16TwoStage);
}
