use iclblas_base::storage::strided_len;
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};
use num_complex::Complex32;

def_routine! {
    /// Dot product with `x` conjugated.
    Cdotc {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
        result: Blob<Complex32>,
    }
}

def_routine! {
    /// Unconjugated dot product.
    Cdotu {
        n: i32,
        x: Blob<Complex32>,
        incx: i32,
        y: Blob<Complex32>,
        incy: i32,
        result: Blob<Complex32>,
    }
}

const SIMD: usize = 16;
const SIMD_PER_GROUP: usize = 16;
const WORK_GROUPS: usize = 256;
const GROUP_TILE: i32 = (SIMD * SIMD_PER_GROUP) as i32;
const TILE: i32 = GROUP_TILE * WORK_GROUPS as i32;

pub struct CdotcSimd16x16;

impl Implementation<Cdotc> for CdotcSimd16x16 {
    fn name(&self) -> &'static str {
        "Cdotc_simd16x16"
    }

    fn accept(&self, params: &CdotcParams) -> Option<CdotcScore> {
        let mut score = CdotcScore::default();
        if params.n >= GROUP_TILE {
            score.n = 1.2;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CdotcParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Cdotc_simd16x16", "Cdotc_simd16x16")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, result])?
            .geometry(NdRange::d2(SIMD, SIMD_PER_GROUP), Some(NdRange::d2(SIMD, SIMD_PER_GROUP)))?
            .submit(deps)
    }
}

pub struct CdotcSimd16TwoStage;

impl Implementation<Cdotc> for CdotcSimd16TwoStage {
    fn name(&self) -> &'static str {
        "Cdotc_simd16_two_stage"
    }

    fn accept(&self, params: &CdotcParams) -> Option<CdotcScore> {
        let mut score = CdotcScore::default();
        if params.n >= TILE {
            score.n = 1.3;
        }
        Some(score)
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CdotcParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let group_sums = engine.get_temp_buffer::<Complex32>(WORK_GROUPS)?;
        let first = Launch::new(engine, "Cdotc_simd16_first_stage", "Cdotc_simd16_two_stage")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, &group_sums])?
            .geometry(NdRange::d3(SIMD, SIMD_PER_GROUP, WORK_GROUPS), Some(NdRange::d3(SIMD, SIMD_PER_GROUP, 1)))?
            .submit(deps)?;

        let result = engine.get_output_buffer(p.result, 1)?;
        let single_group = NdRange::d3(SIMD, SIMD_PER_GROUP, 1);
        Launch::new(engine, "Cdotc_simd16_second_stage", "Cdotc_simd16_two_stage")?
            .bind(kernel_args![group_sums, result])?
            .geometry(single_group, Some(single_group))?
            .submit(&[first])
    }
}

pub struct CdotuNaive;

impl Implementation<Cdotu> for CdotuNaive {
    fn name(&self) -> &'static str {
        "Cdotu_naive"
    }

    fn accept(&self, _params: &CdotuParams) -> Option<CdotuScore> {
        Some(CdotuScore { n: 1.05, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CdotuParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
        let result = engine.get_output_buffer(p.result, 1)?;
        Launch::new(engine, "Cdotu_naive", "Cdotu_naive")?
            .bind(kernel_args![p.n, x, p.incx, y, p.incy, result])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Cdotc, _>(CdotcSimd16x16)
        .register::<Cdotc, _>(CdotcSimd16TwoStage)
        .register::<Cdotu, _>(CdotuNaive);
}
