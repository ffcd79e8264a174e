use iclblas_base::storage::{dim, div_ceil, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Registry, Result,
};

def_routine! {
    /// Rank one update `A = alpha * x * y^T + A`.
    Sger {
        m: i32,
        n: i32,
        alpha: f32,
        x: Blob<f32>,
        incx: i32,
        y: Blob<f32>,
        incy: i32,
        a: Blob<f32>,
        lda: i32,
    }
}

const SIMD: usize = 16;

pub struct SgerNoInc;

impl Implementation<Sger> for SgerNoInc {
    fn name(&self) -> &'static str {
        "Sger_no_inc"
    }

    fn accept(&self, params: &SgerParams) -> Option<SgerScore> {
        if params.incx != 1 || params.incy != 1 {
            return None;
        }
        Some(SgerScore { incx: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgerParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_input_buffer(p.x, dim(p.m))?;
        let y = engine.get_input_buffer(p.y, dim(p.n))?;
        let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
        Launch::new(engine, "Sger_no_inc", "Sger_no_inc")?
            .bind(kernel_args![p.alpha, x, y, a, p.lda])?
            .geometry(NdRange::d2(dim(p.m), dim(p.n)), None)?
            .submit(deps)
    }
}

/// Sub group tiles of `16 * block` rows by `block` columns.
fn submit_tiled(
    dispatcher: &Dispatcher,
    p: &SgerParams,
    kernel: &'static str,
    block: usize,
    deps: &[Event],
) -> Result<Event> {
    let engine = dispatcher.engine();
    let x = engine.get_input_buffer(p.x, strided_len(p.m, p.incx))?;
    let y = engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?;
    let a = engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?;
    let rows = div_ceil(dim(p.m), SIMD * block) * SIMD;
    let cols = div_ceil(dim(p.n), SIMD * block);
    Launch::new(engine, kernel, kernel)?
        .bind(kernel_args![p.m, p.n, p.alpha, x, p.incx, y, p.incy, a, p.lda])?
        .geometry(NdRange::d2(rows, cols), Some(NdRange::d2(SIMD, 1)))?
        .submit(deps)
}

pub struct SgerSimd16x1x1;

impl Implementation<Sger> for SgerSimd16x1x1 {
    fn name(&self) -> &'static str {
        "Sger_simd16x1x1"
    }

    fn accept(&self, _params: &SgerParams) -> Option<SgerScore> {
        Some(SgerScore { n: 1.05, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgerParams, deps: &[Event]) -> Result<Event> {
        submit_tiled(dispatcher, p, "Sger_simd16x1x1", 1, deps)
    }
}

/// Columns read as float4, needs `lda` to keep them aligned.
pub struct SgerSimd16x4x4;

impl Implementation<Sger> for SgerSimd16x4x4 {
    fn name(&self) -> &'static str {
        "Sger_simd16x4x4"
    }

    fn accept(&self, params: &SgerParams) -> Option<SgerScore> {
        if params.lda % 4 != 0 {
            return None;
        }
        Some(SgerScore { lda: 1.06, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgerParams, deps: &[Event]) -> Result<Event> {
        submit_tiled(dispatcher, p, "Sger_simd16x4x4", 4, deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<Sger, _>(SgerNoInc)
        .register::<Sger, _>(SgerSimd16x1x1)
        .register::<Sger, _>(SgerSimd16x4x4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dispatcher;

    fn params(incx: i32, lda: i32) -> SgerParams {
        SgerParams {
            m: 100,
            n: 70,
            alpha: 1.0,
            x: Blob::null(),
            incx,
            y: Blob::null(),
            incy: 1,
            a: Blob::null(),
            lda,
        }
    }

    #[test]
    fn candidate_table() {
        let (_, d) = dispatcher();
        assert_eq!(d.select::<Sger>(&params(1, 101)).unwrap().name(), "Sger_no_inc");
        assert_eq!(d.select::<Sger>(&params(1, 100)).unwrap().name(), "Sger_no_inc");
        assert_eq!(d.select::<Sger>(&params(2, 101)).unwrap().name(), "Sger_simd16x1x1");
        assert_eq!(d.select::<Sger>(&params(2, 100)).unwrap().name(), "Sger_simd16x4x4");
    }

    #[test]
    fn tile_geometry() {
        let x = vec![0.0f32; 200];
        let y = vec![0.0f32; 70];
        let mut a = vec![0.0f32; 100 * 70];
        let (engine, d) = dispatcher();
        let p = SgerParams {
            x: Blob::from_slice(&x),
            y: Blob::from_slice(&y),
            a: Blob::from_mut_slice(&mut a),
            ..params(2, 100)
        };
        unsafe { d.execute::<Sger>(&p, &[]).unwrap() };
        let s = engine.last().unwrap();
        assert_eq!(s.global(), Some(NdRange::d2(2 * 16, 2)));
        assert_eq!(s.local(), Some(NdRange::d2(16, 1)));
        unsafe { SgerSimd16x1x1.execute(&d, &p, &[]).unwrap() };
        assert_eq!(engine.last().unwrap().global(), Some(NdRange::d2(7 * 16, 5)));
    }
}
