use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Operation, Registry,
    Result,
};

def_routine! {
    /// `y = alpha * op(A) * x + beta * y`
    Sgemv {
        trans: Operation,
        m: i32,
        n: i32,
        alpha: f32,
        a: Blob<f32>,
        lda: i32,
        x: Blob<f32>,
        incx: i32,
        beta: f32,
        y: Blob<f32>,
        incy: i32,
    }
}

const SIMD: usize = 16;

/// Element counts of `x` and `y`, which side is `m` depends on `trans`.
fn vector_lens(p: &SgemvParams) -> (usize, usize) {
    if p.trans.is_trans() {
        (strided_len(p.m, p.incx), strided_len(p.n, p.incy))
    } else {
        (strided_len(p.n, p.incx), strided_len(p.m, p.incy))
    }
}

fn bind_all(dispatcher: &Dispatcher, p: &SgemvParams, kernel: &'static str) -> Result<Launch> {
    let engine = dispatcher.engine();
    let (x_len, y_len) = vector_lens(p);
    let a = engine.get_input_buffer(p.a, matrix_len(p.lda, p.n))?;
    let x = engine.get_input_buffer(p.x, x_len)?;
    let y = engine.get_inout_buffer(p.y, y_len)?;
    let mut launch = Launch::new(engine, kernel, kernel)?;
    launch.bind(kernel_args![p.trans, p.m, p.n, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?;
    Ok(launch)
}

/// One work item per output element.
pub struct SgemvNaiveAsync;

impl Implementation<Sgemv> for SgemvNaiveAsync {
    fn name(&self) -> &'static str {
        "Sgemv_naive_async"
    }

    fn accept(&self, _params: &SgemvParams) -> Option<SgemvScore> {
        Some(SgemvScore { n: 2.0, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgemvParams, deps: &[Event]) -> Result<Event> {
        let rows = if p.trans.is_trans() { p.n } else { p.m };
        bind_all(dispatcher, p, "Sgemv_naive_async")?.geometry(NdRange::d1(dim(rows)), None)?.submit(deps)
    }
}

/// Transposed only, a 16 wide sub group reduces one column of `A`.
pub struct SgemvOptSimd16TC;

impl Implementation<Sgemv> for SgemvOptSimd16TC {
    fn name(&self) -> &'static str {
        "Sgemv_opt_simd16_TC"
    }

    fn accept(&self, params: &SgemvParams) -> Option<SgemvScore> {
        if dim(params.m) <= SIMD || !params.trans.is_trans() || params.incx <= 0 || params.incy <= 0 {
            return None;
        }
        Some(SgemvScore { n: 3.0, trans: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgemvParams, deps: &[Event]) -> Result<Event> {
        bind_all(dispatcher, p, "Sgemv_opt_simd16_TC")?
            .geometry(NdRange::d2(dim(p.n), SIMD), Some(NdRange::d2(1, SIMD)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sgemv, _>(SgemvNaiveAsync).register::<Sgemv, _>(SgemvOptSimd16TC);
}
