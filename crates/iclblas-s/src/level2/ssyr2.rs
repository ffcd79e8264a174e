use iclblas_base::storage::{dim, matrix_len, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Buffer, Dispatcher, EngineExt, Event, FillMode, Implementation, Launch, NdRange,
    Registry, Result,
};

def_routine! {
    /// Symmetric rank two update `A = alpha * x * y^T + alpha * y * x^T + A`.
    Ssyr2 {
        uplo: FillMode,
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

fn operands(dispatcher: &Dispatcher, p: &Ssyr2Params) -> Result<[Buffer; 3]> {
    let engine = dispatcher.engine();
    Ok([
        engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?,
        engine.get_input_buffer(p.y, strided_len(p.n, p.incy))?,
        engine.get_inout_buffer(p.a, matrix_len(p.lda, p.n))?,
    ])
}

pub struct Ssyr2NaiveUpper;

impl Implementation<Ssyr2> for Ssyr2NaiveUpper {
    fn name(&self) -> &'static str {
        "Ssyr2_naive_upper"
    }

    fn accept(&self, params: &Ssyr2Params) -> Option<Ssyr2Score> {
        if params.uplo != FillMode::Upper {
            return None;
        }
        Some(Ssyr2Score { uplo: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Ssyr2Params, deps: &[Event]) -> Result<Event> {
        let [x, y, a] = operands(dispatcher, p)?;
        Launch::new(dispatcher.engine(), "Ssyr2_naive_upper", "Ssyr2_naive_upper")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, y, p.incy, a, p.lda])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

pub struct Ssyr2OptAsyncLower;

impl Implementation<Ssyr2> for Ssyr2OptAsyncLower {
    fn name(&self) -> &'static str {
        "Ssyr2_opt_async_lower"
    }

    fn accept(&self, params: &Ssyr2Params) -> Option<Ssyr2Score> {
        if params.uplo != FillMode::Lower {
            return None;
        }
        Some(Ssyr2Score { uplo: 1.1, n: 1.2, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &Ssyr2Params, deps: &[Event]) -> Result<Event> {
        let [x, y, a] = operands(dispatcher, p)?;
        Launch::new(dispatcher.engine(), "Ssyr2_opt_async_lower", "Ssyr2_opt_async_lower")?
            .bind(kernel_args![p.n, p.alpha, x, p.incx, y, p.incy, a, p.lda])?
            .geometry(NdRange::d2(dim(p.n), dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Ssyr2, _>(Ssyr2NaiveUpper).register::<Ssyr2, _>(Ssyr2OptAsyncLower);
}
