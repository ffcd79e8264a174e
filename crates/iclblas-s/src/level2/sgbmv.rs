use iclblas_base::storage::{banded_len, dim, strided_len};
use iclblas_base::{
    def_routine, kernel_args, Blob, Dispatcher, EngineExt, Event, Implementation, Launch, NdRange, Operation, Registry,
    Result,
};

def_routine! {
    /// General band matrix times vector, `kl` sub and `ku` super diagonals.
    Sgbmv {
        trans: Operation,
        m: i32,
        n: i32,
        kl: i32,
        ku: i32,
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

const ROW_SIMD: usize = 8;

pub struct SgbmvNaive;

impl Implementation<Sgbmv> for SgbmvNaive {
    fn name(&self) -> &'static str {
        "Sgbmv_naive"
    }

    fn accept(&self, _params: &SgbmvParams) -> Option<SgbmvScore> {
        Some(SgbmvScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgbmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (x_len, y_len) = if p.trans.is_trans() {
            (strided_len(p.m, p.incx), strided_len(p.n, p.incy))
        } else {
            (strided_len(p.n, p.incx), strided_len(p.m, p.incy))
        };
        let a = engine.get_input_buffer(p.a, banded_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, x_len)?;
        let y = engine.get_inout_buffer(p.y, y_len)?;
        Launch::new(engine, "Sgbmv_naive", "Sgbmv_naive")?
            .bind(kernel_args![p.trans, p.m, p.n, p.kl, p.ku, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(1), None)?
            .submit(deps)
    }
}

/// Non transposed, eight work items per row of `y`.
pub struct SgbmvSimdOneRowNtrans;

impl Implementation<Sgbmv> for SgbmvSimdOneRowNtrans {
    fn name(&self) -> &'static str {
        "Sgbmv_simd_one_row_ntrans"
    }

    fn accept(&self, params: &SgbmvParams) -> Option<SgbmvScore> {
        if params.trans != Operation::N {
            return None;
        }
        Some(SgbmvScore { trans: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SgbmvParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let a = engine.get_input_buffer(p.a, banded_len(p.lda, p.n))?;
        let x = engine.get_input_buffer(p.x, strided_len(p.n, p.incx))?;
        let y = engine.get_inout_buffer(p.y, strided_len(p.m, p.incy))?;
        Launch::new(engine, "Sgbmv_simd_one_row_ntrans", "Sgbmv_simd_one_row_ntrans")?
            .bind(kernel_args![p.m, p.n, p.kl, p.ku, p.alpha, a, p.lda, x, p.incx, p.beta, y, p.incy])?
            .geometry(NdRange::d1(dim(p.m) * ROW_SIMD), Some(NdRange::d1(ROW_SIMD)))?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register::<Sgbmv, _>(SgbmvNaive).register::<Sgbmv, _>(SgbmvSimdOneRowNtrans);
}
