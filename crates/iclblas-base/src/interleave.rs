//! Element size agnostic copy and swap, shared by every precision.
//!
//! Operands are byte blobs, strides count elements of `elem_size` bytes.

use crate::storage::dim;
use crate::{
    kernel_args, Blob, Dispatcher, EngineExt, Error, Event, Implementation, Launch, NdRange, Registry, Result,
};

crate::def_routine! {
    /// `dst[i * dst_pad] = src[i * src_pad]` for `num` elements.
    CopyInterleave {
        num: i32,
        src: Blob<u8>,
        dst: Blob<u8>,
        elem_size: i32,
        src_pad: i32,
        dst_pad: i32,
    }
}

crate::def_routine! {
    /// Exchanges `n` elements of two strided vectors.
    SwapInterleave {
        n: i32,
        x: Blob<u8>,
        y: Blob<u8>,
        elem_size: i32,
        incx: i32,
        incy: i32,
    }
}

/// Stride in bytes as the kernels take it, `field` names the stride on overflow.
fn byte_stride(inc: i32, elem_size: i32, field: &'static str) -> Result<i32> {
    inc.checked_mul(elem_size).ok_or(Error::InvalidValue(field))
}

/// Bytes spanned by `n` elements `inc` apart.
fn span(n: i32, inc: i32, elem_size: i32, field: &'static str) -> Result<usize> {
    dim(n)
        .checked_mul(dim(inc))
        .and_then(|v| v.checked_mul(dim(elem_size)))
        .ok_or(Error::InvalidValue(field))
}

fn copy_sizes(p: &CopyInterleaveParams) -> Result<(usize, usize)> {
    Ok((span(p.num, p.src_pad, p.elem_size, "src_pad")?, span(p.num, p.dst_pad, p.elem_size, "dst_pad")?))
}

pub struct CopyInterleaveNaive;

impl Implementation<CopyInterleave> for CopyInterleaveNaive {
    fn name(&self) -> &'static str {
        "copy_interleave_naive"
    }

    fn accept(&self, _params: &CopyInterleaveParams) -> Option<CopyInterleaveScore> {
        Some(CopyInterleaveScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CopyInterleaveParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (src_size, dst_size) = copy_sizes(p)?;
        let src = engine.get_input_buffer(p.src, src_size)?;
        let dst = engine.get_inout_buffer(p.dst, dst_size)?;
        Launch::new(engine, "copy_interleave_naive", "copy_interleave_naive")?
            .bind(kernel_args![src, dst, p.elem_size, p.src_pad, p.dst_pad])?
            .geometry(NdRange::d1(dim(p.num)), None)?
            .submit(deps)
    }
}

/// Four byte elements moved as dwords.
pub struct CopyInterleaveDwords;

impl Implementation<CopyInterleave> for CopyInterleaveDwords {
    fn name(&self) -> &'static str {
        "copy_interleave_dwords"
    }

    fn accept(&self, params: &CopyInterleaveParams) -> Option<CopyInterleaveScore> {
        if params.elem_size != 4 {
            return None;
        }
        Some(CopyInterleaveScore { elem_size: 1.5, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &CopyInterleaveParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let (src_size, dst_size) = copy_sizes(p)?;
        let src = engine.get_input_buffer(p.src, src_size)?;
        let dst = engine.get_inout_buffer(p.dst, dst_size)?;
        Launch::new(engine, "copy_interleave_dwords", "copy_interleave_dwords")?
            .bind(kernel_args![src, dst, p.src_pad, p.dst_pad])?
            .geometry(NdRange::d1(dim(p.num)), None)?
            .submit(deps)
    }
}

pub struct SwapInterleaveNaive;

impl Implementation<SwapInterleave> for SwapInterleaveNaive {
    fn name(&self) -> &'static str {
        "swap_interleave_naive"
    }

    fn accept(&self, _params: &SwapInterleaveParams) -> Option<SwapInterleaveScore> {
        Some(SwapInterleaveScore::default())
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SwapInterleaveParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let byte_incx = byte_stride(p.incx, p.elem_size, "incx")?;
        let byte_incy = byte_stride(p.incy, p.elem_size, "incy")?;
        let x = engine.get_inout_buffer(p.x, span(p.n, p.incx, p.elem_size, "incx")?)?;
        let y = engine.get_inout_buffer(p.y, span(p.n, p.incy, p.elem_size, "incy")?)?;
        Launch::new(engine, "swap_interleave_naive", "swap_interleave_naive")?
            .bind(kernel_args![x, byte_incx, y, byte_incy, p.elem_size])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

/// Eight byte elements moved as qwords, strides stay in elements.
pub struct SwapInterleaveQwords;

impl Implementation<SwapInterleave> for SwapInterleaveQwords {
    fn name(&self) -> &'static str {
        "swap_interleave_qwords"
    }

    fn accept(&self, params: &SwapInterleaveParams) -> Option<SwapInterleaveScore> {
        if params.elem_size != 8 {
            return None;
        }
        Some(SwapInterleaveScore { elem_size: 1.1, ..Default::default() })
    }

    unsafe fn execute(&self, dispatcher: &Dispatcher, p: &SwapInterleaveParams, deps: &[Event]) -> Result<Event> {
        let engine = dispatcher.engine();
        let x = engine.get_inout_buffer(p.x, span(p.n, p.incx, p.elem_size, "incx")?)?;
        let y = engine.get_inout_buffer(p.y, span(p.n, p.incy, p.elem_size, "incy")?)?;
        Launch::new(engine, "swap_interleave_qwords", "swap_interleave_qwords")?
            .bind(kernel_args![x, p.incx, y, p.incy])?
            .geometry(NdRange::d1(dim(p.n)), None)?
            .submit(deps)
    }
}

pub fn register(registry: &mut Registry) {
    registry
        .register::<CopyInterleave, _>(CopyInterleaveNaive)
        .register::<CopyInterleave, _>(CopyInterleaveDwords)
        .register::<SwapInterleave, _>(SwapInterleaveNaive)
        .register::<SwapInterleave, _>(SwapInterleaveQwords);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::select;

    fn copy_params(elem_size: i32) -> CopyInterleaveParams {
        CopyInterleaveParams {
            num: 10,
            src: Blob::null(),
            dst: Blob::null(),
            elem_size,
            src_pad: 1,
            dst_pad: 2,
        }
    }

    #[test]
    fn dwords_only_for_four_byte_elements() {
        let mut reg = Registry::new();
        register(&mut reg);
        let cands = reg.implementations::<CopyInterleave>();
        assert_eq!(select(cands, &copy_params(4)).unwrap().name(), "copy_interleave_dwords");
        assert_eq!(select(cands, &copy_params(8)).unwrap().name(), "copy_interleave_naive");
    }

    #[test]
    fn qwords_only_for_eight_byte_elements() {
        let mut reg = Registry::new();
        register(&mut reg);
        let mut p = SwapInterleaveParams { n: 4, x: Blob::null(), y: Blob::null(), elem_size: 8, incx: 1, incy: 1 };
        let cands = reg.implementations::<SwapInterleave>();
        assert_eq!(select(cands, &p).unwrap().name(), "swap_interleave_qwords");
        p.elem_size = 4;
        assert_eq!(select(cands, &p).unwrap().name(), "swap_interleave_naive");
    }

    #[test]
    fn oversized_strides_are_errors() {
        assert_eq!(byte_stride(600_000_000, 4, "incx"), Err(Error::InvalidValue("incx")));
        assert_eq!(byte_stride(3, 8, "incy"), Ok(24));
        assert_eq!(span(i32::MAX, i32::MAX, 8, "incy"), Err(Error::InvalidValue("incy")));
        assert_eq!(span(10, 3, 4, "incx"), Ok(120));
        let p = CopyInterleaveParams { num: i32::MAX, src_pad: i32::MAX, ..copy_params(8) };
        assert_eq!(copy_sizes(&p), Err(Error::InvalidValue("src_pad")));
        assert_eq!(copy_sizes(&copy_params(4)), Ok((40, 80)));
    }
}
