use iclblas_base::interleave::{CopyInterleave, CopyInterleaveParams, SwapInterleave, SwapInterleaveParams};
use iclblas_c::{
    Caxpy, CaxpyParams, Cdotc, CdotcParams, Cdotu, CdotuParams, Crotg, CrotgParams, Cscal, CscalParams, Csrot,
    CsrotParams, Icamax, IcamaxParams, Icamin, IcaminParams, Scasum, ScasumParams, Scnrm2, Scnrm2Params,
};
use iclblas_s::{
    Isamax, IsamaxParams, Isamin, IsaminParams, Sasum, SasumParams, Saxpy, SaxpyParams, Sdot, SdotParams, Snrm2,
    Snrm2Params, Srot, SrotParams, Srotg, SrotgParams, Srotm, SrotmParams, Srotmg, SrotmgParams, Sscal, SscalParams,
};
use num_complex::Complex32;

use crate::{check_inc, Blob, Handle, Result};

const F32_SIZE: i32 = 4;
const C32_SIZE: i32 = 8;

#[allow(clippy::too_many_arguments)]
impl Handle {
    /// `sum |x_i|`, `result` is 0 for `n <= 0`.
    pub fn sasum(&self, n: i32, x: &[f32], incx: i32, result: &mut f32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0.0;
            return Ok(());
        }
        self.call::<Sasum>(&SasumParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    /// `result` is 0 for `n <= 0`.
    pub fn sdot(&self, n: i32, x: &[f32], incx: i32, y: &[f32], incy: i32, result: &mut f32) -> Result<()> {
        if n <= 0 {
            *result = 0.0;
            return Ok(());
        }
        self.call::<Sdot>(&SdotParams {
            n,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            result: Blob::from_mut(result),
        })
    }

    /// `y += alpha * x`, nothing runs for `alpha == 0`.
    pub fn saxpy(&self, n: i32, alpha: f32, x: &[f32], incx: i32, y: &mut [f32], incy: i32) -> Result<()> {
        if n <= 0 || alpha == 0.0 {
            return Ok(());
        }
        self.call::<Saxpy>(&SaxpyParams { n, alpha, x: Blob::from_slice(x), incx, y: Blob::from_mut_slice(y), incy })
    }

    pub fn sscal(&self, n: i32, alpha: f32, x: &mut [f32], incx: i32) -> Result<()> {
        self.call::<Sscal>(&SscalParams { n, alpha, x: Blob::from_mut_slice(x), incx })
    }

    pub fn snrm2(&self, n: i32, x: &[f32], incx: i32, result: &mut f32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0.0;
            return Ok(());
        }
        self.call::<Snrm2>(&Snrm2Params { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    /// One based index of the largest `|x_i|`, 0 for empty input.
    pub fn isamax(&self, n: i32, x: &[f32], incx: i32, result: &mut i32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0;
            return Ok(());
        }
        self.call::<Isamax>(&IsamaxParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn isamin(&self, n: i32, x: &[f32], incx: i32, result: &mut i32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0;
            return Ok(());
        }
        self.call::<Isamin>(&IsaminParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn srot(&self, n: i32, x: &mut [f32], incx: i32, y: &mut [f32], incy: i32, c: f32, s: f32) -> Result<()> {
        if n <= 0 || (c == 1.0 && s == 0.0) {
            return Ok(());
        }
        self.call::<Srot>(&SrotParams {
            n,
            x: Blob::from_mut_slice(x),
            incx,
            y: Blob::from_mut_slice(y),
            incy,
            c,
            s,
        })
    }

    /// Modified Givens rotation, `param[0]` is the flag selecting the matrix shape.
    pub fn srotm(&self, n: i32, x: &mut [f32], incx: i32, y: &mut [f32], incy: i32, param: &[f32; 5]) -> Result<()> {
        let flag = param[0];
        if n <= 0 || flag == -2.0 {
            return Ok(());
        }
        self.call::<Srotm>(&SrotmParams {
            n,
            x: Blob::from_mut_slice(x),
            incx,
            y: Blob::from_mut_slice(y),
            incy,
            param: Blob::from_slice(param),
            flag,
        })
    }

    /// Builds the modified Givens matrix zeroing `sqrt(d2) * b2`.
    ///
    /// Degenerate inputs are answered on the host without a kernel.
    pub fn srotmg(&self, d1: &mut f32, d2: &mut f32, b1: &mut f32, b2: f32, param: &mut [f32; 5]) -> Result<()> {
        if *d1 < 0.0 {
            *param = [-1.0, 0.0, 0.0, 0.0, 0.0];
            return Ok(());
        }
        if *d2 == 0.0 || b2 == 0.0 {
            param[0] = -2.0;
            return Ok(());
        }
        // |d2 * b2^2| >= |d1 * b1^2| with d2 < 0
        if -*d2 * b2 * b2 >= *d1 * *b1 * *b1 {
            *param = [-1.0, 0.0, 0.0, 0.0, 0.0];
            return Ok(());
        }
        self.call::<Srotmg>(&SrotmgParams {
            d1: Blob::from_mut(d1),
            d2: Blob::from_mut(d2),
            b1: Blob::from_mut(b1),
            b2,
            result: Blob::from_mut_slice(param),
        })
    }

    pub fn srotg(&self, a: &mut f32, b: &mut f32, c: &mut f32, s: &mut f32) -> Result<()> {
        self.call::<Srotg>(&SrotgParams {
            a: Blob::from_mut(a),
            b: Blob::from_mut(b),
            c: Blob::from_mut(c),
            s: Blob::from_mut(s),
        })
    }

    pub fn scopy(&self, n: i32, x: &[f32], incx: i32, y: &mut [f32], incy: i32) -> Result<()> {
        let (x, y) = (Blob::from_slice(x).as_bytes(), Blob::from_mut_slice(y).as_bytes());
        self.copy_interleave(n, x, incx, y, incy, F32_SIZE)
    }

    pub fn sswap(&self, n: i32, x: &mut [f32], incx: i32, y: &mut [f32], incy: i32) -> Result<()> {
        let (x, y) = (Blob::from_mut_slice(x).as_bytes(), Blob::from_mut_slice(y).as_bytes());
        self.swap_interleave(n, x, incx, y, incy, F32_SIZE)
    }

    /// `sum conj(x_i) * y_i`, `result` is 0 for `n <= 0`.
    pub fn cdotc(
        &self,
        n: i32,
        x: &[Complex32],
        incx: i32,
        y: &[Complex32],
        incy: i32,
        result: &mut Complex32,
    ) -> Result<()> {
        if n <= 0 {
            *result = Complex32::new(0.0, 0.0);
            return Ok(());
        }
        self.call::<Cdotc>(&CdotcParams {
            n,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            result: Blob::from_mut(result),
        })
    }

    pub fn cdotu(
        &self,
        n: i32,
        x: &[Complex32],
        incx: i32,
        y: &[Complex32],
        incy: i32,
        result: &mut Complex32,
    ) -> Result<()> {
        if n <= 0 {
            *result = Complex32::new(0.0, 0.0);
            return Ok(());
        }
        self.call::<Cdotu>(&CdotuParams {
            n,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            result: Blob::from_mut(result),
        })
    }

    pub fn caxpy(
        &self,
        n: i32,
        alpha: Complex32,
        x: &[Complex32],
        incx: i32,
        y: &mut [Complex32],
        incy: i32,
    ) -> Result<()> {
        if n <= 0 || alpha == Complex32::new(0.0, 0.0) {
            return Ok(());
        }
        self.call::<Caxpy>(&CaxpyParams { n, alpha, x: Blob::from_slice(x), incx, y: Blob::from_mut_slice(y), incy })
    }

    pub fn cscal(&self, n: i32, alpha: Complex32, x: &mut [Complex32], incx: i32) -> Result<()> {
        self.call::<Cscal>(&CscalParams { n, alpha, x: Blob::from_mut_slice(x), incx })
    }

    /// Complex vector scaled by a real factor, runs as [`Handle::cscal`].
    pub fn csscal(&self, n: i32, alpha: f32, x: &mut [Complex32], incx: i32) -> Result<()> {
        self.cscal(n, Complex32::new(alpha, 0.0), x, incx)
    }

    pub fn scnrm2(&self, n: i32, x: &[Complex32], incx: i32, result: &mut f32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0.0;
            return Ok(());
        }
        self.call::<Scnrm2>(&Scnrm2Params { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn scasum(&self, n: i32, x: &[Complex32], incx: i32, result: &mut f32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0.0;
            return Ok(());
        }
        self.call::<Scasum>(&ScasumParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn icamax(&self, n: i32, x: &[Complex32], incx: i32, result: &mut i32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0;
            return Ok(());
        }
        self.call::<Icamax>(&IcamaxParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn icamin(&self, n: i32, x: &[Complex32], incx: i32, result: &mut i32) -> Result<()> {
        if n <= 0 || incx <= 0 {
            *result = 0;
            return Ok(());
        }
        self.call::<Icamin>(&IcaminParams { n, x: Blob::from_slice(x), incx, result: Blob::from_mut(result) })
    }

    pub fn csrot(
        &self,
        n: i32,
        x: &mut [Complex32],
        incx: i32,
        y: &mut [Complex32],
        incy: i32,
        c: f32,
        s: f32,
    ) -> Result<()> {
        if n <= 0 || (c == 1.0 && s == 0.0) {
            return Ok(());
        }
        self.call::<Csrot>(&CsrotParams {
            n,
            x: Blob::from_mut_slice(x),
            incx,
            y: Blob::from_mut_slice(y),
            incy,
            c,
            s,
        })
    }

    pub fn crotg(&self, a: &mut Complex32, b: &mut Complex32, c: &mut f32, s: &mut Complex32) -> Result<()> {
        self.call::<Crotg>(&CrotgParams {
            a: Blob::from_mut(a),
            b: Blob::from_mut(b),
            c: Blob::from_mut(c),
            s: Blob::from_mut(s),
        })
    }

    pub fn ccopy(&self, n: i32, x: &[Complex32], incx: i32, y: &mut [Complex32], incy: i32) -> Result<()> {
        let (x, y) = (Blob::from_slice(x).as_bytes(), Blob::from_mut_slice(y).as_bytes());
        self.copy_interleave(n, x, incx, y, incy, C32_SIZE)
    }

    pub fn cswap(&self, n: i32, x: &mut [Complex32], incx: i32, y: &mut [Complex32], incy: i32) -> Result<()> {
        let (x, y) = (Blob::from_mut_slice(x).as_bytes(), Blob::from_mut_slice(y).as_bytes());
        self.swap_interleave(n, x, incx, y, incy, C32_SIZE)
    }

    fn copy_interleave(&self, n: i32, x: Blob<u8>, incx: i32, y: Blob<u8>, incy: i32, elem_size: i32) -> Result<()> {
        if n <= 0 {
            return Ok(());
        }
        check_inc("incx", incx)?;
        check_inc("incy", incy)?;
        self.call::<CopyInterleave>(&CopyInterleaveParams {
            num: n,
            src: x,
            dst: y,
            elem_size,
            src_pad: incx,
            dst_pad: incy,
        })
    }

    fn swap_interleave(&self, n: i32, x: Blob<u8>, incx: i32, y: Blob<u8>, incy: i32, elem_size: i32) -> Result<()> {
        if n <= 0 {
            return Ok(());
        }
        self.call::<SwapInterleave>(&SwapInterleaveParams { n, x, y, elem_size, incx, incy })
    }
}
