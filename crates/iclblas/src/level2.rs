use iclblas_base::{Diag, FillMode, Operation};
use iclblas_c::{
    Cgbmv, CgbmvParams, Cgemv, CgemvParams, Chbmv, ChbmvParams, Chemv, ChemvParams, Cher, Cher2, Cher2Params,
    CherParams, Chpr, Chpr2, Chpr2Params, ChprParams, Ctbsv, CtbsvParams, Ctpmv, CtpmvParams, Ctpsv, CtpsvParams,
};
use iclblas_s::{
    Sgbmv, SgbmvParams, Sgemv, SgemvParams, Sger, SgerParams, Sspmv, SspmvParams, Sspr, SsprParams, Ssymv,
    SsymvParams, Ssyr, Ssyr2, Ssyr2Params, SsyrParams, Stpmv, StpmvParams, Strsv, StrsvParams,
};
use num_complex::Complex32;

use crate::{Blob, Handle, Result};

// alpha == 0 with beta == 1 leaves y untouched
fn unchanged<T: PartialEq + Copy>(alpha: T, beta: T, zero: T, one: T) -> bool {
    alpha == zero && beta == one
}

#[allow(clippy::too_many_arguments)]
impl Handle {
    pub fn sgemv(
        &self,
        trans: Operation,
        m: i32,
        n: i32,
        alpha: f32,
        a: &[f32],
        lda: i32,
        x: &[f32],
        incx: i32,
        beta: f32,
        y: &mut [f32],
        incy: i32,
    ) -> Result<()> {
        self.call::<Sgemv>(&SgemvParams {
            trans,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn sgbmv(
        &self,
        trans: Operation,
        m: i32,
        n: i32,
        kl: i32,
        ku: i32,
        alpha: f32,
        a: &[f32],
        lda: i32,
        x: &[f32],
        incx: i32,
        beta: f32,
        y: &mut [f32],
        incy: i32,
    ) -> Result<()> {
        if unchanged(alpha, beta, 0.0, 1.0) {
            return Ok(());
        }
        self.call::<Sgbmv>(&SgbmvParams {
            trans,
            m,
            n,
            kl,
            ku,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn sger(
        &self,
        m: i32,
        n: i32,
        alpha: f32,
        x: &[f32],
        incx: i32,
        y: &[f32],
        incy: i32,
        a: &mut [f32],
        lda: i32,
    ) -> Result<()> {
        if alpha == 0.0 {
            return Ok(());
        }
        self.call::<Sger>(&SgerParams {
            m,
            n,
            alpha,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            a: Blob::from_mut_slice(a),
            lda,
        })
    }

    pub fn ssyr(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: &[f32],
        incx: i32,
        a: &mut [f32],
        lda: i32,
    ) -> Result<()> {
        if alpha == 0.0 {
            return Ok(());
        }
        self.call::<Ssyr>(&SsyrParams { uplo, n, alpha, x: Blob::from_slice(x), incx, a: Blob::from_mut_slice(a), lda })
    }

    pub fn ssyr2(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: &[f32],
        incx: i32,
        y: &[f32],
        incy: i32,
        a: &mut [f32],
        lda: i32,
    ) -> Result<()> {
        self.call::<Ssyr2>(&Ssyr2Params {
            uplo,
            n,
            alpha,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            a: Blob::from_mut_slice(a),
            lda,
        })
    }

    pub fn ssymv(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        a: &[f32],
        lda: i32,
        x: &[f32],
        incx: i32,
        beta: f32,
        y: &mut [f32],
        incy: i32,
    ) -> Result<()> {
        self.call::<Ssymv>(&SsymvParams {
            uplo,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn sspmv(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        ap: &[f32],
        x: &[f32],
        incx: i32,
        beta: f32,
        y: &mut [f32],
        incy: i32,
    ) -> Result<()> {
        if unchanged(alpha, beta, 0.0, 1.0) {
            return Ok(());
        }
        self.call::<Sspmv>(&SspmvParams {
            uplo,
            n,
            alpha,
            ap: Blob::from_slice(ap),
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn sspr(&self, uplo: FillMode, n: i32, alpha: f32, x: &[f32], incx: i32, ap: &mut [f32]) -> Result<()> {
        self.call::<Sspr>(&SsprParams { uplo, n, alpha, x: Blob::from_slice(x), incx, ap: Blob::from_mut_slice(ap) })
    }

    pub fn stpmv(
        &self,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: &[f32],
        x: &mut [f32],
        incx: i32,
    ) -> Result<()> {
        self.call::<Stpmv>(&StpmvParams {
            uplo,
            trans,
            diag,
            n,
            ap: Blob::from_slice(ap),
            x: Blob::from_mut_slice(x),
            incx,
        })
    }

    pub fn strsv(
        &self,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        a: &[f32],
        lda: i32,
        x: &mut [f32],
        incx: i32,
    ) -> Result<()> {
        self.call::<Strsv>(&StrsvParams {
            uplo,
            trans,
            diag,
            n,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_mut_slice(x),
            incx,
        })
    }

    pub fn cgemv(
        &self,
        trans: Operation,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        x: &[Complex32],
        incx: i32,
        beta: Complex32,
        y: &mut [Complex32],
        incy: i32,
    ) -> Result<()> {
        self.call::<Cgemv>(&CgemvParams {
            trans,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn cgbmv(
        &self,
        trans: Operation,
        m: i32,
        n: i32,
        kl: i32,
        ku: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        x: &[Complex32],
        incx: i32,
        beta: Complex32,
        y: &mut [Complex32],
        incy: i32,
    ) -> Result<()> {
        if unchanged(alpha, beta, Complex32::new(0.0, 0.0), Complex32::new(1.0, 0.0)) {
            return Ok(());
        }
        self.call::<Cgbmv>(&CgbmvParams {
            trans,
            m,
            n,
            kl,
            ku,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn chemv(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        x: &[Complex32],
        incx: i32,
        beta: Complex32,
        y: &mut [Complex32],
        incy: i32,
    ) -> Result<()> {
        self.call::<Chemv>(&ChemvParams {
            uplo,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn chbmv(
        &self,
        uplo: FillMode,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        x: &[Complex32],
        incx: i32,
        beta: Complex32,
        y: &mut [Complex32],
        incy: i32,
    ) -> Result<()> {
        if unchanged(alpha, beta, Complex32::new(0.0, 0.0), Complex32::new(1.0, 0.0)) {
            return Ok(());
        }
        self.call::<Chbmv>(&ChbmvParams {
            uplo,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_slice(x),
            incx,
            beta,
            y: Blob::from_mut_slice(y),
            incy,
        })
    }

    pub fn cher(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: &[Complex32],
        incx: i32,
        a: &mut [Complex32],
        lda: i32,
    ) -> Result<()> {
        if alpha == 0.0 {
            return Ok(());
        }
        self.call::<Cher>(&CherParams { uplo, n, alpha, x: Blob::from_slice(x), incx, a: Blob::from_mut_slice(a), lda })
    }

    pub fn cher2(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        x: &[Complex32],
        incx: i32,
        y: &[Complex32],
        incy: i32,
        a: &mut [Complex32],
        lda: i32,
    ) -> Result<()> {
        self.call::<Cher2>(&Cher2Params {
            uplo,
            n,
            alpha,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            a: Blob::from_mut_slice(a),
            lda,
        })
    }

    pub fn chpr(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: f32,
        x: &[Complex32],
        incx: i32,
        ap: &mut [Complex32],
    ) -> Result<()> {
        self.call::<Chpr>(&ChprParams { uplo, n, alpha, x: Blob::from_slice(x), incx, ap: Blob::from_mut_slice(ap) })
    }

    pub fn chpr2(
        &self,
        uplo: FillMode,
        n: i32,
        alpha: Complex32,
        x: &[Complex32],
        incx: i32,
        y: &[Complex32],
        incy: i32,
        ap: &mut [Complex32],
    ) -> Result<()> {
        self.call::<Chpr2>(&Chpr2Params {
            uplo,
            n,
            alpha,
            x: Blob::from_slice(x),
            incx,
            y: Blob::from_slice(y),
            incy,
            ap: Blob::from_mut_slice(ap),
        })
    }

    pub fn ctpmv(
        &self,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: &[Complex32],
        x: &mut [Complex32],
        incx: i32,
    ) -> Result<()> {
        self.call::<Ctpmv>(&CtpmvParams {
            uplo,
            trans,
            diag,
            n,
            ap: Blob::from_slice(ap),
            x: Blob::from_mut_slice(x),
            incx,
        })
    }

    pub fn ctpsv(
        &self,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        ap: &[Complex32],
        x: &mut [Complex32],
        incx: i32,
    ) -> Result<()> {
        self.call::<Ctpsv>(&CtpsvParams {
            uplo,
            trans,
            diag,
            n,
            ap: Blob::from_slice(ap),
            x: Blob::from_mut_slice(x),
            incx,
        })
    }

    pub fn ctbsv(
        &self,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        n: i32,
        k: i32,
        a: &[Complex32],
        lda: i32,
        x: &mut [Complex32],
        incx: i32,
    ) -> Result<()> {
        self.call::<Ctbsv>(&CtbsvParams {
            uplo,
            trans,
            diag,
            n,
            k,
            a: Blob::from_slice(a),
            lda,
            x: Blob::from_mut_slice(x),
            incx,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::handle;
    use crate::{c32, Diag, Error, FillMode, Operation};
    use iclblas_dev::random_vec;

    #[test]
    fn sgemv_picks_transposed_kernel() {
        let (engine, h) = handle();
        let a: Vec<f32> = random_vec(32 * 8);
        let x: Vec<f32> = random_vec(32);
        let mut y = vec![0.0f32; 32];
        h.sgemv(Operation::N, 32, 8, 1.0, &a, 32, &x, 1, 0.0, &mut y, 1).unwrap();
        h.sgemv(Operation::T, 32, 8, 1.0, &a, 32, &x, 1, 0.0, &mut y, 1).unwrap();
        assert_eq!(engine.kernels(), vec!["Sgemv_naive_async", "Sgemv_opt_simd16_TC"]);
    }

    #[test]
    fn leading_dimension_checked() {
        let (engine, h) = handle();
        let a = vec![0.0f32; 16];
        let mut x = vec![0.0f32; 4];
        assert_eq!(
            h.strsv(FillMode::Upper, Operation::N, Diag::NonUnit, 4, &a, 0, &mut x, 1),
            Err(Error::InvalidValue("lda"))
        );
        assert_eq!(h.sger(-1, 4, 1.0, &x.clone(), 1, &x.clone(), 1, &mut x, 4), Err(Error::InvalidValue("m")));
        assert!(engine.submissions().is_empty());
    }

    #[test]
    fn band_update_quick_returns() {
        let (engine, h) = handle();
        let a = vec![c32(0.0, 0.0); 12];
        let x = vec![c32(1.0, 0.0); 4];
        let mut y = vec![c32(0.0, 0.0); 4];
        h.cgbmv(Operation::T, 4, 4, 1, 1, c32(0.0, 0.0), &a, 3, &x, 1, c32(1.0, 0.0), &mut y, 1).unwrap();
        assert!(engine.submissions().is_empty());
        h.cgbmv(Operation::T, 4, 4, 1, 1, c32(1.0, 0.0), &a, 3, &x, 1, c32(1.0, 0.0), &mut y, 1).unwrap();
        assert_eq!(engine.kernels(), vec!["Cgbmv_trans"]);
    }

    #[test]
    fn packed_updates_pick_triangle_kernels() {
        let (engine, h) = handle();
        let x = vec![c32(1.0, 0.0); 20];
        let mut ap = vec![c32(0.0, 0.0); 210];
        h.chpr(FillMode::Lower, 20, 1.0, &x, 1, &mut ap).unwrap();
        h.chpr(FillMode::Upper, 20, 1.0, &x, 1, &mut ap).unwrap();
        h.chpr2(FillMode::Upper, 20, c32(1.0, 0.0), &x, 1, &x, 1, &mut ap).unwrap();
        assert_eq!(
            engine.kernels(),
            vec!["Chpr_early_return_simd16x1x1_lower", "Chpr_naive", "Chpr2_early_return_simd16x1x1_upper"]
        );
    }
}
