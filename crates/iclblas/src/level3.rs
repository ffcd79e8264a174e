use iclblas_base::{Diag, FillMode, Operation, Side};
use iclblas_c::{
    Cgemm, CgemmParams, Cher2k, Cher2kParams, Cherk, CherkParams, Csymm, CsymmParams, Csyrk, CsyrkParams, Ctrmm,
    CtrmmParams, Ctrsm, CtrsmParams,
};
use iclblas_s::{Sgemm, SgemmParams, Ssymm, SsymmParams};
use num_complex::Complex32;

use crate::{Blob, Handle, Result};

#[allow(clippy::too_many_arguments)]
impl Handle {
    /// `C = alpha * op(A) * op(B) + beta * C`, column major.
    pub fn sgemm(
        &self,
        transa: Operation,
        transb: Operation,
        m: i32,
        n: i32,
        k: i32,
        alpha: f32,
        a: &[f32],
        lda: i32,
        b: &[f32],
        ldb: i32,
        beta: f32,
        c: &mut [f32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Sgemm>(&SgemmParams {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    /// Nothing runs when `alpha == 0` and `beta == 1`.
    pub fn ssymm(
        &self,
        side: Side,
        uplo: FillMode,
        m: i32,
        n: i32,
        alpha: f32,
        a: &[f32],
        lda: i32,
        b: &[f32],
        ldb: i32,
        beta: f32,
        c: &mut [f32],
        ldc: i32,
    ) -> Result<()> {
        if alpha == 0.0 && beta == 1.0 {
            return Ok(());
        }
        self.call::<Ssymm>(&SsymmParams {
            side,
            uplo,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    pub fn cgemm(
        &self,
        transa: Operation,
        transb: Operation,
        m: i32,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        b: &[Complex32],
        ldb: i32,
        beta: Complex32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Cgemm>(&CgemmParams {
            transa,
            transb,
            m,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    pub fn csymm(
        &self,
        side: Side,
        uplo: FillMode,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        b: &[Complex32],
        ldb: i32,
        beta: Complex32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Csymm>(&CsymmParams {
            side,
            uplo,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    /// Hermitian rank k update, `alpha` and `beta` are real.
    pub fn cherk(
        &self,
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: f32,
        a: &[Complex32],
        lda: i32,
        beta: f32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Cherk>(&CherkParams {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    pub fn csyrk(
        &self,
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        beta: Complex32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Csyrk>(&CsyrkParams {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    pub fn cher2k(
        &self,
        uplo: FillMode,
        trans: Operation,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        b: &[Complex32],
        ldb: i32,
        beta: f32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Cher2k>(&Cher2kParams {
            uplo,
            trans,
            n,
            k,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            beta,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    /// `C = alpha * op(A) * B` or `alpha * B * op(A)` with triangular `A`.
    pub fn ctrmm(
        &self,
        side: Side,
        uplo: FillMode,
        transa: Operation,
        diag: Diag,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        b: &[Complex32],
        ldb: i32,
        c: &mut [Complex32],
        ldc: i32,
    ) -> Result<()> {
        self.call::<Ctrmm>(&CtrmmParams {
            side,
            uplo,
            transa,
            diag,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_slice(b),
            ldb,
            c: Blob::from_mut_slice(c),
            ldc,
        })
    }

    /// Solves `op(A) * X = alpha * B` or `X * op(A) = alpha * B` in place of `B`.
    pub fn ctrsm(
        &self,
        side: Side,
        uplo: FillMode,
        trans: Operation,
        diag: Diag,
        m: i32,
        n: i32,
        alpha: Complex32,
        a: &[Complex32],
        lda: i32,
        b: &mut [Complex32],
        ldb: i32,
    ) -> Result<()> {
        self.call::<Ctrsm>(&CtrsmParams {
            side,
            uplo,
            trans,
            diag,
            m,
            n,
            alpha,
            a: Blob::from_slice(a),
            lda,
            b: Blob::from_mut_slice(b),
            ldb,
        })
    }
}
