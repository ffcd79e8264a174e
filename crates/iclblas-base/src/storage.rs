// Element counts bound for each operand, negative inputs count as zero.

#[inline]
pub fn dim(v: i32) -> usize {
    v.max(0) as usize
}

/// `n` elements `inc` apart, bound as `n * inc`.
#[inline]
pub fn strided_len(n: i32, inc: i32) -> usize {
    dim(n) * dim(inc)
}

/// Triangle of an `n x n` matrix stored column by column.
#[inline]
pub fn packed_len(n: i32) -> usize {
    let n = dim(n);
    n * (n + 1) / 2
}

/// Band matrix stored as `lda` rows of diagonals for each of `n` columns.
#[inline]
pub fn banded_len(lda: i32, n: i32) -> usize {
    dim(lda) * dim(n)
}

#[inline]
pub fn matrix_len(ld: i32, cols: i32) -> usize {
    dim(ld) * dim(cols)
}

#[inline]
pub fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}
