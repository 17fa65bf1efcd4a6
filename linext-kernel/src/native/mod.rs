//! Pure Rust kernels.
//!
//! Each module mirrors one LAPACK routine family. Buffers are column-major;
//! `a[i + j * lda]` is `A(i, j)`.

pub mod balance;
pub mod cholesky;
pub mod householder;
pub mod lstsq;
pub mod lu;
pub mod norm;
pub mod ql;
pub mod qr;
pub mod structured;
pub mod svd;
pub mod triangular;

use linext_traits::Scalar;
use num_traits::{One, Zero};

/// Column-major offset of `(i, j)`.
#[inline(always)]
pub(crate) fn at(i: usize, j: usize, ld: usize) -> usize {
    i + j * ld
}

/// `true` if a `rows x cols` matrix with leading dimension `ld` is a valid
/// view into a buffer of `len` elements.
#[inline]
pub(crate) fn fits(len: usize, rows: usize, cols: usize, ld: usize) -> bool {
    if ld < rows.max(1) {
        return false;
    }
    rows == 0 || cols == 0 || len >= ld * (cols - 1) + rows
}

/// `n x n` identity, column-major with leading dimension `n`.
pub(crate) fn identity<T: Scalar>(n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        out[at(i, i, n)] = T::one();
    }
    out
}

#[inline(always)]
pub(crate) fn real<T: Scalar>(x: f64) -> T::Real {
    <T::Real as Scalar>::from_f64(x)
}
