//! Triangular solves and condition estimates.

use super::norm::estimate_norm1;
use super::{at, fits};
use crate::{NormKind, Trans};
use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};
use num_traits::{One, Zero};

/// Solve `op(A) X = B` in place for an `n x n` triangular `A`, without a
/// singularity check.
#[allow(clippy::too_many_arguments)]
pub(crate) fn solve_triangular<T: Scalar>(
    uplo: Uplo,
    trans: Trans,
    diag: DiagKind,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    let unit = diag == DiagKind::Unit;
    let op = |x: T| {
        if trans == Trans::ConjTrans {
            x.conj()
        } else {
            x
        }
    };
    for c in 0..nrhs {
        let col = &mut b[at(0, c, ldb)..at(0, c, ldb) + n];
        match (trans, uplo) {
            (Trans::NoTrans, Uplo::Upper) => {
                for k in (0..n).rev() {
                    if col[k] == T::zero() {
                        continue;
                    }
                    if !unit {
                        col[k] /= a[at(k, k, lda)];
                    }
                    let xk = col[k];
                    for i in 0..k {
                        col[i] -= xk * a[at(i, k, lda)];
                    }
                }
            }
            (Trans::NoTrans, Uplo::Lower) => {
                for k in 0..n {
                    if col[k] == T::zero() {
                        continue;
                    }
                    if !unit {
                        col[k] /= a[at(k, k, lda)];
                    }
                    let xk = col[k];
                    for i in k + 1..n {
                        col[i] -= xk * a[at(i, k, lda)];
                    }
                }
            }
            (_, Uplo::Upper) => {
                for i in 0..n {
                    let mut temp = col[i];
                    for k in 0..i {
                        temp -= op(a[at(k, i, lda)]) * col[k];
                    }
                    if !unit {
                        temp /= op(a[at(i, i, lda)]);
                    }
                    col[i] = temp;
                }
            }
            (_, Uplo::Lower) => {
                for i in (0..n).rev() {
                    let mut temp = col[i];
                    for k in i + 1..n {
                        temp -= op(a[at(k, i, lda)]) * col[k];
                    }
                    if !unit {
                        temp /= op(a[at(i, i, lda)]);
                    }
                    col[i] = temp;
                }
            }
        }
    }
}

/// Triangular solve with a singularity check.
#[allow(clippy::too_many_arguments)]
pub fn trtrs<T: Scalar>(
    uplo: Uplo,
    trans: Trans,
    diag: DiagKind,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -7;
    }
    if !fits(b.len(), n, nrhs, ldb) {
        return -9;
    }
    if diag == DiagKind::NonUnit {
        if let Some(i) = (0..n).find(|&i| a[at(i, i, lda)] == T::zero()) {
            return i as i32 + 1;
        }
    }
    solve_triangular(uplo, trans, diag, n, nrhs, a, lda, b, ldb);
    0
}

/// Norm of the referenced triangle; a unit diagonal counts as ones.
pub(crate) fn lantr<T: Scalar>(
    norm: NormKind,
    uplo: Uplo,
    diag: DiagKind,
    n: usize,
    a: &[T],
    lda: usize,
) -> T::Real {
    let mut full = vec![T::zero(); n * n];
    for j in 0..n {
        for i in 0..n {
            let inside = match uplo {
                Uplo::Upper => i <= j,
                Uplo::Lower => i >= j,
            };
            if i == j && diag == DiagKind::Unit {
                full[at(i, j, n)] = T::one();
            } else if inside {
                full[at(i, j, n)] = a[at(i, j, lda)];
            }
        }
    }
    super::norm::lange(norm, n, n, &full, n.max(1))
}

/// Reciprocal condition estimate of a triangular matrix in the 1- or
/// infinity-norm.
pub fn trcon<T: Scalar>(
    norm: NormKind,
    uplo: Uplo,
    diag: DiagKind,
    n: usize,
    a: &[T],
    lda: usize,
    rcond: &mut T::Real,
) -> i32 {
    if !matches!(norm, NormKind::One | NormKind::Inf) {
        return -1;
    }
    if !fits(a.len(), n, n, lda) {
        return -5;
    }
    if n == 0 {
        *rcond = T::Real::one();
        return 0;
    }
    *rcond = T::Real::zero();
    let anorm = lantr(norm, uplo, diag, n, a, lda);
    if anorm <= T::Real::zero() {
        return 0;
    }
    // inv(A) in the infinity norm is inv(A)^H in the 1-norm.
    let (first, second) = match norm {
        NormKind::Inf => (Trans::ConjTrans, Trans::NoTrans),
        _ => (Trans::NoTrans, Trans::ConjTrans),
    };
    let ainvnm = estimate_norm1(
        n,
        |x: &mut [T]| solve_triangular(uplo, first, diag, n, 1, a, lda, x, n),
        |x: &mut [T]| solve_triangular(uplo, second, diag, n, 1, a, lda, x, n),
    );
    if ainvnm != T::Real::zero() {
        *rcond = (T::Real::one() / anorm) / ainvnm;
    }
    0
}
