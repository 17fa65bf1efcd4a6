//! Cholesky factorization `A = L L^H` (or `U^H U`).

use super::norm::estimate_norm1;
use super::triangular::solve_triangular;
use super::{at, fits};
use crate::Trans;
use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};
use num_traits::{One, Zero};

pub fn potrf<T: Scalar>(uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -4;
    }
    let zero = T::Real::zero();
    for j in 0..n {
        // Entry (i, j) of the factor, read from the stored triangle.
        let f = |a: &[T], i: usize, j: usize| match uplo {
            Uplo::Lower => a[at(i, j, lda)],
            Uplo::Upper => a[at(j, i, lda)].conj(),
        };
        let mut d = a[at(j, j, lda)].re();
        for k in 0..j {
            d -= f(a, j, k).abs_sqr();
        }
        if d <= zero || d.is_nan() {
            a[at(j, j, lda)] = T::from_real(d);
            return j as i32 + 1;
        }
        let ljj = d.sqrt();
        a[at(j, j, lda)] = T::from_real(ljj);
        for i in j + 1..n {
            let mut s = f(a, i, j);
            for k in 0..j {
                s -= f(a, i, k) * f(a, j, k).conj();
            }
            let lij = s.unscale(ljj);
            match uplo {
                Uplo::Lower => a[at(i, j, lda)] = lij,
                Uplo::Upper => a[at(j, i, lda)] = lij.conj(),
            }
        }
    }
    0
}

/// The two triangular solves `F` then `F^H` that apply `A^{-1}` from a
/// Cholesky factor.
fn solve_with_factor<T: Scalar>(
    uplo: Uplo,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    let (first, second) = match uplo {
        Uplo::Lower => (Trans::NoTrans, Trans::ConjTrans),
        Uplo::Upper => (Trans::ConjTrans, Trans::NoTrans),
    };
    solve_triangular(uplo, first, DiagKind::NonUnit, n, nrhs, a, lda, b, ldb);
    solve_triangular(uplo, second, DiagKind::NonUnit, n, nrhs, a, lda, b, ldb);
}

pub fn potrs<T: Scalar>(
    uplo: Uplo,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -5;
    }
    if !fits(b.len(), n, nrhs, ldb) {
        return -7;
    }
    solve_with_factor(uplo, n, nrhs, a, lda, b, ldb);
    0
}

pub fn pocon<T: Scalar>(
    uplo: Uplo,
    n: usize,
    a: &[T],
    lda: usize,
    anorm: T::Real,
    rcond: &mut T::Real,
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -4;
    }
    if anorm < T::Real::zero() {
        return -5;
    }
    if n == 0 {
        *rcond = T::Real::one();
        return 0;
    }
    *rcond = T::Real::zero();
    if anorm == T::Real::zero() {
        return 0;
    }
    // A^{-1} is Hermitian, so the adjoint product is the same solve.
    let apply = |x: &mut [T]| solve_with_factor(uplo, n, 1, a, lda, x, n);
    let ainvnm = estimate_norm1(n, apply, apply);
    if ainvnm != T::Real::zero() && ainvnm.is_finite() {
        *rcond = (T::Real::one() / ainvnm) / anorm;
    }
    0
}
