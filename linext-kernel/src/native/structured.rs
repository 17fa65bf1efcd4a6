//! Condition estimates for symmetric, Hermitian and band storage.
//!
//! These take the matrix itself rather than a factorization: it is expanded
//! to a full square buffer, LU-factored and estimated like a general matrix.

use super::lu::{gecon, getrf};
use super::{at, fits};
use crate::NormKind;
use linext_traits::{RealScalar, Scalar, Uplo};
use num_traits::Zero;

/// Full matrix from one stored triangle, mirrored through `mirror`.
fn expand_triangle<T: Scalar>(
    uplo: Uplo,
    n: usize,
    a: &[T],
    lda: usize,
    mirror: impl Fn(T) -> T,
) -> Vec<T> {
    let mut full = vec![T::zero(); n * n];
    for j in 0..n {
        for i in 0..n {
            let stored = match uplo {
                Uplo::Upper => i <= j,
                Uplo::Lower => i >= j,
            };
            full[at(i, j, n)] = if stored {
                a[at(i, j, lda)]
            } else {
                mirror(a[at(j, i, lda)])
            };
        }
    }
    full
}

fn general_rcond<T: Scalar>(
    norm: NormKind,
    n: usize,
    mut full: Vec<T>,
    anorm: T::Real,
    rcond: &mut T::Real,
) -> i32 {
    let mut ipiv = vec![0; n];
    if getrf(n, n, &mut full, n.max(1), &mut ipiv) > 0 {
        *rcond = T::Real::zero();
        return 0;
    }
    gecon(norm, n, &full, n.max(1), anorm, rcond)
}

pub fn sycon<T: Scalar>(
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
        return -6;
    }
    let full = expand_triangle(uplo, n, a, lda, |x| x);
    general_rcond(NormKind::One, n, full, anorm, rcond)
}

pub fn hecon<T: Scalar>(
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
        return -6;
    }
    let mut full = expand_triangle(uplo, n, a, lda, |x: T| x.conj());
    for i in 0..n {
        let d = full[at(i, i, n)].re();
        full[at(i, i, n)] = T::from_real(d);
    }
    general_rcond(NormKind::One, n, full, anorm, rcond)
}

#[allow(clippy::too_many_arguments)]
pub fn gbcon<T: Scalar>(
    norm: NormKind,
    n: usize,
    kl: usize,
    ku: usize,
    ab: &[T],
    ldab: usize,
    anorm: T::Real,
    rcond: &mut T::Real,
) -> i32 {
    if !matches!(norm, NormKind::One | NormKind::Inf) {
        return -1;
    }
    if ldab < kl + ku + 1 || !fits(ab.len(), kl + ku + 1, n, ldab) {
        return -6;
    }
    if anorm < T::Real::zero() {
        return -7;
    }
    let mut full = vec![T::zero(); n * n];
    for j in 0..n {
        let lo = j.saturating_sub(ku);
        let hi = (j + kl).min(n.saturating_sub(1));
        for i in lo..=hi {
            full[at(i, j, n)] = ab[at(ku + i - j, j, ldab)];
        }
    }
    general_rcond(norm, n, full, anorm, rcond)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::norm::lange;
    use crate::native::test_util::col_major;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_sycon_reads_one_triangle() {
        // Lower triangle holds garbage that must not be read.
        let a = col_major(&[[2.0, 1.0], [99.0, 2.0]]);
        let full = col_major(&[[2.0, 1.0], [1.0, 2.0]]);
        let anorm = lange(NormKind::One, 2, 2, &full, 2);
        let mut rcond = 0.0;
        assert_eq!(sycon(Uplo::Upper, 2, &a, 2, anorm, &mut rcond), 0);
        // ||A||_1 = 3, ||A^{-1}||_1 = 1.
        assert_relative_eq!(rcond, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hecon_identity() {
        let a = col_major(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(5.0, 5.0), Complex64::new(1.0, 0.0)],
        ]);
        let mut rcond = 0.0;
        hecon(Uplo::Upper, 2, &a, 2, 1.0, &mut rcond);
        assert_relative_eq!(rcond, 1.0);
    }

    #[test]
    fn test_gbcon_tridiagonal() {
        // Tridiagonal [[2, -1, 0], [-1, 2, -1], [0, -1, 2]] in band storage.
        let ab = [0.0, 2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0, 0.0];
        let full = col_major(&[[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]);
        let anorm = lange(NormKind::One, 3, 3, &full, 3);
        let mut rcond = 0.0;
        assert_eq!(gbcon(NormKind::One, 3, 1, 1, &ab, 3, anorm, &mut rcond), 0);
        // ||A||_1 = 4 and ||A^{-1}||_1 = 2.
        assert_relative_eq!(rcond, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_band_is_zero() {
        let ab = [0.0, 0.0, 0.0, 0.0];
        let mut rcond = 1.0;
        gbcon(NormKind::One, 2, 0, 1, &ab, 2, 1.0, &mut rcond);
        assert_eq!(rcond, 0.0);
    }
}
