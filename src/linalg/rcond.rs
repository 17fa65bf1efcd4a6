//! Reciprocal condition number estimates.
//!
//! The estimate is `1 / (||A|| ||A^-1||)` with `||A^-1||` estimated from a
//! factorization, so it costs a few triangular solves rather than an
//! inverse. A result near zero means `A` is close to singular; an exactly
//! singular factorization gives `0`.

use super::inv::inverse_buffer;
use super::norm::{norm_frobenius, MatrixNorm};
use super::svd::svd_values;
use super::{adjoint, check_status, ld, materialize};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, NormKind};
use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};
use linext_view::{
    ensure_square, Banded, ColMajorMatrix, Hermitian, LinextError, MatrixExpr, Result, Symmetric,
    Triangular,
};
use num_traits::{One, Zero};
use tracing::warn;

type Real<M> = <<M as MatrixExpr>::Elem as Scalar>::Real;

/// Estimate from an LU factorization of the square buffer `work`.
fn general<T: Scalar>(kind: NormKind, mut work: ColMajorMatrix<T>) -> Result<T::Real> {
    let n = work.nrows();
    let anorm = <ActiveKernel as Kernel<T>>::lange(kind, n, n, work.as_slice(), ld(n));
    let mut ipiv = vec![0; n];
    let info = <ActiveKernel as Kernel<T>>::getrf(n, n, work.as_mut_slice(), ld(n), &mut ipiv);
    if check_status("getrf", info)? > 0 {
        warn!(
            routine = "getrf",
            info,
            "singular matrix, reciprocal condition is zero"
        );
        return Ok(T::Real::zero());
    }
    let mut rcond = T::Real::zero();
    let info = <ActiveKernel as Kernel<T>>::gecon(
        kind,
        n,
        work.as_slice(),
        ld(n),
        anorm,
        &mut rcond,
    );
    check_status("gecon", info)?;
    Ok(rcond)
}

/// Estimate for a rectangular buffer through the triangular factor of
/// `A = Q R`, or of `A^H = Q R` when `A` is wide. In the wide case
/// `A = L Q^H` with `L = R^H`, so the 1- and infinity-norms trade places.
fn rectangular<T: Scalar>(kind: NormKind, work: ColMajorMatrix<T>) -> Result<T::Real> {
    let (mut work, kind) = if work.nrows() < work.ncols() {
        let dual = match kind {
            NormKind::One => NormKind::Inf,
            NormKind::Inf => NormKind::One,
            other => other,
        };
        (adjoint(&work), dual)
    } else {
        (work, kind)
    };
    let (m, n) = work.shape();
    let mut tau = vec![T::zero(); n];
    let info = <ActiveKernel as Kernel<T>>::geqrf(m, n, work.as_mut_slice(), ld(m), &mut tau);
    check_status("geqrf", info)?;
    triangular_buffer(
        kind,
        Uplo::Upper,
        DiagKind::NonUnit,
        n,
        work.as_slice(),
        ld(m),
    )
}

fn triangular_buffer<T: Scalar>(
    kind: NormKind,
    uplo: Uplo,
    diag: DiagKind,
    n: usize,
    a: &[T],
    lda: usize,
) -> Result<T::Real> {
    let mut rcond = T::Real::zero();
    let info = <ActiveKernel as Kernel<T>>::trcon(kind, uplo, diag, n, a, lda, &mut rcond);
    check_status("trcon", info)?;
    Ok(rcond)
}

/// `s_min / s_max`.
fn spectral<M>(a: &M) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let s = svd_values(a)?;
    let s = s.as_slice();
    match (s.first(), s.last()) {
        (Some(&hi), Some(&lo)) if hi > Real::<M>::zero() => Ok(lo / hi),
        (Some(_), Some(_)) => Ok(Real::<M>::zero()),
        _ => Ok(Real::<M>::one()),
    }
}

/// `1 / (||A||_F ||A^-1||_F)` through an explicit inverse.
fn frobenius<M>(a: &M) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(a.nrows(), a.ncols())?;
    let work = materialize(a);
    let anorm = norm_frobenius(&work);
    let ainv = match inverse_buffer(work) {
        Err(LinextError::Singular { info }) => {
            warn!(
                routine = "getrf",
                info,
                "singular matrix, reciprocal condition is zero"
            );
            return Ok(Real::<M>::zero());
        }
        other => other?,
    };
    let ainvnm = norm_frobenius(&ainv);
    if anorm == Real::<M>::zero() || ainvnm == Real::<M>::zero() {
        return Ok(Real::<M>::zero());
    }
    Ok(Real::<M>::one() / (anorm * ainvnm))
}

/// Reciprocal condition number in the 1-norm.
///
/// ```rust
/// use linext::{rcond, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
/// assert!(rcond(&a).unwrap() <= 1e-15);
/// ```
pub fn rcond<M>(a: &M) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    rcond_norm(a, MatrixNorm::One)
}

/// Reciprocal condition number in the infinity norm.
pub fn rcond_inf<M>(a: &M) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    rcond_norm(a, MatrixNorm::Inf)
}

/// Reciprocal condition number under `norm`.
///
/// The 1- and infinity-norm estimates come from the kernel. The 2-norm
/// value is exact, from the singular values, and the Frobenius value goes
/// through an explicit inverse and needs a square `a`.
pub fn rcond_norm<M>(a: &M, norm: MatrixNorm) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    match norm {
        MatrixNorm::One | MatrixNorm::Inf => {
            let kind = if norm == MatrixNorm::One {
                NormKind::One
            } else {
                NormKind::Inf
            };
            let work = materialize(a);
            if work.is_square() {
                general(kind, work)
            } else {
                rectangular(kind, work)
            }
        }
        MatrixNorm::Two => spectral(a),
        MatrixNorm::Frobenius => frobenius(a),
    }
}

/// Condition estimate using only the referenced triangle.
pub fn rcond_triangular<M>(t: &Triangular<M>, norm: MatrixNorm) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(t.nrows(), t.ncols())?;
    let kind = match norm {
        MatrixNorm::One => NormKind::One,
        MatrixNorm::Inf => NormKind::Inf,
        MatrixNorm::Two | MatrixNorm::Frobenius => return rcond_norm(t, norm),
    };
    let work = materialize(t);
    let n = work.nrows();
    triangular_buffer(kind, t.uplo(), t.diag(), n, work.as_slice(), ld(n))
}

/// Condition estimate of a symmetric matrix in the 1-norm, which equals
/// the infinity norm here.
pub fn rcond_symmetric<M>(s: &Symmetric<M>) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let work = materialize(s);
    let n = work.nrows();
    let anorm = <ActiveKernel as Kernel<M::Elem>>::lange(
        NormKind::One,
        n,
        n,
        work.as_slice(),
        ld(n),
    );
    let mut rcond = Real::<M>::zero();
    let info = <ActiveKernel as Kernel<M::Elem>>::sycon(
        s.uplo(),
        n,
        work.as_slice(),
        ld(n),
        anorm,
        &mut rcond,
    );
    check_status("sycon", info)?;
    Ok(rcond)
}

/// Condition estimate of a Hermitian matrix in the 1-norm.
pub fn rcond_hermitian<M>(h: &Hermitian<M>) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let work = materialize(h);
    let n = work.nrows();
    let anorm = <ActiveKernel as Kernel<M::Elem>>::lange(
        NormKind::One,
        n,
        n,
        work.as_slice(),
        ld(n),
    );
    let mut rcond = Real::<M>::zero();
    let info = <ActiveKernel as Kernel<M::Elem>>::hecon(
        h.uplo(),
        n,
        work.as_slice(),
        ld(n),
        anorm,
        &mut rcond,
    );
    check_status("hecon", info)?;
    Ok(rcond)
}

/// Condition estimate of a square band matrix, handed to the kernel in
/// band storage.
pub fn rcond_banded<M>(b: &Banded<M>, norm: MatrixNorm) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(b.nrows(), b.ncols())?;
    let kind = match norm {
        MatrixNorm::One => NormKind::One,
        MatrixNorm::Inf => NormKind::Inf,
        MatrixNorm::Two | MatrixNorm::Frobenius => return rcond_norm(b, norm),
    };
    let n = b.nrows();
    let (kl, ku) = (b.lower_bandwidth(), b.upper_bandwidth());
    let ldab = kl + ku + 1;
    let mut ab = vec![M::Elem::zero(); ldab * n];
    for j in 0..n {
        for i in j.saturating_sub(ku)..n.min(j + kl + 1) {
            ab[ku + i - j + j * ldab] = b.at(i, j);
        }
    }
    let anorm = {
        let work = materialize(b);
        <ActiveKernel as Kernel<M::Elem>>::lange(kind, n, n, work.as_slice(), ld(n))
    };
    let mut rcond = Real::<M>::zero();
    let info = <ActiveKernel as Kernel<M::Elem>>::gbcon(
        kind,
        n,
        kl,
        ku,
        &ab,
        ldab,
        anorm,
        &mut rcond,
    );
    check_status("gbcon", info)?;
    Ok(rcond)
}

/// `true` when `rcond` is at or below machine precision.
#[inline]
pub fn is_ill_conditioned<R: RealScalar>(rcond: R) -> bool {
    rcond <= R::epsilon()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::cond::{cond_1, cond_inf};
    use approx::assert_relative_eq;
    use linext_traits::ColumnMajor;
    use linext_view::{DenseMatrix, Transposed};
    use num_complex::Complex64;

    fn textbook() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[
            [-0.23, 2.54, -3.66, 0.0],
            [-6.98, 2.46, -2.73, -2.13],
            [0.0, 2.56, 2.46, 4.07],
            [0.0, 0.0, -4.78, -3.82],
        ])
        .unwrap()
    }

    #[test]
    fn test_singular_and_textbook() {
        let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])
            .unwrap();
        assert!(rcond(&a).unwrap() <= 1e-15);
        assert!(is_ill_conditioned(rcond(&a).unwrap()));

        let rc = rcond(&textbook()).unwrap();
        assert_relative_eq!(rc, 0.01773, epsilon = 5e-5);
        let col = DenseMatrix::<f64, ColumnMajor>::from_expr(&textbook());
        assert_relative_eq!(rcond(&col).unwrap(), rc, epsilon = 1e-15);
    }

    #[test]
    fn test_identity_and_exact_zero() {
        let i = DenseMatrix::<f64>::identity(4);
        for norm in [MatrixNorm::One, MatrixNorm::Inf, MatrixNorm::Two] {
            assert_relative_eq!(rcond_norm(&i, norm).unwrap(), 1.0, epsilon = 1e-14);
        }
        assert_relative_eq!(
            rcond_norm(&i, MatrixNorm::Frobenius).unwrap(),
            0.25,
            epsilon = 1e-14
        );

        let z = DenseMatrix::<f64>::from_rows(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        assert_eq!(rcond(&z).unwrap(), 0.0);
        assert_eq!(rcond_norm(&z, MatrixNorm::Frobenius).unwrap(), 0.0);
    }

    #[test]
    fn test_two_norm_is_singular_value_ratio() {
        let a = DenseMatrix::<f64>::from_rows(&[[3.0, 0.0], [0.0, -0.5]]).unwrap();
        assert_relative_eq!(
            rcond_norm(&a, MatrixNorm::Two).unwrap(),
            0.5 / 3.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_rectangular() {
        // Orthonormal columns scaled by 2 and 1: cond_2 = 2.
        let a = DenseMatrix::<f64>::from_rows(&[[2.0, 0.0], [0.0, 1.0], [0.0, 0.0]]).unwrap();
        assert_relative_eq!(rcond(&a).unwrap(), 0.5, epsilon = 1e-14);
        let wide = DenseMatrix::<f64>::from_rows(&[[2.0, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        assert_relative_eq!(rcond(&wide).unwrap(), 0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_wide_matrix_norms_are_dual_to_its_transpose() {
        let a = DenseMatrix::<f64>::from_rows(&[
            [3.0, -1.0, 0.5, 2.0],
            [0.0, 4.0, 1.0, -2.0],
            [1.0, 0.0, -3.0, 1.5],
        ])
        .unwrap();
        let at = DenseMatrix::<f64>::from_expr(&Transposed::new(&a));
        let (one, inf) = (rcond(&a).unwrap(), rcond_inf(&a).unwrap());
        assert_relative_eq!(one, rcond_inf(&at).unwrap(), epsilon = 1e-14);
        assert_relative_eq!(inf, rcond(&at).unwrap(), epsilon = 1e-14);
        assert!(one > 0.0 && inf > 0.0);

        assert!(cond_1(&a).is_infinite());
        assert!(cond_inf(&at).is_infinite());
    }

    #[test]
    fn test_tall_matrix_reference_value() {
        // Rows of R = [[1, 2, 0], [0, 1, 3], [0, 0, 1]] shuffled and padded
        // with a zero row: ||R||_1 = 4 and ||R^-1||_1 = 10.
        let a = DenseMatrix::<f64>::from_rows(&[
            [0.0, 1.0, 3.0],
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert_relative_eq!(rcond(&a).unwrap(), 0.025, epsilon = 1e-12);
        let col = DenseMatrix::<f64, ColumnMajor>::from_expr(&a);
        assert_relative_eq!(rcond(&col).unwrap(), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_structured_paths() {
        let a = textbook();
        let upper = Triangular::upper(&a);
        let via_kernel = rcond_triangular(&upper, MatrixNorm::One).unwrap();
        let dense = DenseMatrix::<f64>::from_expr(&upper);
        assert_relative_eq!(via_kernel, rcond(&dense).unwrap(), max_relative = 0.5);
        assert!(rcond_triangular(&upper, MatrixNorm::Two).unwrap() > 0.0);

        let s = DenseMatrix::<f64>::from_rows(&[
            [4.0, 1.0, 0.0],
            [99.0, 3.0, 1.0],
            [99.0, 99.0, 2.0],
        ])
        .unwrap();
        let sym = Symmetric::new(&s, Uplo::Upper).unwrap();
        let full = DenseMatrix::<f64>::from_expr(&sym);
        assert_relative_eq!(
            rcond_symmetric(&sym).unwrap(),
            rcond(&full).unwrap(),
            epsilon = 1e-14
        );

        let band = Banded::new(&full, 1, 1);
        assert_relative_eq!(
            rcond_banded(&band, MatrixNorm::One).unwrap(),
            rcond(&full).unwrap(),
            epsilon = 1e-14
        );
        assert!(
            rcond_banded(&Banded::new(&a, 0, 1), MatrixNorm::Inf).unwrap() > 0.0
        );
    }

    #[test]
    fn test_hermitian() {
        let h = DenseMatrix::<Complex64>::from_rows(&[
            [Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0)],
            [Complex64::new(7.0, 7.0), Complex64::new(2.0, 0.0)],
        ])
        .unwrap();
        let herm = Hermitian::new(&h, Uplo::Upper).unwrap();
        // Eigenvalues 1 and 3.
        let full = DenseMatrix::<Complex64>::from_expr(&herm);
        assert_relative_eq!(
            rcond_hermitian(&herm).unwrap(),
            rcond(&full).unwrap(),
            epsilon = 1e-14
        );
    }
}
