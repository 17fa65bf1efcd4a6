//! Singular value decomposition, `A = U diag(s) V^H`.
//!
//! Singular values come back non-increasing. A positive kernel status means
//! the iteration did not converge and is reported as
//! [`LinextError::NotConverged`].

use std::marker::PhantomData;

use super::{adjoint, check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, SvdJob};
use linext_traits::{OrientationTag, RowMajor, Scalar};
use linext_view::{ColMajorMatrix, DenseMatrix, DenseVector, LinextError, MatrixExpr, Result};
use num_traits::Zero;
use tracing::warn;

/// Singular values and the vectors requested from [`svd_decompose`].
#[derive(Debug, Clone)]
pub struct Svd<T: Scalar, O = RowMajor> {
    u: Option<ColMajorMatrix<T>>,
    s: DenseVector<T::Real>,
    vt: Option<ColMajorMatrix<T>>,
    _orientation: PhantomData<O>,
}

impl<T: Scalar, O: OrientationTag> Svd<T, O> {
    #[inline]
    pub fn singular_values(&self) -> &DenseVector<T::Real> {
        &self.s
    }

    /// Left singular vectors, if requested.
    pub fn u(&self) -> Option<DenseMatrix<T, O>> {
        self.u.as_ref().map(reorient)
    }

    /// `V^H`, if requested.
    pub fn vt(&self) -> Option<DenseMatrix<T, O>> {
        self.vt.as_ref().map(reorient)
    }

    /// Right singular vectors, if requested.
    pub fn v(&self) -> Option<DenseMatrix<T, O>> {
        self.vt.as_ref().map(|vt| reorient(&adjoint(vt)))
    }

    /// Ratio of the largest to the smallest singular value; infinite for a
    /// rank-deficient or empty matrix.
    pub fn condition(&self) -> T::Real {
        use linext_traits::RealScalar;
        match (self.s.as_slice().first(), self.s.as_slice().last()) {
            (Some(&hi), Some(&lo)) if lo > T::Real::zero() => hi / lo,
            _ => <T::Real as RealScalar>::infinity(),
        }
    }

    /// `||A||_2`, the largest singular value.
    pub fn norm(&self) -> T::Real {
        self.s.as_slice().first().copied().unwrap_or_else(T::Real::zero)
    }

    /// Number of singular values above `tol`.
    pub fn rank(&self, tol: T::Real) -> usize {
        self.s.as_slice().iter().filter(|&&s| s > tol).count()
    }
}

/// Decompose `a`, computing the left and right vectors as `jobu` and
/// `jobv` ask.
pub fn svd_decompose<M>(a: &M, jobu: SvdJob, jobv: SvdJob) -> Result<Svd<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let mut work = materialize(a);
    let (m, n) = work.shape();
    let k = m.min(n);
    let ucols = match jobu {
        SvdJob::Full => m,
        SvdJob::Thin => k,
        SvdJob::Skip => 0,
    };
    let vtrows = match jobv {
        SvdJob::Full => n,
        SvdJob::Thin => k,
        SvdJob::Skip => 0,
    };
    let mut s = vec![<M::Elem as Scalar>::Real::zero(); k];
    let mut u = ColMajorMatrix::<M::Elem>::zeros(m, ucols);
    let mut vt = ColMajorMatrix::<M::Elem>::zeros(vtrows, n);
    let info = <ActiveKernel as Kernel<M::Elem>>::gesvd(
        jobu,
        jobv,
        m,
        n,
        work.as_mut_slice(),
        ld(m),
        &mut s,
        u.as_mut_slice(),
        ld(m),
        vt.as_mut_slice(),
        ld(vtrows),
    );
    let info = check_status("gesvd", info)?;
    if info > 0 {
        warn!(
            routine = "gesvd",
            info,
            "singular value iteration did not converge"
        );
        return Err(LinextError::NotConverged {
            routine: "gesvd",
            info,
        });
    }
    Ok(Svd {
        u: (jobu != SvdJob::Skip).then_some(u),
        s: DenseVector::from_vec(s),
        vt: (jobv != SvdJob::Skip).then_some(vt),
        _orientation: PhantomData,
    })
}

/// Singular values only.
pub fn svd_values<M>(a: &M) -> Result<DenseVector<<M::Elem as Scalar>::Real>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let svd = svd_decompose(a, SvdJob::Skip, SvdJob::Skip)?;
    Ok(svd.s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::prod;
    use approx::assert_relative_eq;
    use linext_view::{DiagonalMatrix, Transposed, VectorExpr};
    use num_complex::Complex64;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_close<A, B>(a: &A, b: &B, tol: f64)
    where
        A: MatrixExpr<Elem = f64>,
        B: MatrixExpr<Elem = f64>,
    {
        assert_eq!(a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_relative_eq!(a.at(i, j), b.at(i, j), epsilon = tol);
            }
        }
    }

    #[test]
    fn test_diagonal_values() {
        let a = DenseMatrix::<f64>::from_rows(&[[0.0, 3.0], [-4.0, 0.0]]).unwrap();
        let s = svd_values(&a).unwrap();
        assert_relative_eq!(s.at(0), 4.0, epsilon = 1e-14);
        assert_relative_eq!(s.at(1), 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_thin_reconstruction() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = DenseMatrix::<f64>::from_fn(5, 3, |_, _| rng.gen_range(-1.0..1.0));
        let svd = svd_decompose(&a, SvdJob::Thin, SvdJob::Thin).unwrap();
        let (u, vt) = (svd.u().unwrap(), svd.vt().unwrap());
        assert_eq!((u.shape(), vt.shape()), ((5, 3), (3, 3)));

        let s = svd.singular_values();
        assert!(s.as_slice().windows(2).all(|w| w[0] >= w[1]));
        let us = prod(&u, &DiagonalMatrix::square(s, 0)).unwrap();
        assert_close(&prod(&us, &vt).unwrap(), &a, 1e-12);
        assert_close(
            &prod(&Transposed::new(&u), &u).unwrap(),
            &DenseMatrix::<f64>::identity(3),
            1e-12,
        );
        assert_close(&svd.v().unwrap(), &Transposed::new(&vt), 0.0);
    }

    #[test]
    fn test_full_vectors_and_skips() {
        let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let svd = svd_decompose(&a, SvdJob::Full, SvdJob::Skip).unwrap();
        assert_eq!(svd.u().unwrap().shape(), (2, 2));
        assert!(svd.vt().is_none());
        assert_eq!(svd.rank(1e-10), 2);

        let svd = svd_decompose(&a, SvdJob::Skip, SvdJob::Full).unwrap();
        assert!(svd.u().is_none());
        assert_eq!(svd.vt().unwrap().shape(), (3, 3));
    }

    #[test]
    fn test_rank_deficient_condition() {
        let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let svd = svd_decompose(&a, SvdJob::Skip, SvdJob::Skip).unwrap();
        assert_eq!(svd.rank(1e-12), 1);
        assert!(svd.condition() > 1e15);
        assert_relative_eq!(svd.norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_values() {
        let i = Complex64::new(0.0, 1.0);
        let a = DenseMatrix::<Complex64>::from_rows(&[
            [i * 2.0, Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), i],
        ])
        .unwrap();
        let s = svd_values(&a).unwrap();
        assert_relative_eq!(s.at(0), 2.0, epsilon = 1e-14);
        assert_relative_eq!(s.at(1), 1.0, epsilon = 1e-14);
    }
}
