//! Cholesky factorization `A = L L^H` of a Hermitian positive definite
//! matrix. Only the lower triangle of the input is read.

use std::marker::PhantomData;

use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, NormKind};
use linext_traits::{OrientationTag, RowMajor, Scalar, Uplo};
use linext_view::{
    ensure_square, ColMajorMatrix, DenseMatrix, DenseVector, LinextError, MatrixExpr,
    MatrixExprMut, Result, VectorExpr,
};
use num_traits::{One, Zero};
use tracing::warn;

/// Lower Cholesky factor of an `n x n` matrix.
#[derive(Debug, Clone)]
pub struct Cholesky<T: Scalar, O = RowMajor> {
    factor: ColMajorMatrix<T>,
    anorm: T::Real,
    _orientation: PhantomData<O>,
}

impl<T: Scalar, O: OrientationTag> Cholesky<T, O> {
    #[inline]
    pub fn order(&self) -> usize {
        self.factor.nrows()
    }

    /// The factor `L`, zero above the diagonal.
    pub fn l(&self) -> DenseMatrix<T, O> {
        let n = self.order();
        DenseMatrix::from_fn(n, n, |i, j| {
            if i >= j {
                self.factor.at(i, j)
            } else {
                T::zero()
            }
        })
    }

    /// `det(A)`, the squared product of the diagonal of `L`.
    pub fn det(&self) -> T::Real {
        (0..self.order())
            .map(|i| self.factor.at(i, i).re())
            .fold(T::Real::one(), |acc, d| acc * d * d)
    }

    /// Reciprocal condition estimate of `A` in the 1-norm.
    pub fn rcond(&self) -> Result<T::Real> {
        let n = self.order();
        let mut rcond = T::Real::zero();
        let info = <ActiveKernel as Kernel<T>>::pocon(
            Uplo::Lower,
            n,
            self.factor.as_slice(),
            ld(n),
            self.anorm,
            &mut rcond,
        );
        check_status("pocon", info)?;
        Ok(rcond)
    }

    fn check_rhs(&self, rows: usize) -> Result<usize> {
        let n = self.order();
        if rows != n {
            return Err(LinextError::BadSize {
                expected: n,
                actual: rows,
            });
        }
        Ok(n)
    }

    fn solve_buffer(&self, n: usize, nrhs: usize, b: &mut [T]) -> Result<()> {
        let info = <ActiveKernel as Kernel<T>>::potrs(
            Uplo::Lower,
            n,
            nrhs,
            self.factor.as_slice(),
            ld(n),
            b,
            ld(n),
        );
        check_status("potrs", info).map(|_| ())
    }

    /// Solve `A x = b` with the stored factor.
    pub fn solve<E>(&self, b: &E) -> Result<DenseVector<T>>
    where
        E: VectorExpr<Elem = T>,
    {
        let n = self.check_rhs(b.len())?;
        let mut x = b.to_dense();
        self.solve_buffer(n, 1, x.as_mut_slice())?;
        Ok(x)
    }

    /// Solve `A X = B`; `X` takes the orientation of `B`.
    pub fn solve_matrix<B>(&self, b: &B) -> Result<DenseMatrix<T, B::Orientation>>
    where
        B: MatrixExpr<Elem = T> + MaybeSync,
    {
        let n = self.check_rhs(b.nrows())?;
        let mut x = materialize(b);
        let nrhs = x.ncols();
        self.solve_buffer(n, nrhs, x.as_mut_slice())?;
        Ok(reorient(&x))
    }
}

/// Factor the column-major buffer in place; returns the kernel status.
fn factor_buffer<T: Scalar>(work: &mut ColMajorMatrix<T>) -> Result<i32> {
    let (rows, cols) = work.shape();
    ensure_square(rows, cols)?;
    let info = <ActiveKernel as Kernel<T>>::potrf(Uplo::Lower, rows, work.as_mut_slice(), ld(rows));
    let info = check_status("potrf", info)?;
    if info > 0 {
        warn!(routine = "potrf", info, "matrix is not positive definite");
    }
    Ok(info)
}

/// Factor a Hermitian positive definite `a`. A non-positive pivot at row
/// `k` fails with [`LinextError::Singular`] carrying `k + 1`.
///
/// ```rust
/// use linext::{cholesky_decompose, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[4.0, 2.0], [2.0, 5.0]]).unwrap();
/// let l = cholesky_decompose(&a).unwrap().l();
/// assert_eq!(l, DenseMatrix::from_rows(&[[2.0, 0.0], [1.0, 2.0]]).unwrap());
/// ```
pub fn cholesky_decompose<M>(a: &M) -> Result<Cholesky<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(a.nrows(), a.ncols())?;
    let mut work = materialize(a);
    let n = work.nrows();
    // Norm of the Hermitian matrix the lower triangle describes.
    let full = ColMajorMatrix::<M::Elem>::from_fn(n, n, |i, j| {
        if i >= j {
            work.at(i, j)
        } else {
            work.at(j, i).conj()
        }
    });
    let anorm = <ActiveKernel as Kernel<M::Elem>>::lange(
        NormKind::One,
        n,
        n,
        full.as_slice(),
        ld(n),
    );
    let info = factor_buffer(&mut work)?;
    if info > 0 {
        return Err(LinextError::Singular { info });
    }
    Ok(Cholesky {
        factor: work,
        anorm,
        _orientation: PhantomData,
    })
}

/// Overwrite the lower triangle of `a` with `L`. Returns `0`, or `k + 1`
/// when the pivot at row `k` is not positive, in which case `a` is left
/// unchanged.
pub fn cholesky_decompose_inplace<M>(a: &mut M) -> Result<i32>
where
    M: MatrixExprMut + MaybeSync,
    M::Elem: Scalar,
{
    let mut work = materialize(&*a);
    let info = factor_buffer(&mut work)?;
    if info > 0 {
        return Ok(info);
    }
    let n = work.nrows();
    for j in 0..n {
        for i in j..n {
            a.set(i, j, work.at(i, j));
        }
    }
    Ok(0)
}

/// Solve `A x = b` for Hermitian positive definite `A`.
pub fn cholesky_solve<M, E>(a: &M, b: &E) -> Result<DenseVector<M::Elem>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    E: VectorExpr<Elem = M::Elem>,
{
    cholesky_decompose(a)?.solve(b)
}
