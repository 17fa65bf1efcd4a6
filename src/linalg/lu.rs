//! LU factorization with partial pivoting, `P A = L U`.
//!
//! ```rust
//! use linext::{lu_solve, DenseMatrix, DenseVector};
//!
//! let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]).unwrap();
//! let b = DenseVector::from_vec(vec![6.0, 15.0, 25.0]);
//! let x = lu_solve(&a, &b).unwrap();
//! assert!(x.as_slice().iter().all(|&xi| (xi - 1.0).abs() < 1e-12));
//! ```

use std::marker::PhantomData;

use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, Trans};
use linext_traits::{OrientationTag, RowMajor, Scalar};
use linext_view::{
    ensure_square, ColMajorMatrix, DenseMatrix, DenseVector, LinextError, MatrixExpr,
    ResizableMatrix, Result, VectorExpr, VectorExprMut,
};
use num_traits::{One, Zero};

/// Packed LU factors of an `m x n` matrix.
///
/// `L` is `m x min(m, n)` unit lower trapezoidal and `U` is
/// `min(m, n) x n` upper trapezoidal. Matrices handed out are in
/// orientation `O`, the orientation of the factored input.
#[derive(Debug, Clone)]
pub struct Lu<T, O = RowMajor> {
    factors: ColMajorMatrix<T>,
    ipiv: Vec<usize>,
    info: i32,
    _orientation: PhantomData<O>,
}

impl<T: Scalar, O: OrientationTag> Lu<T, O> {
    /// `0`, or `i + 1` when `U(i, i)` is exactly zero.
    #[inline]
    pub fn status(&self) -> i32 {
        self.info
    }

    #[inline]
    pub fn is_singular(&self) -> bool {
        self.info > 0
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.factors.shape()
    }

    pub fn l(&self) -> DenseMatrix<T, O> {
        let (m, n) = self.shape();
        let k = m.min(n);
        DenseMatrix::from_fn(m, k, |i, j| {
            if i == j {
                T::one()
            } else if i > j {
                self.factors.at(i, j)
            } else {
                T::zero()
            }
        })
    }

    pub fn u(&self) -> DenseMatrix<T, O> {
        let (m, n) = self.shape();
        let k = m.min(n);
        DenseMatrix::from_fn(k, n, |i, j| {
            if i <= j {
                self.factors.at(i, j)
            } else {
                T::zero()
            }
        })
    }

    /// Row permutation `p` with `(P A)(i, :) = A(p[i], :)`.
    pub fn permutation(&self) -> Vec<usize> {
        let mut p: Vec<usize> = (0..self.factors.nrows()).collect();
        for (i, &r) in self.ipiv.iter().enumerate() {
            p.swap(i, r);
        }
        p
    }

    /// The permutation as a matrix, so that `P A = L U`.
    pub fn permutation_matrix(&self) -> DenseMatrix<T, O> {
        let p = self.permutation();
        let m = p.len();
        DenseMatrix::from_fn(m, m, |i, j| if p[i] == j { T::one() } else { T::zero() })
    }

    /// Determinant of a square factored matrix.
    pub fn det(&self) -> Result<T> {
        let (m, n) = self.shape();
        ensure_square(m, n)?;
        let mut det = T::one();
        for (i, &r) in self.ipiv.iter().enumerate() {
            det *= self.factors.at(i, i);
            if r != i {
                det = -det;
            }
        }
        Ok(det)
    }

    fn solvable(&self, rhs_rows: usize) -> Result<usize> {
        let (m, n) = self.shape();
        ensure_square(m, n)?;
        if rhs_rows != n {
            return Err(LinextError::BadSize {
                expected: n,
                actual: rhs_rows,
            });
        }
        if self.info > 0 {
            return Err(LinextError::Singular { info: self.info });
        }
        Ok(n)
    }

    /// Overwrite a column-major `n x nrhs` buffer with the solution.
    fn solve_buffer(&self, n: usize, nrhs: usize, b: &mut [T]) -> Result<()> {
        let info = <ActiveKernel as Kernel<T>>::getrs(
            Trans::NoTrans,
            n,
            nrhs,
            self.factors.as_slice(),
            ld(n),
            &self.ipiv,
            b,
            ld(n),
        );
        check_status("getrs", info).map(|_| ())
    }

    /// Solve `A x = b`: `L y = P b`, then `U x = y`.
    pub fn solve<E>(&self, b: &E) -> Result<DenseVector<T>>
    where
        E: VectorExpr<Elem = T>,
    {
        let n = self.solvable(b.len())?;
        let mut x = b.to_dense();
        self.solve_buffer(n, 1, x.as_mut_slice())?;
        Ok(x)
    }

    /// Solve `A X = B` for every column of `B`. `X` takes the orientation
    /// of `B`.
    pub fn solve_matrix<B>(&self, b: &B) -> Result<DenseMatrix<T, B::Orientation>>
    where
        B: MatrixExpr<Elem = T> + MaybeSync,
    {
        let n = self.solvable(b.nrows())?;
        let mut x = materialize(b);
        let nrhs = x.ncols();
        self.solve_buffer(n, nrhs, x.as_mut_slice())?;
        Ok(reorient(&x))
    }
}

/// Factor `a`. A zero pivot is not an error here; see [`Lu::status`].
pub fn lu_decompose<M>(a: &M) -> Result<Lu<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let mut factors = materialize(a);
    let (m, n) = factors.shape();
    let mut ipiv = vec![0; m.min(n)];
    let info = <ActiveKernel as Kernel<M::Elem>>::getrf(
        m,
        n,
        factors.as_mut_slice(),
        ld(m),
        &mut ipiv,
    );
    let info = check_status("getrf", info)?;
    Ok(Lu {
        factors,
        ipiv,
        info,
        _orientation: PhantomData,
    })
}

/// Factor `a` into caller-provided containers, resizing them to fit.
/// Returns the factorization status.
pub fn lu_factors<M, L, U>(a: &M, l: &mut L, u: &mut U, p: &mut Vec<usize>) -> Result<i32>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    L: ResizableMatrix<Elem = M::Elem>,
    U: ResizableMatrix<Elem = M::Elem>,
{
    let lu = lu_decompose(a)?;
    let (lf, uf) = (lu.l(), lu.u());
    l.resize(lf.nrows(), lf.ncols(), false);
    l.assign(&lf)?;
    u.resize(uf.nrows(), uf.ncols(), false);
    u.assign(&uf)?;
    p.clear();
    p.extend(lu.permutation());
    Ok(lu.status())
}

/// Solve `A x = b` for square `A`. Fails with [`LinextError::Singular`]
/// on a zero pivot.
pub fn lu_solve<M, E>(a: &M, b: &E) -> Result<DenseVector<M::Elem>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    E: VectorExpr<Elem = M::Elem>,
{
    ensure_square(a.nrows(), a.ncols())?;
    lu_decompose(a)?.solve(b)
}

/// Solve `A x = b` in place. Returns `0`, or `i + 1` when `U(i, i)` is
/// zero, in which case `b` is left untouched.
pub fn lu_solve_inplace<M, V>(a: &M, b: &mut V) -> Result<i32>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: VectorExprMut<Elem = M::Elem>,
{
    ensure_square(a.nrows(), a.ncols())?;
    let lu = lu_decompose(a)?;
    match lu.solve(&*b) {
        Ok(x) => {
            b.assign(&x)?;
            Ok(0)
        }
        Err(LinextError::Singular { info }) => Ok(info),
        Err(e) => Err(e),
    }
}

/// Solve `A X = B` for several right-hand sides at once.
pub fn lu_solve_matrix<M, B>(a: &M, b: &B) -> Result<DenseMatrix<M::Elem, B::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    B: MatrixExpr<Elem = M::Elem> + MaybeSync,
{
    ensure_square(a.nrows(), a.ncols())?;
    lu_decompose(a)?.solve_matrix(b)
}
