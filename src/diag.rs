//! Diagonals: building diagonal matrices from vectors and viewing the
//! diagonals of matrices.
//!
//! [`diag`] is overloaded on its argument. A vector yields a dense square
//! matrix with the vector on the `k`-th diagonal; a matrix yields a
//! [`MatrixDiagonal`] view of its `k`-th diagonal, writable when the matrix
//! is passed as `&mut`.
//!
//! ```rust
//! use linext::{diag, DenseMatrix, DenseVector, VectorExpr, VectorExprMut};
//!
//! let v = DenseVector::from_vec(vec![1.0, 2.0]);
//! let d = diag(&v, 1);
//! assert_eq!(d, DenseMatrix::from_rows(&[[0.0, 1.0, 0.0], [0.0, 0.0, 2.0], [0.0, 0.0, 0.0]]).unwrap());
//!
//! let mut a = DenseMatrix::<f64>::zeros(2, 2);
//! diag(&mut a, 0).assign(&v).unwrap();
//! assert_eq!(diag(&a, 0).at(1), 2.0);
//! ```

use crate::size::{MatrixShape, VectorShape};
use linext_traits::Scalar;
use linext_view::{DenseMatrix, DiagonalMatrix, MatrixDiagonal, MatrixExpr, VectorExpr};

/// Values accepted by [`diag`].
pub trait DiagonalOp<K>: Sized {
    type Output;

    fn diag_of(self, k: isize) -> Self::Output;
}

impl<E> DiagonalOp<VectorShape> for E
where
    E: VectorExpr,
    E::Elem: Scalar,
{
    type Output = DenseMatrix<E::Elem>;

    fn diag_of(self, k: isize) -> DenseMatrix<E::Elem> {
        DenseMatrix::from_expr(&DiagonalMatrix::square(self, k))
    }
}

impl<M: MatrixExpr> DiagonalOp<MatrixShape> for M {
    type Output = MatrixDiagonal<M>;

    #[inline]
    fn diag_of(self, k: isize) -> MatrixDiagonal<M> {
        MatrixDiagonal::new(self, k)
    }
}

/// Square diagonal matrix of order `len(v) + |k|` from a vector, or the
/// `k`-th diagonal of a matrix.
#[inline]
pub fn diag<X, K>(x: X, k: isize) -> X::Output
where
    X: DiagonalOp<K>,
{
    x.diag_of(k)
}

/// `rows x cols` matrix with `v` on the `k`-th diagonal. Elements of `v`
/// beyond the end of the diagonal are dropped.
pub fn diag_with_shape<E>(v: E, rows: usize, cols: usize, k: isize) -> DenseMatrix<E::Elem>
where
    E: VectorExpr,
    E::Elem: Scalar,
{
    DenseMatrix::from_expr(&DiagonalMatrix::with_shape(v, rows, cols, k))
}

/// Lazy counterpart of `diag(v, k)`: no storage beyond `v`.
#[inline]
pub fn diag_view<E>(v: E, k: isize) -> DiagonalMatrix<E>
where
    E: VectorExpr,
    E::Elem: Scalar,
{
    DiagonalMatrix::square(v, k)
}
