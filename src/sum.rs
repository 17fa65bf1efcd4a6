//! Sums and running sums.
//!
//! Naming follows the inner loop: [`sum_rows`] runs down the rows and
//! yields one sum per column, [`sum_columns`] runs across the columns and
//! yields one sum per row. The default matrix [`sum`] and [`cumsum`] work
//! down the columns.
//!
//! ```rust
//! use linext::{cumsum, sum, sum_all, sum_columns, sum_rows, DenseMatrix, VectorExpr};
//!
//! let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!(sum_columns(&a).into_vec(), vec![6.0, 15.0]);
//! assert_eq!(sum_rows(&a).into_vec(), vec![5.0, 7.0, 9.0]);
//! assert_eq!(sum(&a).into_vec(), vec![5.0, 7.0, 9.0]);
//! assert_eq!(sum_all(&a), 21.0);
//! assert_eq!(cumsum(&a).as_slice(), &[1.0, 2.0, 3.0, 5.0, 7.0, 9.0]);
//! ```

use crate::maybe_sync::MaybeSync;
use crate::reduce::{fold_lines, scan_lines, Reducible};
use crate::size::{MatrixShape, VectorShape};
use linext_traits::{Dim, DimIndex, DimensionTag, Scalar, ValidDimension, ValidVectorDimension};
use linext_view::{DenseMatrix, DenseVector, MatrixExpr, VectorExpr};
use num_traits::Zero;

/// Containers with a default sum and running sum.
pub trait Summable<K>: Reducible<K> {
    /// A scalar for vectors, one sum per column for matrices.
    type Sum;
    /// Same shape as the input.
    type Cumsum;

    fn sum_default(&self) -> Self::Sum;

    fn cumsum_default(&self) -> Self::Cumsum;
}

impl<E> Summable<VectorShape> for E
where
    E: VectorExpr,
    E::Elem: Scalar,
{
    type Sum = E::Elem;
    type Cumsum = DenseVector<E::Elem>;

    fn sum_default(&self) -> E::Elem {
        if let Some(buf) = self.as_slice() {
            return buf.iter().fold(E::Elem::zero(), |s, &x| s + x);
        }
        (0..self.len()).fold(E::Elem::zero(), |s, i| s + self.at(i))
    }

    fn cumsum_default(&self) -> DenseVector<E::Elem> {
        let mut acc = E::Elem::zero();
        DenseVector::from_fn(self.len(), |i| {
            acc += self.at(i);
            acc
        })
    }
}

impl<M> Summable<MatrixShape> for M
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    type Sum = DenseVector<M::Elem>;
    type Cumsum = DenseMatrix<M::Elem, M::Orientation>;

    fn sum_default(&self) -> DenseVector<M::Elem> {
        sum_rows(self)
    }

    fn cumsum_default(&self) -> DenseMatrix<M::Elem, M::Orientation> {
        cumsum_rows(self)
    }
}

// ============================================================================
// Sums
// ============================================================================

/// Sum of a vector, or the column sums of a matrix.
#[inline]
pub fn sum<X, K>(x: &X) -> X::Sum
where
    X: Summable<K>,
{
    x.sum_default()
}

/// Sum of every element.
pub fn sum_all<X, K>(x: &X) -> X::Elem
where
    X: Reducible<K>,
    X::Elem: Scalar,
{
    let mut total = X::Elem::zero();
    x.visit(|v| total += v);
    total
}

/// One sum per line: per row for [`Dim::Rows`], per column for
/// [`Dim::Columns`].
pub fn sum_along<M>(m: &M, dim: Dim) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    DenseVector::from_vec(fold_lines(m, dim, M::Elem::zero(), |s, x| s + x))
}

/// `sum<K>(m)`: row sums for `K = 1`, column sums for `K = 2`.
pub fn sum_dim<const K: usize, M>(m: &M) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    DimIndex<K>: ValidDimension,
{
    sum_along(m, <DimIndex<K> as ValidDimension>::DIM)
}

/// `sum<1>(v)`: the sum as a one-element vector.
pub fn vector_sum_dim<const K: usize, E>(v: &E) -> DenseVector<E::Elem>
where
    E: VectorExpr,
    E::Elem: Scalar,
    DimIndex<K>: ValidVectorDimension,
{
    DenseVector::from_vec(vec![Summable::<VectorShape>::sum_default(v)])
}

pub fn sum_by_tag<T, M>(m: &M) -> DenseVector<M::Elem>
where
    T: DimensionTag,
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    sum_along(m, T::resolve::<M::Orientation>())
}

/// Sum down each column: element `j` is the sum of column `j`.
pub fn sum_rows<M>(m: &M) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    sum_along(m, Dim::Columns)
}

/// Sum across each row: element `i` is the sum of row `i`.
pub fn sum_columns<M>(m: &M) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    sum_along(m, Dim::Rows)
}

// ============================================================================
// Running sums
// ============================================================================

/// Prefix sums of a vector, or of each matrix column.
#[inline]
pub fn cumsum<X, K>(x: &X) -> X::Cumsum
where
    X: Summable<K>,
{
    x.cumsum_default()
}

/// Prefix sums along each row for [`Dim::Rows`], down each column for
/// [`Dim::Columns`].
pub fn cumsum_along<M>(m: &M, dim: Dim) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    scan_lines(m, dim, |s, x| s + x)
}

/// `cumsum<K>(m)`: along rows for `K = 1`, down columns for `K = 2`.
pub fn cumsum_dim<const K: usize, M>(m: &M) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Scalar,
    DimIndex<K>: ValidDimension,
{
    cumsum_along(m, <DimIndex<K> as ValidDimension>::DIM)
}

pub fn cumsum_by_tag<T, M>(m: &M) -> DenseMatrix<M::Elem, M::Orientation>
where
    T: DimensionTag,
    M: MatrixExpr,
    M::Elem: Scalar,
{
    cumsum_along(m, T::resolve::<M::Orientation>())
}

/// Each column independently, top to bottom.
pub fn cumsum_rows<M>(m: &M) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    cumsum_along(m, Dim::Columns)
}

/// Each row independently, left to right.
pub fn cumsum_columns<M>(m: &M) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    cumsum_along(m, Dim::Rows)
}
