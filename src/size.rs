//! Shape queries.
//!
//! Dimension 1 is the row count and dimension 2 the column count. Dimension
//! tags are resolved against the matrix orientation first:
//!
//! ```rust
//! use linext::{size_by_tag, size_dim, ColMajorMatrix, DenseMatrix, Major};
//!
//! let a = DenseMatrix::<f64>::zeros(2, 3);
//! assert_eq!(size_dim::<1, _>(&a), 2);
//! assert_eq!(size_by_tag::<Major, _>(&a), 2);
//!
//! let b = ColMajorMatrix::<f64>::zeros(2, 3);
//! assert_eq!(size_by_tag::<Major, _>(&b), 3);
//! ```
//!
//! Any index other than 1 or 2 is rejected at compile time:
//!
//! ```compile_fail
//! use linext::{size_dim, DenseMatrix};
//!
//! let a = DenseMatrix::<f64>::zeros(2, 3);
//! let _ = size_dim::<3, _>(&a);
//! ```

use linext_traits::{Dim, DimIndex, DimensionTag, ValidDimension, ValidVectorDimension};
use linext_view::{MatrixExpr, VectorExpr};

/// Selects the vector implementation of an operation defined for both
/// vectors and matrices.
#[derive(Debug, Clone, Copy)]
pub enum VectorShape {}

/// Selects the matrix implementation of an operation defined for both
/// vectors and matrices.
#[derive(Debug, Clone, Copy)]
pub enum MatrixShape {}

#[inline]
pub fn size<E: VectorExpr>(v: &E) -> usize {
    v.len()
}

#[inline]
pub fn num_rows<M: MatrixExpr>(m: &M) -> usize {
    m.nrows()
}

#[inline]
pub fn num_columns<M: MatrixExpr>(m: &M) -> usize {
    m.ncols()
}

/// Extent of `m` along a concrete dimension.
#[inline]
pub fn size_along<M: MatrixExpr>(m: &M, dim: Dim) -> usize {
    match dim {
        Dim::Rows => m.nrows(),
        Dim::Columns => m.ncols(),
    }
}

/// `size<K>(m)`: rows for `K = 1`, columns for `K = 2`.
#[inline]
pub fn size_dim<const K: usize, M: MatrixExpr>(m: &M) -> usize
where
    DimIndex<K>: ValidDimension,
{
    size_along(m, <DimIndex<K> as ValidDimension>::DIM)
}

/// `size<1>(v)`, the only dimension of a vector.
#[inline]
pub fn vector_size_dim<const K: usize, E: VectorExpr>(v: &E) -> usize
where
    DimIndex<K>: ValidVectorDimension,
{
    v.len()
}

/// Extent along a dimension tag resolved on the orientation of `m`.
#[inline]
pub fn size_by_tag<T: DimensionTag, M: MatrixExpr>(m: &M) -> usize {
    size_along(m, T::resolve::<M::Orientation>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linext_traits::{ColumnMajor, Leading, Major, Minor, RowMajor, UnknownOrientation};
    use linext_view::{DenseMatrix, DenseVector, SequenceVector, Transposed};

    #[test]
    fn test_plain_queries() {
        let v = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(size(&v), 3);
        assert_eq!(vector_size_dim::<1, _>(&v), 3);
        assert_eq!(size(&SequenceVector::new(0.0, 1.0, 7)), 7);

        let m = DenseMatrix::<f64>::zeros(4, 5);
        assert_eq!(num_rows(&m), 4);
        assert_eq!(num_columns(&m), 5);
        assert_eq!(size_dim::<1, _>(&m), 4);
        assert_eq!(size_dim::<2, _>(&m), 5);
    }

    #[test]
    fn test_tags_follow_orientation() {
        let r = DenseMatrix::<f64, RowMajor>::zeros(2, 7);
        let c = DenseMatrix::<f64, ColumnMajor>::zeros(2, 7);
        let u = DenseMatrix::<f64, UnknownOrientation>::zeros(2, 7);

        assert_eq!(size_by_tag::<Major, _>(&r), 2);
        assert_eq!(size_by_tag::<Minor, _>(&r), 7);
        assert_eq!(size_by_tag::<Leading, _>(&r), 7);

        assert_eq!(size_by_tag::<Major, _>(&c), 7);
        assert_eq!(size_by_tag::<Minor, _>(&c), 2);
        assert_eq!(size_by_tag::<Leading, _>(&c), 2);

        assert_eq!(size_by_tag::<Major, _>(&u), 2);
    }

    #[test]
    fn test_transposed_view_swaps_extents() {
        let m = DenseMatrix::<f64>::zeros(2, 3);
        let t = Transposed::new(&m);
        assert_eq!(size_dim::<1, _>(&t), 3);
        // The transposed view of a row-major matrix is column-major.
        assert_eq!(size_by_tag::<Major, _>(&t), 2);
    }
}
