//! Reshaping vectors and matrices.
//!
//! A reshape reads the source in one traversal order and writes the
//! target in the same order. Along [`Dim::Rows`] (dimension 1) the row
//! index varies fastest, which is the column-wise order; along
//! [`Dim::Columns`] (dimension 2) the column index varies fastest.
//!
//! ```rust
//! use linext::{reshape, reshape_dim, DenseMatrix, DenseVector};
//!
//! let v = DenseVector::from_vec(vec![1, 2, 3, 4, 5, 6]);
//! let a = reshape(&v, 2, 3).unwrap();
//! assert_eq!(a, DenseMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap());
//!
//! let b = reshape_dim::<2, _>(&a, 3, 2).unwrap();
//! assert_eq!(b, DenseMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap());
//! ```

use linext_traits::{Dim, DimIndex, DimensionTag, ValidDimension};
use linext_view::{DenseMatrix, LinextError, MatrixExpr, ResizableMatrix, Result, VectorExpr};

#[inline]
fn check_count(have: usize, rows: usize, cols: usize) -> Result<()> {
    if rows * cols != have {
        return Err(LinextError::BadSize {
            expected: have,
            actual: rows * cols,
        });
    }
    Ok(())
}

/// Position of the `s`-th element of a `rows x cols` shape in the order
/// where `fastest` varies fastest.
#[inline(always)]
fn unravel(s: usize, rows: usize, cols: usize, fastest: Dim) -> (usize, usize) {
    match fastest {
        Dim::Rows => (s % rows, s / rows),
        Dim::Columns => (s / cols, s % cols),
    }
}

/// Lay a vector row by row into an `rows x cols` matrix: element `i` lands
/// at `(i / cols, i % cols)`.
pub fn reshape<E>(v: &E, rows: usize, cols: usize) -> Result<DenseMatrix<E::Elem>>
where
    E: VectorExpr,
{
    check_count(v.len(), rows, cols)?;
    Ok(DenseMatrix::from_fn(rows, cols, |i, j| v.at(i * cols + j)))
}

/// Reshape a matrix, traversing source and target with `fastest` as the
/// fastest-varying index.
pub fn reshape_along<M>(
    m: &M,
    fastest: Dim,
    rows: usize,
    cols: usize,
) -> Result<DenseMatrix<M::Elem, M::Orientation>>
where
    M: MatrixExpr,
{
    let (src_rows, src_cols) = m.shape();
    check_count(src_rows * src_cols, rows, cols)?;
    Ok(DenseMatrix::from_fn(rows, cols, |i, j| {
        let s = match fastest {
            Dim::Rows => j * rows + i,
            Dim::Columns => i * cols + j,
        };
        let (si, sj) = unravel(s, src_rows, src_cols, fastest);
        m.at(si, sj)
    }))
}

/// `reshape<K>(m, rows, cols)`: column-wise for `K = 1`, row-wise for
/// `K = 2`.
pub fn reshape_dim<const K: usize, M>(
    m: &M,
    rows: usize,
    cols: usize,
) -> Result<DenseMatrix<M::Elem, M::Orientation>>
where
    M: MatrixExpr,
    DimIndex<K>: ValidDimension,
{
    reshape_along(m, <DimIndex<K> as ValidDimension>::DIM, rows, cols)
}

/// Reshape along the dimension `T` resolves to for `M`'s orientation.
///
/// `Major` is dimension 1 on a row-major source and dimension 2 on a
/// column-major one, so on column-major input the copy runs row-wise.
pub fn reshape_by_tag<T, M>(
    m: &M,
    rows: usize,
    cols: usize,
) -> Result<DenseMatrix<M::Elem, M::Orientation>>
where
    T: DimensionTag,
    M: MatrixExpr,
{
    reshape_along(m, T::resolve::<M::Orientation>(), rows, cols)
}

/// Reshape a container in place. On error `m` is left untouched.
pub fn reshape_inplace_along<M>(m: &mut M, fastest: Dim, rows: usize, cols: usize) -> Result<()>
where
    M: ResizableMatrix,
{
    let reshaped = reshape_along(&*m, fastest, rows, cols)?;
    m.resize(rows, cols, false);
    m.assign(&reshaped)
}

pub fn reshape_inplace_dim<const K: usize, M>(m: &mut M, rows: usize, cols: usize) -> Result<()>
where
    M: ResizableMatrix,
    DimIndex<K>: ValidDimension,
{
    reshape_inplace_along(m, <DimIndex<K> as ValidDimension>::DIM, rows, cols)
}

pub fn reshape_inplace_by_tag<T, M>(m: &mut M, rows: usize, cols: usize) -> Result<()>
where
    T: DimensionTag,
    M: ResizableMatrix,
{
    let fastest = T::resolve::<M::Orientation>();
    reshape_inplace_along(m, fastest, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linext_traits::{ColumnMajor, Major, RowMajor};
    use linext_view::{DenseVector, SequenceVector};

    fn sample() -> DenseMatrix<i32, RowMajor> {
        DenseMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_vector_reshape_is_row_wise() {
        let v = DenseVector::from_vec(vec![1, 2, 3, 4, 5, 6]);
        let m = reshape(&v, 3, 2).unwrap();
        assert_eq!(
            m,
            DenseMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap()
        );

        let s = reshape(&SequenceVector::new(0.0, 1.0, 4), 2, 2).unwrap();
        assert_eq!(s.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_size_mismatch() {
        let v = DenseVector::from_vec(vec![1, 2, 3]);
        assert_eq!(
            reshape(&v, 2, 2).unwrap_err(),
            LinextError::BadSize {
                expected: 3,
                actual: 4,
            }
        );
        assert!(reshape_dim::<1, _>(&sample(), 4, 2).is_err());
    }

    #[test]
    fn test_column_wise_and_row_wise() {
        let a = sample();
        let col = reshape_dim::<1, _>(&a, 3, 2).unwrap();
        // Column-wise sequence of `a` is 1 4 2 5 3 6.
        assert_eq!(
            col,
            DenseMatrix::from_rows(&[[1, 5], [4, 3], [2, 6]]).unwrap()
        );

        let row = reshape_dim::<2, _>(&a, 3, 2).unwrap();
        assert_eq!(
            row,
            DenseMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap()
        );

        let flat = reshape_along(&a, Dim::Rows, 1, 6).unwrap();
        assert_eq!(flat.as_slice(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_round_trip_and_tags() {
        let a = sample();
        for fastest in [Dim::Rows, Dim::Columns] {
            let there = reshape_along(&a, fastest, 3, 2).unwrap();
            let back = reshape_along(&there, fastest, 2, 3).unwrap();
            assert_eq!(back, a);
        }

        let c: DenseMatrix<i32, ColumnMajor> = a.to_orientation();
        assert_eq!(
            reshape_by_tag::<Major, _>(&c, 3, 2).unwrap(),
            reshape_dim::<2, _>(&c, 3, 2).unwrap()
        );
        let row_wise = DenseMatrix::<i32, ColumnMajor>::from_rows(&[[1, 2], [3, 4], [5, 6]]);
        assert_eq!(reshape_by_tag::<Major, _>(&c, 3, 2), row_wise);
        assert_eq!(
            reshape_by_tag::<Major, _>(&a, 3, 2).unwrap(),
            reshape_dim::<1, _>(&a, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_inplace() {
        let mut a = sample();
        reshape_inplace_dim::<2, _>(&mut a, 3, 2).unwrap();
        assert_eq!(a.shape(), (3, 2));
        assert_eq!(a.as_slice(), &[1, 2, 3, 4, 5, 6]);

        reshape_inplace_by_tag::<Major, _>(&mut a, 2, 3).unwrap();
        assert_eq!(a, DenseMatrix::from_rows(&[[1, 5, 4], [3, 2, 6]]).unwrap());

        assert!(reshape_inplace_along(&mut a, Dim::Rows, 5, 1).is_err());
        assert_eq!(a.shape(), (2, 3));
    }
}
