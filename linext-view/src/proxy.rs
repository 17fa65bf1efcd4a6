//! Proxies sharing storage with a source expression.
//!
//! A proxy holds its source the same way an expression does: by value when
//! given a value, by reference when given `&M` or `&mut M`. Proxies over a
//! writable source are writable.

use crate::expr::{MatrixExpr, MatrixExprMut, VectorExpr, VectorExprMut};
use crate::{LinextError, Result};
use linext_traits::{Closure, OrientationKind, OrientationTag, PackedStorage, RowMajor, Scalar};
use num_traits::Zero;

// ============================================================================
// Diagonal of a matrix
// ============================================================================

/// The `k`-th diagonal of a matrix as a vector.
///
/// `k > 0` selects a super-diagonal, `k < 0` a sub-diagonal. Element `j` is
/// `m(j + max(0, -k), j + max(0, k))`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixDiagonal<M> {
    src: M,
    k: isize,
    len: usize,
}

impl<M: MatrixExpr> MatrixDiagonal<M> {
    pub fn new(src: M, k: isize) -> Self {
        let (rows, cols) = src.shape();
        let len = diagonal_len(rows, cols, k);
        Self { src, k, len }
    }

    /// Diagonal offset.
    #[inline]
    pub fn offset(&self) -> isize {
        self.k
    }

    #[inline]
    pub fn source(&self) -> &M {
        &self.src
    }

    #[inline(always)]
    fn position(&self, j: usize) -> (usize, usize) {
        assert!(
            j < self.len,
            "diagonal index {j} out of range for length {}",
            self.len
        );
        let row_shift = (-self.k).max(0) as usize;
        let col_shift = self.k.max(0) as usize;
        (j + row_shift, j + col_shift)
    }
}

/// Number of elements on the `k`-th diagonal of a `rows x cols` matrix.
pub fn diagonal_len(rows: usize, cols: usize, k: isize) -> usize {
    let (rows, cols) = (rows as isize, cols as isize);
    let n = if k >= 0 {
        rows.min(cols - k)
    } else {
        (rows + k).min(cols)
    };
    n.max(0) as usize
}

impl<M: MatrixExpr> VectorExpr for MatrixDiagonal<M> {
    type Elem = M::Elem;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn at(&self, j: usize) -> M::Elem {
        let (r, c) = self.position(j);
        self.src.at(r, c)
    }
}

impl<M: MatrixExprMut> VectorExprMut for MatrixDiagonal<M> {
    #[inline(always)]
    fn at_mut(&mut self, j: usize) -> &mut M::Elem {
        let (r, c) = self.position(j);
        self.src.at_mut(r, c)
    }
}

// ============================================================================
// Rows and columns
// ============================================================================

/// Row `i` of a matrix as a vector.
#[derive(Debug, Clone, Copy)]
pub struct MatrixRow<M> {
    src: M,
    i: usize,
}

impl<M: MatrixExpr> MatrixRow<M> {
    /// Fails with [`LinextError::BadIndex`] if `i` is not a row of `src`.
    pub fn new(src: M, i: usize) -> Result<Self> {
        if i >= src.nrows() {
            return Err(LinextError::BadIndex {
                index: i,
                len: src.nrows(),
            });
        }
        Ok(Self { src, i })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.i
    }
}

impl<M: MatrixExpr> VectorExpr for MatrixRow<M> {
    type Elem = M::Elem;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE;

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.ncols()
    }

    #[inline(always)]
    fn at(&self, j: usize) -> M::Elem {
        self.src.at(self.i, j)
    }
}

impl<M: MatrixExprMut> VectorExprMut for MatrixRow<M> {
    #[inline(always)]
    fn at_mut(&mut self, j: usize) -> &mut M::Elem {
        self.src.at_mut(self.i, j)
    }
}

/// Column `j` of a matrix as a vector.
#[derive(Debug, Clone, Copy)]
pub struct MatrixColumn<M> {
    src: M,
    j: usize,
}

impl<M: MatrixExpr> MatrixColumn<M> {
    /// Fails with [`LinextError::BadIndex`] if `j` is not a column of `src`.
    pub fn new(src: M, j: usize) -> Result<Self> {
        if j >= src.ncols() {
            return Err(LinextError::BadIndex {
                index: j,
                len: src.ncols(),
            });
        }
        Ok(Self { src, j })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.j
    }
}

impl<M: MatrixExpr> VectorExpr for MatrixColumn<M> {
    type Elem = M::Elem;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE;

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> M::Elem {
        self.src.at(i, self.j)
    }
}

impl<M: MatrixExprMut> VectorExprMut for MatrixColumn<M> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize) -> &mut M::Elem {
        self.src.at_mut(i, self.j)
    }
}

// ============================================================================
// Transpose
// ============================================================================

/// `m(j, i)` without copying; the orientation flips.
#[derive(Debug, Clone, Copy)]
pub struct Transposed<M> {
    src: M,
}

impl<M: MatrixExpr> Transposed<M> {
    #[inline]
    pub fn new(src: M) -> Self {
        Self { src }
    }
}

impl<M: MatrixExpr> MatrixExpr for Transposed<M> {
    type Elem = M::Elem;
    type Orientation = <M::Orientation as OrientationTag>::Transposed;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE;

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.ncols()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> M::Elem {
        self.src.at(j, i)
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[M::Elem]> {
        // A row-major buffer read as its transpose is column-major and
        // vice versa; an unknown layout stays row-major and does not flip.
        if M::Orientation::KIND == OrientationKind::Unknown {
            return None;
        }
        self.src.as_contiguous()
    }
}

impl<M: MatrixExprMut> MatrixExprMut for Transposed<M> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut M::Elem {
        self.src.at_mut(j, i)
    }
}

// ============================================================================
// Vector on a diagonal
// ============================================================================

/// A `rows x cols` matrix holding `v` on its `k`-th diagonal and zero
/// elsewhere, evaluated on access.
///
/// If `v` is longer than the diagonal, the tail is ignored; if shorter, the
/// rest of the diagonal is zero.
#[derive(Debug, Clone, Copy)]
pub struct DiagonalMatrix<V> {
    src: V,
    nrows: usize,
    ncols: usize,
    k: isize,
}

impl<V: VectorExpr> DiagonalMatrix<V> {
    /// Square matrix of order `len(v) + |k|`.
    pub fn square(src: V, k: isize) -> Self {
        let n = src.len() + k.unsigned_abs();
        Self {
            src,
            nrows: n,
            ncols: n,
            k,
        }
    }

    pub fn with_shape(src: V, nrows: usize, ncols: usize, k: isize) -> Self {
        Self {
            src,
            nrows,
            ncols,
            k,
        }
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.k
    }
}

impl<V> MatrixExpr for DiagonalMatrix<V>
where
    V: VectorExpr,
    V::Elem: Scalar,
{
    type Elem = V::Elem;
    type Orientation = RowMajor;
    type Storage = PackedStorage;
    const CLOSURE: Closure = V::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.ncols
    }

    fn at(&self, i: usize, j: usize) -> V::Elem {
        assert!(
            i < self.nrows && j < self.ncols,
            "index ({i}, {j}) out of range for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        if j as isize - i as isize != self.k {
            return V::Elem::zero();
        }
        let pos = i.min(j);
        if pos < self.src.len() {
            self.src.at(pos)
        } else {
            V::Elem::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{DenseMatrix, DenseVector};
    use linext_traits::ColumnMajor;

    fn sample() -> DenseMatrix<i32> {
        DenseMatrix::from_rows(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]).unwrap()
    }

    #[test]
    fn test_diagonal_sizes() {
        assert_eq!(diagonal_len(3, 4, 0), 3);
        assert_eq!(diagonal_len(3, 4, 1), 3);
        assert_eq!(diagonal_len(3, 4, 2), 2);
        assert_eq!(diagonal_len(3, 4, -1), 2);
        assert_eq!(diagonal_len(3, 4, -3), 0);
        assert_eq!(diagonal_len(3, 4, 5), 0);
    }

    #[test]
    fn test_diagonal_elements() {
        let m = sample();
        assert_eq!(
            MatrixDiagonal::new(&m, 0).to_dense().into_vec(),
            vec![1, 6, 11]
        );
        assert_eq!(MatrixDiagonal::new(&m, 2).to_dense().into_vec(), vec![3, 8]);
        assert_eq!(
            MatrixDiagonal::new(&m, -1).to_dense().into_vec(),
            vec![5, 10]
        );
    }

    #[test]
    fn test_diagonal_write_through() {
        let mut m = sample();
        {
            let mut d = MatrixDiagonal::new(&mut m, 1);
            for j in 0..d.len() {
                d.set(j, 0);
            }
        }
        assert_eq!(m[(0, 1)], 0);
        assert_eq!(m[(2, 3)], 0);
        assert_eq!(m[(0, 0)], 1);
    }

    #[test]
    fn test_rows_and_columns() {
        let m = sample();
        let r = MatrixRow::new(&m, 1).unwrap();
        let c = MatrixColumn::new(&m, 3).unwrap();
        assert_eq!(r.to_dense().into_vec(), vec![5, 6, 7, 8]);
        assert_eq!(c.to_dense().into_vec(), vec![4, 8, 12]);
        assert!(MatrixRow::new(&m, 3).is_err());
    }

    #[test]
    fn test_transposed_view() {
        let m = sample();
        let t = Transposed::new(&m);
        assert_eq!(t.shape(), (4, 3));
        assert_eq!(t.at(3, 0), 4);
        let copied: DenseMatrix<i32, ColumnMajor> = DenseMatrix::from_expr(&t);
        assert_eq!(copied[(3, 2)], 12);
    }

    #[test]
    fn test_diagonal_matrix() {
        let v = DenseVector::from_vec(vec![1.0, 2.0]);
        let d = DiagonalMatrix::square(&v, -1);
        assert_eq!(d.shape(), (3, 3));
        assert_eq!(d.at(1, 0), 1.0);
        assert_eq!(d.at(2, 1), 2.0);
        assert_eq!(d.at(0, 0), 0.0);

        let r = DiagonalMatrix::with_shape(&v, 1, 3, 0);
        assert_eq!(r.at(0, 0), 1.0);
        assert_eq!(r.at(0, 1), 0.0);
    }
}
