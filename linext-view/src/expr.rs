//! Vector and matrix expression traits.
//!
//! Containers, lazy expressions and proxies all implement these traits, so
//! every operation accepts any of them. Element access through [`at`] never
//! caches: each call re-evaluates the expression from its sources.
//!
//! [`at`]: VectorExpr::at

use crate::cursor::{Elements, MatrixCursor1, MatrixCursor2, Reverse, VectorCursor};
use crate::dense::{DenseMatrix, DenseVector};
use crate::{LinextError, Result};
use linext_traits::{Closure, OrientationTag, StorageTag};

// ============================================================================
// Vectors
// ============================================================================

/// Read access to a vector-shaped value.
pub trait VectorExpr {
    type Elem: Copy;
    type Storage: StorageTag;

    /// How this value holds its source.
    const CLOSURE: Closure;

    fn len(&self) -> usize;

    /// Element `i`. Panics if `i >= len()`.
    fn at(&self, i: usize) -> Self::Elem;

    /// Contiguous element buffer, if the value has one.
    #[inline]
    fn as_slice(&self) -> Option<&[Self::Elem]> {
        None
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked element access.
    #[inline]
    fn get(&self, i: usize) -> Result<Self::Elem> {
        let len = self.len();
        if i >= len {
            return Err(LinextError::BadIndex { index: i, len });
        }
        Ok(self.at(i))
    }

    /// Double-ended iterator over the elements.
    #[inline]
    fn iter(&self) -> Elements<'_, Self>
    where
        Self: Sized,
    {
        Elements::new(self)
    }

    #[inline]
    fn begin(&self) -> VectorCursor<'_, Self>
    where
        Self: Sized,
    {
        VectorCursor::new(self, 0)
    }

    #[inline]
    fn end(&self) -> VectorCursor<'_, Self>
    where
        Self: Sized,
    {
        VectorCursor::new(self, self.len())
    }

    #[inline]
    fn rbegin(&self) -> Reverse<VectorCursor<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.end())
    }

    #[inline]
    fn rend(&self) -> Reverse<VectorCursor<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.begin())
    }

    /// Evaluate every element into a fresh container.
    fn to_dense(&self) -> DenseVector<Self::Elem>
    where
        Self: Sized,
    {
        DenseVector::from_expr(self)
    }
}

/// Write access to a vector-shaped value.
pub trait VectorExprMut: VectorExpr {
    /// Mutable reference to element `i`. Panics if `i >= len()`.
    fn at_mut(&mut self, i: usize) -> &mut Self::Elem;

    #[inline]
    fn set(&mut self, i: usize, value: Self::Elem) {
        *self.at_mut(i) = value;
    }

    /// Copy `src` element by element. Fails unless the lengths agree.
    fn assign<E>(&mut self, src: &E) -> Result<()>
    where
        E: VectorExpr<Elem = Self::Elem>,
    {
        if src.len() != self.len() {
            return Err(LinextError::BadSize {
                expected: self.len(),
                actual: src.len(),
            });
        }
        for i in 0..src.len() {
            *self.at_mut(i) = src.at(i);
        }
        Ok(())
    }
}

/// A vector container that can change its length.
pub trait ResizableVector: VectorExprMut {
    /// Resize to `n`, keeping the common prefix and zero-filling the rest.
    fn resize(&mut self, n: usize);
}

// ============================================================================
// Matrices
// ============================================================================

/// Read access to a matrix-shaped value.
pub trait MatrixExpr {
    type Elem: Copy;
    type Orientation: OrientationTag;
    type Storage: StorageTag;

    /// How this value holds its source.
    const CLOSURE: Closure;

    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Element `(i, j)`. Panics if out of range.
    fn at(&self, i: usize, j: usize) -> Self::Elem;

    /// Contiguous buffer laid out in `Self::Orientation`, if the value has
    /// one. Kernel bindings use it to skip element-wise copies.
    #[inline]
    fn as_contiguous(&self) -> Option<&[Self::Elem]> {
        None
    }

    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[inline]
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Checked element access.
    #[inline]
    fn get(&self, i: usize, j: usize) -> Result<Self::Elem> {
        let (rows, cols) = self.shape();
        if i >= rows || j >= cols {
            return Err(LinextError::BadMatrixIndex {
                row: i,
                col: j,
                rows,
                cols,
            });
        }
        Ok(self.at(i, j))
    }

    /// Row cursor at row 0.
    #[inline]
    fn begin1(&self) -> MatrixCursor1<'_, Self>
    where
        Self: Sized,
    {
        MatrixCursor1::new(self, 0, 0)
    }

    /// Row cursor one past the last row.
    #[inline]
    fn end1(&self) -> MatrixCursor1<'_, Self>
    where
        Self: Sized,
    {
        MatrixCursor1::new(self, self.nrows(), 0)
    }

    /// Column cursor at column 0.
    #[inline]
    fn begin2(&self) -> MatrixCursor2<'_, Self>
    where
        Self: Sized,
    {
        MatrixCursor2::new(self, 0, 0)
    }

    /// Column cursor one past the last column.
    #[inline]
    fn end2(&self) -> MatrixCursor2<'_, Self>
    where
        Self: Sized,
    {
        MatrixCursor2::new(self, 0, self.ncols())
    }

    #[inline]
    fn rbegin1(&self) -> Reverse<MatrixCursor1<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.end1())
    }

    #[inline]
    fn rend1(&self) -> Reverse<MatrixCursor1<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.begin1())
    }

    #[inline]
    fn rbegin2(&self) -> Reverse<MatrixCursor2<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.end2())
    }

    #[inline]
    fn rend2(&self) -> Reverse<MatrixCursor2<'_, Self>>
    where
        Self: Sized,
    {
        Reverse::new(self.begin2())
    }

    /// Evaluate every element into a fresh container in layout `O`.
    fn to_dense<O: OrientationTag>(&self) -> DenseMatrix<Self::Elem, O>
    where
        Self: Sized,
    {
        DenseMatrix::from_expr(self)
    }
}

/// Write access to a matrix-shaped value.
pub trait MatrixExprMut: MatrixExpr {
    /// Mutable reference to element `(i, j)`. Panics if out of range.
    fn at_mut(&mut self, i: usize, j: usize) -> &mut Self::Elem;

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: Self::Elem) {
        *self.at_mut(i, j) = value;
    }

    /// Copy `src` element by element. Fails unless the shapes agree.
    fn assign<E>(&mut self, src: &E) -> Result<()>
    where
        E: MatrixExpr<Elem = Self::Elem>,
    {
        crate::ensure_same_shape(self.shape(), src.shape())?;
        let (rows, cols) = src.shape();
        for i in 0..rows {
            for j in 0..cols {
                *self.at_mut(i, j) = src.at(i, j);
            }
        }
        Ok(())
    }
}

/// A matrix container that can change its shape.
pub trait ResizableMatrix: MatrixExprMut {
    /// Resize to `rows x cols`. With `preserve`, elements in the common
    /// top-left block keep their values; all others are zero.
    fn resize(&mut self, rows: usize, cols: usize, preserve: bool);
}

// ============================================================================
// References
// ============================================================================

impl<E: VectorExpr + ?Sized> VectorExpr for &E {
    type Elem = E::Elem;
    type Storage = E::Storage;
    const CLOSURE: Closure = Closure::Borrowed;

    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> E::Elem {
        (**self).at(i)
    }

    #[inline]
    fn as_slice(&self) -> Option<&[E::Elem]> {
        (**self).as_slice()
    }
}

impl<E: VectorExpr + ?Sized> VectorExpr for &mut E {
    type Elem = E::Elem;
    type Storage = E::Storage;
    const CLOSURE: Closure = Closure::MutableAlias;

    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> E::Elem {
        (**self).at(i)
    }

    #[inline]
    fn as_slice(&self) -> Option<&[E::Elem]> {
        (**self).as_slice()
    }
}

impl<E: VectorExprMut + ?Sized> VectorExprMut for &mut E {
    #[inline(always)]
    fn at_mut(&mut self, i: usize) -> &mut E::Elem {
        (**self).at_mut(i)
    }
}

impl<E: ResizableVector + ?Sized> ResizableVector for &mut E {
    #[inline]
    fn resize(&mut self, n: usize) {
        (**self).resize(n)
    }
}

impl<M: MatrixExpr + ?Sized> MatrixExpr for &M {
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = M::Storage;
    const CLOSURE: Closure = Closure::Borrowed;

    #[inline(always)]
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> M::Elem {
        (**self).at(i, j)
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[M::Elem]> {
        (**self).as_contiguous()
    }
}

impl<M: MatrixExpr + ?Sized> MatrixExpr for &mut M {
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = M::Storage;
    const CLOSURE: Closure = Closure::MutableAlias;

    #[inline(always)]
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> M::Elem {
        (**self).at(i, j)
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[M::Elem]> {
        (**self).as_contiguous()
    }
}

impl<M: MatrixExprMut + ?Sized> MatrixExprMut for &mut M {
    #[inline(always)]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut M::Elem {
        (**self).at_mut(i, j)
    }
}

impl<M: ResizableMatrix + ?Sized> ResizableMatrix for &mut M {
    #[inline]
    fn resize(&mut self, rows: usize, cols: usize, preserve: bool) {
        (**self).resize(rows, cols, preserve)
    }
}
