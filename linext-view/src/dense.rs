//! Owning dense containers.

use crate::expr::{
    MatrixExpr, MatrixExprMut, ResizableMatrix, ResizableVector, VectorExpr, VectorExprMut,
};
use crate::{LinextError, Result};
use linext_traits::{
    Closure, ColumnMajor, DenseStorage, Dim, OrientationKind, OrientationTag, RowMajor,
};
use num_traits::{One, Zero};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

// ============================================================================
// DenseVector
// ============================================================================

/// Heap-allocated vector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseVector<T> {
    data: Vec<T>,
}

impl<T: Copy> DenseVector<T> {
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn from_fn(n: usize, mut f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..n).map(&mut f).collect(),
        }
    }

    /// Length-`n` vector with every element equal to `value`.
    pub fn filled(n: usize, value: T) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Evaluate `src` element by element.
    pub fn from_expr<E: VectorExpr<Elem = T>>(src: &E) -> Self {
        if let Some(slice) = src.as_slice() {
            return Self {
                data: slice.to_vec(),
            };
        }
        Self::from_fn(src.len(), |i| src.at(i))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy + Zero> DenseVector<T> {
    pub fn zeros(n: usize) -> Self {
        Self::filled(n, T::zero())
    }
}

impl<T: Copy> VectorExpr for DenseVector<T> {
    type Elem = T;
    type Storage = DenseStorage;
    const CLOSURE: Closure = Closure::Owned;

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> T {
        self.data[i]
    }

    #[inline]
    fn as_slice(&self) -> Option<&[T]> {
        Some(&self.data)
    }
}

impl<T: Copy> VectorExprMut for DenseVector<T> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Copy + Zero> ResizableVector for DenseVector<T> {
    fn resize(&mut self, n: usize) {
        self.data.resize(n, T::zero());
    }
}

impl<T> Index<usize> for DenseVector<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for DenseVector<T> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Copy> From<Vec<T>> for DenseVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Copy> FromIterator<T> for DenseVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// DenseMatrix
// ============================================================================

/// Heap-allocated matrix stored contiguously in orientation `O`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T, O = RowMajor> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
    _orientation: PhantomData<O>,
}

/// Column-major dense matrix, the layout kernels work in.
pub type ColMajorMatrix<T> = DenseMatrix<T, ColumnMajor>;

impl<T: Copy, O: OrientationTag> DenseMatrix<T, O> {
    /// Wrap a buffer already laid out in `O`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(LinextError::BadSize {
                expected: nrows * ncols,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            nrows,
            ncols,
            _orientation: PhantomData,
        })
    }

    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        match O::MAJOR {
            Dim::Rows => {
                for i in 0..nrows {
                    for j in 0..ncols {
                        data.push(f(i, j));
                    }
                }
            }
            Dim::Columns => {
                for j in 0..ncols {
                    for i in 0..nrows {
                        data.push(f(i, j));
                    }
                }
            }
        }
        Self {
            data,
            nrows,
            ncols,
            _orientation: PhantomData,
        }
    }

    pub fn filled(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
            _orientation: PhantomData,
        }
    }

    /// Build from a slice of equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        for r in rows {
            if r.as_ref().len() != ncols {
                return Err(LinextError::BadSize {
                    expected: ncols,
                    actual: r.as_ref().len(),
                });
            }
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]))
    }

    /// Build from a row-major slice regardless of `O`.
    pub fn from_row_slice(nrows: usize, ncols: usize, values: &[T]) -> Result<Self> {
        if values.len() != nrows * ncols {
            return Err(LinextError::BadSize {
                expected: nrows * ncols,
                actual: values.len(),
            });
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| values[i * ncols + j]))
    }

    /// Evaluate `src` element by element into layout `O`.
    pub fn from_expr<E: MatrixExpr<Elem = T>>(src: &E) -> Self {
        let (nrows, ncols) = src.shape();
        if E::Orientation::KIND == O::KIND {
            if let Some(buf) = src.as_contiguous() {
                return Self {
                    data: buf.to_vec(),
                    nrows,
                    ncols,
                    _orientation: PhantomData,
                };
            }
        }
        Self::from_fn(nrows, ncols, |i, j| src.at(i, j))
    }

    /// Copy into layout `O2`.
    pub fn to_orientation<O2: OrientationTag>(&self) -> DenseMatrix<T, O2> {
        DenseMatrix::from_expr(self)
    }

    /// Reinterpret the buffer as the transpose, without copying.
    pub fn into_transpose(self) -> DenseMatrix<T, O::Transposed> {
        if O::KIND == OrientationKind::Unknown {
            return DenseMatrix::from_fn(self.ncols, self.nrows, |i, j| self.at(j, i));
        }
        DenseMatrix {
            data: self.data,
            nrows: self.ncols,
            ncols: self.nrows,
            _orientation: PhantomData,
        }
    }

    /// Buffer in `O` layout.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline(always)]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.nrows && j < self.ncols,
            "index ({i}, {j}) out of range for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        O::offset(i, j, self.nrows, self.ncols)
    }
}

impl<T: Copy + Zero, O: OrientationTag> DenseMatrix<T, O> {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::filled(nrows, ncols, T::zero())
    }
}

impl<T: Copy + Zero + One, O: OrientationTag> DenseMatrix<T, O> {
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T: Copy, O: OrientationTag> MatrixExpr for DenseMatrix<T, O> {
    type Elem = T;
    type Orientation = O;
    type Storage = DenseStorage;
    const CLOSURE: Closure = Closure::Owned;

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> T {
        self.data[self.offset(i, j)]
    }

    #[inline]
    fn as_contiguous(&self) -> Option<&[T]> {
        Some(&self.data)
    }
}

impl<T: Copy, O: OrientationTag> MatrixExprMut for DenseMatrix<T, O> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        let off = self.offset(i, j);
        &mut self.data[off]
    }
}

impl<T: Copy + Zero, O: OrientationTag> ResizableMatrix for DenseMatrix<T, O> {
    fn resize(&mut self, nrows: usize, ncols: usize, preserve: bool) {
        if (nrows, ncols) == (self.nrows, self.ncols) {
            if !preserve {
                self.data.iter_mut().for_each(|x| *x = T::zero());
            }
            return;
        }
        let mut data = vec![T::zero(); nrows * ncols];
        if preserve {
            for i in 0..nrows.min(self.nrows) {
                for j in 0..ncols.min(self.ncols) {
                    data[O::offset(i, j, nrows, ncols)] =
                        self.data[O::offset(i, j, self.nrows, self.ncols)];
                }
            }
        }
        self.data = data;
        self.nrows = nrows;
        self.ncols = ncols;
    }
}

impl<T: Copy, O: OrientationTag> Index<(usize, usize)> for DenseMatrix<T, O> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.offset(i, j)]
    }
}

impl<T: Copy, O: OrientationTag> IndexMut<(usize, usize)> for DenseMatrix<T, O> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let off = self.offset(i, j);
        &mut self.data[off]
    }
}
