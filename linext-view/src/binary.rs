//! Binary element-wise expressions.
//!
//! Three shapes of binary application exist for vectors and for matrices:
//!
//! - `*BinaryLeft`: `f(src(i), a2)`, expression on the left, scalar on the right
//! - `*BinaryRight`: `f(a1, src(i))`, scalar on the left, expression on the right
//! - `*Binary`: `f(lhs(i), rhs(i))` over two expressions of equal shape
//!
//! A matrix expression over two operands keeps their orientation when they
//! agree and falls back to [`UnknownOrientation`](linext_traits::UnknownOrientation)
//! otherwise.

use crate::expr::{MatrixExpr, VectorExpr};
use crate::{LinextError, Result};
use linext_traits::{BinaryFn, Closure, OrientationJoin, StorageJoin};

// ============================================================================
// Vectors
// ============================================================================

/// `f(src(i), a2)` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct VectorBinaryLeft<E, A, F> {
    src: E,
    arg: A,
    f: F,
}

impl<E, A, F> VectorBinaryLeft<E, A, F>
where
    E: VectorExpr,
    A: Copy,
    F: BinaryFn<E::Elem, A>,
{
    #[inline]
    pub fn new(src: E, a2: A, f: F) -> Self {
        Self { src, arg: a2, f }
    }

    #[inline]
    pub fn source(&self) -> &E {
        &self.src
    }
}

impl<E, A, F> VectorExpr for VectorBinaryLeft<E, A, F>
where
    E: VectorExpr,
    A: Copy,
    F: BinaryFn<E::Elem, A>,
{
    type Elem = F::Output;
    type Storage = E::Storage;
    const CLOSURE: Closure = E::CLOSURE.immutable();

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> F::Output {
        self.f.apply(self.src.at(i), self.arg)
    }
}

/// `f(a1, src(i))` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct VectorBinaryRight<A, E, F> {
    arg: A,
    src: E,
    f: F,
}

impl<A, E, F> VectorBinaryRight<A, E, F>
where
    A: Copy,
    E: VectorExpr,
    F: BinaryFn<A, E::Elem>,
{
    #[inline]
    pub fn new(a1: A, src: E, f: F) -> Self {
        Self { arg: a1, src, f }
    }

    #[inline]
    pub fn source(&self) -> &E {
        &self.src
    }
}

impl<A, E, F> VectorExpr for VectorBinaryRight<A, E, F>
where
    A: Copy,
    E: VectorExpr,
    F: BinaryFn<A, E::Elem>,
{
    type Elem = F::Output;
    type Storage = E::Storage;
    const CLOSURE: Closure = E::CLOSURE.immutable();

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> F::Output {
        self.f.apply(self.arg, self.src.at(i))
    }
}

/// `f(lhs(i), rhs(i))` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct VectorBinary<L, R, F> {
    lhs: L,
    rhs: R,
    f: F,
}

impl<L, R, F> VectorBinary<L, R, F>
where
    L: VectorExpr,
    R: VectorExpr,
    F: BinaryFn<L::Elem, R::Elem>,
{
    /// Fails with [`LinextError::BadSize`] unless the lengths agree.
    pub fn new(lhs: L, rhs: R, f: F) -> Result<Self> {
        if lhs.len() != rhs.len() {
            return Err(LinextError::BadSize {
                expected: lhs.len(),
                actual: rhs.len(),
            });
        }
        Ok(Self { lhs, rhs, f })
    }

    #[inline]
    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<L, R, F> VectorExpr for VectorBinary<L, R, F>
where
    L: VectorExpr,
    R: VectorExpr,
    L::Storage: StorageJoin<R::Storage>,
    F: BinaryFn<L::Elem, R::Elem>,
{
    type Elem = F::Output;
    type Storage = <L::Storage as StorageJoin<R::Storage>>::Output;
    const CLOSURE: Closure = L::CLOSURE.immutable().combine(R::CLOSURE.immutable());

    #[inline(always)]
    fn len(&self) -> usize {
        self.lhs.len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> F::Output {
        self.f.apply(self.lhs.at(i), self.rhs.at(i))
    }
}

// ============================================================================
// Matrices
// ============================================================================

/// `f(src(i, j), a2)` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBinaryLeft<M, A, F> {
    src: M,
    arg: A,
    f: F,
}

impl<M, A, F> MatrixBinaryLeft<M, A, F>
where
    M: MatrixExpr,
    A: Copy,
    F: BinaryFn<M::Elem, A>,
{
    #[inline]
    pub fn new(src: M, a2: A, f: F) -> Self {
        Self { src, arg: a2, f }
    }

    #[inline]
    pub fn source(&self) -> &M {
        &self.src
    }
}

impl<M, A, F> MatrixExpr for MatrixBinaryLeft<M, A, F>
where
    M: MatrixExpr,
    A: Copy,
    F: BinaryFn<M::Elem, A>,
{
    type Elem = F::Output;
    type Orientation = M::Orientation;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> F::Output {
        self.f.apply(self.src.at(i, j), self.arg)
    }
}

/// `f(a1, src(i, j))` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBinaryRight<A, M, F> {
    arg: A,
    src: M,
    f: F,
}

impl<A, M, F> MatrixBinaryRight<A, M, F>
where
    A: Copy,
    M: MatrixExpr,
    F: BinaryFn<A, M::Elem>,
{
    #[inline]
    pub fn new(a1: A, src: M, f: F) -> Self {
        Self { arg: a1, src, f }
    }

    #[inline]
    pub fn source(&self) -> &M {
        &self.src
    }
}

impl<A, M, F> MatrixExpr for MatrixBinaryRight<A, M, F>
where
    A: Copy,
    M: MatrixExpr,
    F: BinaryFn<A, M::Elem>,
{
    type Elem = F::Output;
    type Orientation = M::Orientation;
    type Storage = M::Storage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> F::Output {
        self.f.apply(self.arg, self.src.at(i, j))
    }
}

/// `f(lhs(i, j), rhs(i, j))` evaluated on access.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBinary<L, R, F> {
    lhs: L,
    rhs: R,
    f: F,
}

impl<L, R, F> MatrixBinary<L, R, F>
where
    L: MatrixExpr,
    R: MatrixExpr,
    F: BinaryFn<L::Elem, R::Elem>,
{
    /// Fails with [`LinextError::ShapeMismatch`] unless the shapes agree.
    pub fn new(lhs: L, rhs: R, f: F) -> Result<Self> {
        crate::ensure_same_shape(lhs.shape(), rhs.shape())?;
        Ok(Self { lhs, rhs, f })
    }

    #[inline]
    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<L, R, F> MatrixExpr for MatrixBinary<L, R, F>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Orientation: OrientationJoin<R::Orientation>,
    L::Storage: StorageJoin<R::Storage>,
    F: BinaryFn<L::Elem, R::Elem>,
{
    type Elem = F::Output;
    type Orientation = <L::Orientation as OrientationJoin<R::Orientation>>::Output;
    type Storage = <L::Storage as StorageJoin<R::Storage>>::Output;
    const CLOSURE: Closure = L::CLOSURE.immutable().combine(R::CLOSURE.immutable());

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.lhs.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.lhs.ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> F::Output {
        self.f.apply(self.lhs.at(i, j), self.rhs.at(i, j))
    }
}
