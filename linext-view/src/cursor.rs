//! Positional cursors and Rust iterators over expressions.
//!
//! A cursor is a position inside one expression. Cursors move freely with
//! [`Cursor::advance`] and [`Cursor::retreat`] and read the element under
//! them with [`Cursor::get`]. Matrix cursors come in two kinds:
//!
//! - [`MatrixCursor1`] walks down the rows; its dual ([`DualCursor::begin`]
//!   / [`DualCursor::end`]) is a [`MatrixCursor2`] pinned to the current row
//! - [`MatrixCursor2`] walks along the columns; its dual is a
//!   [`MatrixCursor1`] pinned to the current column
//!
//! Comparing cursors that belong to different expressions is a logic error
//! reported as [`LinextError::ExternalLogic`].

use crate::expr::{MatrixExpr, VectorExpr};
use crate::{LinextError, Result};
use std::iter::FusedIterator;

// ============================================================================
// Cursor traits
// ============================================================================

/// A position inside an expression.
pub trait Cursor: Sized {
    type Item;

    /// Element under the cursor. Debug builds check that the cursor is
    /// dereferenceable.
    fn get(&self) -> Self::Item;

    /// Position along the traversed dimension.
    fn position(&self) -> usize;

    fn advance(&mut self);

    fn retreat(&mut self);

    /// Whether both cursors traverse the same expression instance.
    fn same_closure(&self, other: &Self) -> bool;

    /// Equality of positions. Fails for cursors over different expressions.
    fn try_eq(&self, other: &Self) -> Result<bool> {
        if !self.same_closure(other) {
            return Err(LinextError::ExternalLogic);
        }
        Ok(self.position() == other.position())
    }

    /// Signed distance `other - self`. Fails for cursors over different
    /// expressions.
    fn try_distance(&self, other: &Self) -> Result<isize> {
        if !self.same_closure(other) {
            return Err(LinextError::ExternalLogic);
        }
        Ok(other.position() as isize - self.position() as isize)
    }
}

/// A matrix cursor exposing the cursor across the other dimension.
pub trait DualCursor: Cursor {
    type Dual: Cursor<Item = Self::Item>;

    /// Start of the cross-dimension run pinned at this position.
    fn begin(&self) -> Self::Dual;

    /// End of the cross-dimension run pinned at this position.
    fn end(&self) -> Self::Dual;
}

// ============================================================================
// Vector cursor
// ============================================================================

/// Random-access cursor over a vector expression.
#[derive(Debug)]
pub struct VectorCursor<'a, E> {
    expr: &'a E,
    pos: usize,
}

impl<E> Clone for VectorCursor<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for VectorCursor<'_, E> {}

impl<'a, E: VectorExpr> VectorCursor<'a, E> {
    #[inline]
    pub fn new(expr: &'a E, pos: usize) -> Self {
        debug_assert!(pos <= expr.len(), "cursor position {pos} past end");
        Self { expr, pos }
    }

    /// Jump by `n` positions (negative moves backward).
    #[inline]
    pub fn offset(&self, n: isize) -> Self {
        let pos = self.pos as isize + n;
        debug_assert!(
            pos >= 0 && pos as usize <= self.expr.len(),
            "cursor offset out of range"
        );
        Self::new(self.expr, pos as usize)
    }

    /// Index of the element under the cursor.
    #[inline]
    pub fn index(&self) -> usize {
        self.pos
    }
}

impl<E: VectorExpr> Cursor for VectorCursor<'_, E> {
    type Item = E::Elem;

    #[inline]
    fn get(&self) -> E::Elem {
        debug_assert!(self.pos < self.expr.len(), "dereferencing end cursor");
        self.expr.at(self.pos)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn advance(&mut self) {
        debug_assert!(self.pos < self.expr.len(), "advancing past end");
        self.pos += 1;
    }

    #[inline]
    fn retreat(&mut self) {
        debug_assert!(self.pos > 0, "retreating before begin");
        self.pos -= 1;
    }

    #[inline]
    fn same_closure(&self, other: &Self) -> bool {
        std::ptr::eq(self.expr, other.expr)
    }
}

// ============================================================================
// Matrix cursors
// ============================================================================

/// Cursor moving down the rows of a matrix expression.
#[derive(Debug)]
pub struct MatrixCursor1<'a, M> {
    expr: &'a M,
    i: usize,
    j: usize,
}

/// Cursor moving along the columns of a matrix expression.
#[derive(Debug)]
pub struct MatrixCursor2<'a, M> {
    expr: &'a M,
    i: usize,
    j: usize,
}

macro_rules! impl_matrix_cursor_common {
    ($name:ident) => {
        impl<M> Clone for $name<'_, M> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<M> Copy for $name<'_, M> {}

        impl<'a, M: MatrixExpr> $name<'a, M> {
            #[inline]
            pub fn new(expr: &'a M, i: usize, j: usize) -> Self {
                debug_assert!(
                    i <= expr.nrows() && j <= expr.ncols(),
                    "cursor ({i}, {j}) outside {:?}",
                    expr.shape()
                );
                Self { expr, i, j }
            }

            /// Row index.
            #[inline]
            pub fn index1(&self) -> usize {
                self.i
            }

            /// Column index.
            #[inline]
            pub fn index2(&self) -> usize {
                self.j
            }
        }
    };
}

impl_matrix_cursor_common!(MatrixCursor1);
impl_matrix_cursor_common!(MatrixCursor2);

impl<M: MatrixExpr> Cursor for MatrixCursor1<'_, M> {
    type Item = M::Elem;

    #[inline]
    fn get(&self) -> M::Elem {
        debug_assert!(self.i < self.expr.nrows(), "dereferencing end cursor");
        self.expr.at(self.i, self.j)
    }

    #[inline]
    fn position(&self) -> usize {
        self.i
    }

    #[inline]
    fn advance(&mut self) {
        debug_assert!(self.i < self.expr.nrows(), "advancing past end");
        self.i += 1;
    }

    #[inline]
    fn retreat(&mut self) {
        debug_assert!(self.i > 0, "retreating before begin");
        self.i -= 1;
    }

    #[inline]
    fn same_closure(&self, other: &Self) -> bool {
        std::ptr::eq(self.expr, other.expr)
    }
}

impl<M: MatrixExpr> Cursor for MatrixCursor2<'_, M> {
    type Item = M::Elem;

    #[inline]
    fn get(&self) -> M::Elem {
        debug_assert!(self.j < self.expr.ncols(), "dereferencing end cursor");
        self.expr.at(self.i, self.j)
    }

    #[inline]
    fn position(&self) -> usize {
        self.j
    }

    #[inline]
    fn advance(&mut self) {
        debug_assert!(self.j < self.expr.ncols(), "advancing past end");
        self.j += 1;
    }

    #[inline]
    fn retreat(&mut self) {
        debug_assert!(self.j > 0, "retreating before begin");
        self.j -= 1;
    }

    #[inline]
    fn same_closure(&self, other: &Self) -> bool {
        std::ptr::eq(self.expr, other.expr)
    }
}

impl<'a, M: MatrixExpr> DualCursor for MatrixCursor1<'a, M> {
    type Dual = MatrixCursor2<'a, M>;

    #[inline]
    fn begin(&self) -> MatrixCursor2<'a, M> {
        MatrixCursor2::new(self.expr, self.i, 0)
    }

    #[inline]
    fn end(&self) -> MatrixCursor2<'a, M> {
        MatrixCursor2::new(self.expr, self.i, self.expr.ncols())
    }
}

impl<'a, M: MatrixExpr> DualCursor for MatrixCursor2<'a, M> {
    type Dual = MatrixCursor1<'a, M>;

    #[inline]
    fn begin(&self) -> MatrixCursor1<'a, M> {
        MatrixCursor1::new(self.expr, 0, self.j)
    }

    #[inline]
    fn end(&self) -> MatrixCursor1<'a, M> {
        MatrixCursor1::new(self.expr, self.expr.nrows(), self.j)
    }
}

// ============================================================================
// Reverse adaptor
// ============================================================================

/// Cursor running backward over its base. Like a reverse iterator, it
/// reads the element just before the base position.
#[derive(Debug, Clone, Copy)]
pub struct Reverse<C> {
    base: C,
}

impl<C: Cursor> Reverse<C> {
    #[inline]
    pub fn new(base: C) -> Self {
        Self { base }
    }

    /// The underlying forward cursor.
    #[inline]
    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<C: Cursor + Copy> Cursor for Reverse<C> {
    type Item = C::Item;

    #[inline]
    fn get(&self) -> C::Item {
        let mut prev = self.base;
        prev.retreat();
        prev.get()
    }

    #[inline]
    fn position(&self) -> usize {
        self.base.position()
    }

    #[inline]
    fn advance(&mut self) {
        self.base.retreat();
    }

    #[inline]
    fn retreat(&mut self) {
        self.base.advance();
    }

    #[inline]
    fn same_closure(&self, other: &Self) -> bool {
        self.base.same_closure(&other.base)
    }

    fn try_distance(&self, other: &Self) -> Result<isize> {
        other.base.try_distance(&self.base)
    }
}

impl<C: DualCursor + Copy> DualCursor for Reverse<C> {
    type Dual = C::Dual;

    #[inline]
    fn begin(&self) -> C::Dual {
        let mut prev = self.base;
        prev.retreat();
        prev.begin()
    }

    #[inline]
    fn end(&self) -> C::Dual {
        let mut prev = self.base;
        prev.retreat();
        prev.end()
    }
}

// ============================================================================
// Rust iterators
// ============================================================================

/// Double-ended iterator over the elements of a vector expression.
#[derive(Debug)]
pub struct Elements<'a, E> {
    expr: &'a E,
    front: usize,
    back: usize,
}

impl<'a, E: VectorExpr> Elements<'a, E> {
    #[inline]
    pub fn new(expr: &'a E) -> Self {
        Self {
            expr,
            front: 0,
            back: expr.len(),
        }
    }
}

impl<E: VectorExpr> Iterator for Elements<'_, E> {
    type Item = E::Elem;

    #[inline]
    fn next(&mut self) -> Option<E::Elem> {
        if self.front == self.back {
            return None;
        }
        let x = self.expr.at(self.front);
        self.front += 1;
        Some(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<E: VectorExpr> DoubleEndedIterator for Elements<'_, E> {
    #[inline]
    fn next_back(&mut self) -> Option<E::Elem> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.expr.at(self.back))
    }
}

impl<E: VectorExpr> ExactSizeIterator for Elements<'_, E> {}

impl<E: VectorExpr> FusedIterator for Elements<'_, E> {}

/// Elements between two cursors of the same kind.
#[derive(Debug, Clone, Copy)]
pub struct Run<C> {
    cur: C,
    end: C,
}

impl<C: Cursor + Copy> Run<C> {
    /// Iterate `[begin, end)`. Fails if the cursors belong to different
    /// expressions.
    pub fn new(begin: C, end: C) -> Result<Self> {
        if !begin.same_closure(&end) {
            return Err(LinextError::ExternalLogic);
        }
        Ok(Self { cur: begin, end })
    }
}

impl<C: Cursor + Copy> Iterator for Run<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        if self.cur.position() == self.end.position() {
            return None;
        }
        let x = self.cur.get();
        self.cur.advance();
        Some(x)
    }
}
