//! Structured readings of a matrix expression.
//!
//! Each adapter reads only part of its source and synthesizes the rest:
//! a triangle, a reflected triangle, or a band. The kernel bindings pick the
//! matching specialized routine from the adapter type.

use crate::expr::MatrixExpr;
use linext_traits::{Closure, DiagKind, PackedStorage, Scalar, Uplo};
use num_traits::{One, Zero};

// ============================================================================
// Triangular
// ============================================================================

/// The upper or lower triangle of a matrix, zero elsewhere. With
/// [`DiagKind::Unit`] the diagonal reads as one regardless of the source.
#[derive(Debug, Clone, Copy)]
pub struct Triangular<M> {
    src: M,
    uplo: Uplo,
    diag: DiagKind,
}

impl<M: MatrixExpr> Triangular<M> {
    pub fn new(src: M, uplo: Uplo, diag: DiagKind) -> Self {
        Self { src, uplo, diag }
    }

    pub fn upper(src: M) -> Self {
        Self::new(src, Uplo::Upper, DiagKind::NonUnit)
    }

    pub fn lower(src: M) -> Self {
        Self::new(src, Uplo::Lower, DiagKind::NonUnit)
    }

    #[inline]
    pub fn uplo(&self) -> Uplo {
        self.uplo
    }

    #[inline]
    pub fn diag(&self) -> DiagKind {
        self.diag
    }

    #[inline]
    pub fn source(&self) -> &M {
        &self.src
    }
}

impl<M> MatrixExpr for Triangular<M>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = PackedStorage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    fn at(&self, i: usize, j: usize) -> M::Elem {
        let inside = match self.uplo {
            Uplo::Upper => j >= i,
            Uplo::Lower => j <= i,
        };
        if !inside {
            return Zero::zero();
        }
        if i == j && self.diag == DiagKind::Unit {
            return One::one();
        }
        self.src.at(i, j)
    }
}

// ============================================================================
// Symmetric and Hermitian
// ============================================================================

/// A square matrix read from one triangle and mirrored: `a(j, i) = a(i, j)`.
#[derive(Debug, Clone, Copy)]
pub struct Symmetric<M> {
    src: M,
    uplo: Uplo,
}

impl<M: MatrixExpr> Symmetric<M> {
    /// Fails with [`LinextError::NotSquare`](crate::LinextError::NotSquare)
    /// for a rectangular source.
    pub fn new(src: M, uplo: Uplo) -> crate::Result<Self> {
        crate::ensure_square(src.nrows(), src.ncols())?;
        Ok(Self { src, uplo })
    }

    #[inline]
    pub fn uplo(&self) -> Uplo {
        self.uplo
    }
}

impl<M> MatrixExpr for Symmetric<M>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = PackedStorage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    fn at(&self, i: usize, j: usize) -> M::Elem {
        let stored = match self.uplo {
            Uplo::Upper => i <= j,
            Uplo::Lower => i >= j,
        };
        if stored {
            self.src.at(i, j)
        } else {
            self.src.at(j, i)
        }
    }
}

/// A square matrix read from one triangle and mirrored with conjugation:
/// `a(j, i) = conj(a(i, j))`. The diagonal is taken as real.
#[derive(Debug, Clone, Copy)]
pub struct Hermitian<M> {
    src: M,
    uplo: Uplo,
}

impl<M: MatrixExpr> Hermitian<M> {
    /// Fails with [`LinextError::NotSquare`](crate::LinextError::NotSquare)
    /// for a rectangular source.
    pub fn new(src: M, uplo: Uplo) -> crate::Result<Self> {
        crate::ensure_square(src.nrows(), src.ncols())?;
        Ok(Self { src, uplo })
    }

    #[inline]
    pub fn uplo(&self) -> Uplo {
        self.uplo
    }
}

impl<M> MatrixExpr for Hermitian<M>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = PackedStorage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    fn at(&self, i: usize, j: usize) -> M::Elem {
        if i == j {
            return M::Elem::from_real(self.src.at(i, i).re());
        }
        let stored = match self.uplo {
            Uplo::Upper => i < j,
            Uplo::Lower => i > j,
        };
        if stored {
            self.src.at(i, j)
        } else {
            self.src.at(j, i).conj()
        }
    }
}

// ============================================================================
// Banded
// ============================================================================

/// A matrix with `kl` sub-diagonals and `ku` super-diagonals read from the
/// source; zero outside the band.
#[derive(Debug, Clone, Copy)]
pub struct Banded<M> {
    src: M,
    kl: usize,
    ku: usize,
}

impl<M: MatrixExpr> Banded<M> {
    pub fn new(src: M, kl: usize, ku: usize) -> Self {
        Self { src, kl, ku }
    }

    /// Number of sub-diagonals.
    #[inline]
    pub fn lower_bandwidth(&self) -> usize {
        self.kl
    }

    /// Number of super-diagonals.
    #[inline]
    pub fn upper_bandwidth(&self) -> usize {
        self.ku
    }
}

impl<M> MatrixExpr for Banded<M>
where
    M: MatrixExpr,
    M::Elem: Scalar,
{
    type Elem = M::Elem;
    type Orientation = M::Orientation;
    type Storage = PackedStorage;
    const CLOSURE: Closure = M::CLOSURE.immutable();

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    fn at(&self, i: usize, j: usize) -> M::Elem {
        if i > j + self.kl || j > i + self.ku {
            return Zero::zero();
        }
        self.src.at(i, j)
    }
}
