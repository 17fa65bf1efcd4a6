//! Type-level orientation, dimension and storage tags.
//!
//! Tags carry no runtime state. Operations that depend on layout select
//! their implementation from the tags at compile time:
//!
//! ```text
//!   tag      | RowMajor | ColumnMajor | Unknown
//! -----------|----------|-------------|---------
//!   Major    | Rows     | Columns     | Rows
//!   Minor    | Columns  | Rows        | Columns
//!   Leading  | Columns  | Rows        | Columns
//! ```

use std::fmt::Debug;

// ============================================================================
// Dimensions
// ============================================================================

/// A concrete matrix dimension.
///
/// `Rows` is dimension 1 and `Columns` is dimension 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    Rows,
    Columns,
}

impl Dim {
    /// One-based dimension index (1 for rows, 2 for columns).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Dim::Rows => 1,
            Dim::Columns => 2,
        }
    }

    /// Dimension from its one-based index.
    #[inline]
    pub const fn from_index(k: usize) -> Option<Dim> {
        match k {
            1 => Some(Dim::Rows),
            2 => Some(Dim::Columns),
            _ => None,
        }
    }

    /// The other dimension.
    #[inline]
    pub const fn other(self) -> Dim {
        match self {
            Dim::Rows => Dim::Columns,
            Dim::Columns => Dim::Rows,
        }
    }
}

/// Marker carrying a dimension index as a const generic.
///
/// Only `DimIndex<1>` and `DimIndex<2>` implement [`ValidDimension`], so a
/// by-dimension operation instantiated with any other index does not compile.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimIndex<const K: usize>;

/// Dimension indices accepted by matrix operations.
pub trait ValidDimension {
    const DIM: Dim;
}

impl ValidDimension for DimIndex<1> {
    const DIM: Dim = Dim::Rows;
}

impl ValidDimension for DimIndex<2> {
    const DIM: Dim = Dim::Columns;
}

/// Dimension indices accepted by vector operations (only 1).
pub trait ValidVectorDimension {}

impl ValidVectorDimension for DimIndex<1> {}

// ============================================================================
// Orientation
// ============================================================================

/// Runtime mirror of an orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationKind {
    RowMajor,
    ColumnMajor,
    Unknown,
}

/// Static storage orientation of a matrix.
pub trait OrientationTag: Copy + Default + Debug + Send + Sync + 'static {
    const KIND: OrientationKind;

    /// Dimension traversed by major iteration.
    const MAJOR: Dim;

    /// Orientation of the transposed matrix.
    type Transposed: OrientationTag;

    /// Linear offset of `(i, j)` in a dense `nrows x ncols` buffer.
    fn offset(i: usize, j: usize, nrows: usize, ncols: usize) -> usize;

    /// Dimension traversed by minor iteration.
    #[inline]
    fn minor() -> Dim {
        Self::MAJOR.other()
    }
}

/// Rows are contiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Columns are contiguous (the kernel convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMajor;

/// Orientation cannot be determined statically (e.g. a binary expression
/// over a row-major and a column-major operand). Treated as row-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnknownOrientation;

impl OrientationTag for RowMajor {
    const KIND: OrientationKind = OrientationKind::RowMajor;
    const MAJOR: Dim = Dim::Rows;
    type Transposed = ColumnMajor;

    #[inline(always)]
    fn offset(i: usize, j: usize, _nrows: usize, ncols: usize) -> usize {
        i * ncols + j
    }
}

impl OrientationTag for ColumnMajor {
    const KIND: OrientationKind = OrientationKind::ColumnMajor;
    const MAJOR: Dim = Dim::Columns;
    type Transposed = RowMajor;

    #[inline(always)]
    fn offset(i: usize, j: usize, nrows: usize, _ncols: usize) -> usize {
        i + j * nrows
    }
}

impl OrientationTag for UnknownOrientation {
    const KIND: OrientationKind = OrientationKind::Unknown;
    const MAJOR: Dim = Dim::Rows;
    type Transposed = UnknownOrientation;

    #[inline(always)]
    fn offset(i: usize, j: usize, _nrows: usize, ncols: usize) -> usize {
        i * ncols + j
    }
}

/// Orientation of an expression combining two operands.
///
/// Equal orientations are kept; anything else degrades to
/// [`UnknownOrientation`].
pub trait OrientationJoin<Rhs: OrientationTag>: OrientationTag {
    type Output: OrientationTag;
}

macro_rules! impl_orientation_join {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl OrientationJoin<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

impl_orientation_join! {
    RowMajor, RowMajor => RowMajor;
    RowMajor, ColumnMajor => UnknownOrientation;
    RowMajor, UnknownOrientation => UnknownOrientation;
    ColumnMajor, RowMajor => UnknownOrientation;
    ColumnMajor, ColumnMajor => ColumnMajor;
    ColumnMajor, UnknownOrientation => UnknownOrientation;
    UnknownOrientation, RowMajor => UnknownOrientation;
    UnknownOrientation, ColumnMajor => UnknownOrientation;
    UnknownOrientation, UnknownOrientation => UnknownOrientation;
}

// ============================================================================
// Dimension tags
// ============================================================================

/// Abstract dimension resolved against an orientation.
pub trait DimensionTag: Copy + Default + Debug + 'static {
    fn resolve<O: OrientationTag>() -> Dim;
}

/// The dimension traversed by major iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Major;

/// The dimension traversed by minor iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minor;

/// The leading dimension (the stride-bearing one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Leading;

impl DimensionTag for Major {
    #[inline(always)]
    fn resolve<O: OrientationTag>() -> Dim {
        O::MAJOR
    }
}

impl DimensionTag for Minor {
    #[inline(always)]
    fn resolve<O: OrientationTag>() -> Dim {
        O::minor()
    }
}

impl DimensionTag for Leading {
    #[inline(always)]
    fn resolve<O: OrientationTag>() -> Dim {
        O::minor()
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Runtime mirror of a storage tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Dense,
    Sparse,
    Packed,
    Unknown,
}

/// Static storage category.
pub trait StorageTag: Copy + Default + Debug + Send + Sync + 'static {
    const KIND: StorageKind;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseStorage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SparseStorage;

/// Triangular, symmetric, hermitian or banded reading of a dense buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedStorage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnknownStorage;

impl StorageTag for DenseStorage {
    const KIND: StorageKind = StorageKind::Dense;
}

impl StorageTag for SparseStorage {
    const KIND: StorageKind = StorageKind::Sparse;
}

impl StorageTag for PackedStorage {
    const KIND: StorageKind = StorageKind::Packed;
}

impl StorageTag for UnknownStorage {
    const KIND: StorageKind = StorageKind::Unknown;
}

/// Storage category of an expression over two operands: the weaker one.
pub trait StorageJoin<Rhs: StorageTag>: StorageTag {
    type Output: StorageTag;
}

macro_rules! impl_storage_join {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl StorageJoin<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

impl_storage_join! {
    DenseStorage, DenseStorage => DenseStorage;
    DenseStorage, PackedStorage => PackedStorage;
    DenseStorage, SparseStorage => SparseStorage;
    DenseStorage, UnknownStorage => UnknownStorage;
    PackedStorage, DenseStorage => PackedStorage;
    PackedStorage, PackedStorage => PackedStorage;
    PackedStorage, SparseStorage => UnknownStorage;
    PackedStorage, UnknownStorage => UnknownStorage;
    SparseStorage, DenseStorage => SparseStorage;
    SparseStorage, PackedStorage => UnknownStorage;
    SparseStorage, SparseStorage => SparseStorage;
    SparseStorage, UnknownStorage => UnknownStorage;
    UnknownStorage, DenseStorage => UnknownStorage;
    UnknownStorage, PackedStorage => UnknownStorage;
    UnknownStorage, SparseStorage => UnknownStorage;
    UnknownStorage, UnknownStorage => UnknownStorage;
}

// ============================================================================
// Closure category
// ============================================================================

/// How an expression holds its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closure {
    /// The source was a temporary and is owned by the expression.
    Owned,
    /// The source is a named value borrowed for the expression's lifetime.
    Borrowed,
    /// The source is borrowed mutably and writes pass through.
    MutableAlias,
}

impl Closure {
    /// The category once a non-identity function is applied on top.
    #[inline]
    pub const fn immutable(self) -> Closure {
        match self {
            Closure::MutableAlias => Closure::Borrowed,
            other => other,
        }
    }

    /// Category of an expression over two sources: owned only if both are.
    #[inline]
    pub const fn combine(self, other: Closure) -> Closure {
        match (self, other) {
            (Closure::Owned, Closure::Owned) => Closure::Owned,
            _ => Closure::Borrowed,
        }
    }
}

// ============================================================================
// Triangle selection
// ============================================================================

/// Which triangle of a square matrix is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uplo {
    Upper,
    Lower,
}

impl Uplo {
    /// The triangle referenced after transposition.
    #[inline]
    pub const fn flip(self) -> Uplo {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKind {
    NonUnit,
    Unit,
}
