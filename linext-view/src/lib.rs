//! Lazy expressions, dense containers and proxy views.
//!
//! # Core Types
//!
//! - [`VectorExpr`] / [`MatrixExpr`]: read access to anything shaped like a
//!   vector or a matrix; [`VectorExprMut`] / [`MatrixExprMut`] add writes
//! - [`DenseVector`] / [`DenseMatrix`]: owning containers
//! - [`VectorUnary`], [`VectorBinaryLeft`], [`VectorBinaryRight`],
//!   [`VectorBinary`] and their matrix analogs: element-wise lazy expressions
//! - [`MatrixDiagonal`], [`MatrixRow`], [`MatrixColumn`], [`DiagonalMatrix`]:
//!   proxies sharing storage with a source
//! - [`SequenceVector`]: arithmetic progression without storage
//! - [`Triangular`], [`Symmetric`], [`Hermitian`], [`Banded`]: structured
//!   readings of a dense matrix
//!
//! # Closures
//!
//! An expression built from a value owns it; an expression built from a
//! reference borrows it and cannot outlive it. `&E` and `&mut E` implement
//! the expression traits, so the choice is made at the call site:
//!
//! ```rust
//! use linext_view::{DenseVector, VectorExpr, VectorUnary};
//!
//! let v = DenseVector::from_vec(vec![1.0, -2.0, 3.0]);
//! let doubled = VectorUnary::new(&v, |x: f64| 2.0 * x);
//! assert_eq!(doubled.at(1), -4.0);
//! assert_eq!(v.at(1), -2.0);
//! ```

pub mod binary;
pub mod cursor;
pub mod dense;
pub mod expr;
pub mod ops;
pub mod proxy;
pub mod sequence;
pub mod structured;
pub mod unary;

pub use binary::{
    MatrixBinary, MatrixBinaryLeft, MatrixBinaryRight, VectorBinary, VectorBinaryLeft,
    VectorBinaryRight,
};
pub use cursor::{
    Cursor, DualCursor, Elements, MatrixCursor1, MatrixCursor2, Reverse, Run, VectorCursor,
};
pub use dense::{ColMajorMatrix, DenseMatrix, DenseVector};
pub use expr::{
    MatrixExpr, MatrixExprMut, ResizableMatrix, ResizableVector, VectorExpr, VectorExprMut,
};
pub use proxy::{diagonal_len, DiagonalMatrix, MatrixColumn, MatrixDiagonal, MatrixRow, Transposed};
pub use sequence::SequenceVector;
pub use structured::{Banded, Hermitian, Symmetric, Triangular};
pub use unary::{MatrixUnary, VectorUnary};

pub use linext_traits::{
    BinaryFn, Closure, ColumnMajor, DenseStorage, DiagKind, Dim, OrientationKind, OrientationTag,
    RealScalar, RowMajor, Scalar, StorageTag, UnaryFn, UnknownOrientation, Uplo,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by expression access and by the operations built on top.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinextError {
    /// Element index outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    BadIndex { index: usize, len: usize },

    /// Element position outside the matrix shape.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    BadMatrixIndex {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Element count does not match what the operation requires.
    #[error("size mismatch: expected {expected}, got {actual}")]
    BadSize { expected: usize, actual: usize },

    /// Matrix shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch((usize, usize), (usize, usize)),

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Cursors over different expressions were compared.
    #[error("cursors refer to different expressions")]
    ExternalLogic,

    /// Zero pivot or non-positive diagonal; `info` is `1 + index`.
    #[error("singular matrix (status {info})")]
    Singular { info: i32 },

    /// Argument rejected by the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Combination of structure and norm with no computation path.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// A kernel routine reported an illegal argument (negative status).
    #[error("kernel routine {routine} failed with status {info}")]
    Kernel { routine: &'static str, info: i32 },

    /// An iterative kernel routine stopped before converging.
    #[error("kernel routine {routine} did not converge ({info} unconverged)")]
    NotConverged { routine: &'static str, info: i32 },
}

/// Result type for linext operations.
pub type Result<T> = std::result::Result<T, LinextError>;

/// Fail with [`LinextError::ShapeMismatch`] unless both shapes are equal.
#[inline]
pub fn ensure_same_shape(a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a != b {
        return Err(LinextError::ShapeMismatch(a, b));
    }
    Ok(())
}

/// Fail with [`LinextError::NotSquare`] unless `rows == cols`.
#[inline]
pub fn ensure_square(rows: usize, cols: usize) -> Result<()> {
    if rows != cols {
        return Err(LinextError::NotSquare { rows, cols });
    }
    Ok(())
}
