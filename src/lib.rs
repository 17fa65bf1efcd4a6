//! Lazy vector and matrix expressions with dimension-tagged reductions and
//! dense decomposition bindings.
//!
//! The containers and proxy views live in [`linext_view`], the scalar
//! bounds and type-level tags in [`linext_traits`], and the numerical
//! routines behind the decompositions in [`linext_kernel`]. This crate
//! layers the user-facing operations on top and re-exports what callers
//! need.
//!
//! # Primary API
//!
//! ## Shape queries
//!
//! - [`size`], [`num_rows`], [`num_columns`]
//! - [`size_along`], [`size_dim`], [`size_by_tag`]: resolve a dimension
//!   index or a [`Major`] / [`Minor`] tag against the matrix orientation
//!
//! ## Element-wise expressions
//!
//! - [`apply`], [`zip_with`]: lazy map and zip with a closure
//! - [`isfinite`], [`isinf`], [`isnan`], [`element_pow`], [`scale`],
//!   [`conj`], [`real`], [`imag`], [`abs`]
//!
//! ## Reductions and scans
//!
//! - [`min`], [`max`], [`sum`], [`cumsum`], [`any`], [`all`],
//!   [`for_each`], each with per-line forms (`_along`, `_dim`, `_by_tag`)
//!
//! ## Shape manipulation
//!
//! - [`reshape`], [`diag`], [`triu`], [`tril`], [`cat_rows`],
//!   [`cat_columns`], [`seq`], [`linspace`]
//!
//! ## Decompositions and solvers
//!
//! - [`lu_decompose`], [`qr_decompose`], [`ql_decompose`],
//!   [`svd_decompose`], [`cholesky_decompose`], [`balance`]
//! - [`inv`], [`llsq`], [`rcond`], [`cond`], [`norm`]
//!
//! # Example
//!
//! ```rust
//! use linext::{lu_decompose, sum_rows, DenseMatrix, VectorExpr};
//!
//! let a = DenseMatrix::<f64>::from_rows(&[[2.0, 1.0], [4.0, 3.0]]).unwrap();
//!
//! // One sum per column.
//! let s = sum_rows(&a);
//! assert_eq!((s.at(0), s.at(1)), (6.0, 4.0));
//!
//! let lu = lu_decompose(&a).unwrap();
//! assert!((lu.det().unwrap() - 2.0).abs() < 1e-12);
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature, reductions over many lines and the
//! column-major copies made before kernel calls run on the rayon pool once
//! the input holds at least [`PARALLEL_MIN_LEN`] elements.

mod maybe_sync;

pub mod cat;
pub mod diag;
pub mod elementwise;
pub mod linalg;
pub mod minmax;
pub mod predicate;
pub mod reduce;
pub mod reshape;
pub mod sequence;
pub mod size;
pub mod sum;
pub mod triangle;

// ============================================================================
// Shape queries
// ============================================================================
pub use size::{
    num_columns, num_rows, size, size_along, size_by_tag, size_dim, vector_size_dim, MatrixShape,
    VectorShape,
};

// ============================================================================
// Element-wise expressions
// ============================================================================
pub use elementwise::{
    abs, apply, apply_left, apply_right, conj, element_pow, imag, isfinite, isinf, isnan, real,
    scale, zip_with, Elementwise, ZipWith,
};

// ============================================================================
// Reductions and scans
// ============================================================================
pub use minmax::{
    max, max_along, max_by_tag, max_dim, min, min_along, min_by_tag, min_dim, precedes,
    vector_max_dim, vector_min_dim,
};
pub use predicate::{
    all, all_along, all_by_tag, all_dim, any, any_along, any_by_tag, any_dim, any_nonzero,
};
pub use reduce::{for_each, for_each_along, for_each_by_tag, for_each_dim, Reducible};
pub use sum::{
    cumsum, cumsum_along, cumsum_by_tag, cumsum_columns, cumsum_dim, cumsum_rows, sum, sum_all,
    sum_along, sum_by_tag, sum_columns, sum_dim, sum_rows, vector_sum_dim, Summable,
};

// ============================================================================
// Shape manipulation
// ============================================================================
pub use cat::{cat_columns, cat_rows};
pub use diag::{diag, diag_view, diag_with_shape, DiagonalOp};
pub use reshape::{
    reshape, reshape_along, reshape_by_tag, reshape_dim, reshape_inplace_along,
    reshape_inplace_by_tag, reshape_inplace_dim,
};
pub use sequence::{linspace, seq};
pub use triangle::{tril, triu};

// ============================================================================
// Decompositions and solvers
// ============================================================================
pub use linalg::balance::{balance, balance_inplace, balance_pair, Balancing, PairBalancing};
pub use linalg::cholesky::{
    cholesky_decompose, cholesky_decompose_inplace, cholesky_solve, Cholesky,
};
pub use linalg::cond::{cond, cond_1, cond_2, cond_frobenius, cond_inf, cond_norm};
pub use linalg::inv::{inv, inv_inplace};
pub use linalg::llsq::{
    llsq, llsq_inplace, llsq_qr, llsq_qr_inplace, llsq_svd, llsq_svd_inplace, llsq_svd_rcond,
    residual_norm,
};
pub use linalg::lu::{lu_decompose, lu_factors, lu_solve, lu_solve_inplace, lu_solve_matrix, Lu};
pub use linalg::norm::{norm, norm_1, norm_2, norm_frobenius, norm_inf, MatrixNorm};
pub use linalg::prod;
pub use linalg::ql::{ql_decompose, ql_decompose_into, Ql, QlMode};
pub use linalg::qr::{qr_decompose, qr_decompose_into, Qr, QrMode};
pub use linalg::rcond::{
    is_ill_conditioned, rcond, rcond_banded, rcond_hermitian, rcond_inf, rcond_norm,
    rcond_symmetric, rcond_triangular,
};
pub use linalg::svd::{svd_decompose, svd_values, Svd};

pub use linext_kernel::{BalanceJob, Side, SvdJob, Trans};

// ============================================================================
// Containers, views and tags
// ============================================================================
pub use linext_view::{
    ensure_same_shape, ensure_square, Banded, ColMajorMatrix, DenseMatrix, DenseVector,
    DiagonalMatrix, Hermitian, LinextError, MatrixBinary, MatrixBinaryLeft, MatrixBinaryRight,
    MatrixColumn, MatrixDiagonal, MatrixExpr, MatrixExprMut, MatrixRow, MatrixUnary,
    ResizableMatrix, ResizableVector, Result, SequenceVector, Symmetric, Transposed, Triangular,
    VectorBinary, VectorBinaryLeft, VectorBinaryRight, VectorExpr, VectorExprMut, VectorUnary,
};

pub use linext_traits::{
    ColumnMajor, DiagKind, Dim, DimensionTag, Leading, Major, Minor, OrientationKind,
    OrientationTag, RealScalar, RowMajor, Scalar, UnknownOrientation, Uplo,
};

pub use maybe_sync::{MaybeSendSync, MaybeSync};

// ============================================================================
// Constants
// ============================================================================

/// Element count from which the `parallel` feature hands work to rayon.
pub const PARALLEL_MIN_LEN: usize = 1 << 15;
