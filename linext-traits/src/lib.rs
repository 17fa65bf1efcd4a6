//! Shared traits and type-level tags for the linext crates.
//!
//! This crate holds the pieces every other crate agrees on: the scalar
//! bounds ([`Scalar`], [`RealScalar`]), the orientation, dimension and
//! storage tags that drive compile-time dispatch, and the scalar functions
//! embedded in lazy expressions.

pub mod func;
pub mod scalar;
pub mod tags;

pub use func::{
    BinaryFn, Conjugate, Divides, Identity, ImagPart, IsFinite, IsInf, IsNan, Minus, Modulus,
    Multiplies, Negate, Plus, Power, RealPart, ScaleBy, UnaryFn,
};
pub use scalar::{RealScalar, Scalar};
pub use tags::{
    Closure, ColumnMajor, DenseStorage, DiagKind, Dim, DimIndex, DimensionTag, Leading, Major,
    Minor, OrientationJoin, OrientationKind, OrientationTag, PackedStorage, RowMajor,
    SparseStorage, StorageJoin, StorageKind, StorageTag, UnknownOrientation, UnknownStorage, Uplo,
    ValidDimension, ValidVectorDimension,
};
