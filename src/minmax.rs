//! Extremum reductions.
//!
//! Real values are compared numerically. Complex values are compared by
//! modulus, ties broken by phase. NaN never compares less than anything,
//! so NaN elements are always skipped.
//!
//! Reducing nothing, or nothing but NaN, yields the seed: `+∞` for `min`,
//! `-∞` for `max`. The complex seeds are `(+∞, NaN)` for `min` and `(0, 0)`
//! for `max`.

use crate::maybe_sync::MaybeSync;
use crate::reduce::{fold_lines, Reducible};
use crate::size::VectorShape;
use linext_traits::{
    Dim, DimIndex, DimensionTag, RealScalar, Scalar, ValidDimension, ValidVectorDimension,
};
use linext_view::{DenseVector, MatrixExpr, VectorExpr};
use num_traits::Zero;

/// Strict ordering used by [`min`] and [`max`].
#[inline]
pub fn precedes<T: Scalar>(a: T, b: T) -> bool {
    if T::IS_COMPLEX {
        let (ma, mb) = (a.abs(), b.abs());
        ma < mb || (ma == mb && a.arg() < b.arg())
    } else {
        a.re() < b.re()
    }
}

#[inline]
fn min_seed<T: Scalar>() -> T {
    if T::IS_COMPLEX {
        T::from_parts(
            <T::Real as RealScalar>::infinity(),
            <T::Real as RealScalar>::nan(),
        )
    } else {
        T::from_real(<T::Real as RealScalar>::infinity())
    }
}

#[inline]
fn max_seed<T: Scalar>() -> T {
    if T::IS_COMPLEX {
        T::zero()
    } else {
        T::from_real(<T::Real as RealScalar>::neg_infinity())
    }
}

#[inline(always)]
fn keep_min<T: Scalar>(acc: T, x: T) -> T {
    if precedes(x, acc) {
        x
    } else {
        acc
    }
}

#[inline(always)]
fn keep_max<T: Scalar>(acc: T, x: T) -> T {
    if precedes(acc, x) {
        x
    } else {
        acc
    }
}

// ============================================================================
// Whole container
// ============================================================================

/// Smallest element of a vector or matrix.
pub fn min<X, K>(x: &X) -> X::Elem
where
    X: Reducible<K>,
    X::Elem: Scalar,
{
    let mut acc = min_seed();
    x.visit(|v| acc = keep_min(acc, v));
    acc
}

/// Largest element of a vector or matrix.
pub fn max<X, K>(x: &X) -> X::Elem
where
    X: Reducible<K>,
    X::Elem: Scalar,
{
    let mut acc = max_seed();
    x.visit(|v| acc = keep_max(acc, v));
    acc
}

/// `min<1>(v)`: the minimum as a one-element vector.
pub fn vector_min_dim<const K: usize, E>(v: &E) -> DenseVector<E::Elem>
where
    E: VectorExpr,
    E::Elem: Scalar,
    DimIndex<K>: ValidVectorDimension,
{
    DenseVector::from_vec(vec![min::<E, VectorShape>(v)])
}

/// `max<1>(v)`: the maximum as a one-element vector.
pub fn vector_max_dim<const K: usize, E>(v: &E) -> DenseVector<E::Elem>
where
    E: VectorExpr,
    E::Elem: Scalar,
    DimIndex<K>: ValidVectorDimension,
{
    DenseVector::from_vec(vec![max::<E, VectorShape>(v)])
}

// ============================================================================
// Per line
// ============================================================================

/// Minimum of every row ([`Dim::Rows`]) or every column ([`Dim::Columns`]).
pub fn min_along<M>(m: &M, dim: Dim) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let lines = fold_lines(m, dim, min_seed::<M::Elem>(), keep_min::<M::Elem>);
    DenseVector::from_vec(lines)
}

/// Maximum of every row ([`Dim::Rows`]) or every column ([`Dim::Columns`]).
pub fn max_along<M>(m: &M, dim: Dim) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let lines = fold_lines(m, dim, max_seed::<M::Elem>(), keep_max::<M::Elem>);
    DenseVector::from_vec(lines)
}

/// `min<K>(m)`: one value per row for `K = 1`, per column for `K = 2`.
pub fn min_dim<const K: usize, M>(m: &M) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    DimIndex<K>: ValidDimension,
{
    min_along(m, <DimIndex<K> as ValidDimension>::DIM)
}

/// `max<K>(m)`: one value per row for `K = 1`, per column for `K = 2`.
pub fn max_dim<const K: usize, M>(m: &M) -> DenseVector<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    DimIndex<K>: ValidDimension,
{
    max_along(m, <DimIndex<K> as ValidDimension>::DIM)
}

pub fn min_by_tag<T, M>(m: &M) -> DenseVector<M::Elem>
where
    T: DimensionTag,
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    min_along(m, T::resolve::<M::Orientation>())
}

pub fn max_by_tag<T, M>(m: &M) -> DenseVector<M::Elem>
where
    T: DimensionTag,
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    max_along(m, T::resolve::<M::Orientation>())
}
