//! `any` and `all` over whole containers or per line.
//!
//! Whole-container forms stop at the first decisive element. Over an empty
//! container `any` is `false` and `all` is `true`.

use crate::maybe_sync::MaybeSync;
use crate::reduce::{fold_lines, Reducible};
use linext_traits::{Dim, DimIndex, DimensionTag, ValidDimension};
use linext_view::{DenseVector, MatrixExpr};
use num_traits::Zero;

/// Whether some element satisfies `p`.
pub fn any<X, K, P>(x: &X, mut p: P) -> bool
where
    X: Reducible<K>,
    P: FnMut(X::Elem) -> bool,
{
    !x.visit_while(|v| !p(v))
}

/// Whether some element is different from zero.
pub fn any_nonzero<X, K>(x: &X) -> bool
where
    X: Reducible<K>,
    X::Elem: Zero + PartialEq,
{
    any(x, |v: X::Elem| v != X::Elem::zero())
}

/// Whether every element satisfies `p`.
pub fn all<X, K, P>(x: &X, p: P) -> bool
where
    X: Reducible<K>,
    P: FnMut(X::Elem) -> bool,
{
    x.visit_while(p)
}

/// One flag per row ([`Dim::Rows`]) or per column ([`Dim::Columns`]).
pub fn any_along<M, P>(m: &M, dim: Dim, p: P) -> DenseVector<bool>
where
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
{
    DenseVector::from_vec(fold_lines(m, dim, false, |hit, x| hit || p(x)))
}

pub fn all_along<M, P>(m: &M, dim: Dim, p: P) -> DenseVector<bool>
where
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
{
    DenseVector::from_vec(fold_lines(m, dim, true, |ok, x| ok && p(x)))
}

/// `any<K>(m, p)`: per row for `K = 1`, per column for `K = 2`.
pub fn any_dim<const K: usize, M, P>(m: &M, p: P) -> DenseVector<bool>
where
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
    DimIndex<K>: ValidDimension,
{
    any_along(m, <DimIndex<K> as ValidDimension>::DIM, p)
}

pub fn all_dim<const K: usize, M, P>(m: &M, p: P) -> DenseVector<bool>
where
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
    DimIndex<K>: ValidDimension,
{
    all_along(m, <DimIndex<K> as ValidDimension>::DIM, p)
}

pub fn any_by_tag<T, M, P>(m: &M, p: P) -> DenseVector<bool>
where
    T: DimensionTag,
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
{
    any_along(m, T::resolve::<M::Orientation>(), p)
}

pub fn all_by_tag<T, M, P>(m: &M, p: P) -> DenseVector<bool>
where
    T: DimensionTag,
    M: MatrixExpr + MaybeSync,
    P: Fn(M::Elem) -> bool + MaybeSync,
{
    all_along(m, T::resolve::<M::Orientation>(), p)
}
