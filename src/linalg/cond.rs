//! Condition numbers `||A|| ||A^-1||`.
//!
//! These never fail: a singular matrix, a rectangular matrix where an
//! inverse is needed, or a kernel failure all give `+inf`.

use super::inv::inverse_buffer;
use super::materialize;
use super::norm::{norm, MatrixNorm};
use super::svd::svd_values;
use crate::maybe_sync::MaybeSync;
use linext_traits::{RealScalar, Scalar};
use linext_view::{LinextError, MatrixExpr, Result};
use num_traits::Zero;
use tracing::warn;

type Real<M> = <<M as MatrixExpr>::Elem as Scalar>::Real;

fn or_infinite<R: RealScalar>(value: Result<R>) -> R {
    value.unwrap_or_else(|err| {
        warn!(%err, "condition number saturated to infinity");
        R::infinity()
    })
}

fn through_inverse<M>(a: &M, kind: MatrixNorm) -> Result<Real<M>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LinextError::NotSquare { rows, cols });
    }
    let work = materialize(a);
    let anorm = norm(&work, kind)?;
    let ainv = inverse_buffer(work)?;
    Ok(anorm * norm(&ainv, kind)?)
}

/// `s_max / s_min`; `+inf` for a rank-deficient matrix.
pub fn cond_2<M>(a: &M) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    or_infinite(svd_values(a).map(|s| match (s.as_slice().first(), s.as_slice().last()) {
        (Some(&hi), Some(&lo)) if lo > Real::<M>::zero() => hi / lo,
        (Some(_), Some(_)) => Real::<M>::infinity(),
        _ => Real::<M>::zero(),
    }))
}

pub fn cond_1<M>(a: &M) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    or_infinite(through_inverse(a, MatrixNorm::One))
}

pub fn cond_inf<M>(a: &M) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    or_infinite(through_inverse(a, MatrixNorm::Inf))
}

pub fn cond_frobenius<M>(a: &M) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    or_infinite(through_inverse(a, MatrixNorm::Frobenius))
}

/// Condition number under `kind`.
pub fn cond_norm<M>(a: &M, kind: MatrixNorm) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    match kind {
        MatrixNorm::Two => cond_2(a),
        _ => or_infinite(through_inverse(a, kind)),
    }
}

/// Condition number in the 2-norm.
///
/// ```rust
/// use linext::{cond, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[2.0, 0.0], [0.0, 0.5]]).unwrap();
/// assert!((cond(&a) - 4.0).abs() < 1e-12);
/// assert!(cond(&DenseMatrix::<f64>::zeros(2, 2)).is_infinite());
/// ```
#[inline]
pub fn cond<M>(a: &M) -> Real<M>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    cond_2(a)
}
