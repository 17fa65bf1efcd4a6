//! Matrix norms.

use super::{ld, materialize};
use crate::linalg::svd::svd_values;
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, NormKind};
use linext_traits::Scalar;
use linext_view::{MatrixExpr, Result};
use num_traits::Zero;

/// Norm selector for norms and condition numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixNorm {
    /// Maximum absolute column sum.
    #[default]
    One,
    /// Maximum absolute row sum.
    Inf,
    /// Largest singular value.
    Two,
    Frobenius,
}

impl MatrixNorm {
    /// The kernel selector, for norms the kernel computes directly.
    #[inline]
    pub(crate) fn kernel(self) -> Option<NormKind> {
        match self {
            MatrixNorm::One => Some(NormKind::One),
            MatrixNorm::Inf => Some(NormKind::Inf),
            MatrixNorm::Frobenius => Some(NormKind::Frobenius),
            MatrixNorm::Two => None,
        }
    }
}

fn lange<M>(a: &M, kind: NormKind) -> <M::Elem as Scalar>::Real
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let work = materialize(a);
    let (m, n) = work.shape();
    <ActiveKernel as Kernel<M::Elem>>::lange(kind, m, n, work.as_slice(), ld(m))
}

pub fn norm_1<M>(a: &M) -> <M::Elem as Scalar>::Real
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    lange(a, NormKind::One)
}

pub fn norm_inf<M>(a: &M) -> <M::Elem as Scalar>::Real
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    lange(a, NormKind::Inf)
}

pub fn norm_frobenius<M>(a: &M) -> <M::Elem as Scalar>::Real
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    lange(a, NormKind::Frobenius)
}

/// Spectral norm, through the singular values.
pub fn norm_2<M>(a: &M) -> Result<<M::Elem as Scalar>::Real>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let s = svd_values(a)?;
    Ok(s.as_slice().first().copied().unwrap_or_else(Zero::zero))
}

pub fn norm<M>(a: &M, kind: MatrixNorm) -> Result<<M::Elem as Scalar>::Real>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    match kind.kernel() {
        Some(k) => Ok(lange(a, k)),
        None => norm_2(a),
    }
}
