//! Matrix inverse through LU.
//!
//! A singular input is not an error: the result is saturated to `+inf` in
//! every entry, and the in-place form reports it through its return value.

use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, Trans};
use linext_traits::{RealScalar, Scalar};
use linext_view::{
    ensure_square, ColMajorMatrix, DenseMatrix, LinextError, MatrixExpr, MatrixExprMut, Result,
};
use tracing::warn;

/// Inverse of the square buffer `work`. A zero pivot is reported as
/// [`LinextError::Singular`].
pub(crate) fn inverse_buffer<T: Scalar>(mut work: ColMajorMatrix<T>) -> Result<ColMajorMatrix<T>> {
    let n = work.nrows();
    let mut ipiv = vec![0; n];
    let info = <ActiveKernel as Kernel<T>>::getrf(n, n, work.as_mut_slice(), ld(n), &mut ipiv);
    let info = check_status("getrf", info)?;
    if info > 0 {
        return Err(LinextError::Singular { info });
    }
    let mut x = ColMajorMatrix::<T>::identity(n);
    let info = <ActiveKernel as Kernel<T>>::getrs(
        Trans::NoTrans,
        n,
        n,
        work.as_slice(),
        ld(n),
        &ipiv,
        x.as_mut_slice(),
        ld(n),
    );
    check_status("getrs", info)?;
    Ok(x)
}

fn saturated<T: Scalar>(n: usize) -> ColMajorMatrix<T> {
    warn!(n, "singular matrix, inverse saturated to infinity");
    ColMajorMatrix::filled(n, n, T::from_real(<T::Real as RealScalar>::infinity()))
}

/// `A^-1` in the orientation of `a`. Fails with
/// [`LinextError::NotSquare`] for a rectangular `a`.
///
/// ```rust
/// use linext::{inv, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[2.0, 0.0], [0.0, 4.0]]).unwrap();
/// assert_eq!(inv(&a).unwrap(), DenseMatrix::from_rows(&[[0.5, 0.0], [0.0, 0.25]]).unwrap());
/// ```
pub fn inv<M>(a: &M) -> Result<DenseMatrix<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(a.nrows(), a.ncols())?;
    let n = a.nrows();
    let x = match inverse_buffer(materialize(a)) {
        Err(LinextError::Singular { .. }) => saturated(n),
        other => other?,
    };
    Ok(reorient(&x))
}

/// Replace `a` with its inverse. Returns `false`, with `a` saturated to
/// `+inf`, when `a` is singular.
pub fn inv_inplace<M>(a: &mut M) -> Result<bool>
where
    M: MatrixExprMut + MaybeSync,
    M::Elem: Scalar,
{
    ensure_square(a.nrows(), a.ncols())?;
    let n = a.nrows();
    let (x, regular) = match inverse_buffer(materialize(&*a)) {
        Err(LinextError::Singular { .. }) => (saturated(n), false),
        other => (other?, true),
    };
    a.assign(&x)?;
    Ok(regular)
}
