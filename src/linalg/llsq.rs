//! Linear least squares, `min ||A x - b||_2`.
//!
//! For `m < n` the minimum-norm solution is returned. The solution always
//! has `n` entries, so in-place forms resize the right-hand side.

use super::{check_status, ld, materialize};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel};
use linext_traits::Scalar;
use linext_view::{DenseVector, LinextError, MatrixExpr, ResizableVector, Result, VectorExpr};
use num_traits::{One, Zero};

/// Right-hand side copied into a buffer of `max(m, n)` entries.
fn rhs_buffer<T, V>(m: usize, n: usize, b: &V) -> Result<Vec<T>>
where
    T: Scalar,
    V: VectorExpr<Elem = T>,
{
    if b.len() != m {
        return Err(LinextError::BadSize {
            expected: m,
            actual: b.len(),
        });
    }
    let mut buf = vec![T::zero(); m.max(n)];
    for (i, x) in buf.iter_mut().take(m).enumerate() {
        *x = b.at(i);
    }
    Ok(buf)
}

fn write_solution<V>(b: &mut V, x: &[V::Elem]) -> Result<()>
where
    V: ResizableVector,
{
    b.resize(x.len());
    b.assign(&DenseVector::from_vec(x.to_vec()))
}

/// Least squares through QR. `a` must have full rank; a rank-deficient
/// `a` is reported as [`LinextError::Singular`].
pub fn llsq_qr<M, V>(a: &M, b: &V) -> Result<DenseVector<M::Elem>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: VectorExpr<Elem = M::Elem>,
{
    let mut work = materialize(a);
    let (m, n) = work.shape();
    let mut x = rhs_buffer(m, n, b)?;
    let info = <ActiveKernel as Kernel<M::Elem>>::gels(
        m,
        n,
        1,
        work.as_mut_slice(),
        ld(m),
        &mut x,
        ld(m.max(n)),
    );
    let info = check_status("gels", info)?;
    if info > 0 {
        return Err(LinextError::Singular { info });
    }
    x.truncate(n);
    Ok(DenseVector::from_vec(x))
}

/// Least squares through the SVD. Singular values at or below
/// `rcond * s_max` are dropped; a negative `rcond` uses machine epsilon.
/// Returns the solution and the effective rank of `a`.
pub fn llsq_svd_rcond<M, V>(
    a: &M,
    b: &V,
    rcond: <M::Elem as Scalar>::Real,
) -> Result<(DenseVector<M::Elem>, usize)>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: VectorExpr<Elem = M::Elem>,
{
    let mut work = materialize(a);
    let (m, n) = work.shape();
    let mut x = rhs_buffer(m, n, b)?;
    let mut s = vec![<M::Elem as Scalar>::Real::zero(); m.min(n)];
    let mut rank = 0;
    let info = <ActiveKernel as Kernel<M::Elem>>::gelss(
        m,
        n,
        1,
        work.as_mut_slice(),
        ld(m),
        &mut x,
        ld(m.max(n)),
        &mut s,
        rcond,
        &mut rank,
    );
    let info = check_status("gelss", info)?;
    if info > 0 {
        return Err(LinextError::NotConverged {
            routine: "gelss",
            info,
        });
    }
    x.truncate(n);
    Ok((DenseVector::from_vec(x), rank))
}

/// Least squares through the SVD with the default threshold. Robust to
/// rank deficiency.
pub fn llsq_svd<M, V>(a: &M, b: &V) -> Result<DenseVector<M::Elem>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: VectorExpr<Elem = M::Elem>,
{
    let minus_one = -<<M::Elem as Scalar>::Real as num_traits::One>::one();
    llsq_svd_rcond(a, b, minus_one).map(|(x, _)| x)
}

/// Least squares with the default method, currently [`llsq_svd`].
///
/// ```rust
/// use linext::{llsq, DenseMatrix, DenseVector};
///
/// // Fit y = c0 + c1 t through (0, 1), (1, 3), (2, 5).
/// let a = DenseMatrix::<f64>::from_rows(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]]).unwrap();
/// let y = DenseVector::from_vec(vec![1.0, 3.0, 5.0]);
/// let c = llsq(&a, &y).unwrap();
/// assert!((c[0] - 1.0).abs() < 1e-12 && (c[1] - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn llsq<M, V>(a: &M, b: &V) -> Result<DenseVector<M::Elem>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: VectorExpr<Elem = M::Elem>,
{
    llsq_svd(a, b)
}

/// [`llsq_qr`] writing the solution over `b`.
pub fn llsq_qr_inplace<M, V>(a: &M, b: &mut V) -> Result<()>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: ResizableVector<Elem = M::Elem>,
{
    let x = llsq_qr(a, &*b)?;
    write_solution(b, x.as_slice())
}

/// [`llsq_svd`] writing the solution over `b`.
pub fn llsq_svd_inplace<M, V>(a: &M, b: &mut V) -> Result<()>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: ResizableVector<Elem = M::Elem>,
{
    let x = llsq_svd(a, &*b)?;
    write_solution(b, x.as_slice())
}

/// [`llsq`] writing the solution over `b`.
#[inline]
pub fn llsq_inplace<M, V>(a: &M, b: &mut V) -> Result<()>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    V: ResizableVector<Elem = M::Elem>,
{
    llsq_svd_inplace(a, b)
}

/// Residual norm `||A x - b||_2`.
pub fn residual_norm<M, X, V>(a: &M, x: &X, b: &V) -> Result<<M::Elem as Scalar>::Real>
where
    M: MatrixExpr,
    M::Elem: Scalar,
    X: VectorExpr<Elem = M::Elem>,
    V: VectorExpr<Elem = M::Elem>,
{
    let (m, n) = a.shape();
    if x.len() != n {
        return Err(LinextError::BadSize {
            expected: n,
            actual: x.len(),
        });
    }
    if b.len() != m {
        return Err(LinextError::BadSize {
            expected: m,
            actual: b.len(),
        });
    }
    let mut acc = <M::Elem as Scalar>::Real::zero();
    for i in 0..m {
        let mut r = -b.at(i);
        for j in 0..n {
            r += a.at(i, j) * x.at(j);
        }
        acc += r.abs_sqr();
    }
    Ok(Scalar::sqrt(acc))
}
