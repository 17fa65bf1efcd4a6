//! Linear least squares by QR and by SVD.

use super::qr::{geqrf, unmqr};
use super::svd::gesvd;
use super::triangular::trtrs;
use super::{at, fits};
use crate::{Side, SvdJob, Trans};
use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};
use num_traits::Zero;

#[allow(clippy::too_many_arguments)]
pub fn gels<T: Scalar>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -5;
    }
    if !fits(b.len(), m.max(n), nrhs, ldb) {
        return -7;
    }
    if m == 0 || n == 0 || nrhs == 0 {
        for c in 0..nrhs {
            for i in 0..n {
                b[at(i, c, ldb)] = T::zero();
            }
        }
        return 0;
    }

    if m >= n {
        // min ||A x - b||: R x = (Q^H b)[..n].
        let mut tau = vec![T::zero(); n];
        geqrf(m, n, a, lda, &mut tau);
        unmqr(
            Side::Left,
            Trans::ConjTrans,
            m,
            nrhs,
            n,
            a,
            lda,
            &tau,
            b,
            ldb,
        );
        trtrs(
            Uplo::Upper,
            Trans::NoTrans,
            DiagKind::NonUnit,
            n,
            nrhs,
            a,
            lda,
            b,
            ldb,
        )
    } else {
        // Minimum norm: with A^H = Q R, x = Q [R^{-H} b; 0].
        let mut ah = vec![T::zero(); n * m];
        for j in 0..n {
            for i in 0..m {
                ah[at(j, i, n)] = a[at(i, j, lda)].conj();
            }
        }
        let mut tau = vec![T::zero(); m];
        geqrf(n, m, &mut ah, n, &mut tau);
        let info = trtrs(
            Uplo::Upper,
            Trans::ConjTrans,
            DiagKind::NonUnit,
            m,
            nrhs,
            &ah,
            n,
            b,
            ldb,
        );
        if info != 0 {
            return info;
        }
        for c in 0..nrhs {
            for i in m..n {
                b[at(i, c, ldb)] = T::zero();
            }
        }
        unmqr(
            Side::Left,
            Trans::NoTrans,
            n,
            nrhs,
            m,
            &mut ah,
            n,
            &tau,
            b,
            ldb,
        );
        0
    }
}

#[allow(clippy::too_many_arguments)]
pub fn gelss<T: Scalar>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
    s: &mut [T::Real],
    rcond: T::Real,
    rank: &mut usize,
) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -5;
    }
    if !fits(b.len(), m.max(n), nrhs, ldb) {
        return -7;
    }
    let k = m.min(n);
    if s.len() < k {
        return -8;
    }
    *rank = 0;
    if k == 0 || nrhs == 0 {
        for c in 0..nrhs {
            for i in 0..n {
                b[at(i, c, ldb)] = T::zero();
            }
        }
        return 0;
    }

    let mut u = vec![T::zero(); m * k];
    let mut vt = vec![T::zero(); k * n];
    let info = gesvd(
        SvdJob::Thin,
        SvdJob::Thin,
        m,
        n,
        a,
        lda,
        s,
        &mut u,
        m,
        &mut vt,
        k,
    );
    if info != 0 {
        return info;
    }

    let relative = if rcond < T::Real::zero() {
        T::Real::epsilon()
    } else {
        rcond
    };
    let threshold = relative * s[0];
    *rank = s[..k].iter().filter(|&&sv| sv > threshold).count();

    // x = V diag(1/s) U^H b over the kept singular values.
    for c in 0..nrhs {
        let mut y = vec![T::zero(); k];
        for (l, yl) in y.iter_mut().enumerate().take(*rank) {
            let mut d = T::zero();
            for i in 0..m {
                d += u[at(i, l, m)].conj() * b[at(i, c, ldb)];
            }
            *yl = d.unscale(s[l]);
        }
        for j in 0..n {
            let mut x = T::zero();
            for (l, &yl) in y.iter().enumerate().take(*rank) {
                x += vt[at(l, j, k)].conj() * yl;
            }
            b[at(j, c, ldb)] = x;
        }
        for i in n..m {
            b[at(i, c, ldb)] = T::zero();
        }
    }
    0
}
