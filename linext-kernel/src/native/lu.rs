//! LU factorization with partial pivoting.

use super::norm::estimate_norm1;
use super::triangular::solve_triangular;
use super::{at, fits};
use crate::{NormKind, Trans};
use linext_traits::{DiagKind, RealScalar, Scalar, Uplo};
use num_traits::{One, Zero};

/// `P A = L U` in place; see [`Kernel::getrf`](crate::Kernel::getrf).
pub fn getrf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [usize]) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -4;
    }
    let k = m.min(n);
    if ipiv.len() < k {
        return -5;
    }
    let mut info = 0;
    for j in 0..k {
        let mut p = j;
        let mut best = a[at(j, j, lda)].abs1();
        for i in j + 1..m {
            let v = a[at(i, j, lda)].abs1();
            if v > best {
                best = v;
                p = i;
            }
        }
        ipiv[j] = p;

        if a[at(p, j, lda)] != T::zero() {
            if p != j {
                for c in 0..n {
                    a.swap(at(j, c, lda), at(p, c, lda));
                }
            }
            let pivot = a[at(j, j, lda)];
            for i in j + 1..m {
                a[at(i, j, lda)] /= pivot;
            }
        } else if info == 0 {
            info = j as i32 + 1;
        }

        for c in j + 1..n {
            let t = a[at(j, c, lda)];
            if t == T::zero() {
                continue;
            }
            for i in j + 1..m {
                let l = a[at(i, j, lda)];
                a[at(i, c, lda)] -= l * t;
            }
        }
    }
    info
}

/// Apply the interchanges recorded by [`getrf`] to the rows of `b`, forward
/// or in reverse.
fn permute_rows<T: Scalar>(ipiv: &[usize], nrhs: usize, b: &mut [T], ldb: usize, forward: bool) {
    let swap = |b: &mut [T], i: usize| {
        let p = ipiv[i];
        if p != i {
            for c in 0..nrhs {
                b.swap(at(i, c, ldb), at(p, c, ldb));
            }
        }
    };
    if forward {
        (0..ipiv.len()).for_each(|i| swap(b, i));
    } else {
        (0..ipiv.len()).rev().for_each(|i| swap(b, i));
    }
}

/// Solve `op(A) X = B` from LU factors.
#[allow(clippy::too_many_arguments)]
pub fn getrs<T: Scalar>(
    trans: Trans,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    ipiv: &[usize],
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -5;
    }
    if ipiv.len() < n {
        return -6;
    }
    if !fits(b.len(), n, nrhs, ldb) {
        return -8;
    }
    if n == 0 || nrhs == 0 {
        return 0;
    }
    let ipiv = &ipiv[..n];
    match trans {
        Trans::NoTrans => {
            permute_rows(ipiv, nrhs, b, ldb, true);
            solve_triangular(Uplo::Lower, trans, DiagKind::Unit, n, nrhs, a, lda, b, ldb);
            solve_triangular(
                Uplo::Upper,
                trans,
                DiagKind::NonUnit,
                n,
                nrhs,
                a,
                lda,
                b,
                ldb,
            );
        }
        _ => {
            solve_triangular(
                Uplo::Upper,
                trans,
                DiagKind::NonUnit,
                n,
                nrhs,
                a,
                lda,
                b,
                ldb,
            );
            solve_triangular(Uplo::Lower, trans, DiagKind::Unit, n, nrhs, a, lda, b, ldb);
            permute_rows(ipiv, nrhs, b, ldb, false);
        }
    }
    0
}

/// Reciprocal condition estimate from LU factors. The row interchanges do
/// not change the 1- or infinity-norm of the inverse, so only `L` and `U`
/// are used.
pub fn gecon<T: Scalar>(
    norm: NormKind,
    n: usize,
    a: &[T],
    lda: usize,
    anorm: T::Real,
    rcond: &mut T::Real,
) -> i32 {
    if !matches!(norm, NormKind::One | NormKind::Inf) {
        return -1;
    }
    if !fits(a.len(), n, n, lda) {
        return -4;
    }
    if anorm < T::Real::zero() {
        return -5;
    }
    if n == 0 {
        *rcond = T::Real::one();
        return 0;
    }
    *rcond = T::Real::zero();
    if anorm == T::Real::zero() || anorm.is_nan() {
        return 0;
    }

    let forward = |x: &mut [T]| {
        solve_triangular(
            Uplo::Lower,
            Trans::NoTrans,
            DiagKind::Unit,
            n,
            1,
            a,
            lda,
            x,
            n,
        );
        solve_triangular(
            Uplo::Upper,
            Trans::NoTrans,
            DiagKind::NonUnit,
            n,
            1,
            a,
            lda,
            x,
            n,
        );
    };
    let adjoint = |x: &mut [T]| {
        solve_triangular(
            Uplo::Upper,
            Trans::ConjTrans,
            DiagKind::NonUnit,
            n,
            1,
            a,
            lda,
            x,
            n,
        );
        solve_triangular(
            Uplo::Lower,
            Trans::ConjTrans,
            DiagKind::Unit,
            n,
            1,
            a,
            lda,
            x,
            n,
        );
    };
    let ainvnm = match norm {
        NormKind::Inf => estimate_norm1(n, adjoint, forward),
        _ => estimate_norm1(n, forward, adjoint),
    };
    if ainvnm != T::Real::zero() && ainvnm.is_finite() {
        *rcond = (T::Real::one() / ainvnm) / anorm;
    }
    0
}
