//! Singular value decomposition by one-sided Jacobi rotations.
//!
//! The rotations orthogonalize the columns of a tall working copy `W = A V`;
//! at convergence the column norms are the singular values and the
//! normalized columns the left singular vectors. A wide matrix is handled
//! through its adjoint.

use super::norm::nrm2;
use super::{at, fits};
use crate::{SvdJob, JACOBI_MAX_SWEEPS};
use linext_traits::{RealScalar, Scalar};
use num_traits::{One, Zero};

/// Sorted factors of a tall `rows x cols` matrix.
struct TallSvd<T: Scalar> {
    sigma: Vec<T::Real>,
    /// `rows x cols`; columns with a zero singular value are zero.
    left: Vec<T>,
    valid: Vec<bool>,
    /// `cols x cols`, unitary.
    right: Vec<T>,
    unconverged: i32,
}

fn jacobi<T: Scalar>(rows: usize, cols: usize, mut w: Vec<T>) -> TallSvd<T> {
    let zero = T::Real::zero();
    let one = T::Real::one();
    let two = one + one;
    let tol = T::Real::epsilon() * T::Real::from_usize(rows).sqrt();
    let mut v = super::identity::<T>(cols);
    let mut unconverged = 0;

    for sweep in 0..JACOBI_MAX_SWEEPS {
        unconverged = 0;
        for p in 0..cols.saturating_sub(1) {
            for q in p + 1..cols {
                let mut alpha = zero;
                let mut beta = zero;
                let mut gamma = T::zero();
                for i in 0..rows {
                    let wp = w[at(i, p, rows)];
                    let wq = w[at(i, q, rows)];
                    alpha += wp.abs_sqr();
                    beta += wq.abs_sqr();
                    gamma += wp.conj() * wq;
                }
                let g = gamma.abs();
                if g == zero || g <= tol * alpha.sqrt() * beta.sqrt() {
                    continue;
                }
                unconverged += 1;

                let phase = gamma.unscale(g).conj();
                let zeta = (beta - alpha) / (two * g);
                let t = zeta.sign() / (zeta.abs() + one.hypot(zeta));
                let c = one / one.hypot(t);
                let s = c * t;
                rotate(&mut w, rows, p, q, phase, c, s);
                rotate(&mut v, cols, p, q, phase, c, s);
            }
        }
        if unconverged == 0 {
            tracing::trace!(sweep, "Jacobi SVD converged");
            break;
        }
    }
    if unconverged > 0 {
        tracing::warn!(unconverged, "Jacobi SVD hit the sweep limit");
    }

    let norms: Vec<T::Real> = (0..cols)
        .map(|j| nrm2(&w[at(0, j, rows)..at(0, j, rows) + rows]))
        .collect();
    let mut order: Vec<usize> = (0..cols).collect();
    order.sort_by(|&x, &y| {
        norms[y]
            .partial_cmp(&norms[x])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut sigma = Vec::with_capacity(cols);
    let mut left = vec![T::zero(); rows * cols];
    let mut valid = Vec::with_capacity(cols);
    let mut right = vec![T::zero(); cols * cols];
    for (dst, &src) in order.iter().enumerate() {
        let s = norms[src];
        sigma.push(s);
        let ok = s > T::Real::safe_min();
        valid.push(ok);
        if ok {
            for i in 0..rows {
                left[at(i, dst, rows)] = w[at(i, src, rows)].unscale(s);
            }
        }
        for i in 0..cols {
            right[at(i, dst, cols)] = v[at(i, src, cols)];
        }
    }
    TallSvd {
        sigma,
        left,
        valid,
        right,
        unconverged,
    }
}

/// Columns `p, q` of `x` become `c x_p - s x_q'` and `s x_p + c x_q'`
/// with `x_q' = phase * x_q`.
fn rotate<T: Scalar>(
    x: &mut [T],
    rows: usize,
    p: usize,
    q: usize,
    phase: T,
    c: T::Real,
    s: T::Real,
) {
    for i in 0..rows {
        let xp = x[at(i, p, rows)];
        let xq = x[at(i, q, rows)] * phase;
        x[at(i, p, rows)] = xp.scale(c) - xq.scale(s);
        x[at(i, q, rows)] = xp.scale(s) + xq.scale(c);
    }
}

/// Extend the valid columns of a `rows x have` matrix to `target`
/// orthonormal columns, filling invalid and missing ones from the unit
/// vectors with the largest residual.
fn complete_basis<T: Scalar>(
    rows: usize,
    have: usize,
    columns: &[T],
    valid: &[bool],
    target: usize,
) -> Vec<T> {
    let mut out = vec![T::zero(); rows * target];
    let mut is_set = vec![false; target];
    for j in 0..have.min(target) {
        if valid[j] {
            out[at(0, j, rows)..at(0, j, rows) + rows]
                .copy_from_slice(&columns[at(0, j, rows)..at(0, j, rows) + rows]);
            is_set[j] = true;
        }
    }
    for j in 0..target {
        if is_set[j] {
            continue;
        }
        let mut best: Option<(T::Real, Vec<T>)> = None;
        for e in 0..rows {
            let mut x = vec![T::zero(); rows];
            x[e] = T::one();
            // Two passes of Gram-Schmidt keep the residual orthogonal.
            for _ in 0..2 {
                for l in (0..target).filter(|&l| is_set[l]) {
                    let col = &out[at(0, l, rows)..at(0, l, rows) + rows];
                    let mut d = T::zero();
                    for (ci, xi) in col.iter().zip(&x) {
                        d += ci.conj() * *xi;
                    }
                    for (xi, ci) in x.iter_mut().zip(col) {
                        *xi -= *ci * d;
                    }
                }
            }
            let r = nrm2(&x);
            if best.as_ref().map_or(true, |(b, _)| r > *b) {
                best = Some((r, x));
            }
        }
        if let Some((r, x)) = best {
            for (i, xi) in x.into_iter().enumerate() {
                out[at(i, j, rows)] = xi.unscale(r);
            }
            is_set[j] = true;
        }
    }
    out
}

fn store<T: Scalar>(dst: &mut [T], ld: usize, src: &[T], rows: usize, cols: usize, adjoint: bool) {
    for j in 0..cols {
        for i in 0..rows {
            dst[at(i, j, ld)] = if adjoint {
                src[at(j, i, cols)].conj()
            } else {
                src[at(i, j, rows)]
            };
        }
    }
}

/// `A = U diag(s) VT`; see [`Kernel::gesvd`](crate::Kernel::gesvd).
#[allow(clippy::too_many_arguments)]
pub fn gesvd<T: Scalar>(
    jobu: SvdJob,
    jobvt: SvdJob,
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    s: &mut [T::Real],
    u: &mut [T],
    ldu: usize,
    vt: &mut [T],
    ldvt: usize,
) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -6;
    }
    let k = m.min(n);
    if s.len() < k {
        return -7;
    }
    let ucols = match jobu {
        SvdJob::Full => m,
        SvdJob::Thin => k,
        SvdJob::Skip => 0,
    };
    if jobu != SvdJob::Skip && !fits(u.len(), m, ucols, ldu) {
        return -9;
    }
    let vtrows = match jobvt {
        SvdJob::Full => n,
        SvdJob::Thin => k,
        SvdJob::Skip => 0,
    };
    if jobvt != SvdJob::Skip && !fits(vt.len(), vtrows, n, ldvt) {
        return -11;
    }

    // Work on the tall one of A and A^H.
    let tall = m >= n;
    let (rows, cols) = if tall { (m, n) } else { (n, m) };
    let mut w = vec![T::zero(); rows * cols];
    for j in 0..n {
        for i in 0..m {
            let x = a[at(i, j, lda)];
            if tall {
                w[at(i, j, m)] = x;
            } else {
                w[at(j, i, n)] = x.conj();
            }
        }
    }
    let svd = jacobi(rows, cols, w);
    s[..k].copy_from_slice(&svd.sigma);

    // The left factor of the tall matrix is U when tall and V otherwise.
    let (left_job, left_ld, left_out, right_ld, right_out) = if tall {
        (jobu, ldu, &mut *u, ldvt, &mut *vt)
    } else {
        (jobvt, ldvt, &mut *vt, ldu, &mut *u)
    };
    let left_cols = match left_job {
        SvdJob::Full => rows,
        SvdJob::Thin => cols,
        SvdJob::Skip => 0,
    };
    if left_cols > 0 {
        let basis = complete_basis(rows, cols, &svd.left, &svd.valid, left_cols);
        if tall {
            store(left_out, left_ld, &basis, rows, left_cols, false);
        } else {
            store(left_out, left_ld, &basis, left_cols, rows, true);
        }
    }
    let right_job = if tall { jobvt } else { jobu };
    if right_job != SvdJob::Skip {
        if tall {
            store(right_out, right_ld, &svd.right, cols, cols, true);
        } else {
            store(right_out, right_ld, &svd.right, cols, cols, false);
        }
    }
    svd.unconverged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::identity;
    use crate::native::test_util::{adjoint, col_major, matmul, max_diff};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn reconstruct<T: Scalar>(
        u: &[T],
        s: &[T::Real],
        vt: &[T],
        m: usize,
        k: usize,
        n: usize,
    ) -> Vec<T> {
        let mut us = u.to_vec();
        for j in 0..k {
            for i in 0..m {
                us[at(i, j, m)] = us[at(i, j, m)].scale(s[j]);
            }
        }
        matmul(&us, vt, m, k, n)
    }

    #[test]
    fn test_known_singular_values() {
        let mut a = col_major(&[[3.0, 0.0], [4.0, 5.0]]);
        let mut s = [0.0; 2];
        let mut u = [0.0; 4];
        let mut vt = [0.0; 4];
        let info = gesvd(
            SvdJob::Full,
            SvdJob::Full,
            2,
            2,
            &mut a,
            2,
            &mut s,
            &mut u,
            2,
            &mut vt,
            2,
        );
        assert_eq!(info, 0);
        assert_relative_eq!(s[0], 45.0f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(s[1], 5.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_tall_thin_and_full() {
        let a0 = col_major(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let mut s = [0.0; 2];
        let mut u = vec![0.0; 9];
        let mut vt = vec![0.0; 4];
        let mut a = a0.clone();
        gesvd(
            SvdJob::Full,
            SvdJob::Full,
            3,
            2,
            &mut a,
            3,
            &mut s,
            &mut u,
            3,
            &mut vt,
            2,
        );
        assert!(s[0] >= s[1]);
        assert!(
            max_diff(
                &matmul(&adjoint(&u, 3, 3), &u, 3, 3, 3),
                &identity::<f64>(3),
            ) < 1e-12
        );
        assert!(
            max_diff(&reconstruct(&u[..6], &s, &vt, 3, 2, 2), &a0) < 1e-12
        );

        let mut thin = vec![0.0; 6];
        let mut a = a0.clone();
        gesvd(
            SvdJob::Thin,
            SvdJob::Skip,
            3,
            2,
            &mut a,
            3,
            &mut s,
            &mut thin,
            3,
            &mut [],
            1,
        );
        assert!(max_diff(&reconstruct(&thin, &s, &vt, 3, 2, 2), &a0) < 1e-12);
    }

    #[test]
    fn test_wide_complex() {
        let c = Complex64::new;
        let a0 = col_major(&[
            [c(1.0, 1.0), c(0.0, 2.0), c(3.0, 0.0)],
            [c(-1.0, 0.0), c(2.0, -1.0), c(0.0, 0.5)],
        ]);
        let mut a = a0.clone();
        let mut s = [0.0; 2];
        let mut u = vec![Complex64::default(); 4];
        let mut vt = vec![Complex64::default(); 9];
        gesvd(
            SvdJob::Full,
            SvdJob::Full,
            2,
            3,
            &mut a,
            2,
            &mut s,
            &mut u,
            2,
            &mut vt,
            3,
        );
        // Leading two rows of VT pair with the singular values.
        let mut vt_thin = vec![Complex64::default(); 6];
        for j in 0..3 {
            for i in 0..2 {
                vt_thin[at(i, j, 2)] = vt[at(i, j, 3)];
            }
        }
        assert!(
            max_diff(&reconstruct(&u, &s, &vt_thin, 2, 2, 3), &a0) < 1e-12
        );
        assert!(
            max_diff(
                &matmul(&vt, &adjoint(&vt, 3, 3), 3, 3, 3),
                &identity::<Complex64>(3),
            ) < 1e-12
        );
    }

    #[test]
    fn test_rank_deficient_vectors_stay_orthonormal() {
        let mut a = col_major(&[[1.0, 2.0], [2.0, 4.0]]);
        let mut s = [0.0; 2];
        let mut u = vec![0.0; 4];
        let mut vt = vec![0.0; 4];
        gesvd(
            SvdJob::Full,
            SvdJob::Full,
            2,
            2,
            &mut a,
            2,
            &mut s,
            &mut u,
            2,
            &mut vt,
            2,
        );
        assert!(s[1] < 1e-12);
        assert!(
            max_diff(
                &matmul(&adjoint(&u, 2, 2), &u, 2, 2, 2),
                &identity::<f64>(2),
            ) < 1e-12
        );
    }
}
