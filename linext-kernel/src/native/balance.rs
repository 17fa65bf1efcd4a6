//! Balancing of a matrix and of a matrix pencil.
//!
//! Permutations isolate eigenvalues that are already exposed at the top or
//! bottom of the matrix; diagonal scaling by powers of the radix then
//! evens out row and column norms of the remaining block. Positions outside
//! `ilo..=ihi` of the scale vectors record interchange indices, positions
//! inside record scaling factors.

use super::norm::nrm2;
use super::{at, fits, real};
use crate::{BalanceJob, Side, BALANCE_FACTOR, BALANCE_RADIX, PAIR_BALANCE_MAX_ITER};
use linext_traits::{RealScalar, Scalar};
use num_traits::{One, Zero};

fn swap_rows<T: Scalar>(a: &mut [T], lda: usize, ncols: usize, r1: usize, r2: usize) {
    if r1 != r2 {
        for c in 0..ncols {
            a.swap(at(r1, c, lda), at(r2, c, lda));
        }
    }
}

fn swap_cols<T: Scalar>(a: &mut [T], lda: usize, nrows: usize, c1: usize, c2: usize) {
    if c1 != c2 {
        for r in 0..nrows {
            a.swap(at(r, c1, lda), at(r, c2, lda));
        }
    }
}

fn index_as_real<T: Scalar>(i: usize) -> T::Real {
    T::Real::from_usize(i)
}

fn real_as_index<R: RealScalar>(x: R) -> usize {
    x.to_f64() as usize
}

pub fn gebal<T: Scalar>(
    job: BalanceJob,
    n: usize,
    a: &mut [T],
    lda: usize,
    ilo: &mut usize,
    ihi: &mut usize,
    scale: &mut [T::Real],
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -4;
    }
    if scale.len() < n {
        return -7;
    }
    let one = T::Real::one();
    let zero = T::Real::zero();
    scale[..n].iter_mut().for_each(|s| *s = one);
    *ilo = 0;
    *ihi = n.saturating_sub(1);
    if n == 0 || job == BalanceJob::Nothing {
        return 0;
    }

    let mut k = 0;
    let mut l = n - 1;
    if job.permutes() {
        // Rows with no off-diagonal entry in columns 0..=l go to the bottom.
        'rows: loop {
            for j in (0..=l).rev() {
                if (0..=l).all(|i| i == j || a[at(j, i, lda)] == T::zero()) {
                    scale[l] = index_as_real::<T>(j);
                    swap_rows(a, lda, n, j, l);
                    swap_cols(a, lda, n, j, l);
                    if l == 0 {
                        *ilo = 0;
                        *ihi = 0;
                        return 0;
                    }
                    l -= 1;
                    continue 'rows;
                }
            }
            break;
        }
        // Columns with no off-diagonal entry in rows k..=l go to the left.
        'cols: loop {
            for j in k..=l {
                if (k..=l).all(|i| i == j || a[at(i, j, lda)] == T::zero()) {
                    scale[k] = index_as_real::<T>(j);
                    swap_rows(a, lda, n, j, k);
                    swap_cols(a, lda, n, j, k);
                    k += 1;
                    continue 'cols;
                }
            }
            break;
        }
    }
    *ilo = k;
    *ihi = l;
    if !job.scales() {
        return 0;
    }

    let radix = real::<T>(BALANCE_RADIX);
    let factor = real::<T>(BALANCE_FACTOR);
    let sfmin1 = T::Real::safe_min() / (T::Real::epsilon() * radix);
    let sfmax1 = one / sfmin1;
    let sfmin2 = sfmin1 * radix;
    let sfmax2 = one / sfmin2;

    loop {
        let mut noconv = false;
        for i in k..=l {
            let column: Vec<T> = (k..=l).map(|r| a[at(r, i, lda)]).collect();
            let row: Vec<T> = (k..=l).map(|c| a[at(i, c, lda)]).collect();
            let mut c = nrm2(&column);
            let mut r = nrm2(&row);
            let mut ca = (0..=l).fold(zero, |m, x| m.max_of(a[at(x, i, lda)].abs()));
            let mut ra = (k..n).fold(zero, |m, x| m.max_of(a[at(i, x, lda)].abs()));
            if c == zero || r == zero {
                continue;
            }
            if (c + ca + r + ra).is_nan() {
                return -3;
            }
            let s = c + r;
            let mut f = one;
            let mut g = r / radix;
            while c < g && f.max_of(c).max_of(ca) < sfmax2 && r.min_of(g).min_of(ra) > sfmin2 {
                f *= radix;
                c *= radix;
                ca *= radix;
                r /= radix;
                g /= radix;
                ra /= radix;
            }
            g = c / radix;
            while g >= r && r.max_of(ra) < sfmax2 && f.min_of(c).min_of(g).min_of(ca) > sfmin2 {
                f /= radix;
                c /= radix;
                g /= radix;
                ca /= radix;
                r *= radix;
                ra *= radix;
            }

            if c + r >= factor * s {
                continue;
            }
            if f < one && scale[i] < one && f * scale[i] <= sfmin1 {
                continue;
            }
            if f > one && scale[i] > one && scale[i] >= sfmax1 / f {
                continue;
            }
            let g = one / f;
            scale[i] *= f;
            noconv = true;
            for col in k..n {
                a[at(i, col, lda)] = a[at(i, col, lda)].scale(g);
            }
            for row in 0..=l {
                a[at(row, i, lda)] = a[at(row, i, lda)].scale(f);
            }
        }
        if !noconv {
            break;
        }
    }
    0
}

/// Order in which recorded interchanges are undone: `ilo - 1` down to `0`,
/// then `ihi + 1` up to `n - 1`.
fn undo_order(n: usize, ilo: usize, ihi: usize) -> impl Iterator<Item = usize> {
    (0..ilo).rev().chain(ihi + 1..n)
}

#[allow(clippy::too_many_arguments)]
pub fn gebak<T: Scalar>(
    job: BalanceJob,
    side: Side,
    n: usize,
    ilo: usize,
    ihi: usize,
    scale: &[T::Real],
    m: usize,
    v: &mut [T],
    ldv: usize,
) -> i32 {
    if n > 0 && (ilo > ihi || ihi >= n) {
        return -5;
    }
    if scale.len() < n {
        return -6;
    }
    if !fits(v.len(), n, m, ldv) {
        return -9;
    }
    if n == 0 || m == 0 || job == BalanceJob::Nothing {
        return 0;
    }
    if job.scales() && ilo != ihi {
        for i in ilo..=ihi {
            let s = match side {
                Side::Right => scale[i],
                Side::Left => T::Real::one() / scale[i],
            };
            for c in 0..m {
                v[at(i, c, ldv)] = v[at(i, c, ldv)].scale(s);
            }
        }
    }
    if job.permutes() {
        for i in undo_order(n, ilo, ihi) {
            let k = real_as_index(scale[i]);
            swap_rows(v, ldv, m, i, k);
        }
    }
    0
}

/// `true` if entry `(i, j)` of the pencil is nonzero in `A` or `B`.
fn pencil_nonzero<T: Scalar>(a: &[T], lda: usize, b: &[T], ldb: usize, i: usize, j: usize) -> bool {
    a[at(i, j, lda)] != T::zero() || b[at(i, j, ldb)] != T::zero()
}

#[allow(clippy::too_many_arguments)]
pub fn ggbal<T: Scalar>(
    job: BalanceJob,
    n: usize,
    a: &mut [T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
    ilo: &mut usize,
    ihi: &mut usize,
    lscale: &mut [T::Real],
    rscale: &mut [T::Real],
) -> i32 {
    if !fits(a.len(), n, n, lda) {
        return -4;
    }
    if !fits(b.len(), n, n, ldb) {
        return -6;
    }
    if lscale.len() < n || rscale.len() < n {
        return -9;
    }
    let one = T::Real::one();
    lscale[..n].iter_mut().for_each(|s| *s = one);
    rscale[..n].iter_mut().for_each(|s| *s = one);
    *ilo = 0;
    *ihi = n.saturating_sub(1);
    if n == 0 || job == BalanceJob::Nothing {
        return 0;
    }

    let mut k = 0;
    let mut l = n - 1;
    if job.permutes() {
        // A row with at most one nonzero in columns k..=l is moved to row l
        // and that nonzero to column l.
        'rows: while k < l {
            for i in (k..=l).rev() {
                let nz: Vec<usize> = (k..=l)
                    .filter(|&j| pencil_nonzero(a, lda, b, ldb, i, j))
                    .collect();
                if nz.len() <= 1 {
                    let j = nz.first().copied().unwrap_or(l);
                    lscale[l] = index_as_real::<T>(i);
                    rscale[l] = index_as_real::<T>(j);
                    swap_rows(a, lda, n, i, l);
                    swap_rows(b, ldb, n, i, l);
                    swap_cols(a, lda, n, j, l);
                    swap_cols(b, ldb, n, j, l);
                    l -= 1;
                    continue 'rows;
                }
            }
            break;
        }
        // A column with at most one nonzero in rows k..=l is moved to
        // column k and that nonzero to row k.
        'cols: while k < l {
            for j in k..=l {
                let nz: Vec<usize> = (k..=l)
                    .filter(|&i| pencil_nonzero(a, lda, b, ldb, i, j))
                    .collect();
                if nz.len() <= 1 {
                    let i = nz.first().copied().unwrap_or(k);
                    lscale[k] = index_as_real::<T>(i);
                    rscale[k] = index_as_real::<T>(j);
                    swap_rows(a, lda, n, i, k);
                    swap_rows(b, ldb, n, i, k);
                    swap_cols(a, lda, n, j, k);
                    swap_cols(b, ldb, n, j, k);
                    k += 1;
                    continue 'cols;
                }
            }
            break;
        }
    }
    *ilo = k;
    *ihi = l;
    if !job.scales() || k == l {
        return 0;
    }

    // Alternate half-steps on row and column sums of |A| + |B| toward one,
    // in powers of the radix, until no exponent changes.
    let radix = real::<T>(BALANCE_RADIX);
    let half = real::<T>(0.5);
    let weight =
        |a: &[T], b: &[T], i: usize, j: usize| a[at(i, j, lda)].abs() + b[at(i, j, ldb)].abs();
    let exponent = |sum: T::Real| (-(sum.log2()) * half).round();
    for _ in 0..PAIR_BALANCE_MAX_ITER {
        let mut changed = false;
        for i in k..=l {
            let sum = (k..=l).fold(T::Real::zero(), |s, j| s + weight(a, b, i, j));
            if sum == T::Real::zero() {
                continue;
            }
            let e = exponent(sum);
            if e != T::Real::zero() {
                let f = radix.powi(e.to_f64() as i32);
                lscale[i] *= f;
                for j in 0..n {
                    a[at(i, j, lda)] = a[at(i, j, lda)].scale(f);
                    b[at(i, j, ldb)] = b[at(i, j, ldb)].scale(f);
                }
                changed = true;
            }
        }
        for j in k..=l {
            let sum = (k..=l).fold(T::Real::zero(), |s, i| s + weight(a, b, i, j));
            if sum == T::Real::zero() {
                continue;
            }
            let e = exponent(sum);
            if e != T::Real::zero() {
                let f = radix.powi(e.to_f64() as i32);
                rscale[j] *= f;
                for i in 0..n {
                    a[at(i, j, lda)] = a[at(i, j, lda)].scale(f);
                    b[at(i, j, ldb)] = b[at(i, j, ldb)].scale(f);
                }
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    0
}

#[allow(clippy::too_many_arguments)]
pub fn ggbak<T: Scalar>(
    job: BalanceJob,
    side: Side,
    n: usize,
    ilo: usize,
    ihi: usize,
    lscale: &[T::Real],
    rscale: &[T::Real],
    m: usize,
    v: &mut [T],
    ldv: usize,
) -> i32 {
    if n > 0 && (ilo > ihi || ihi >= n) {
        return -5;
    }
    if lscale.len() < n || rscale.len() < n {
        return -6;
    }
    if !fits(v.len(), n, m, ldv) {
        return -10;
    }
    if n == 0 || m == 0 || job == BalanceJob::Nothing {
        return 0;
    }
    let scale = match side {
        Side::Left => lscale,
        Side::Right => rscale,
    };
    if job.scales() && ilo != ihi {
        for i in ilo..=ihi {
            for c in 0..m {
                v[at(i, c, ldv)] = v[at(i, c, ldv)].scale(scale[i]);
            }
        }
    }
    if job.permutes() {
        for i in undo_order(n, ilo, ihi) {
            let k = real_as_index(scale[i]);
            swap_rows(v, ldv, m, i, k);
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::identity;
    use crate::native::lu::getrf;
    use crate::native::test_util::{adjoint, col_major, matmul, max_diff};

    /// `T^{-1} A T` with `T` from the back-transformation of the identity.
    fn similarity(a0: &[f64], t: &[f64], n: usize) -> Vec<f64> {
        let mut lu = t.to_vec();
        let mut ipiv = vec![0; n];
        assert_eq!(getrf(n, n, &mut lu, n, &mut ipiv), 0);
        let mut x = matmul(a0, t, n, n, n);
        crate::native::lu::getrs(crate::Trans::NoTrans, n, n, &lu, n, &ipiv, &mut x, n);
        x
    }

    #[test]
    fn test_gebal_permutes_isolated_eigenvalue() {
        // Row 0 has no off-diagonal entries: eigenvalue 5 is isolated.
        let a0 = col_major(&[[5.0, 0.0, 0.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let mut a = a0.clone();
        let (mut ilo, mut ihi) = (0, 0);
        let mut scale = [0.0; 3];
        gebal(
            BalanceJob::Permute,
            3,
            &mut a,
            3,
            &mut ilo,
            &mut ihi,
            &mut scale,
        );
        assert_eq!(ihi, 1);
        assert_eq!(a[at(2, 2, 3)], 5.0);

        let mut t = identity::<f64>(3);
        gebak(
            BalanceJob::Permute,
            Side::Right,
            3,
            ilo,
            ihi,
            &scale,
            3,
            &mut t,
            3,
        );
        assert!(max_diff(&similarity(&a0, &t, 3), &a) < 1e-12);
    }

    #[test]
    fn test_gebal_scaling_reduces_norm() {
        let a0 = col_major(&[[1.0, 1e6, 0.0], [1e-6, 1.0, 1e6], [1.0, 1e-6, 1.0]]);
        let mut a = a0.clone();
        let (mut ilo, mut ihi) = (0, 0);
        let mut scale = [0.0f64; 3];
        gebal(
            BalanceJob::Both,
            3,
            &mut a,
            3,
            &mut ilo,
            &mut ihi,
            &mut scale,
        );
        let before = crate::native::norm::lange(crate::NormKind::One, 3, 3, &a0, 3);
        let after = crate::native::norm::lange(crate::NormKind::One, 3, 3, &a, 3);
        assert!(after < before);
        for s in &scale[ilo..=ihi] {
            assert_eq!(s.log2().fract(), 0.0);
        }

        let mut t = identity::<f64>(3);
        gebak(
            BalanceJob::Both,
            Side::Right,
            3,
            ilo,
            ihi,
            &scale,
            3,
            &mut t,
            3,
        );
        let back = similarity(&a0, &t, 3);
        for (x, y) in back.iter().zip(&a) {
            assert!((x - y).abs() <= 1e-9 * y.abs().max(1.0));
        }
    }

    #[test]
    fn test_ggbal_equivalence() {
        let a0 = col_major(&[[1.0, 100.0, 0.0], [0.01, 2.0, 300.0], [0.0, 0.02, 3.0]]);
        let b0 = col_major(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let (mut a, mut b) = (a0.clone(), b0.clone());
        let (mut ilo, mut ihi) = (0, 0);
        let (mut ls, mut rs) = ([0.0; 3], [0.0; 3]);
        ggbal(
            BalanceJob::Both,
            3,
            &mut a,
            3,
            &mut b,
            3,
            &mut ilo,
            &mut ihi,
            &mut ls,
            &mut rs,
        );

        let mut left = identity::<f64>(3);
        let mut right = identity::<f64>(3);
        ggbak(
            BalanceJob::Both,
            Side::Left,
            3,
            ilo,
            ihi,
            &ls,
            &rs,
            3,
            &mut left,
            3,
        );
        ggbak(
            BalanceJob::Both,
            Side::Right,
            3,
            ilo,
            ihi,
            &ls,
            &rs,
            3,
            &mut right,
            3,
        );
        let lt = adjoint(&left, 3, 3);
        let ab = matmul(&matmul(&lt, &a0, 3, 3, 3), &right, 3, 3, 3);
        let bb = matmul(&matmul(&lt, &b0, 3, 3, 3), &right, 3, 3, 3);
        assert!(max_diff(&ab, &a) < 1e-9);
        assert!(max_diff(&bb, &b) < 1e-12);
    }
}
