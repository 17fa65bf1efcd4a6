//! Householder QL: `A = Q L` with `Q = H(k-1) ... H(1) H(0)`.
//!
//! Reflector `i` is stored in column `n - k + i` above row `m - k + i`,
//! with its unit entry on that row.

use super::householder::{larf, larfg};
use super::{at, fits};
use crate::{Side, Trans};
use linext_traits::Scalar;
use num_traits::{One, Zero};

pub fn geqlf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -4;
    }
    let k = m.min(n);
    if tau.len() < k {
        return -5;
    }
    for i in (0..k).rev() {
        let col = n - k + i;
        let row = m - k + i;
        let start = at(0, col, lda);
        let (x, alpha) = a[start..start + row + 1].split_at_mut(row);
        tau[i] = larfg(&mut alpha[0], x);

        let mut v = a[start..start + row + 1].to_vec();
        v[row] = T::one();
        larf(Side::Left, &v, tau[i].conj(), a, lda, 0, 0, col);
    }
    0
}

/// Generate the `m x n` matrix `Q` (`m >= n >= k`) from the reflectors in
/// the last `k` columns of `a`.
pub fn ungql<T: Scalar>(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32 {
    if n > m {
        return -2;
    }
    if k > n {
        return -3;
    }
    if !fits(a.len(), m, n, lda) {
        return -5;
    }
    if tau.len() < k {
        return -6;
    }
    for j in 0..n - k {
        for l in 0..m {
            a[at(l, j, lda)] = T::zero();
        }
        a[at(m - n + j, j, lda)] = T::one();
    }
    for i in 0..k {
        let col = n - k + i;
        let row = m - n + col;
        a[at(row, col, lda)] = T::one();
        let v = a[at(0, col, lda)..at(0, col, lda) + row + 1].to_vec();
        larf(Side::Left, &v, tau[i], a, lda, 0, 0, col);
        for l in 0..row {
            a[at(l, col, lda)] *= -tau[i];
        }
        a[at(row, col, lda)] = T::one() - tau[i];
        for l in row + 1..m {
            a[at(l, col, lda)] = T::zero();
        }
    }
    0
}

/// `C := op(Q) C` or `C op(Q)`; reflector `i` is column `i` of `a`, with
/// its unit entry on row `nq - k + i`.
#[allow(clippy::too_many_arguments)]
pub fn unmql<T: Scalar>(
    side: Side,
    trans: Trans,
    m: usize,
    n: usize,
    k: usize,
    a: &mut [T],
    lda: usize,
    tau: &[T],
    c: &mut [T],
    ldc: usize,
) -> i32 {
    let nq = if side == Side::Left { m } else { n };
    if k > nq {
        return -5;
    }
    if !fits(a.len(), nq, k, lda) {
        return -7;
    }
    if tau.len() < k {
        return -8;
    }
    if !fits(c.len(), m, n, ldc) {
        return -10;
    }
    let notran = trans == Trans::NoTrans;
    let forward = (side == Side::Left) == notran;
    let order: Box<dyn Iterator<Item = usize>> = if forward {
        Box::new(0..k)
    } else {
        Box::new((0..k).rev())
    };
    for i in order {
        let row = nq - k + i;
        let taui = if notran { tau[i] } else { tau[i].conj() };
        let aii = a[at(row, i, lda)];
        a[at(row, i, lda)] = T::one();
        let v = a[at(0, i, lda)..at(0, i, lda) + row + 1].to_vec();
        a[at(row, i, lda)] = aii;
        match side {
            Side::Left => larf(Side::Left, &v, taui, c, ldc, 0, 0, n),
            Side::Right => larf(Side::Right, &v, taui, c, ldc, 0, 0, m),
        }
    }
    0
}
