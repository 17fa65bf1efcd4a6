//! Householder QR: `A = Q R` with `Q = H(0) H(1) ... H(k-1)`.

use super::householder::{larf, larfg};
use super::{at, fits};
use crate::{Side, Trans};
use linext_traits::Scalar;
use num_traits::{One, Zero};

/// Copy reflector `i` (rows `r0..r0 + len` of column `i`, unit at `unit`)
/// out of the packed buffer.
fn reflector<T: Scalar>(
    a: &[T],
    lda: usize,
    col: usize,
    r0: usize,
    len: usize,
    unit: usize,
) -> Vec<T> {
    let mut v = a[at(r0, col, lda)..at(r0, col, lda) + len].to_vec();
    v[unit - r0] = T::one();
    v
}

pub fn geqrf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T]) -> i32 {
    if !fits(a.len(), m, n, lda) {
        return -4;
    }
    let k = m.min(n);
    if tau.len() < k {
        return -5;
    }
    for i in 0..k {
        let start = at(i, i, lda);
        let (alpha, x) = a[start..start + (m - i)].split_at_mut(1);
        tau[i] = larfg(&mut alpha[0], x);
        if i + 1 < n {
            let v = reflector(a, lda, i, i, m - i, i);
            larf(Side::Left, &v, tau[i].conj(), a, lda, i, i + 1, n - i - 1);
        }
    }
    0
}

/// Generate the `m x n` matrix `Q` (`m >= n >= k`) from the first `k`
/// reflectors.
pub fn ungqr<T: Scalar>(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T]) -> i32 {
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
    for j in k..n {
        for l in 0..m {
            a[at(l, j, lda)] = T::zero();
        }
        a[at(j, j, lda)] = T::one();
    }
    for i in (0..k).rev() {
        if i + 1 < n {
            let v = reflector(a, lda, i, i, m - i, i);
            larf(Side::Left, &v, tau[i], a, lda, i, i + 1, n - i - 1);
        }
        for l in i + 1..m {
            a[at(l, i, lda)] *= -tau[i];
        }
        a[at(i, i, lda)] = T::one() - tau[i];
        for l in 0..i {
            a[at(l, i, lda)] = T::zero();
        }
    }
    0
}

/// `C := op(Q) C` (left) or `C op(Q)` (right) with `Q` from [`geqrf`].
#[allow(clippy::too_many_arguments)]
pub fn unmqr<T: Scalar>(
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
    let forward = (side == Side::Left) != notran;
    let order: Box<dyn Iterator<Item = usize>> = if forward {
        Box::new(0..k)
    } else {
        Box::new((0..k).rev())
    };
    for i in order {
        let taui = if notran { tau[i] } else { tau[i].conj() };
        // The diagonal entry holds R(i, i); swap in the unit head while the
        // reflector is read, then put it back.
        let aii = a[at(i, i, lda)];
        a[at(i, i, lda)] = T::one();
        let v = a[at(i, i, lda)..at(i, i, lda) + (nq - i)].to_vec();
        a[at(i, i, lda)] = aii;
        match side {
            Side::Left => larf(Side::Left, &v, taui, c, ldc, i, 0, n),
            Side::Right => larf(Side::Right, &v, taui, c, ldc, 0, i, m),
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::identity;
    use crate::native::test_util::{adjoint, col_major, matmul, max_diff};
    use num_complex::Complex64;

    fn r_of<T: Scalar>(a: &[T], m: usize, n: usize) -> Vec<T> {
        let mut r = vec![T::zero(); m * n];
        for j in 0..n {
            for i in 0..=j.min(m - 1) {
                r[at(i, j, m)] = a[at(i, j, m)];
            }
        }
        r
    }

    #[test]
    fn test_qr_round_trip() {
        let a0 = col_major(&[
            [12.0, -51.0, 4.0],
            [6.0, 167.0, -68.0],
            [-4.0, 24.0, -41.0],
        ]);
        let mut a = a0.clone();
        let mut tau = [0.0; 3];
        assert_eq!(geqrf(3, 3, &mut a, 3, &mut tau), 0);
        let r = r_of(&a, 3, 3);
        let mut q = a.clone();
        assert_eq!(ungqr(3, 3, 3, &mut q, 3, &tau), 0);

        assert!(max_diff(&matmul(&q, &r, 3, 3, 3), &a0) < 1e-10);
        let qtq = matmul(&adjoint(&q, 3, 3), &q, 3, 3, 3);
        assert!(max_diff(&qtq, &identity::<f64>(3)) < 1e-12);
    }

    #[test]
    fn test_unmqr_matches_explicit_q() {
        let a0 = col_major(&[
            [Complex64::new(1.0, 1.0), Complex64::new(2.0, 0.0)],
            [Complex64::new(0.0, 3.0), Complex64::new(1.0, -1.0)],
            [Complex64::new(-2.0, 0.5), Complex64::new(0.0, 1.0)],
        ]);
        let mut a = a0.clone();
        let mut tau = [Complex64::default(); 2];
        geqrf(3, 2, &mut a, 3, &mut tau);

        // Full Q from the two reflectors.
        let mut q = vec![Complex64::default(); 9];
        for j in 0..2 {
            for i in 0..3 {
                q[at(i, j, 3)] = a[at(i, j, 3)];
            }
        }
        ungqr(3, 3, 2, &mut q, 3, &tau);

        let mut c = identity::<Complex64>(3);
        let packed = a.clone();
        unmqr(
            Side::Left,
            Trans::ConjTrans,
            3,
            3,
            2,
            &mut a,
            3,
            &tau,
            &mut c,
            3,
        );
        assert!(max_diff(&c, &adjoint(&q, 3, 3)) < 1e-12);
        assert_eq!(a, packed);

        let mut c = identity::<Complex64>(3);
        unmqr(
            Side::Right,
            Trans::NoTrans,
            3,
            3,
            2,
            &mut a,
            3,
            &tau,
            &mut c,
            3,
        );
        assert!(max_diff(&c, &q) < 1e-12);
    }

    #[test]
    fn test_wide_matrix() {
        let a0 = col_major(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let mut a = a0.clone();
        let mut tau = [0.0; 2];
        geqrf(2, 3, &mut a, 2, &mut tau);
        let r = r_of(&a, 2, 3);
        let mut q = a[..4].to_vec();
        ungqr(2, 2, 2, &mut q, 2, &tau);
        assert!(max_diff(&matmul(&q, &r, 2, 2, 3), &a0) < 1e-12);
    }
}
