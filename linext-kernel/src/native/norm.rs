//! Matrix norms and the Hager/Higham 1-norm estimator.

use super::{at, real};
use crate::{NormKind, CONDITION_ESTIMATE_MAX_ITER};
use linext_traits::{RealScalar, Scalar};
use num_traits::{One, Zero};

/// Euclidean norm of a vector, scaled to avoid overflow and underflow.
pub fn nrm2<T: Scalar>(x: &[T]) -> T::Real {
    let zero = T::Real::zero();
    let mut scale = zero;
    let mut ssq = T::Real::one();
    let mut accumulate = |c: T::Real| {
        if c != zero {
            let a = c.abs();
            if scale < a {
                let r = scale / a;
                ssq = T::Real::one() + ssq * r * r;
                scale = a;
            } else {
                let r = a / scale;
                ssq += r * r;
            }
        }
    };
    for &v in x {
        accumulate(v.re());
        if T::IS_COMPLEX {
            accumulate(v.im());
        }
    }
    scale * ssq.sqrt()
}

/// Norm of an `m x n` matrix. Zero for an empty matrix; NaN entries
/// propagate.
pub fn lange<T: Scalar>(norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
    let zero = T::Real::zero();
    if m == 0 || n == 0 {
        return zero;
    }
    let pick = |acc: T::Real, x: T::Real| if x > acc || x.is_nan() { x } else { acc };
    match norm {
        NormKind::Max => {
            let mut value = zero;
            for j in 0..n {
                for i in 0..m {
                    value = pick(value, a[at(i, j, lda)].abs());
                }
            }
            value
        }
        NormKind::One => {
            let mut value = zero;
            for j in 0..n {
                let mut sum = zero;
                for i in 0..m {
                    sum += a[at(i, j, lda)].abs();
                }
                value = pick(value, sum);
            }
            value
        }
        NormKind::Inf => {
            let mut rows = vec![zero; m];
            for j in 0..n {
                for (i, r) in rows.iter_mut().enumerate() {
                    *r += a[at(i, j, lda)].abs();
                }
            }
            rows.into_iter().fold(zero, pick)
        }
        NormKind::Frobenius => {
            let mut column = Vec::with_capacity(m * n);
            for j in 0..n {
                column.extend_from_slice(&a[at(0, j, lda)..at(0, j, lda) + m]);
            }
            nrm2(&column)
        }
    }
}

/// Index of the entry of largest modulus.
fn argmax_abs<T: Scalar>(x: &[T]) -> usize {
    let mut best = 0;
    let mut value = x[0].abs();
    for (i, v) in x.iter().enumerate().skip(1) {
        let a = v.abs();
        if a > value {
            value = a;
            best = i;
        }
    }
    best
}

fn sum_abs<T: Scalar>(x: &[T]) -> T::Real {
    x.iter().fold(T::Real::zero(), |acc, v| acc + v.abs())
}

/// Unit-modulus sign of each entry: `+-1` for reals, `x / |x|` for complex
/// values (one for a vanishing entry).
fn signs<T: Scalar>(x: &[T]) -> Vec<T> {
    x.iter()
        .map(|&v| {
            if T::IS_COMPLEX {
                let a = v.abs();
                if a > T::Real::safe_min() {
                    v.unscale(a)
                } else {
                    T::one()
                }
            } else {
                T::from_real(v.re().sign())
            }
        })
        .collect()
}

/// Estimate `||B||_1` for an `n x n` operator known only through products.
///
/// `apply` overwrites its argument with `B x`, `apply_adjoint` with
/// `B^H x`. Follows LAPACK `xLACN2`: a few power-like steps on the sign
/// vector, then a check against an alternating test vector.
pub fn estimate_norm1<T, F, G>(n: usize, mut apply: F, mut apply_adjoint: G) -> T::Real
where
    T: Scalar,
    F: FnMut(&mut [T]),
    G: FnMut(&mut [T]),
{
    if n == 0 {
        return T::Real::zero();
    }
    let one = T::Real::one();
    let mut x = vec![T::from_real(one / T::Real::from_usize(n)); n];
    apply(&mut x);
    if n == 1 {
        return x[0].abs();
    }
    let mut est = sum_abs(&x);
    let mut sgn = signs(&x);
    x.copy_from_slice(&sgn);
    apply_adjoint(&mut x);
    let mut j = argmax_abs(&x);
    let mut iter = 2;

    loop {
        x.iter_mut().for_each(|v| *v = T::zero());
        x[j] = T::one();
        apply(&mut x);
        let estold = est;
        est = sum_abs(&x);
        let next = signs(&x);
        // A repeated real sign vector means the iteration has cycled.
        if !T::IS_COMPLEX && next == sgn {
            break;
        }
        if est <= estold {
            break;
        }
        sgn = next;
        x.copy_from_slice(&sgn);
        apply_adjoint(&mut x);
        let jlast = j;
        j = argmax_abs(&x);
        if x[jlast].re() != x[j].re().abs() && iter < CONDITION_ESTIMATE_MAX_ITER {
            iter += 1;
            continue;
        }
        break;
    }

    let denom = T::Real::from_usize(n - 1);
    let mut alt = one;
    for (i, v) in x.iter_mut().enumerate() {
        *v = T::from_real(alt * (one + T::Real::from_usize(i) / denom));
        alt = -alt;
    }
    apply(&mut x);
    let temp = real::<T>(2.0) * sum_abs(&x) / (real::<T>(3.0) * T::Real::from_usize(n));
    if temp > est {
        est = temp;
    }
    est
}
