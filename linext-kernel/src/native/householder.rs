//! Elementary reflectors `H = I - tau v v^H`.

use super::at;
use super::norm::nrm2;
use crate::Side;
use linext_traits::{RealScalar, Scalar};
use num_traits::{One, Zero};

/// Generate a reflector with `H^H [alpha; x] = [beta; 0]`, `beta` real.
///
/// On return `alpha` holds `beta`, `x` holds `v[1..]` (with `v[0] = 1`
/// implied) and the result is `tau`. `tau = 0` means `H = I`.
pub fn larfg<T: Scalar>(alpha: &mut T, x: &mut [T]) -> T {
    let xnorm = nrm2(x);
    let alphr = alpha.re();
    let alphi = alpha.im();
    let zero = T::Real::zero();
    if xnorm == zero && alphi == zero {
        return T::zero();
    }
    let beta = -(alpha.abs().hypot(xnorm)) * alphr.sign();
    let tau = T::from_parts((beta - alphr) / beta, -alphi / beta);
    let scale = T::one() / (*alpha - T::from_real(beta));
    for v in x.iter_mut() {
        *v *= scale;
    }
    *alpha = T::from_real(beta);
    tau
}

/// Apply `H = I - tau v v^H` to the block of `c` starting at `(r0, c0)`.
///
/// From the left the block has `v.len()` rows and `cols` columns; from the
/// right it has `cols` rows and `v.len()` columns.
#[allow(clippy::too_many_arguments)]
pub fn larf<T: Scalar>(
    side: Side,
    v: &[T],
    tau: T,
    c: &mut [T],
    ldc: usize,
    r0: usize,
    c0: usize,
    cols: usize,
) {
    if tau == T::zero() {
        return;
    }
    let len = v.len();
    match side {
        Side::Left => {
            // w = v^H C, then C -= tau v w.
            for j in 0..cols {
                let col = &mut c[at(r0, c0 + j, ldc)..at(r0, c0 + j, ldc) + len];
                let mut w = T::zero();
                for (vi, ci) in v.iter().zip(col.iter()) {
                    w += vi.conj() * *ci;
                }
                let tw = tau * w;
                for (vi, ci) in v.iter().zip(col.iter_mut()) {
                    *ci -= *vi * tw;
                }
            }
        }
        Side::Right => {
            // w = C v, then C -= tau w v^H.
            let mut w = vec![T::zero(); cols];
            for (l, &vl) in v.iter().enumerate() {
                for (i, wi) in w.iter_mut().enumerate() {
                    *wi += c[at(r0 + i, c0 + l, ldc)] * vl;
                }
            }
            for (l, &vl) in v.iter().enumerate() {
                let f = tau * vl.conj();
                for (i, &wi) in w.iter().enumerate() {
                    c[at(r0 + i, c0 + l, ldc)] -= wi * f;
                }
            }
        }
    }
}
