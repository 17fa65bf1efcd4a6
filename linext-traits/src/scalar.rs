//! Scalar type bounds for containers, expressions and kernels.
//!
//! [`Scalar`] covers the four element types the dense kernels understand
//! (`f32`, `f64`, `Complex<f32>`, `Complex<f64>`). [`RealScalar`] is the
//! subset with a total-enough order, used for norms, singular values and
//! condition estimates.

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Element type usable by every operation of the library.
///
/// Complex values are a pair `(re, im)` of independent IEEE components;
/// for real types `im` is always zero and `conj` is the identity.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Underlying real type (`Self` for real scalars).
    type Real: RealScalar;

    /// `true` for complex element types.
    const IS_COMPLEX: bool;

    fn from_real(re: Self::Real) -> Self;

    /// Build from components; real types drop `im`.
    fn from_parts(re: Self::Real, im: Self::Real) -> Self;

    fn re(self) -> Self::Real;

    fn im(self) -> Self::Real;

    fn conj(self) -> Self;

    /// Modulus `|x|`.
    fn abs(self) -> Self::Real;

    /// Squared modulus `|x|^2`.
    fn abs_sqr(self) -> Self::Real;

    /// `|re| + |im|`, the cheap magnitude LAPACK uses for pivoting.
    fn abs1(self) -> Self::Real;

    /// Phase angle in `(-pi, pi]`; `0` or `pi` for reals.
    fn arg(self) -> Self::Real;

    fn sqrt(self) -> Self;

    /// `self^exponent` on the principal branch.
    fn powc(self, exponent: Self) -> Self;

    fn is_finite(self) -> bool;

    /// `true` if the real or the imaginary part is infinite.
    fn is_infinite(self) -> bool;

    fn is_nan(self) -> bool;

    /// Multiply by a real factor.
    #[inline(always)]
    fn scale(self, factor: Self::Real) -> Self {
        self * Self::from_real(factor)
    }

    /// Divide by a real factor.
    #[inline(always)]
    fn unscale(self, divisor: Self::Real) -> Self {
        self / Self::from_real(divisor)
    }

    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        Self::from_real(Self::Real::from_f64(x))
    }
}

/// Real floating-point scalar.
pub trait RealScalar: Scalar<Real = Self> + PartialOrd {
    /// Machine epsilon (distance from 1 to the next representable value).
    fn epsilon() -> Self;

    /// Smallest positive normal number.
    fn safe_min() -> Self;

    fn max_finite() -> Self;

    fn infinity() -> Self;

    fn neg_infinity() -> Self;

    fn nan() -> Self;

    fn hypot(self, other: Self) -> Self;

    /// `+1` for non-negative values (including `+0`), `-1` otherwise.
    fn sign(self) -> Self;

    fn log2(self) -> Self;

    fn powi(self, n: i32) -> Self;

    fn round(self) -> Self;

    fn to_f64(self) -> f64;

    fn from_usize(n: usize) -> Self;

    /// Larger of two values; NaN operands lose.
    #[inline(always)]
    fn max_of(self, other: Self) -> Self {
        if other > self || self.is_nan() {
            other
        } else {
            self
        }
    }

    /// Smaller of two values; NaN operands lose.
    #[inline(always)]
    fn min_of(self, other: Self) -> Self {
        if other < self || self.is_nan() {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_real_scalar {
    ($($t:ident),*) => {
        $(
            impl Scalar for $t {
                type Real = $t;
                const IS_COMPLEX: bool = false;

                #[inline(always)]
                fn from_real(re: $t) -> Self { re }
                #[inline(always)]
                fn from_parts(re: $t, _im: $t) -> Self { re }
                #[inline(always)]
                fn re(self) -> $t { self }
                #[inline(always)]
                fn im(self) -> $t { 0.0 }
                #[inline(always)]
                fn conj(self) -> Self { self }
                #[inline(always)]
                fn abs(self) -> $t { $t::abs(self) }
                #[inline(always)]
                fn abs_sqr(self) -> $t { self * self }
                #[inline(always)]
                fn abs1(self) -> $t { $t::abs(self) }
                #[inline(always)]
                fn arg(self) -> $t {
                    if self.is_sign_negative() {
                        std::$t::consts::PI
                    } else {
                        0.0
                    }
                }
                #[inline(always)]
                fn sqrt(self) -> Self { $t::sqrt(self) }
                #[inline(always)]
                fn powc(self, exponent: Self) -> Self { $t::powf(self, exponent) }
                #[inline(always)]
                fn is_finite(self) -> bool { $t::is_finite(self) }
                #[inline(always)]
                fn is_infinite(self) -> bool { $t::is_infinite(self) }
                #[inline(always)]
                fn is_nan(self) -> bool { $t::is_nan(self) }
                #[inline(always)]
                fn scale(self, factor: $t) -> Self { self * factor }
                #[inline(always)]
                fn unscale(self, divisor: $t) -> Self { self / divisor }
                #[inline(always)]
                fn from_f64(x: f64) -> Self { x as $t }
            }

            impl RealScalar for $t {
                #[inline(always)]
                fn epsilon() -> Self { $t::EPSILON }
                #[inline(always)]
                fn safe_min() -> Self { $t::MIN_POSITIVE }
                #[inline(always)]
                fn max_finite() -> Self { $t::MAX }
                #[inline(always)]
                fn infinity() -> Self { $t::INFINITY }
                #[inline(always)]
                fn neg_infinity() -> Self { $t::NEG_INFINITY }
                #[inline(always)]
                fn nan() -> Self { $t::NAN }
                #[inline(always)]
                fn hypot(self, other: Self) -> Self { $t::hypot(self, other) }
                #[inline(always)]
                fn sign(self) -> Self { if self >= 0.0 { 1.0 } else { -1.0 } }
                #[inline(always)]
                fn log2(self) -> Self { $t::log2(self) }
                #[inline(always)]
                fn powi(self, n: i32) -> Self { $t::powi(self, n) }
                #[inline(always)]
                fn round(self) -> Self { $t::round(self) }
                #[inline(always)]
                fn to_f64(self) -> f64 { self as f64 }
                #[inline(always)]
                fn from_usize(n: usize) -> Self { n as $t }
            }
        )*
    };
}

impl_real_scalar!(f32, f64);

macro_rules! impl_complex_scalar {
    ($($t:ident),*) => {
        $(
            impl Scalar for Complex<$t> {
                type Real = $t;
                const IS_COMPLEX: bool = true;

                #[inline(always)]
                fn from_real(re: $t) -> Self { Complex::new(re, 0.0) }
                #[inline(always)]
                fn from_parts(re: $t, im: $t) -> Self { Complex::new(re, im) }
                #[inline(always)]
                fn re(self) -> $t { self.re }
                #[inline(always)]
                fn im(self) -> $t { self.im }
                #[inline(always)]
                fn conj(self) -> Self { Complex::conj(&self) }
                #[inline(always)]
                fn abs(self) -> $t { Complex::norm(self) }
                #[inline(always)]
                fn abs_sqr(self) -> $t { Complex::norm_sqr(&self) }
                #[inline(always)]
                fn abs1(self) -> $t { self.re.abs() + self.im.abs() }
                #[inline(always)]
                fn arg(self) -> $t { Complex::arg(self) }
                #[inline(always)]
                fn sqrt(self) -> Self { Complex::sqrt(self) }
                #[inline(always)]
                fn powc(self, exponent: Self) -> Self { Complex::powc(self, exponent) }
                #[inline(always)]
                fn is_finite(self) -> bool { self.re.is_finite() && self.im.is_finite() }
                #[inline(always)]
                fn is_infinite(self) -> bool { self.re.is_infinite() || self.im.is_infinite() }
                #[inline(always)]
                fn is_nan(self) -> bool { self.re.is_nan() || self.im.is_nan() }
                #[inline(always)]
                fn scale(self, factor: $t) -> Self {
                    Complex::new(self.re * factor, self.im * factor)
                }
                #[inline(always)]
                fn unscale(self, divisor: $t) -> Self {
                    Complex::new(self.re / divisor, self.im / divisor)
                }
                #[inline(always)]
                fn from_f64(x: f64) -> Self { Complex::new(x as $t, 0.0) }
            }
        )*
    };
}

impl_complex_scalar!(f32, f64);
