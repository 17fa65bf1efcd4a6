//! Scalar functions embedded in lazy expressions.
//!
//! Any closure `Fn(T) -> U` (or `Fn(A, B) -> U`) is a valid function. The
//! named functors below exist so expression types can be spelled out and
//! so the identity can be recognized at the type level: an expression whose
//! function is [`Identity`] is a mutable alias of its source.

use crate::scalar::{RealScalar, Scalar};

// ---------------------------------------------------------------------------
// Function traits
// ---------------------------------------------------------------------------

/// A unary scalar function `T -> Output`.
pub trait UnaryFn<T> {
    type Output: Copy;

    /// `true` only for [`Identity`].
    const IS_IDENTITY: bool = false;

    fn apply(&self, x: T) -> Self::Output;
}

/// A binary scalar function `(A, B) -> Output`.
pub trait BinaryFn<A, B> {
    type Output: Copy;

    fn apply(&self, a: A, b: B) -> Self::Output;
}

impl<T, U, F> UnaryFn<T> for F
where
    F: Fn(T) -> U,
    U: Copy,
{
    type Output = U;

    #[inline(always)]
    fn apply(&self, x: T) -> U {
        self(x)
    }
}

impl<A, B, U, F> BinaryFn<A, B> for F
where
    F: Fn(A, B) -> U,
    U: Copy,
{
    type Output = U;

    #[inline(always)]
    fn apply(&self, a: A, b: B) -> U {
        self(a, b)
    }
}

// ---------------------------------------------------------------------------
// Unary functors
// ---------------------------------------------------------------------------

/// `f(x) = x`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

/// `f(x) = -x`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Negate;

/// `f(x) = conj(x)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conjugate;

/// `f(x) = re(x)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealPart;

/// `f(x) = im(x)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImagPart;

/// `f(x) = |x|`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modulus;

/// `1` if both components are finite, `0` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsFinite;

/// `1` if either component is infinite, `0` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsInf;

/// `1` if either component is NaN, `0` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsNan;

impl<T: Copy> UnaryFn<T> for Identity {
    type Output = T;
    const IS_IDENTITY: bool = true;

    #[inline(always)]
    fn apply(&self, x: T) -> T {
        x
    }
}

impl<T: Scalar> UnaryFn<T> for Negate {
    type Output = T;

    #[inline(always)]
    fn apply(&self, x: T) -> T {
        -x
    }
}

impl<T: Scalar> UnaryFn<T> for Conjugate {
    type Output = T;

    #[inline(always)]
    fn apply(&self, x: T) -> T {
        x.conj()
    }
}

impl<T: Scalar> UnaryFn<T> for RealPart {
    type Output = T::Real;

    #[inline(always)]
    fn apply(&self, x: T) -> T::Real {
        x.re()
    }
}

impl<T: Scalar> UnaryFn<T> for ImagPart {
    type Output = T::Real;

    #[inline(always)]
    fn apply(&self, x: T) -> T::Real {
        x.im()
    }
}

impl<T: Scalar> UnaryFn<T> for Modulus {
    type Output = T::Real;

    #[inline(always)]
    fn apply(&self, x: T) -> T::Real {
        x.abs()
    }
}

impl<T: Scalar> UnaryFn<T> for IsFinite {
    type Output = i32;

    #[inline(always)]
    fn apply(&self, x: T) -> i32 {
        x.is_finite() as i32
    }
}

impl<T: Scalar> UnaryFn<T> for IsInf {
    type Output = i32;

    #[inline(always)]
    fn apply(&self, x: T) -> i32 {
        x.is_infinite() as i32
    }
}

impl<T: Scalar> UnaryFn<T> for IsNan {
    type Output = i32;

    #[inline(always)]
    fn apply(&self, x: T) -> i32 {
        x.is_nan() as i32
    }
}

// ---------------------------------------------------------------------------
// Binary functors
// ---------------------------------------------------------------------------

/// `f(a, b) = a + b`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plus;

/// `f(a, b) = a - b`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minus;

/// `f(a, b) = a * b`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Multiplies;

/// `f(a, b) = a / b`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divides;

/// `f(x, p) = x^p` on the principal branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Power;

/// `f(x, r) = x * r` with a real factor `r`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleBy;

macro_rules! impl_binary_arith {
    ($($name:ident => $op:tt),*) => {
        $(
            impl<T: Scalar> BinaryFn<T, T> for $name {
                type Output = T;

                #[inline(always)]
                fn apply(&self, a: T, b: T) -> T {
                    a $op b
                }
            }
        )*
    };
}

impl_binary_arith!(Plus => +, Minus => -, Multiplies => *, Divides => /);

impl<T: Scalar> BinaryFn<T, T> for Power {
    type Output = T;

    #[inline(always)]
    fn apply(&self, x: T, p: T) -> T {
        x.powc(p)
    }
}

impl<T: Scalar<Real = R>, R: RealScalar> BinaryFn<T, R> for ScaleBy {
    type Output = T;

    #[inline(always)]
    fn apply(&self, x: T, r: R) -> T {
        x.scale(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn is_identity<F: UnaryFn<f64>>(_: &F) -> bool {
        F::IS_IDENTITY
    }

    #[test]
    fn test_identity_detection() {
        assert!(is_identity(&Identity));
        assert!(!is_identity(&Negate));
        assert!(!is_identity(&|x: f64| x));
    }

    #[test]
    fn test_closures_are_functions() {
        let twice = |x: f64| 2.0 * x;
        assert_eq!(UnaryFn::apply(&twice, 3.0), 6.0);
        let hyp = |a: f64, b: f64| a.hypot(b);
        assert_eq!(BinaryFn::apply(&hyp, 3.0, 4.0), 5.0);
    }

    #[test]
    fn test_complex_functors() {
        let z = Complex64::new(3.0, -4.0);
        assert_eq!(Conjugate.apply(z), Complex64::new(3.0, 4.0));
        assert_eq!(UnaryFn::<Complex64>::apply(&RealPart, z), 3.0);
        assert_eq!(UnaryFn::<Complex64>::apply(&ImagPart, z), -4.0);
        assert_eq!(UnaryFn::<Complex64>::apply(&Modulus, z), 5.0);
    }

    #[test]
    fn test_predicates() {
        assert_eq!(IsFinite.apply(f64::INFINITY), 0);
        assert_eq!(IsFinite.apply(f64::NAN), 0);
        assert_eq!(IsFinite.apply(Complex64::new(1.0, f64::NAN)), 0);
        assert_eq!(IsFinite.apply(2.5f64), 1);
        assert_eq!(IsInf.apply(Complex64::new(1.0, f64::INFINITY)), 1);
        assert_eq!(IsInf.apply(Complex64::new(f64::NAN, f64::NAN)), 0);
        assert_eq!(IsNan.apply(Complex64::new(0.0, f64::NAN)), 1);
    }

    #[test]
    fn test_binary_functors() {
        assert_eq!(Plus.apply(1.0f64, 2.0), 3.0);
        assert_eq!(Minus.apply(1.0f64, 2.0), -1.0);
        assert_eq!(Divides.apply(1.0f64, 4.0), 0.25);
        assert_eq!(Power.apply(2.0f64, 10.0), 1024.0);
        assert_eq!(
            ScaleBy.apply(Complex64::new(1.0, 2.0), 2.0),
            Complex64::new(2.0, 4.0)
        );
    }
}
