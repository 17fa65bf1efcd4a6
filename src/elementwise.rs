//! Element-wise functions over vectors and matrices.
//!
//! Every function here wraps its argument in a lazy expression; nothing is
//! evaluated until an element is read. Pass a reference to keep using the
//! source afterwards, or a value (for example another expression) to move
//! it into the result.
//!
//! ```rust
//! use linext::{isfinite, element_pow, DenseMatrix, DenseVector, MatrixExpr, VectorExpr};
//!
//! let v = DenseVector::from_vec(vec![1.0, f64::INFINITY, f64::NAN]);
//! let flags = isfinite(&v);
//! assert_eq!(flags.to_dense().into_vec(), vec![1, 0, 0]);
//!
//! let m = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! assert_eq!(element_pow(&m, 2.0).at(1, 1), 16.0);
//! ```

use crate::size::{MatrixShape, VectorShape};
use linext_traits::{
    BinaryFn, Conjugate, ImagPart, IsFinite, IsInf, IsNan, Modulus, Power, RealPart, Scalar,
    ScaleBy, UnaryFn,
};
use linext_view::{
    MatrixBinary, MatrixBinaryLeft, MatrixBinaryRight, MatrixExpr, MatrixUnary, Result,
    VectorBinary, VectorBinaryLeft, VectorBinaryRight, VectorExpr, VectorUnary,
};

// ============================================================================
// Lifting scalar functions
// ============================================================================

/// Anything a scalar function can be lifted over: vector or matrix
/// expressions. `K` is [`VectorShape`] or [`MatrixShape`] and is inferred.
pub trait Elementwise<K>: Sized {
    type Elem: Copy;

    /// `f(x)` per element.
    type Unary<F>;
    /// `f(x, a2)` per element.
    type Left<A, F>;
    /// `f(a1, x)` per element.
    type Right<A, F>;

    fn lift<F: UnaryFn<Self::Elem>>(self, f: F) -> Self::Unary<F>;

    fn lift_left<A: Copy, F: BinaryFn<Self::Elem, A>>(self, a2: A, f: F) -> Self::Left<A, F>;

    fn lift_right<A: Copy, F: BinaryFn<A, Self::Elem>>(self, a1: A, f: F) -> Self::Right<A, F>;
}

impl<E: VectorExpr> Elementwise<VectorShape> for E {
    type Elem = E::Elem;
    type Unary<F> = VectorUnary<E, F>;
    type Left<A, F> = VectorBinaryLeft<E, A, F>;
    type Right<A, F> = VectorBinaryRight<A, E, F>;

    #[inline]
    fn lift<F: UnaryFn<E::Elem>>(self, f: F) -> VectorUnary<E, F> {
        VectorUnary::new(self, f)
    }

    #[inline]
    fn lift_left<A: Copy, F: BinaryFn<E::Elem, A>>(self, a2: A, f: F) -> VectorBinaryLeft<E, A, F> {
        VectorBinaryLeft::new(self, a2, f)
    }

    #[inline]
    fn lift_right<A: Copy, F: BinaryFn<A, E::Elem>>(
        self,
        a1: A,
        f: F,
    ) -> VectorBinaryRight<A, E, F> {
        VectorBinaryRight::new(a1, self, f)
    }
}

impl<M: MatrixExpr> Elementwise<MatrixShape> for M {
    type Elem = M::Elem;
    type Unary<F> = MatrixUnary<M, F>;
    type Left<A, F> = MatrixBinaryLeft<M, A, F>;
    type Right<A, F> = MatrixBinaryRight<A, M, F>;

    #[inline]
    fn lift<F: UnaryFn<M::Elem>>(self, f: F) -> MatrixUnary<M, F> {
        MatrixUnary::new(self, f)
    }

    #[inline]
    fn lift_left<A: Copy, F: BinaryFn<M::Elem, A>>(self, a2: A, f: F) -> MatrixBinaryLeft<M, A, F> {
        MatrixBinaryLeft::new(self, a2, f)
    }

    #[inline]
    fn lift_right<A: Copy, F: BinaryFn<A, M::Elem>>(
        self,
        a1: A,
        f: F,
    ) -> MatrixBinaryRight<A, M, F> {
        MatrixBinaryRight::new(a1, self, f)
    }
}

/// Two same-shaped expressions combined element by element.
pub trait ZipWith<R, K>: Sized {
    type Lhs: Copy;
    type Rhs: Copy;
    type Output<F>;

    fn zip<F: BinaryFn<Self::Lhs, Self::Rhs>>(self, rhs: R, f: F) -> Result<Self::Output<F>>;
}

impl<L: VectorExpr, R: VectorExpr> ZipWith<R, VectorShape> for L {
    type Lhs = L::Elem;
    type Rhs = R::Elem;
    type Output<F> = VectorBinary<L, R, F>;

    fn zip<F: BinaryFn<L::Elem, R::Elem>>(self, rhs: R, f: F) -> Result<VectorBinary<L, R, F>> {
        VectorBinary::new(self, rhs, f)
    }
}

impl<L: MatrixExpr, R: MatrixExpr> ZipWith<R, MatrixShape> for L {
    type Lhs = L::Elem;
    type Rhs = R::Elem;
    type Output<F> = MatrixBinary<L, R, F>;

    fn zip<F: BinaryFn<L::Elem, R::Elem>>(self, rhs: R, f: F) -> Result<MatrixBinary<L, R, F>> {
        MatrixBinary::new(self, rhs, f)
    }
}

// ============================================================================
// Generic application
// ============================================================================

/// `f(x)` for every element of `x`.
#[inline]
pub fn apply<X, K, F>(x: X, f: F) -> X::Unary<F>
where
    X: Elementwise<K>,
    F: UnaryFn<X::Elem>,
{
    x.lift(f)
}

/// `f(x, a2)` for every element of `x`.
#[inline]
pub fn apply_left<X, K, A, F>(x: X, a2: A, f: F) -> X::Left<A, F>
where
    X: Elementwise<K>,
    A: Copy,
    F: BinaryFn<X::Elem, A>,
{
    x.lift_left(a2, f)
}

/// `f(a1, x)` for every element of `x`.
#[inline]
pub fn apply_right<X, K, A, F>(a1: A, x: X, f: F) -> X::Right<A, F>
where
    X: Elementwise<K>,
    A: Copy,
    F: BinaryFn<A, X::Elem>,
{
    x.lift_right(a1, f)
}

/// `f(lhs, rhs)` element by element. Fails unless the shapes agree.
#[inline]
pub fn zip_with<L, R, K, F>(lhs: L, rhs: R, f: F) -> Result<L::Output<F>>
where
    L: ZipWith<R, K>,
    F: BinaryFn<L::Lhs, L::Rhs>,
{
    lhs.zip(rhs, f)
}

// ============================================================================
// Predicates
// ============================================================================

/// `1` where both components are finite, `0` elsewhere.
#[inline]
pub fn isfinite<X, K>(x: X) -> X::Unary<IsFinite>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(IsFinite)
}

/// `1` where either component is infinite, `0` elsewhere.
#[inline]
pub fn isinf<X, K>(x: X) -> X::Unary<IsInf>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(IsInf)
}

/// `1` where either component is NaN, `0` elsewhere.
#[inline]
pub fn isnan<X, K>(x: X) -> X::Unary<IsNan>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(IsNan)
}

// ============================================================================
// Arithmetic
// ============================================================================

/// `x^p` per element, on the principal branch for complex `x`.
#[inline]
pub fn element_pow<X, K>(x: X, p: X::Elem) -> X::Left<X::Elem, Power>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift_left(p, Power)
}

/// `x * r` per element with a real factor.
#[inline]
pub fn scale<X, K>(
    x: X,
    r: <X::Elem as Scalar>::Real,
) -> X::Left<<X::Elem as Scalar>::Real, ScaleBy>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift_left(r, ScaleBy)
}

#[inline]
pub fn conj<X, K>(x: X) -> X::Unary<Conjugate>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(Conjugate)
}

#[inline]
pub fn real<X, K>(x: X) -> X::Unary<RealPart>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(RealPart)
}

#[inline]
pub fn imag<X, K>(x: X) -> X::Unary<ImagPart>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(ImagPart)
}

/// Modulus per element.
#[inline]
pub fn abs<X, K>(x: X) -> X::Unary<Modulus>
where
    X: Elementwise<K>,
    X::Elem: Scalar,
{
    x.lift(Modulus)
}
