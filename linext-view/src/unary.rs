//! Unary element-wise expressions.

use crate::expr::{MatrixExpr, MatrixExprMut, VectorExpr, VectorExprMut};
use linext_traits::{Closure, Identity, UnaryFn};

/// `f(v(i))` evaluated on access.
///
/// With `F = Identity` the expression is a mutable alias of its source:
/// writes pass through when the source is writable.
#[derive(Debug, Clone, Copy)]
pub struct VectorUnary<E, F> {
    src: E,
    f: F,
}

impl<E: VectorExpr, F: UnaryFn<E::Elem>> VectorUnary<E, F> {
    #[inline]
    pub fn new(src: E, f: F) -> Self {
        Self { src, f }
    }

    #[inline]
    pub fn source(&self) -> &E {
        &self.src
    }

    #[inline]
    pub fn function(&self) -> &F {
        &self.f
    }

    #[inline]
    pub fn into_parts(self) -> (E, F) {
        (self.src, self.f)
    }
}

impl<E: VectorExpr, F: UnaryFn<E::Elem>> VectorExpr for VectorUnary<E, F> {
    type Elem = F::Output;
    type Storage = E::Storage;
    const CLOSURE: Closure = if F::IS_IDENTITY {
        E::CLOSURE
    } else {
        E::CLOSURE.immutable()
    };

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn at(&self, i: usize) -> F::Output {
        self.f.apply(self.src.at(i))
    }
}

impl<E: VectorExprMut> VectorExprMut for VectorUnary<E, Identity> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize) -> &mut E::Elem {
        self.src.at_mut(i)
    }
}

/// `f(m(i, j))` evaluated on access, in the orientation of the source.
#[derive(Debug, Clone, Copy)]
pub struct MatrixUnary<M, F> {
    src: M,
    f: F,
}

impl<M: MatrixExpr, F: UnaryFn<M::Elem>> MatrixUnary<M, F> {
    #[inline]
    pub fn new(src: M, f: F) -> Self {
        Self { src, f }
    }

    #[inline]
    pub fn source(&self) -> &M {
        &self.src
    }

    #[inline]
    pub fn function(&self) -> &F {
        &self.f
    }

    #[inline]
    pub fn into_parts(self) -> (M, F) {
        (self.src, self.f)
    }
}

impl<M: MatrixExpr, F: UnaryFn<M::Elem>> MatrixExpr for MatrixUnary<M, F> {
    type Elem = F::Output;
    type Orientation = M::Orientation;
    type Storage = M::Storage;
    const CLOSURE: Closure = if F::IS_IDENTITY {
        M::CLOSURE
    } else {
        M::CLOSURE.immutable()
    };

    #[inline(always)]
    fn nrows(&self) -> usize {
        self.src.nrows()
    }

    #[inline(always)]
    fn ncols(&self) -> usize {
        self.src.ncols()
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> F::Output {
        self.f.apply(self.src.at(i, j))
    }
}

impl<M: MatrixExprMut> MatrixExprMut for MatrixUnary<M, Identity> {
    #[inline(always)]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut M::Elem {
        self.src.at_mut(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{DenseMatrix, DenseVector};
    use linext_traits::{ColumnMajor, Conjugate, IsFinite, Negate, OrientationKind, OrientationTag};
    use num_complex::Complex64;

    fn closure_of<E: VectorExpr>(_: &E) -> Closure {
        E::CLOSURE
    }

    fn orientation_of<M: MatrixExpr>(_: &M) -> OrientationKind {
        M::Orientation::KIND
    }

    #[test]
    fn test_lazy_evaluation() {
        let mut v = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        let neg = VectorUnary::new(&v, Negate);
        assert_eq!(neg.at(2), -3.0);
        assert_eq!(neg.to_dense().into_vec(), vec![-1.0, -2.0, -3.0]);
        drop(neg);

        v.set(2, 10.0);
        let neg = VectorUnary::new(&v, Negate);
        assert_eq!(neg.at(2), -10.0);
    }

    #[test]
    fn test_closure_classification() {
        let mut v = DenseVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(closure_of(&VectorUnary::new(&v, Negate)), Closure::Borrowed);
        assert_eq!(
            closure_of(&VectorUnary::new(v.clone(), Negate)),
            Closure::Owned
        );
        assert_eq!(
            closure_of(&VectorUnary::new(&mut v, Identity)),
            Closure::MutableAlias
        );
        assert_eq!(
            closure_of(&VectorUnary::new(&mut v, Negate)),
            Closure::Borrowed
        );
    }

    #[test]
    fn test_identity_writes_through() {
        let mut v = DenseVector::from_vec(vec![1.0, 2.0]);
        {
            let mut alias = VectorUnary::new(&mut v, Identity);
            alias.set(0, 7.0);
        }
        assert_eq!(v.at(0), 7.0);
    }

    #[test]
    fn test_owned_temporary_chain() {
        // The inner expression is a temporary owned by the outer one.
        let v = DenseVector::from_vec(vec![Complex64::new(1.0, 2.0)]);
        let e = VectorUnary::new(VectorUnary::new(&v, Conjugate), Negate);
        assert_eq!(e.at(0), Complex64::new(-1.0, 2.0));
    }

    #[test]
    fn test_matrix_unary_keeps_orientation() {
        let rows = [[1.0, f64::NAN], [f64::INFINITY, 0.0]];
        let m = DenseMatrix::<f64, ColumnMajor>::from_rows(&rows).unwrap();
        let e = MatrixUnary::new(&m, IsFinite);
        assert_eq!(orientation_of(&e), OrientationKind::ColumnMajor);
        assert_eq!(e.at(0, 0), 1);
        assert_eq!(e.at(0, 1), 0);
        assert_eq!(e.at(1, 0), 0);
    }
}
