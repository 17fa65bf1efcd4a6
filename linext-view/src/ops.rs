//! Arithmetic operators on containers and expressions.
//!
//! `a + b`, `a - b` and `-a` build lazy expressions. Operators cannot return
//! `Result`, so adding operands of different shape panics with the
//! [`LinextError`](crate::LinextError) message; use [`VectorBinary::new`] or
//! [`MatrixBinary::new`] directly for a checked construction.

use crate::binary::{
    MatrixBinary, MatrixBinaryLeft, MatrixBinaryRight, VectorBinary, VectorBinaryLeft,
    VectorBinaryRight,
};
use crate::dense::{DenseMatrix, DenseVector};
use crate::expr::{MatrixExpr, VectorExpr};
use crate::proxy::{DiagonalMatrix, MatrixColumn, MatrixDiagonal, MatrixRow, Transposed};
use crate::sequence::SequenceVector;
use crate::unary::{MatrixUnary, VectorUnary};
use linext_traits::{Minus, Negate, Plus, Scalar};
use std::ops::{Add, Neg, Sub};

macro_rules! impl_vector_ops {
    ($([$($gen:tt)*] $ty:ty;)*) => {
        $(
            impl<$($gen)* Rhs> Add<Rhs> for $ty
            where
                $ty: VectorExpr,
                <$ty as VectorExpr>::Elem: Scalar,
                Rhs: VectorExpr<Elem = <$ty as VectorExpr>::Elem>,
            {
                type Output = VectorBinary<$ty, Rhs, Plus>;

                fn add(self, rhs: Rhs) -> Self::Output {
                    match VectorBinary::new(self, rhs, Plus) {
                        Ok(e) => e,
                        Err(err) => panic!("vector addition: {err}"),
                    }
                }
            }

            impl<$($gen)* Rhs> Sub<Rhs> for $ty
            where
                $ty: VectorExpr,
                <$ty as VectorExpr>::Elem: Scalar,
                Rhs: VectorExpr<Elem = <$ty as VectorExpr>::Elem>,
            {
                type Output = VectorBinary<$ty, Rhs, Minus>;

                fn sub(self, rhs: Rhs) -> Self::Output {
                    match VectorBinary::new(self, rhs, Minus) {
                        Ok(e) => e,
                        Err(err) => panic!("vector subtraction: {err}"),
                    }
                }
            }

            impl<$($gen)*> Neg for $ty
            where
                $ty: VectorExpr,
                <$ty as VectorExpr>::Elem: Scalar,
            {
                type Output = VectorUnary<$ty, Negate>;

                #[inline]
                fn neg(self) -> Self::Output {
                    VectorUnary::new(self, Negate)
                }
            }
        )*
    };
}

macro_rules! impl_matrix_ops {
    ($([$($gen:tt)*] $ty:ty;)*) => {
        $(
            impl<$($gen)* Rhs> Add<Rhs> for $ty
            where
                $ty: MatrixExpr,
                <$ty as MatrixExpr>::Elem: Scalar,
                Rhs: MatrixExpr<Elem = <$ty as MatrixExpr>::Elem>,
            {
                type Output = MatrixBinary<$ty, Rhs, Plus>;

                fn add(self, rhs: Rhs) -> Self::Output {
                    match MatrixBinary::new(self, rhs, Plus) {
                        Ok(e) => e,
                        Err(err) => panic!("matrix addition: {err}"),
                    }
                }
            }

            impl<$($gen)* Rhs> Sub<Rhs> for $ty
            where
                $ty: MatrixExpr,
                <$ty as MatrixExpr>::Elem: Scalar,
                Rhs: MatrixExpr<Elem = <$ty as MatrixExpr>::Elem>,
            {
                type Output = MatrixBinary<$ty, Rhs, Minus>;

                fn sub(self, rhs: Rhs) -> Self::Output {
                    match MatrixBinary::new(self, rhs, Minus) {
                        Ok(e) => e,
                        Err(err) => panic!("matrix subtraction: {err}"),
                    }
                }
            }

            impl<$($gen)*> Neg for $ty
            where
                $ty: MatrixExpr,
                <$ty as MatrixExpr>::Elem: Scalar,
            {
                type Output = MatrixUnary<$ty, Negate>;

                #[inline]
                fn neg(self) -> Self::Output {
                    MatrixUnary::new(self, Negate)
                }
            }
        )*
    };
}

impl_vector_ops! {
    [T,] DenseVector<T>;
    ['a, T,] &'a DenseVector<T>;
    [T,] SequenceVector<T>;
    ['a, T,] &'a SequenceVector<T>;
    [E, F,] VectorUnary<E, F>;
    [E, A, F,] VectorBinaryLeft<E, A, F>;
    [A, E, F,] VectorBinaryRight<A, E, F>;
    [L, R, F,] VectorBinary<L, R, F>;
    [M,] MatrixDiagonal<M>;
    [M,] MatrixRow<M>;
    [M,] MatrixColumn<M>;
}

impl_matrix_ops! {
    [T, O,] DenseMatrix<T, O>;
    ['a, T, O,] &'a DenseMatrix<T, O>;
    [M, F,] MatrixUnary<M, F>;
    [M, A, F,] MatrixBinaryLeft<M, A, F>;
    [A, M, F,] MatrixBinaryRight<A, M, F>;
    [L, R, F,] MatrixBinary<L, R, F>;
    [V,] DiagonalMatrix<V>;
    [M,] Transposed<M>;
}

#[cfg(test)]
mod tests {
    use crate::dense::{DenseMatrix, DenseVector};
    use crate::expr::{MatrixExpr, VectorExpr};
    use linext_traits::{ColumnMajor, RowMajor};

    #[test]
    fn test_vector_operators() {
        let a = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = DenseVector::from_vec(vec![10.0, 20.0, 30.0]);
        let e = &a + &b - &a;
        assert_eq!(e.to_dense(), b);
        let n = -&a;
        assert_eq!(n.at(2), -3.0);
    }

    #[test]
    fn test_matrix_operators_mixed_layout() {
        let a = DenseMatrix::<f64, RowMajor>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b: DenseMatrix<f64, ColumnMajor> = a.to_orientation();
        let sum = &a + &b;
        assert_eq!(sum.at(0, 1), 4.0);
        let dense: DenseMatrix<f64> = (-sum).to_dense();
        assert_eq!(dense[(1, 1)], -8.0);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_vector_operator_size_mismatch_panics() {
        let a = DenseVector::from_vec(vec![1.0, 2.0]);
        let b = DenseVector::from_vec(vec![1.0]);
        let _ = &a + &b;
    }
}
