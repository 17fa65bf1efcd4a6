//! Triangular parts of a matrix.
//!
//! `triu(m, k)` keeps the elements with `j - i >= k`, `tril(m, k)` those
//! with `j - i <= k`. Both accept any shape and any offset; an offset
//! beyond the matrix just keeps everything or nothing.

use linext_view::{DenseMatrix, MatrixExpr};
use num_traits::Zero;

fn keep_where<M, F>(m: &M, keep: F) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Zero,
    F: Fn(isize) -> bool,
{
    let (rows, cols) = m.shape();
    DenseMatrix::from_fn(rows, cols, |i, j| {
        if keep(j as isize - i as isize) {
            m.at(i, j)
        } else {
            M::Elem::zero()
        }
    })
}

/// Upper triangle on and above the `k`-th diagonal.
pub fn triu<M>(m: &M, k: isize) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Zero,
{
    keep_where(m, |d| d >= k)
}

/// Lower triangle on and below the `k`-th diagonal.
pub fn tril<M>(m: &M, k: isize) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: Zero,
{
    keep_where(m, |d| d <= k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementwise::apply;
    use linext_traits::ColumnMajor;

    fn square() -> DenseMatrix<i32> {
        DenseMatrix::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_triu_offsets() {
        let a = square();
        assert_eq!(triu(&a, 0).as_slice(), &[1, 2, 3, 0, 5, 6, 0, 0, 9]);
        assert_eq!(triu(&a, 1).as_slice(), &[0, 2, 3, 0, 0, 6, 0, 0, 0]);
        assert_eq!(triu(&a, -1).as_slice(), &[1, 2, 3, 4, 5, 6, 0, 8, 9]);
        assert!(triu(&a, 3).as_slice().iter().all(|&x| x == 0));
        assert_eq!(triu(&a, -3), a);
    }

    #[test]
    fn test_tril_is_dual() {
        let a = square();
        assert_eq!(tril(&a, 0).as_slice(), &[1, 0, 0, 4, 5, 0, 7, 8, 9]);
        assert_eq!(tril(&a, -1).as_slice(), &[0, 0, 0, 4, 0, 0, 7, 8, 0]);
        // Strict upper plus lower gives the whole matrix back.
        let upper = triu(&a, 1);
        let lower = tril(&a, 0);
        let both: Vec<i32> = upper
            .as_slice()
            .iter()
            .zip(lower.as_slice())
            .map(|(x, y)| x + y)
            .collect();
        assert_eq!(both, a.as_slice());
    }

    #[test]
    fn test_rectangular_and_expressions() {
        let wide = DenseMatrix::<f64, ColumnMajor>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
            .unwrap();
        let u = triu(&wide, 0);
        assert_eq!(u.as_slice(), &[1.0, 0.0, 2.0, 5.0, 3.0, 6.0]);

        let tall = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let l = tril(&apply(&tall, |x: f64| -x), 0);
        assert_eq!(l.as_slice(), &[-1.0, 0.0, -3.0, -4.0, -5.0, -6.0]);
    }
}
