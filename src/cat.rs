//! Concatenation with zero padding.

use linext_view::{DenseMatrix, MatrixExpr};
use num_traits::Zero;

#[inline(always)]
fn at_or_zero<M>(m: &M, i: usize, j: usize) -> M::Elem
where
    M: MatrixExpr,
    M::Elem: Zero,
{
    if i < m.nrows() && j < m.ncols() {
        m.at(i, j)
    } else {
        M::Elem::zero()
    }
}

/// `[A B]`: `max(rows)` rows, `cols(a) + cols(b)` columns. The shorter
/// operand is padded with zeros at the bottom.
pub fn cat_rows<A, B>(a: &A, b: &B) -> DenseMatrix<A::Elem, A::Orientation>
where
    A: MatrixExpr,
    B: MatrixExpr<Elem = A::Elem>,
    A::Elem: Zero,
{
    let rows = a.nrows().max(b.nrows());
    let split = a.ncols();
    DenseMatrix::from_fn(rows, split + b.ncols(), |i, j| {
        if j < split {
            at_or_zero(a, i, j)
        } else {
            at_or_zero(b, i, j - split)
        }
    })
}

/// `[A; B]`: `rows(a) + rows(b)` rows, `max(cols)` columns. The narrower
/// operand is padded with zeros on the right.
pub fn cat_columns<A, B>(a: &A, b: &B) -> DenseMatrix<A::Elem, A::Orientation>
where
    A: MatrixExpr,
    B: MatrixExpr<Elem = A::Elem>,
    A::Elem: Zero,
{
    let cols = a.ncols().max(b.ncols());
    let split = a.nrows();
    DenseMatrix::from_fn(split + b.nrows(), cols, |i, j| {
        if i < split {
            at_or_zero(a, i, j)
        } else {
            at_or_zero(b, i - split, j)
        }
    })
}
