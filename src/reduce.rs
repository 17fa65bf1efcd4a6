//! Reduction machinery shared by `min`/`max`, `sum`, `any`/`all` and
//! `for_each`.
//!
//! Whole-container reductions go through [`Reducible`], implemented for
//! every vector and every matrix expression; the shape marker `K` is
//! inferred. By-dimension reductions fold independent lines of a matrix
//! with [`fold_lines`]: with [`Dim::Rows`] each row is folded into one
//! result, with [`Dim::Columns`] each column. With the `parallel` feature
//! large inputs fold their lines on the rayon pool.

use crate::maybe_sync::{MaybeSendSync, MaybeSync};
use crate::size::{MatrixShape, VectorShape};
use linext_traits::{Dim, DimIndex, DimensionTag, OrientationTag, ValidDimension};
use linext_view::{DenseMatrix, MatrixExpr, VectorExpr};

/// A vector or matrix whose elements can be visited one by one.
pub trait Reducible<K> {
    type Elem: Copy;

    fn element_count(&self) -> usize;

    /// Every element once. Vectors are visited by index, matrices in their
    /// storage order (row by row when row-major, column by column when
    /// column-major).
    fn visit<F: FnMut(Self::Elem)>(&self, f: F);

    /// Like [`visit`](Reducible::visit), stopping at the first `false`.
    /// Returns whether the traversal ran to the end.
    fn visit_while<F: FnMut(Self::Elem) -> bool>(&self, f: F) -> bool;
}

impl<E: VectorExpr> Reducible<VectorShape> for E {
    type Elem = E::Elem;

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    fn visit<F: FnMut(E::Elem)>(&self, mut f: F) {
        if let Some(buf) = self.as_slice() {
            buf.iter().for_each(|&x| f(x));
            return;
        }
        for i in 0..self.len() {
            f(self.at(i));
        }
    }

    fn visit_while<F: FnMut(E::Elem) -> bool>(&self, mut f: F) -> bool {
        (0..self.len()).all(|i| f(self.at(i)))
    }
}

impl<M: MatrixExpr> Reducible<MatrixShape> for M {
    type Elem = M::Elem;

    #[inline]
    fn element_count(&self) -> usize {
        self.nrows() * self.ncols()
    }

    fn visit<F: FnMut(M::Elem)>(&self, mut f: F) {
        if let Some(buf) = self.as_contiguous() {
            buf.iter().for_each(|&x| f(x));
            return;
        }
        visit_lines(self, <M::Orientation as OrientationTag>::MAJOR, |_, x| f(x));
    }

    fn visit_while<F: FnMut(M::Elem) -> bool>(&self, mut f: F) -> bool {
        let (rows, cols) = self.shape();
        match <M::Orientation as OrientationTag>::MAJOR {
            Dim::Rows => (0..rows).all(|i| (0..cols).all(|j| f(self.at(i, j)))),
            Dim::Columns => (0..cols).all(|j| (0..rows).all(|i| f(self.at(i, j)))),
        }
    }
}

/// Number of lines and their length when `m` is split along `outer`.
#[inline]
pub(crate) fn line_layout<M: MatrixExpr>(m: &M, outer: Dim) -> (usize, usize) {
    let (rows, cols) = m.shape();
    match outer {
        Dim::Rows => (rows, cols),
        Dim::Columns => (cols, rows),
    }
}

/// Element `k` of line `l`.
#[inline(always)]
pub(crate) fn line_at<M: MatrixExpr>(m: &M, outer: Dim, l: usize, k: usize) -> M::Elem {
    match outer {
        Dim::Rows => m.at(l, k),
        Dim::Columns => m.at(k, l),
    }
}

/// Visit line by line: `f(l, x)` for every element `x` of line `l`.
pub(crate) fn visit_lines<M, F>(m: &M, outer: Dim, mut f: F)
where
    M: MatrixExpr,
    F: FnMut(usize, M::Elem),
{
    let (nlines, len) = line_layout(m, outer);
    for l in 0..nlines {
        for k in 0..len {
            f(l, line_at(m, outer, l, k));
        }
    }
}

/// Fold every line of `m` independently, starting each from `init`.
pub(crate) fn fold_lines<M, U, F>(m: &M, outer: Dim, init: U, f: F) -> Vec<U>
where
    M: MatrixExpr + MaybeSync,
    U: Copy + MaybeSendSync,
    F: Fn(U, M::Elem) -> U + MaybeSync,
{
    let (nlines, len) = line_layout(m, outer);
    let fold_line = |l: usize| {
        let mut acc = init;
        for k in 0..len {
            acc = f(acc, line_at(m, outer, l, k));
        }
        acc
    };

    #[cfg(feature = "parallel")]
    {
        if nlines > 1 && nlines * len >= crate::PARALLEL_MIN_LEN {
            use rayon::prelude::*;
            return (0..nlines).into_par_iter().map(fold_line).collect();
        }
    }

    (0..nlines).map(fold_line).collect()
}

/// Running fold along every line, keeping the shape of `m`.
pub(crate) fn scan_lines<M, F>(m: &M, outer: Dim, f: F) -> DenseMatrix<M::Elem, M::Orientation>
where
    M: MatrixExpr,
    M::Elem: num_traits::Zero,
    F: Fn(M::Elem, M::Elem) -> M::Elem,
{
    let (rows, cols) = m.shape();
    let mut out = DenseMatrix::zeros(rows, cols);
    let (nlines, len) = line_layout(m, outer);
    for l in 0..nlines {
        let mut acc = None;
        for k in 0..len {
            let x = line_at(m, outer, l, k);
            let next = match acc {
                Some(prev) => f(prev, x),
                None => x,
            };
            acc = Some(next);
            let (i, j) = match outer {
                Dim::Rows => (l, k),
                Dim::Columns => (k, l),
            };
            out[(i, j)] = next;
        }
    }
    out
}

// ============================================================================
// for_each
// ============================================================================

/// Call `f` on every element in traversal order.
pub fn for_each<X, K, F>(x: &X, f: F)
where
    X: Reducible<K>,
    F: FnMut(X::Elem),
{
    x.visit(f)
}

/// Call `f` on every element, line by line: row by row for
/// [`Dim::Rows`], column by column for [`Dim::Columns`].
pub fn for_each_along<M, F>(m: &M, dim: Dim, mut f: F)
where
    M: MatrixExpr,
    F: FnMut(M::Elem),
{
    visit_lines(m, dim, |_, x| f(x))
}

/// `for_each<K>(m)`: row by row for `K = 1`, column by column for `K = 2`.
pub fn for_each_dim<const K: usize, M, F>(m: &M, f: F)
where
    M: MatrixExpr,
    F: FnMut(M::Elem),
    DimIndex<K>: ValidDimension,
{
    for_each_along(m, <DimIndex<K> as ValidDimension>::DIM, f)
}

/// `for_each` along a dimension tag resolved on the orientation of `m`.
pub fn for_each_by_tag<T, M, F>(m: &M, f: F)
where
    T: DimensionTag,
    M: MatrixExpr,
    F: FnMut(M::Elem),
{
    for_each_along(m, T::resolve::<M::Orientation>(), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linext_traits::{ColumnMajor, Major, RowMajor};
    use linext_view::{DenseVector, MatrixUnary, SequenceVector};

    fn sample() -> DenseMatrix<f64, RowMajor> {
        DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_visit_storage_order() {
        let a = sample();
        let mut seen = Vec::new();
        for_each(&a, |x| seen.push(x));
        assert_eq!(seen, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let c: DenseMatrix<f64, ColumnMajor> = a.to_orientation();
        seen.clear();
        for_each(&c, |x| seen.push(x));
        assert_eq!(seen, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        // An expression has no buffer and is walked element by element.
        seen.clear();
        for_each(&MatrixUnary::new(&c, |x: f64| -x), |x| seen.push(x));
        assert_eq!(seen, vec![-1.0, -4.0, -2.0, -5.0, -3.0, -6.0]);
    }

    #[test]
    fn test_for_each_by_dimension_and_tag() {
        let a = sample();
        let mut rows = Vec::new();
        for_each_dim::<1, _, _>(&a, |x| rows.push(x));
        assert_eq!(rows, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let mut cols = Vec::new();
        for_each_dim::<2, _, _>(&a, |x| cols.push(x));
        assert_eq!(cols, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        let c: DenseMatrix<f64, ColumnMajor> = a.to_orientation();
        let mut major = Vec::new();
        for_each_by_tag::<Major, _, _>(&c, |x| major.push(x));
        assert_eq!(major, cols);
    }

    #[test]
    fn test_vector_visit() {
        let mut total = 0.0;
        for_each(&SequenceVector::new(1.0, 2.0, 3), |x| total += x);
        assert_eq!(total, 9.0);

        let v = DenseVector::from_vec(vec![1, 2, 3, 4]);
        let mut count = 0;
        assert!(!Reducible::<VectorShape>::visit_while(&v, |x| {
            count += 1;
            x < 2
        }));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_fold_and_scan_lines() {
        let a = sample();
        assert_eq!(
            fold_lines(&a, Dim::Rows, 0.0, |s, x| s + x),
            vec![6.0, 15.0]
        );
        assert_eq!(
            fold_lines(&a, Dim::Columns, 0.0, |s, x| s + x),
            vec![5.0, 7.0, 9.0]
        );

        let down = scan_lines(&a, Dim::Columns, |s, x| s + x);
        assert_eq!(down.as_slice(), &[1.0, 2.0, 3.0, 5.0, 7.0, 9.0]);
        let across = scan_lines(&a, Dim::Rows, |s, x| s + x);
        assert_eq!(across.as_slice(), &[1.0, 3.0, 6.0, 4.0, 9.0, 15.0]);
    }

    #[test]
    fn test_empty_matrix_has_no_lines() {
        let e = DenseMatrix::<f64>::zeros(0, 3);
        assert_eq!(
            fold_lines(&e, Dim::Columns, 0.0, |s, x| s + x),
            vec![0.0; 3]
        );
        assert!(fold_lines(&e, Dim::Rows, 0.0, |s, x| s + x).is_empty());
    }
}
