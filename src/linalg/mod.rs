//! Decompositions, solvers and condition numbers on top of the kernel
//! backend.
//!
//! Every binding goes through the same steps:
//!
//! 1. **Materialize**: copy the input into a column-major buffer unless it
//!    already is one.
//! 2. **Invoke**: call the [`ActiveKernel`](linext_kernel::ActiveKernel) routine on the buffer.
//! 3. **Reconstruct**: turn the packed kernel output into containers.
//! 4. **Re-orient**: hand results back in the orientation of the input.
//!
//! Negative kernel statuses are argument errors and surface as
//! [`LinextError::Kernel`]. Positive statuses mean a numerical failure and
//! are reported per operation.

pub mod balance;
pub mod cholesky;
pub mod cond;
pub mod inv;
pub mod llsq;
pub mod lu;
pub mod norm;
pub mod ql;
pub mod qr;
pub mod rcond;
pub mod svd;

use crate::maybe_sync::MaybeSync;
use linext_traits::{ColumnMajor, OrientationKind, OrientationTag, Scalar};
use linext_view::{ColMajorMatrix, DenseMatrix, LinextError, MatrixExpr, Result};
use num_traits::Zero;
use tracing::{debug, trace};

/// Leading dimension for a column-major buffer with `rows` rows.
#[inline(always)]
pub(crate) fn ld(rows: usize) -> usize {
    rows.max(1)
}

/// Column-major copy of `a`.
///
/// A contiguous column-major source is copied as one block. With the
/// `parallel` feature large sources are copied column by column on the
/// rayon pool.
pub(crate) fn materialize<M>(a: &M) -> ColMajorMatrix<M::Elem>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let (rows, cols) = a.shape();
    let packed = <M::Orientation as OrientationTag>::KIND == OrientationKind::ColumnMajor
        && a.as_contiguous().is_some();
    if packed {
        return DenseMatrix::from_expr(a);
    }
    debug!(
        rows,
        cols,
        orientation = ?<M::Orientation as OrientationTag>::KIND,
        "materializing column-major copy"
    );

    #[cfg(feature = "parallel")]
    {
        if cols > 1 && rows * cols >= crate::PARALLEL_MIN_LEN {
            use rayon::prelude::*;
            let mut out = ColMajorMatrix::zeros(rows, cols);
            out.as_mut_slice()
                .par_chunks_mut(rows)
                .enumerate()
                .for_each(|(j, col)| {
                    for (i, x) in col.iter_mut().enumerate() {
                        *x = a.at(i, j);
                    }
                });
            return out;
        }
    }

    DenseMatrix::from_expr(a)
}

/// Log a kernel status and turn a negative one into an error.
#[inline]
pub(crate) fn check_status(routine: &'static str, info: i32) -> Result<i32> {
    trace!(routine, info, "kernel call returned");
    if info < 0 {
        return Err(LinextError::Kernel { routine, info });
    }
    Ok(info)
}

/// Copy a column-major result into orientation `O`.
#[inline]
pub(crate) fn reorient<T: Copy, O: OrientationTag>(m: &ColMajorMatrix<T>) -> DenseMatrix<T, O> {
    m.to_orientation::<O>()
}

/// Conjugate transpose of a column-major matrix.
pub(crate) fn adjoint<T: Scalar>(m: &ColMajorMatrix<T>) -> ColMajorMatrix<T> {
    let (rows, cols) = m.shape();
    DenseMatrix::<T, ColumnMajor>::from_fn(cols, rows, |i, j| m.at(j, i).conj())
}

/// Dense matrix product `A B`, in the orientation of `a`.
///
/// ```rust
/// use linext::{prod, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = DenseMatrix::<f64>::from_rows(&[[1.0], [1.0]]).unwrap();
/// assert_eq!(prod(&a, &b).unwrap().into_vec(), vec![3.0, 7.0]);
/// ```
pub fn prod<A, B>(a: &A, b: &B) -> Result<DenseMatrix<A::Elem, A::Orientation>>
where
    A: MatrixExpr + MaybeSync,
    B: MatrixExpr<Elem = A::Elem> + MaybeSync,
    A::Elem: Scalar,
{
    let (m, k) = a.shape();
    let (kb, n) = b.shape();
    if kb != k {
        return Err(LinextError::ShapeMismatch((m, k), (kb, n)));
    }
    let a = materialize(a);
    let b = materialize(b);
    let (abuf, bbuf) = (a.as_slice(), b.as_slice());
    let mut c = ColMajorMatrix::<A::Elem>::zeros(m, n);
    let cbuf = c.as_mut_slice();
    for j in 0..n {
        for l in 0..k {
            let blj = bbuf[l + j * k];
            if blj == A::Elem::zero() {
                continue;
            }
            let acol = &abuf[l * m..(l + 1) * m];
            for (ci, &ail) in cbuf[j * m..(j + 1) * m].iter_mut().zip(acol) {
                *ci += ail * blj;
            }
        }
    }
    Ok(reorient(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementwise::apply;
    use linext_traits::RowMajor;

    #[test]
    fn test_materialize_any_layout() {
        let a = DenseMatrix::<f64, RowMajor>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
            .unwrap();
        let c = materialize(&a);
        assert_eq!(c.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        let neg = materialize(&apply(&a, |x: f64| -x));
        assert_eq!(neg.as_slice(), &[-1.0, -4.0, -2.0, -5.0, -3.0, -6.0]);

        assert_eq!(materialize(&c), c);
    }

    #[test]
    fn test_check_status() {
        assert_eq!(check_status("getrf", 0), Ok(0));
        assert_eq!(check_status("getrf", 2), Ok(2));
        assert_eq!(
            check_status("getrf", -4),
            Err(
                LinextError::Kernel {
                    routine: "getrf",
                    info: -4,
                },
            )
        );
    }

    #[test]
    fn test_prod() {
        let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = DenseMatrix::<f64, ColumnMajor>::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]])
            .unwrap();
        let c = prod(&a, &b).unwrap();
        assert_eq!(
            c,
            DenseMatrix::from_rows(&[[4.0, 5.0], [10.0, 11.0]]).unwrap()
        );

        assert_eq!(
            prod(&a, &a).unwrap_err(),
            LinextError::ShapeMismatch((2, 3), (2, 3))
        );
    }

    #[test]
    fn test_adjoint() {
        use num_complex::Complex64;
        let z = ColMajorMatrix::from_rows(&[[Complex64::new(1.0, 2.0), Complex64::new(3.0, 0.0)]])
            .unwrap();
        let h = adjoint(&z);
        assert_eq!(h.shape(), (2, 1));
        assert_eq!(h.at(0, 0), Complex64::new(1.0, -2.0));
    }
}
