//! Eigenvalue balancing of a matrix and of a pencil `(A, B)`.
//!
//! Balancing permutes isolated eigenvalues to the corners and rescales the
//! rest by powers of two, so the balanced matrix is `T^-1 A T` with `T` a
//! scaled permutation and no rounding introduced.

use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, BalanceJob, Kernel, Side};
use linext_traits::{ColumnMajor, OrientationTag, RealScalar, Scalar};
use linext_view::{
    ensure_square, ColMajorMatrix, DenseMatrix, DenseVector, LinextError, MatrixExpr,
    MatrixExprMut, Result,
};
use num_traits::One;

/// Permutation recorded by a balancing routine: positions above `ihi` were
/// filled top-down first, then positions below `ilo` bottom-up.
fn recorded_permutation<R: RealScalar>(scale: &[R], ilo: usize, ihi: usize) -> Vec<usize> {
    let n = scale.len();
    let mut p: Vec<usize> = (0..n).collect();
    for j in (ihi + 1..n).rev().chain(0..ilo) {
        p.swap(j, scale[j].to_f64() as usize);
    }
    p
}

/// Scaling factors, one outside the balanced block `ilo..=ihi`.
fn recorded_scaling<R: RealScalar>(scale: &[R], ilo: usize, ihi: usize) -> DenseVector<R> {
    DenseVector::from_fn(scale.len(), |i| {
        if ilo < ihi && (ilo..=ihi).contains(&i) {
            scale[i]
        } else {
            R::one()
        }
    })
}

/// Outcome of balancing one matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Balancing<T: Scalar> {
    job: BalanceJob,
    ilo: usize,
    ihi: usize,
    scale: Vec<T::Real>,
}

impl<T: Scalar> Balancing<T> {
    #[inline]
    pub fn job(&self) -> BalanceJob {
        self.job
    }

    /// First row of the block that was scaled.
    #[inline]
    pub fn ilo(&self) -> usize {
        self.ilo
    }

    /// Last row of the block that was scaled.
    #[inline]
    pub fn ihi(&self) -> usize {
        self.ihi
    }

    /// The diagonal of `D`.
    pub fn scaling(&self) -> DenseVector<T::Real> {
        recorded_scaling(&self.scale, self.ilo, self.ihi)
    }

    /// `p` with `(P^T A P)(i, j) = A(p[i], p[j])`.
    pub fn permutation(&self) -> Vec<usize> {
        recorded_permutation(&self.scale, self.ilo, self.ihi)
    }

    /// The balancing matrix `T`, with `A T = T B` for the balanced `B`.
    pub fn transform<O: OrientationTag>(&self) -> Result<DenseMatrix<T, O>> {
        let n = self.scale.len();
        let mut t = ColMajorMatrix::<T>::identity(n);
        let info = <ActiveKernel as Kernel<T>>::gebak(
            self.job,
            Side::Right,
            n,
            self.ilo,
            self.ihi,
            &self.scale,
            n,
            t.as_mut_slice(),
            ld(n),
        );
        check_status("gebak", info)?;
        Ok(reorient(&t))
    }
}

fn balance_buffer<T: Scalar>(a: &mut ColMajorMatrix<T>, job: BalanceJob) -> Result<Balancing<T>> {
    let (rows, cols) = a.shape();
    ensure_square(rows, cols)?;
    let n = rows;
    let (mut ilo, mut ihi) = (0, 0);
    let mut scale = vec![<T::Real as One>::one(); n];
    let info = <ActiveKernel as Kernel<T>>::gebal(
        job,
        n,
        a.as_mut_slice(),
        ld(n),
        &mut ilo,
        &mut ihi,
        &mut scale,
    );
    if info == -3 {
        return Err(LinextError::InvalidArgument("matrix contains NaN"));
    }
    check_status("gebal", info)?;
    Ok(Balancing {
        job,
        ilo,
        ihi,
        scale,
    })
}

/// Balance a square matrix. Returns the balanced matrix in the orientation
/// of `a` and the transformation that produced it.
///
/// ```rust
/// use linext::{balance, BalanceJob, DenseMatrix};
///
/// let a = DenseMatrix::<f64>::from_rows(&[[1.0, 100.0], [0.01, 1.0]]).unwrap();
/// let (b, bal) = balance(&a, BalanceJob::Scale).unwrap();
/// assert!(b[(0, 1)] < a[(0, 1)]);
/// assert_eq!(bal.permutation(), vec![0, 1]);
/// ```
pub fn balance<M>(
    a: &M,
    job: BalanceJob,
) -> Result<(DenseMatrix<M::Elem, M::Orientation>, Balancing<M::Elem>)>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let mut work = materialize(a);
    let balancing = balance_buffer(&mut work, job)?;
    Ok((reorient(&work), balancing))
}

/// Balance `a` in place.
pub fn balance_inplace<M>(a: &mut M, job: BalanceJob) -> Result<Balancing<M::Elem>>
where
    M: MatrixExprMut + MaybeSync,
    M::Elem: Scalar,
{
    let mut work = materialize(&*a);
    let balancing = balance_buffer(&mut work, job)?;
    a.assign(&work)?;
    Ok(balancing)
}

/// Outcome of balancing a pencil: `B_A = L^T A R`, `B_B = L^T B R`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairBalancing<T: Scalar> {
    job: BalanceJob,
    ilo: usize,
    ihi: usize,
    lscale: Vec<T::Real>,
    rscale: Vec<T::Real>,
}

impl<T: Scalar> PairBalancing<T> {
    #[inline]
    pub fn job(&self) -> BalanceJob {
        self.job
    }

    #[inline]
    pub fn ilo(&self) -> usize {
        self.ilo
    }

    #[inline]
    pub fn ihi(&self) -> usize {
        self.ihi
    }

    pub fn left_scaling(&self) -> DenseVector<T::Real> {
        recorded_scaling(&self.lscale, self.ilo, self.ihi)
    }

    pub fn right_scaling(&self) -> DenseVector<T::Real> {
        recorded_scaling(&self.rscale, self.ilo, self.ihi)
    }

    /// Row permutation applied to both matrices.
    pub fn left_permutation(&self) -> Vec<usize> {
        recorded_permutation(&self.lscale, self.ilo, self.ihi)
    }

    /// Column permutation applied to both matrices.
    pub fn right_permutation(&self) -> Vec<usize> {
        recorded_permutation(&self.rscale, self.ilo, self.ihi)
    }

    fn back_transform<O: OrientationTag>(&self, side: Side) -> Result<DenseMatrix<T, O>> {
        let n = self.lscale.len();
        let mut t = DenseMatrix::<T, ColumnMajor>::identity(n);
        let info = <ActiveKernel as Kernel<T>>::ggbak(
            self.job,
            side,
            n,
            self.ilo,
            self.ihi,
            &self.lscale,
            &self.rscale,
            n,
            t.as_mut_slice(),
            ld(n),
        );
        check_status("ggbak", info)?;
        Ok(reorient(&t))
    }

    /// The left balancing matrix `L`.
    pub fn left<O: OrientationTag>(&self) -> Result<DenseMatrix<T, O>> {
        self.back_transform(Side::Left)
    }

    /// The right balancing matrix `R`.
    pub fn right<O: OrientationTag>(&self) -> Result<DenseMatrix<T, O>> {
        self.back_transform(Side::Right)
    }
}

/// Balance the pencil `(a, b)` for the generalized eigenproblem.
#[allow(clippy::type_complexity)]
pub fn balance_pair<A, B>(
    a: &A,
    b: &B,
    job: BalanceJob,
) -> Result<(
    DenseMatrix<A::Elem, A::Orientation>,
    DenseMatrix<A::Elem, B::Orientation>,
    PairBalancing<A::Elem>,
)>
where
    A: MatrixExpr + MaybeSync,
    B: MatrixExpr<Elem = A::Elem> + MaybeSync,
    A::Elem: Scalar,
{
    ensure_square(a.nrows(), a.ncols())?;
    if b.shape() != a.shape() {
        return Err(
            LinextError::InvalidArgument("pencil matrices differ in shape"),
        );
    }
    let n = a.nrows();
    let mut wa = materialize(a);
    let mut wb = materialize(b);
    let (mut ilo, mut ihi) = (0, 0);
    let one = <<A::Elem as Scalar>::Real as One>::one();
    let (mut lscale, mut rscale) = (vec![one; n], vec![one; n]);
    let info = <ActiveKernel as Kernel<A::Elem>>::ggbal(
        job,
        n,
        wa.as_mut_slice(),
        ld(n),
        wb.as_mut_slice(),
        ld(n),
        &mut ilo,
        &mut ihi,
        &mut lscale,
        &mut rscale,
    );
    check_status("ggbal", info)?;
    Ok((
        reorient(&wa),
        reorient(&wb),
        PairBalancing {
            job,
            ilo,
            ihi,
            lscale,
            rscale,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::prod;
    use approx::assert_relative_eq;
    use linext_traits::RowMajor;
    use linext_view::{Transposed, VectorExpr};

    fn assert_close<A, B>(a: &A, b: &B, tol: f64)
    where
        A: MatrixExpr<Elem = f64>,
        B: MatrixExpr<Elem = f64>,
    {
        assert_eq!(a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_relative_eq!(a.at(i, j), b.at(i, j), epsilon = tol);
            }
        }
    }

    fn badly_scaled() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[
            [1.0, 1e4, 1e-2, 0.0],
            [1e-4, 2.0, 1e-6, 3.0],
            [1e2, 1e6, 3.0, 1e3],
            [0.0, 5e-3, 1e-1, 4.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_similarity() {
        let a = badly_scaled();
        for &job in &[
            BalanceJob::Nothing,
            BalanceJob::Permute,
            BalanceJob::Scale,
            BalanceJob::Both,
        ] {
            let (b, bal) = balance(&a, job).unwrap();
            let t = bal.transform::<RowMajor>().unwrap();
            assert_close(&prod(&a, &t).unwrap(), &prod(&t, &b).unwrap(), 1e-6);
        }
    }

    #[test]
    fn test_scaling_reduces_norm() {
        let a = badly_scaled();
        let (b, bal) = balance(&a, BalanceJob::Scale).unwrap();
        let norm = |m: &DenseMatrix<f64>| m.as_slice().iter().map(|x| x * x).sum::<f64>();
        assert!(norm(&b) < norm(&a));

        // b = D^-1 a D with exact power-of-two factors.
        let d = bal.scaling();
        for x in d.as_slice() {
            assert_eq!(x.log2().fract(), 0.0);
        }
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(
                    b[(i, j)],
                    a[(i, j)] * d.at(j) / d.at(i),
                    max_relative = 1e-14
                );
            }
        }
        assert_eq!(bal.permutation(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_permutation_isolates_eigenvalues() {
        // Row 1 has no off-diagonal entry: its eigenvalue 5 is isolated.
        let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [0.0, 5.0, 0.0], [4.0, 6.0, 7.0]])
            .unwrap();
        let (b, bal) = balance(&a, BalanceJob::Permute).unwrap();
        let p = bal.permutation();
        assert_eq!(p[2], 1);
        assert_eq!(bal.ihi(), 1);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(b[(i, j)], a[(p[i], p[j])]);
            }
        }
        assert_eq!(b[(2, 2)], 5.0);
        assert_eq!(bal.scaling().into_vec(), vec![1.0; 3]);
    }

    #[test]
    fn test_inplace_and_errors() {
        let a = badly_scaled();
        let (b, _) = balance(&a, BalanceJob::Both).unwrap();
        let mut c = a.clone();
        balance_inplace(&mut c, BalanceJob::Both).unwrap();
        assert_eq!(c, b);

        let rect = DenseMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            balance(&rect, BalanceJob::Both).unwrap_err(),
            LinextError::NotSquare { rows: 2, cols: 3 }
        );
        let nan = DenseMatrix::<f64>::from_rows(&[[f64::NAN, 1.0], [1.0, 1.0]]).unwrap();
        assert!(matches!(
            balance(&nan, BalanceJob::Scale),
            Err(LinextError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_pair_transforms() {
        let a = badly_scaled();
        let b = DenseMatrix::<f64>::from_rows(&[
            [2.0, 0.0, 1e-3, 0.0],
            [0.0, 1.0, 0.0, 1e2],
            [1e3, 0.0, 1.0, 0.0],
            [0.0, 1e-2, 0.0, 3.0],
        ])
        .unwrap();
        let (ba, bb, bal) = balance_pair(&a, &b, BalanceJob::Both).unwrap();
        let l = bal.left::<RowMajor>().unwrap();
        let r = bal.right::<RowMajor>().unwrap();

        let lt = Transposed::new(&l);
        assert_close(&prod(&prod(&lt, &a).unwrap(), &r).unwrap(), &ba, 1e-9);
        assert_close(&prod(&prod(&lt, &b).unwrap(), &r).unwrap(), &bb, 1e-9);
        assert_eq!(bal.left_permutation().len(), 4);
        assert_eq!(bal.right_scaling().len(), 4);

        let small = DenseMatrix::<f64>::identity(3);
        assert!(matches!(
            balance_pair(&a, &small, BalanceJob::Both),
            Err(LinextError::InvalidArgument(_))
        ));
    }
}
