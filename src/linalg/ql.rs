//! Householder QL factorization, `A = Q L`.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::qr::QrMode;
use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, Side, Trans};
use linext_traits::{OrientationTag, RowMajor, Scalar};
use linext_view::{
    ColMajorMatrix, DenseMatrix, LinextError, MatrixExpr, ResizableMatrix, Result,
};
use num_traits::Zero;

/// Factor shapes follow [`QrMode`]: in economy mode `Q` is `m x k` and `L`
/// the bottom `k` rows of the full `m x n` factor.
pub type QlMode = QrMode;

/// Packed QL factors. Reflector `i` lives in column `n - k + i`.
///
/// Like [`Qr`](super::qr::Qr), the packed buffer is kept in a [`RefCell`]
/// and the type is not `Sync`.
#[derive(Debug, Clone)]
pub struct Ql<T, O = RowMajor> {
    packed: RefCell<ColMajorMatrix<T>>,
    tau: Vec<T>,
    mode: QlMode,
    _orientation: PhantomData<O>,
}

impl<T: Scalar, O: OrientationTag> Ql<T, O> {
    #[inline]
    pub fn mode(&self) -> QlMode {
        self.mode
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.packed.borrow().shape()
    }

    #[inline]
    pub fn tau(&self) -> &[T] {
        &self.tau
    }

    pub fn q(&self) -> Result<DenseMatrix<T, O>> {
        let packed = self.packed.borrow();
        let (m, n) = packed.shape();
        let k = m.min(n);
        let cols = match self.mode {
            QrMode::Full => m,
            QrMode::Economy => k,
        };
        // Reflectors go to the last k columns of the buffer.
        let mut q = ColMajorMatrix::<T>::zeros(m, cols);
        q.as_mut_slice()[(cols - k) * m..].copy_from_slice(&packed.as_slice()[(n - k) * m..]);
        let info = <ActiveKernel as Kernel<T>>::ungql(
            m,
            cols,
            k,
            q.as_mut_slice(),
            ld(m),
            &self.tau,
        );
        check_status("ungql", info)?;
        Ok(reorient(&q))
    }

    /// The lower triangular (trapezoidal) factor.
    pub fn l(&self) -> DenseMatrix<T, O> {
        let packed = self.packed.borrow();
        let (m, n) = packed.shape();
        let k = m.min(n);
        let (rows, skip) = match self.mode {
            QrMode::Full => (m, 0),
            QrMode::Economy => (k, m - k),
        };
        DenseMatrix::from_fn(rows, n, |i, j| {
            let i = i + skip;
            if j + m <= i + n {
                packed.at(i, j)
            } else {
                T::zero()
            }
        })
    }

    fn apply<C>(&self, side: Side, trans: Trans, c: &C) -> Result<DenseMatrix<T, C::Orientation>>
    where
        C: MatrixExpr<Elem = T> + MaybeSync,
    {
        let mut packed = self.packed.borrow_mut();
        let (m, n) = packed.shape();
        let k = m.min(n);
        let (rows, cols) = c.shape();
        let order = match side {
            Side::Left => rows,
            Side::Right => cols,
        };
        if order != m {
            return Err(LinextError::BadSize {
                expected: m,
                actual: order,
            });
        }
        let mut out = materialize(c);
        let info = <ActiveKernel as Kernel<T>>::unmql(
            side,
            trans,
            rows,
            cols,
            k,
            &mut packed.as_mut_slice()[(n - k) * m..],
            ld(m),
            &self.tau,
            out.as_mut_slice(),
            ld(rows),
        );
        check_status("unmql", info)?;
        Ok(reorient(&out))
    }

    /// `Q C`.
    pub fn prod_q<C>(&self, c: &C) -> Result<DenseMatrix<T, C::Orientation>>
    where
        C: MatrixExpr<Elem = T> + MaybeSync,
    {
        self.apply(Side::Left, Trans::NoTrans, c)
    }

    /// `Q^H C`.
    pub fn prod_q_adjoint<C>(&self, c: &C) -> Result<DenseMatrix<T, C::Orientation>>
    where
        C: MatrixExpr<Elem = T> + MaybeSync,
    {
        self.apply(Side::Left, Trans::ConjTrans, c)
    }

    /// `C Q`.
    pub fn prod_right<C>(&self, c: &C) -> Result<DenseMatrix<T, C::Orientation>>
    where
        C: MatrixExpr<Elem = T> + MaybeSync,
    {
        self.apply(Side::Right, Trans::NoTrans, c)
    }

    /// `C Q^H`.
    pub fn prod_right_adjoint<C>(&self, c: &C) -> Result<DenseMatrix<T, C::Orientation>>
    where
        C: MatrixExpr<Elem = T> + MaybeSync,
    {
        self.apply(Side::Right, Trans::ConjTrans, c)
    }
}

pub fn ql_decompose<M>(a: &M, mode: QlMode) -> Result<Ql<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let mut packed = materialize(a);
    let (m, n) = packed.shape();
    let mut tau = vec![M::Elem::zero(); m.min(n)];
    let info = <ActiveKernel as Kernel<M::Elem>>::geqlf(
        m,
        n,
        packed.as_mut_slice(),
        ld(m),
        &mut tau,
    );
    check_status("geqlf", info)?;
    Ok(Ql {
        packed: RefCell::new(packed),
        tau,
        mode,
        _orientation: PhantomData,
    })
}

/// Factor `a` and store `Q` and `L` into caller containers.
pub fn ql_decompose_into<M, Q, L>(a: &M, mode: QlMode, q: &mut Q, l: &mut L) -> Result<()>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    Q: ResizableMatrix<Elem = M::Elem>,
    L: ResizableMatrix<Elem = M::Elem>,
{
    let ql = ql_decompose(a, mode)?;
    let (qf, lf) = (ql.q()?, ql.l());
    q.resize(qf.nrows(), qf.ncols(), false);
    q.assign(&qf)?;
    l.resize(lf.nrows(), lf.ncols(), false);
    l.assign(&lf)
}
