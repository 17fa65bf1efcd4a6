//! Householder QR factorization, `A = Q R`.
//!
//! The factorization keeps the packed kernel form. `Q` and `R` are built on
//! request, and products with `Q` apply the reflectors directly without
//! forming `Q`.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::{check_status, ld, materialize, reorient};
use crate::maybe_sync::MaybeSync;
use linext_kernel::{ActiveKernel, Kernel, Side, Trans};
use linext_traits::{OrientationTag, RowMajor, Scalar};
use linext_view::{
    ColMajorMatrix, DenseMatrix, LinextError, MatrixExpr, ResizableMatrix, Result,
};
use num_traits::Zero;

/// Shape of the factors of an `m x n` matrix, with `k = min(m, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QrMode {
    /// `Q` is `m x m`, the triangular factor `m x n`.
    #[default]
    Full,
    /// `Q` is `m x k`, the triangular factor `k x n`.
    Economy,
}

/// Packed QR factors.
///
/// The packed buffer sits in a [`RefCell`]: applying the reflectors borrows
/// it mutably for the duration of the kernel call, so the products can be
/// taken from `&self`. A `Qr` is therefore not `Sync`.
#[derive(Debug, Clone)]
pub struct Qr<T, O = RowMajor> {
    packed: RefCell<ColMajorMatrix<T>>,
    tau: Vec<T>,
    mode: QrMode,
    _orientation: PhantomData<O>,
}

impl<T: Scalar, O: OrientationTag> Qr<T, O> {
    #[inline]
    pub fn mode(&self) -> QrMode {
        self.mode
    }

    /// Shape of the factored matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.packed.borrow().shape()
    }

    /// Reflector scalars.
    #[inline]
    pub fn tau(&self) -> &[T] {
        &self.tau
    }

    /// The orthogonal (unitary) factor.
    pub fn q(&self) -> Result<DenseMatrix<T, O>> {
        let packed = self.packed.borrow();
        let (m, n) = packed.shape();
        let k = m.min(n);
        let cols = match self.mode {
            QrMode::Full => m,
            QrMode::Economy => k,
        };
        let mut q = ColMajorMatrix::<T>::zeros(m, cols);
        q.as_mut_slice()[..m * k].copy_from_slice(&packed.as_slice()[..m * k]);
        let info = <ActiveKernel as Kernel<T>>::ungqr(
            m,
            cols,
            k,
            q.as_mut_slice(),
            ld(m),
            &self.tau,
        );
        check_status("ungqr", info)?;
        Ok(reorient(&q))
    }

    /// The upper triangular (trapezoidal) factor.
    pub fn r(&self) -> DenseMatrix<T, O> {
        let packed = self.packed.borrow();
        let (m, n) = packed.shape();
        let rows = match self.mode {
            QrMode::Full => m,
            QrMode::Economy => m.min(n),
        };
        DenseMatrix::from_fn(rows, n, |i, j| {
            if i <= j {
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
        let info = <ActiveKernel as Kernel<T>>::unmqr(
            side,
            trans,
            rows,
            cols,
            k,
            packed.as_mut_slice(),
            ld(m),
            &self.tau,
            out.as_mut_slice(),
            ld(rows),
        );
        check_status("unmqr", info)?;
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

pub fn qr_decompose<M>(a: &M, mode: QrMode) -> Result<Qr<M::Elem, M::Orientation>>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
{
    let mut packed = materialize(a);
    let (m, n) = packed.shape();
    let mut tau = vec![M::Elem::zero(); m.min(n)];
    let info = <ActiveKernel as Kernel<M::Elem>>::geqrf(
        m,
        n,
        packed.as_mut_slice(),
        ld(m),
        &mut tau,
    );
    check_status("geqrf", info)?;
    Ok(Qr {
        packed: RefCell::new(packed),
        tau,
        mode,
        _orientation: PhantomData,
    })
}

/// Factor `a` and store `Q` and `R` into caller containers, resized to the
/// shapes `mode` implies.
pub fn qr_decompose_into<M, Q, R>(a: &M, mode: QrMode, q: &mut Q, r: &mut R) -> Result<()>
where
    M: MatrixExpr + MaybeSync,
    M::Elem: Scalar,
    Q: ResizableMatrix<Elem = M::Elem>,
    R: ResizableMatrix<Elem = M::Elem>,
{
    let qr = qr_decompose(a, mode)?;
    let (qf, rf) = (qr.q()?, qr.r());
    q.resize(qf.nrows(), qf.ncols(), false);
    q.assign(&qf)?;
    r.resize(rf.nrows(), rf.ncols(), false);
    r.assign(&rf)
}
