//! Arithmetic progression vector.

use crate::expr::VectorExpr;
use linext_traits::{Closure, DenseStorage, RealScalar, Scalar};
use num_traits::Zero;

/// `v(i) = start + i * stride` for `i < size`, with no element storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceVector<T> {
    start: T,
    stride: T,
    size: usize,
}

impl<T: Scalar> SequenceVector<T> {
    #[inline]
    pub fn new(start: T, stride: T, size: usize) -> Self {
        Self {
            start,
            stride,
            size,
        }
    }

    /// `n` evenly spaced values from `a` to `b` inclusive.
    ///
    /// A single point yields `[b]`; no points yield an empty sequence.
    pub fn linspace(a: T, b: T, n: usize) -> Self {
        match n {
            0 => Self::new(a, T::zero(), 0),
            1 => Self::new(b, T::zero(), 1),
            _ => {
                let steps = T::from_real(<T::Real as RealScalar>::from_usize(n - 1));
                Self::new(a, (b - a) / steps, n)
            }
        }
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub fn stride(&self) -> T {
        self.stride
    }

    /// Rebind all three parameters.
    #[inline]
    pub fn assign(&mut self, start: T, stride: T, size: usize) {
        self.start = start;
        self.stride = stride;
        self.size = size;
    }

    /// Change the length only; start and stride are kept.
    #[inline]
    pub fn resize(&mut self, size: usize) {
        self.size = size;
    }
}

impl<T: Scalar> VectorExpr for SequenceVector<T> {
    type Elem = T;
    type Storage = DenseStorage;
    const CLOSURE: Closure = Closure::Owned;

    #[inline(always)]
    fn len(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn at(&self, i: usize) -> T {
        assert!(
            i < self.size,
            "index {i} out of range for length {}",
            self.size
        );
        self.start + self.stride * T::from_real(<T::Real as RealScalar>::from_usize(i))
    }
}
