//! Free-function constructors for [`SequenceVector`].

use linext_traits::Scalar;
use linext_view::SequenceVector;

/// `start, start + stride, ...` with `n` elements.
#[inline]
pub fn seq<T: Scalar>(start: T, stride: T, n: usize) -> SequenceVector<T> {
    SequenceVector::new(start, stride, n)
}

/// `n` evenly spaced points from `a` to `b`, both ends included.
#[inline]
pub fn linspace<T: Scalar>(a: T, b: T, n: usize) -> SequenceVector<T> {
    SequenceVector::linspace(a, b, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use linext_view::VectorExpr;
    use num_complex::Complex64;

    #[test]
    fn test_seq_and_linspace() {
        assert_eq!(seq(2.0, -1.0, 3).to_dense().into_vec(), vec![2.0, 1.0, 0.0]);

        let s = linspace(-1.0, 1.0, 5);
        assert_eq!(s.len(), 5);
        assert_relative_eq!(s.at(3), 0.5);

        let z = linspace(Complex64::new(0.0, 0.0), Complex64::new(2.0, 2.0), 3);
        assert_eq!(z.at(1), Complex64::new(1.0, 1.0));
    }
}
