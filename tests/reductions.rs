use approx::assert_relative_eq;
use linext::{
    all, all_dim, any, any_by_tag, any_dim, any_nonzero, cumsum_by_tag, cumsum_dim, for_each,
    for_each_dim, max, max_by_tag, max_dim, min, min_by_tag, min_dim, sum, sum_all, sum_by_tag,
    sum_dim, vector_min_dim, ColumnMajor, DenseMatrix, DenseVector, Major, Minor, RowMajor,
};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pair(
    seed: u64,
    rows: usize,
    cols: usize,
) -> (DenseMatrix<f64, RowMajor>, DenseMatrix<f64, ColumnMajor>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let r = DenseMatrix::<f64>::from_fn(rows, cols, |_, _| rng.gen_range(-5.0..5.0));
    let c = r.to_orientation::<ColumnMajor>();
    (r, c)
}

#[test]
fn test_tags_resolve_to_dimensions() {
    let (r, c) = random_pair(5, 7, 4);

    // Major is dimension 1 on a row-major matrix and dimension 2 on a
    // column-major one.
    assert_eq!(sum_by_tag::<Major, _>(&r), sum_dim::<1, _>(&r));
    assert_eq!(sum_by_tag::<Minor, _>(&r), sum_dim::<2, _>(&r));
    assert_eq!(sum_by_tag::<Major, _>(&c), sum_dim::<2, _>(&c));
    assert_eq!(sum_by_tag::<Minor, _>(&c), sum_dim::<1, _>(&c));

    assert_eq!(max_by_tag::<Major, _>(&r), max_dim::<1, _>(&r));
    assert_eq!(min_by_tag::<Major, _>(&c), min_dim::<2, _>(&c));
    assert_eq!(cumsum_by_tag::<Minor, _>(&c), cumsum_dim::<1, _>(&c));

    let positive = |x: f64| x > 0.0;
    assert_eq!(
        any_by_tag::<Major, _, _>(&r, positive),
        any_dim::<1, _, _>(&r, positive)
    );
}

#[test]
fn test_orientation_does_not_change_results() {
    let (r, c) = random_pair(9, 5, 6);
    let (sr, sc) = (sum_dim::<1, _>(&r), sum_dim::<1, _>(&c));
    for (x, y) in sr.as_slice().iter().zip(sc.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
    assert_eq!(max(&r), max(&c));
    assert_eq!(min(&r), min(&c));
    assert_relative_eq!(sum_all(&r), sum_all(&c), epsilon = 1e-12);
}

#[test]
fn test_empty_containers() {
    let e = DenseVector::<f64>::zeros(0);
    assert_eq!(min(&e), f64::INFINITY);
    assert_eq!(max(&e), f64::NEG_INFINITY);
    assert_eq!(sum(&e), 0.0);
    assert!(!any(&e, |x: f64| x != 0.0));
    assert!(all(&e, |x: f64| x != 0.0));
    assert_eq!(vector_min_dim::<1, _>(&e).into_vec(), vec![f64::INFINITY]);

    let m = DenseMatrix::<f64>::zeros(0, 3);
    assert_eq!(sum(&m).into_vec(), vec![0.0; 3]);
    assert!(!any_nonzero(&m));
}

#[test]
fn test_nan_is_skipped_by_extrema() {
    let v = DenseVector::from_vec(vec![f64::NAN, 2.0, -1.0, f64::NAN]);
    assert_eq!(min(&v), -1.0);
    assert_eq!(max(&v), 2.0);
}

#[test]
fn test_complex_extrema_by_modulus_then_phase() {
    let v = DenseVector::from_vec(vec![
        Complex64::new(0.0, 1.0),
        Complex64::new(-1.0, 0.0),
        Complex64::new(0.5, 0.0),
        Complex64::new(1.0, 0.0),
    ]);
    assert_eq!(min(&v), Complex64::new(0.5, 0.0));
    // Modulus ties at 1: the phase of -1 is the largest.
    assert_eq!(max(&v), Complex64::new(-1.0, 0.0));
}

#[test]
fn test_visitors_follow_traversal_order() {
    let m = DenseMatrix::<i32>::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    let mut seen = Vec::new();
    for_each(&m, |x| seen.push(x));
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);

    let mut by_row = Vec::new();
    for_each_dim::<1, _, _>(&m, |x| by_row.push(x));
    assert_eq!(by_row, vec![1, 2, 3, 4, 5, 6]);
    let mut by_col = Vec::new();
    for_each_dim::<2, _, _>(&m, |x| by_col.push(x));
    assert_eq!(by_col, vec![1, 4, 2, 5, 3, 6]);

    assert_eq!(
        all_dim::<2, _, _>(&m, |x| x > 1).into_vec(),
        vec![false, true, true]
    );
}
