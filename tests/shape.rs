use linext::{
    cat_columns, cat_rows, diag, diag_with_shape, linspace, num_columns, num_rows,
    reshape_by_tag, reshape_dim, reshape_inplace_dim, size, size_by_tag, size_dim, tril, triu,
    ColumnMajor, DenseMatrix, DenseVector, LinextError, Major, MatrixExpr, SequenceVector,
    VectorExpr,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_size_queries_agree() {
    let m = DenseMatrix::<f64, ColumnMajor>::zeros(3, 8);
    assert_eq!(size_dim::<1, _>(&m), num_rows(&m));
    assert_eq!(size_dim::<2, _>(&m), num_columns(&m));
    assert_eq!(size_by_tag::<Major, _>(&m), 8);
    assert_eq!(size(&linspace(0.0, 1.0, 11)), 11);
}

#[test]
fn test_reshape_round_trip() {
    let mut rng = StdRng::seed_from_u64(21);
    let a = DenseMatrix::<i64>::from_fn(4, 6, |_, _| rng.gen_range(-100..100));

    let there = reshape_dim::<1, _>(&a, 3, 8).unwrap();
    let back = reshape_dim::<1, _>(&there, 4, 6).unwrap();
    assert_eq!(back, a);

    let there = reshape_dim::<2, _>(&a, 8, 3).unwrap();
    assert_eq!(reshape_dim::<2, _>(&there, 4, 6).unwrap(), a);

    let mut elements: Vec<i64> = there.as_slice().to_vec();
    let mut original: Vec<i64> = a.as_slice().to_vec();
    elements.sort_unstable();
    original.sort_unstable();
    assert_eq!(elements, original);

    assert_eq!(
        reshape_by_tag::<Major, _>(&a, 2, 12).unwrap(),
        reshape_dim::<1, _>(&a, 2, 12).unwrap()
    );
    assert_eq!(
        reshape_dim::<1, _>(&a, 5, 5).unwrap_err(),
        LinextError::BadSize {
            expected: 24,
            actual: 25,
        }
    );
}

#[test]
fn test_reshape_inplace_resizes_target() {
    let mut a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    reshape_inplace_dim::<2, _>(&mut a, 3, 2).unwrap();
    assert_eq!(a.shape(), (3, 2));
    assert_eq!(
        a,
        DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap()
    );
}

#[test]
fn test_triangles_partition_the_matrix() {
    let mut rng = StdRng::seed_from_u64(4);
    for (rows, cols) in [(4, 4), (3, 6), (6, 3)] {
        let a = DenseMatrix::<f64>::from_fn(rows, cols, |_, _| rng.gen_range(1.0..2.0));
        for k in -7isize..=7 {
            let upper = triu(&a, k);
            let strict_lower = tril(&a, k - 1);
            for i in 0..rows {
                for j in 0..cols {
                    let d = j as isize - i as isize;
                    assert_eq!(upper.at(i, j) == 0.0, d < k);
                    assert_eq!(upper.at(i, j) + strict_lower.at(i, j), a.at(i, j));
                }
            }
        }
    }
}

#[test]
fn test_diag_with_large_offset() {
    let v = DenseVector::from_vec(vec![1.0, 2.0]);
    let d = diag(&v, 3);
    assert_eq!(d.shape(), (5, 5));
    assert_eq!(d.at(0, 3), 1.0);
    assert_eq!(d.at(1, 4), 2.0);
    assert_eq!(d.as_slice().iter().filter(|&&x| x != 0.0).count(), 2);

    let r = diag_with_shape(&SequenceVector::new(1.0, 1.0, 5), 2, 3, 0);
    assert_eq!(
        r,
        DenseMatrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]).unwrap()
    );
}

#[test]
fn test_cat_pads_with_zero() {
    let mut rng = StdRng::seed_from_u64(8);
    let a = DenseMatrix::<f64>::from_fn(3, 2, |_, _| rng.gen_range(1.0..2.0));
    let b = DenseMatrix::<f64, ColumnMajor>::from_fn(5, 4, |_, _| rng.gen_range(1.0..2.0));

    let h = cat_rows(&a, &b);
    assert_eq!(h.shape(), (5, 6));
    for i in 0..5 {
        for j in 0..6 {
            let expected = if j < 2 {
                if i < 3 { a.at(i, j) } else { 0.0 }
            } else {
                b.at(i, j - 2)
            };
            assert_eq!(h.at(i, j), expected);
        }
    }

    let v = cat_columns(&a, &b);
    assert_eq!(v.shape(), (8, 4));
    assert_eq!(v.at(2, 3), 0.0);
    assert_eq!(v.at(7, 3), b.at(4, 3));
}

#[test]
fn test_sequence_vector_rebinds() {
    let mut s = SequenceVector::new(0.0, 0.5, 4);
    assert_eq!(s.to_dense().into_vec(), vec![0.0, 0.5, 1.0, 1.5]);
    s.assign(10.0, -1.0, 2);
    assert_eq!(s.to_dense().into_vec(), vec![10.0, 9.0]);
    s.resize(3);
    assert_eq!(s.at(2), 8.0);
}
