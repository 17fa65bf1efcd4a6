use approx::assert_relative_eq;
use linext::{
    cat_columns, cat_rows, cumsum, lu_solve, max_dim, prod, qr_decompose, rcond, reshape,
    reshape_dim, sum, sum_all, sum_columns, sum_rows, DenseMatrix, DenseVector, MatrixExpr,
    QrMode, Transposed, VectorExpr,
};

fn rows<const N: usize>(r: &[[f64; N]]) -> DenseMatrix<f64> {
    DenseMatrix::from_rows(r).unwrap()
}

#[test]
fn test_lu_solve() {
    let a = rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
    let b = DenseVector::from_vec(vec![6.0, 15.0, 25.0]);
    let x = lu_solve(&a, &b).unwrap();
    assert_eq!(x.len(), 3);
    for xi in x.as_slice() {
        assert_relative_eq!(*xi, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_qr_round_trip() {
    let a = rows(&[
        [12.0, -51.0, 4.0],
        [6.0, 167.0, -68.0],
        [-4.0, 24.0, -41.0],
    ]);
    let qr = qr_decompose(&a, QrMode::Full).unwrap();
    let q = qr.q().unwrap();
    let r = qr.r();

    let qqt = prod(&q, &Transposed::new(&q)).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(
                qqt.at(i, j),
                if i == j { 1.0 } else { 0.0 },
                epsilon = 1e-12
            );
        }
    }
    let back = prod(&q, &r).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(back.at(i, j), a.at(i, j), epsilon = 1e-10);
        }
    }
}

#[test]
fn test_reductions() {
    let a = rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    assert_eq!(sum_columns(&a).into_vec(), vec![6.0, 15.0]);
    assert_eq!(sum_rows(&a).into_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(sum(&a).into_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(sum_all(&a), 21.0);
    assert_eq!(cumsum(&a), rows(&[[1.0, 2.0, 3.0], [5.0, 7.0, 9.0]]));
    assert_eq!(max_dim::<1, _>(&a).into_vec(), vec![3.0, 6.0]);
}

#[test]
fn test_shape() {
    let v = DenseVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(
        reshape(&v, 2, 3).unwrap(),
        rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
    );

    let a = rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    assert_eq!(
        reshape_dim::<2, _>(&a, 3, 2).unwrap(),
        rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])
    );
}

#[test]
fn test_catenation() {
    let joined = cat_rows(&rows(&[[1.0, 2.0], [3.0, 4.0]]), &rows(&[[5.0], [6.0]]));
    assert_eq!(joined, rows(&[[1.0, 2.0, 5.0], [3.0, 4.0, 6.0]]));

    let stacked = cat_columns(&rows(&[[1.0, 2.0]]), &rows(&[[3.0, 4.0], [5.0, 6.0]]));
    assert_eq!(stacked, rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]));
}

#[test]
fn test_reciprocal_condition() {
    let singular = rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    assert!(rcond(&singular).unwrap() <= 1e-15);

    let a = rows(&[
        [-0.23, 2.54, -3.66, 0.0],
        [-6.98, 2.46, -2.73, -2.13],
        [0.0, 2.56, 2.46, 4.07],
        [0.0, 0.0, -4.78, -3.82],
    ]);
    assert_relative_eq!(rcond(&a).unwrap(), 0.01773, epsilon = 5e-5);
}
