use approx::assert_relative_eq;
use linext::{
    balance, cholesky_decompose, cond_1, cond_2, inv, llsq, llsq_qr, lu_decompose, lu_factors,
    norm_1, norm_2, norm_frobenius, prod, ql_decompose, qr_decompose, rcond, svd_decompose,
    BalanceJob, ColumnMajor, DenseMatrix, DenseVector, DiagonalMatrix, MatrixExpr, QrMode,
    SvdJob, Transposed, VectorExpr,
};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-5;

fn random(seed: u64, rows: usize, cols: usize) -> DenseMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    DenseMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

fn assert_close<A, B>(a: &A, b: &B)
where
    A: MatrixExpr<Elem = f64>,
    B: MatrixExpr<Elem = f64>,
{
    assert_eq!(a.shape(), b.shape());
    let (rows, cols) = a.shape();
    for i in 0..rows {
        for j in 0..cols {
            assert_relative_eq!(a.at(i, j), b.at(i, j), epsilon = TOL);
        }
    }
}

#[test]
fn test_lu_reconstructs_permuted_input() {
    for (seed, rows, cols) in [(1, 5, 5), (2, 7, 4), (3, 3, 6)] {
        let a = random(seed, rows, cols);
        let mut l = DenseMatrix::<f64, ColumnMajor>::zeros(0, 0);
        let mut u = DenseMatrix::<f64>::zeros(0, 0);
        let mut p = Vec::new();
        assert_eq!(lu_factors(&a, &mut l, &mut u, &mut p).unwrap(), 0);
        let pa = DenseMatrix::<f64>::from_fn(rows, cols, |i, j| a.at(p[i], j));
        assert_close(&prod(&l, &u).unwrap(), &pa);
    }
}

#[test]
fn test_qr_and_ql_round_trips() {
    for (seed, rows, cols) in [(4, 6, 6), (5, 8, 3), (6, 3, 8)] {
        let a = random(seed, rows, cols);
        for mode in [QrMode::Full, QrMode::Economy] {
            let qr = qr_decompose(&a, mode).unwrap();
            assert_close(&prod(&qr.q().unwrap(), &qr.r()).unwrap(), &a);

            let ql = ql_decompose(&a, mode).unwrap();
            assert_close(&prod(&ql.q().unwrap(), &ql.l()).unwrap(), &a);
        }
    }
}

#[test]
fn test_svd_round_trip() {
    let a = random(7, 6, 4);
    let svd = svd_decompose(&a, SvdJob::Thin, SvdJob::Thin).unwrap();
    let (u, vt) = (svd.u().unwrap(), svd.vt().unwrap());
    let s = DiagonalMatrix::square(svd.singular_values(), 0);
    let us = prod(&u, &s).unwrap();
    assert_close(&prod(&us, &vt).unwrap(), &a);

    assert_relative_eq!(norm_2(&a).unwrap(), svd.norm(), epsilon = 1e-12);
    assert_relative_eq!(cond_2(&a), svd.condition(), epsilon = 1e-9);
    assert!(norm_2(&a).unwrap() <= norm_frobenius(&a) + 1e-12);
}

#[test]
fn test_complex_svd_values_are_real_descending() {
    let mut rng = StdRng::seed_from_u64(8);
    let a = DenseMatrix::<Complex64>::from_fn(4, 4, |_, _| {
        Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    });
    let svd = svd_decompose(&a, SvdJob::Skip, SvdJob::Skip).unwrap();
    let s = svd.singular_values().as_slice();
    assert_eq!(s.len(), 4);
    assert!(s.windows(2).all(|w| w[0] >= w[1]));
    assert!(svd.u().is_none());
}

#[test]
fn test_cholesky_round_trip() {
    let b = random(9, 6, 6);
    let mut a = prod(&b, &Transposed::new(&b)).unwrap();
    for i in 0..6 {
        a[(i, i)] += 1.0;
    }
    let l = cholesky_decompose(&a).unwrap().l();
    assert_close(&prod(&l, &Transposed::new(&l)).unwrap(), &a);
}

#[test]
fn test_inverse_is_an_involution() {
    let mut a = random(10, 5, 5);
    for i in 0..5 {
        a[(i, i)] += 3.0;
    }
    assert_close(&inv(&inv(&a).unwrap()).unwrap(), &a);

    let n1 = norm_1(&a) * norm_1(&inv(&a).unwrap());
    assert_relative_eq!(cond_1(&a), n1, epsilon = 1e-9);
    // The norm estimate of A^-1 is a lower bound, so rcond is an upper one.
    let rc = rcond(&a).unwrap();
    assert!(rc >= 1.0 / n1 * (1.0 - 1e-12));
    assert!(rc <= 10.0 / n1);
}

#[test]
fn test_least_squares_methods_agree() {
    let a = random(11, 9, 4);
    let b = DenseVector::from_fn(9, |i| (i as f64).sin());
    let x_qr = llsq_qr(&a, &b).unwrap();
    let x_svd = llsq(&a, &b).unwrap();
    assert_eq!(x_qr.len(), 4);
    for i in 0..4 {
        assert_relative_eq!(x_qr.at(i), x_svd.at(i), epsilon = 1e-9);
    }
}

#[test]
fn test_balance_preserves_spectrum_through_similarity() {
    let a = DenseMatrix::<f64>::from_rows(&[
        [1.0, 100.0, 0.0, 1e4],
        [0.01, 2.0, 30.0, 0.0],
        [0.0, 0.0, 3.0, 0.0],
        [1e-4, 0.0, 5.0, 4.0],
    ])
    .unwrap();
    let (b, bal) = balance(&a, BalanceJob::Both).unwrap();
    let t = bal.transform::<ColumnMajor>().unwrap();
    assert_close(&prod(&a, &t).unwrap(), &prod(&t, &b).unwrap());

    let trace = |m: &DenseMatrix<f64>| (0..4).map(|i| m.at(i, i)).sum::<f64>();
    assert_relative_eq!(trace(&a), trace(&b), epsilon = 1e-12);

    let det_a = lu_decompose(&a).unwrap().det().unwrap();
    let det_b = lu_decompose(&b).unwrap().det().unwrap();
    assert_relative_eq!(det_a, det_b, max_relative = 1e-10);
}
