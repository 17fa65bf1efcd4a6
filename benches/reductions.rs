//! Benchmarks for reductions and the LU/QR bindings.
//!
//! Run with: cargo bench --bench reductions
//! Compare against the rayon paths with: cargo bench --features parallel --bench reductions

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linext::{
    cumsum, lu_decompose, max_dim, qr_decompose, sum_columns, sum_rows, ColumnMajor, DenseMatrix,
    QrMode, Transposed,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

fn random(size: usize, seed: u64) -> DenseMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    DenseMatrix::from_fn(size, size, |_, _| rng.gen_range(-1.0..1.0))
}

/// Line sums over both axes, on a contiguous matrix and on a transposed
/// view of it.
fn bench_sums(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum");
    for size in [100usize, 500, 1000] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = random(size, 42);
        let at = Transposed::new(&a);

        group.bench_with_input(BenchmarkId::new("rows", size), &size, |b, _| {
            b.iter(|| sum_rows(&a))
        });
        group.bench_with_input(BenchmarkId::new("columns", size), &size, |b, _| {
            b.iter(|| sum_columns(&a))
        });
        group.bench_with_input(BenchmarkId::new("rows_transposed", size), &size, |b, _| {
            b.iter(|| sum_rows(&at))
        });
    }
    group.finish();
}

fn bench_scans(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for size in [100usize, 500, 1000] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = random(size, 7);
        let ac = a.to_orientation::<ColumnMajor>();

        group.bench_with_input(BenchmarkId::new("cumsum_row_major", size), &size, |b, _| {
            b.iter(|| cumsum(&a))
        });
        group.bench_with_input(BenchmarkId::new("cumsum_col_major", size), &size, |b, _| {
            b.iter(|| cumsum(&ac))
        });
        group.bench_with_input(BenchmarkId::new("max_per_row", size), &size, |b, _| {
            b.iter(|| max_dim::<1, _>(&a))
        });
    }
    group.finish();
}

fn bench_factorizations(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorization");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [32usize, 128, 256] {
        let a = random(size, 3);
        group.bench_with_input(BenchmarkId::new("lu", size), &size, |b, _| {
            b.iter(|| lu_decompose(&a).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("qr_economy", size), &size, |b, _| {
            b.iter(|| qr_decompose(&a, QrMode::Economy).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sums, bench_scans, bench_factorizations);
criterion_main!(benches);
