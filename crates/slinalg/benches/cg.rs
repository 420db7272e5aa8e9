//! Benchmarks for the Conjugate Gradient (CG) solver.
//!
//! Measures scaling with problem size and the cost of an `f32` matrix
//! driving the `f64` working vectors.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use slinalg::cg::{conjugate_gradient, CgParams};
use slinalg::coo::CooMatrix;
use slinalg::csr::CsrMatrix;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a symmetric positive-definite (SPD) CSR matrix.
///
/// Random symmetric off-diagonal entries plus a strictly dominant diagonal:
/// `a_{ii} = sum_j |a_{ij}| + 1`.
fn spd_csr_matrix(n: usize, density: f64, seed: u64) -> CsrMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coo = CooMatrix::with_capacity(n, n, n);
    let mut row_abs_sums = vec![0.0f64; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen::<f64>() < density {
                let val: f64 = rng.gen_range(-0.3..0.3);
                coo.push(i, j, val).unwrap();
                coo.push(j, i, val).unwrap();
                row_abs_sums[i] += val.abs();
                row_abs_sums[j] += val.abs();
            }
        }
    }
    for (i, s) in row_abs_sums.iter().enumerate() {
        coo.push(i, i, s + 1.0).unwrap();
    }

    coo.to_csr().unwrap()
}

fn to_f32(matrix: &CsrMatrix<f64>) -> CsrMatrix<f32> {
    CsrMatrix::new(
        matrix.nrows(),
        matrix.ncols(),
        matrix.row_ptr().to_vec(),
        matrix.col_indices().to_vec(),
        matrix.values().iter().map(|&v| v as f32).collect(),
    )
    .unwrap()
}

/// Random vector with deterministic seed.
fn random_vector(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

// ---------------------------------------------------------------------------
// Benchmark: CG scaling with problem size
// ---------------------------------------------------------------------------

fn cg_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("cg_scaling");
    group.warm_up_time(Duration::from_secs(3));
    let params = CgParams::new(5000, 1e-6);

    for &n in &[100, 1000, 10_000] {
        let density = if n <= 1000 { 0.02 } else { 0.001 };
        let matrix = spd_csr_matrix(n, density, 42);
        let rhs = random_vector(n, 43);

        let sample_count = if n >= 10_000 { 20 } else { 100 };
        group.sample_size(sample_count);
        group.throughput(Throughput::Elements(matrix.nnz() as u64));

        group.bench_with_input(BenchmarkId::new("n", n), &n, |b, _| {
            b.iter(|| {
                let mut x = vec![0.0; n];
                conjugate_gradient(
                    criterion::black_box(&matrix),
                    criterion::black_box(&rhs),
                    &mut x,
                    &params,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: f32 vs f64 matrix storage
// ---------------------------------------------------------------------------

fn cg_element_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("cg_element_type");
    group.warm_up_time(Duration::from_secs(3));
    group.sample_size(100);
    let params = CgParams::new(5000, 1e-6);

    for &n in &[500, 2000] {
        let matrix = spd_csr_matrix(n, 0.01, 42);
        let matrix_f32 = to_f32(&matrix);
        let rhs = random_vector(n, 43);

        group.bench_with_input(BenchmarkId::new("f64", n), &n, |b, _| {
            b.iter(|| {
                let mut x = vec![0.0; n];
                conjugate_gradient(criterion::black_box(&matrix), &rhs, &mut x, &params).unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("f32", n), &n, |b, _| {
            b.iter(|| {
                let mut x = vec![0.0; n];
                conjugate_gradient(criterion::black_box(&matrix_f32), &rhs, &mut x, &params)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, cg_scaling, cg_element_type);
criterion_main!(benches);
