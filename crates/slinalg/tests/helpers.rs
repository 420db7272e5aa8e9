//! Shared test helpers for the slinalg integration test suite.
//!
//! Provides deterministic random matrix generators, dense reference kernels,
//! and floating-point comparison utilities used across all test modules.

#![allow(dead_code)]

use slinalg::coo::CooMatrix;
use slinalg::csr::CsrMatrix;
use slinalg::ops::spmv_f64;

// ---------------------------------------------------------------------------
// Random number generator (simple LCG for deterministic reproducibility)
// ---------------------------------------------------------------------------

/// A minimal linear congruential generator for deterministic test data.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

// ---------------------------------------------------------------------------
// Matrix generators
// ---------------------------------------------------------------------------

/// Random `rows x cols` CSR matrix where each entry is present with
/// probability `density`.
pub fn random_csr(rows: usize, cols: usize, density: f64, seed: u64) -> CsrMatrix<f64> {
    let mut rng = Lcg::new(seed);
    let mut coo = CooMatrix::with_capacity(rows, cols, 0);
    for i in 0..rows {
        for j in 0..cols {
            if rng.next_f64() < density {
                coo.push(i, j, rng.next_f64_range(-1.0, 1.0)).unwrap();
            }
        }
    }
    coo.to_csr().unwrap()
}

/// Random SPD matrix `A = M^T M + I` with `M` a random sparse symmetric
/// matrix.
pub fn random_spd_csr(n: usize, density: f64, seed: u64) -> CsrMatrix<f64> {
    let mut rng = Lcg::new(seed);
    let mut dense = vec![vec![0.0f64; n]; n];

    for i in 0..n {
        for j in i..n {
            if i == j || rng.next_f64() < density {
                let val = rng.next_f64_range(-1.0, 1.0);
                dense[i][j] += val;
                if i != j {
                    dense[j][i] += val;
                }
            }
        }
    }

    let mut coo = CooMatrix::with_capacity(n, n, n * n);
    for i in 0..n {
        for j in 0..n {
            let mut sum = if i == j { 1.0 } else { 0.0 };
            for k in 0..n {
                sum += dense[k][i] * dense[k][j];
            }
            if sum.abs() > 1e-15 {
                coo.push(i, j, sum).unwrap();
            }
        }
    }

    coo.to_csr().unwrap()
}

/// Symmetric tridiagonal SPD matrix with `diag` on the diagonal and `-1` off
/// it.
pub fn tridiagonal(n: usize, diag: f64) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::with_capacity(n, n, 3 * n);
    for i in 0..n {
        if i > 0 {
            coo.push(i, i - 1, -1.0).unwrap();
        }
        coo.push(i, i, diag).unwrap();
        if i + 1 < n {
            coo.push(i, i + 1, -1.0).unwrap();
        }
    }
    coo.to_csr().unwrap()
}

/// Deterministic random vector of length `n`.
pub fn random_vector(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_f64_range(-1.0, 1.0)).collect()
}

// ---------------------------------------------------------------------------
// Dense references
// ---------------------------------------------------------------------------

/// Dense `A * x`.
pub fn dense_matvec(a: &[Vec<f64>], x: &[f64]) -> Vec<f64> {
    a.iter()
        .map(|row| row.iter().zip(x).map(|(&v, &xi)| v * xi).sum())
        .collect()
}

/// Dense triple-loop `A * B`.
pub fn dense_matmul(a: &[Vec<f64>], b: &[Vec<f64>], inner: usize, cols: usize) -> Vec<Vec<f64>> {
    a.iter()
        .map(|row| {
            (0..cols)
                .map(|j| (0..inner).map(|k| row[k] * b[k][j]).sum())
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Floating-point comparison utilities
// ---------------------------------------------------------------------------

pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// The residual `b - A*x`.
pub fn compute_residual(matrix: &CsrMatrix<f64>, x: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut ax = Vec::new();
    spmv_f64(matrix, x, &mut ax).unwrap();
    rhs.iter().zip(&ax).map(|(&b, &y)| b - y).collect()
}

/// Largest absolute entry-wise difference between two dense matrices.
pub fn max_abs_diff(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    a.iter()
        .zip(b)
        .flat_map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| (x - y).abs()))
        .fold(0.0, f64::max)
}
