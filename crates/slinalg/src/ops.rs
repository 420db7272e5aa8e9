//! Dense and sparse numeric kernels.
//!
//! Dense helpers (`dot`, `norm2`, `axpy`) work on contiguous slices and are
//! the building blocks of the Conjugate Gradient loop. `spmv` and `spmv_f64`
//! multiply a [`CsrMatrix`] by a dense vector; `sparse_dot` merges two
//! [`SparseVector`]s.
//!
//! # Numerical precision
//!
//! Dense reductions accumulate in `f64` regardless of element type. Sparse
//! reductions accumulate in [`Scalar::Acc`], which is `f64` for both float
//! types, and narrow once per output entry.

use num_traits::Zero;

use crate::csr::CsrMatrix;
use crate::error::SparseError;
use crate::scalar::Scalar;
use crate::sparse_vector::SparseVector;

/// Dot product of two dense slices with `f64` accumulation.
///
/// Uses a 4-wide accumulator to shorten the dependency chain.
///
/// # Panics
///
/// Debug-asserts that `a.len() == b.len()`.
#[inline]
pub fn dot<T: Scalar>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dot: length mismatch");

    let mut a_chunks = a.chunks_exact(4);
    let mut b_chunks = b.chunks_exact(4);

    let mut acc = [0.0f64; 4];
    for (ca, cb) in a_chunks.by_ref().zip(b_chunks.by_ref()) {
        acc[0] += ca[0].as_f64() * cb[0].as_f64();
        acc[1] += ca[1].as_f64() * cb[1].as_f64();
        acc[2] += ca[2].as_f64() * cb[2].as_f64();
        acc[3] += ca[3].as_f64() * cb[3].as_f64();
    }
    for (&x, &y) in a_chunks.remainder().iter().zip(b_chunks.remainder()) {
        acc[0] += x.as_f64() * y.as_f64();
    }

    (acc[0] + acc[1]) + (acc[2] + acc[3])
}

/// Euclidean norm `sqrt(v . v)`.
#[inline]
pub fn norm2<T: Scalar>(v: &[T]) -> f64 {
    dot(v, v).sqrt()
}

/// `y[i] += alpha * x[i]` for every `i < x.len()`.
///
/// Entries of `y` past `x.len()` are left untouched.
///
/// # Panics
///
/// Debug-asserts that `x.len() <= y.len()`.
#[inline]
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    debug_assert!(x.len() <= y.len(), "axpy: x longer than y");
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// Sparse matrix-vector multiply: `y = A * x`.
///
/// `y` is resized to `A.nrows()` and overwritten; rows without entries give
/// zero. Each row sums in `T::Acc`.
///
/// # Errors
///
/// Returns [`SparseError::DimensionMismatch`] if `x.len() != A.ncols()`.
pub fn spmv<T: Scalar>(a: &CsrMatrix<T>, x: &[T], y: &mut Vec<T>) -> Result<(), SparseError> {
    check_spmv_operand(a, x.len())?;

    y.clear();
    y.extend((0..a.nrows()).map(|r| {
        let mut sum = T::Acc::zero();
        for (c, v) in a.row(r) {
            sum += v.widen() * x[c].widen();
        }
        T::narrow(sum)
    }));
    Ok(())
}

/// Sparse matrix-vector multiply against an `f64` vector: `y = A * x`.
///
/// Matrix entries are read through [`Scalar::as_f64`], so any element type
/// can drive the `f64` working vectors of the CG solver.
///
/// # Errors
///
/// Returns [`SparseError::DimensionMismatch`] if `x.len() != A.ncols()`.
pub fn spmv_f64<T: Scalar>(
    a: &CsrMatrix<T>,
    x: &[f64],
    y: &mut Vec<f64>,
) -> Result<(), SparseError> {
    check_spmv_operand(a, x.len())?;

    y.clear();
    y.extend((0..a.nrows()).map(|r| a.row(r).map(|(c, v)| v.as_f64() * x[c]).sum::<f64>()));
    Ok(())
}

fn check_spmv_operand<T>(a: &CsrMatrix<T>, x_len: usize) -> Result<(), SparseError> {
    if x_len != a.ncols() {
        return Err(SparseError::DimensionMismatch(format!(
            "spmv: x length {x_len} does not match matrix cols {}",
            a.ncols(),
        )));
    }
    Ok(())
}

/// Dot product of two sparse vectors by two-pointer merge.
///
/// Only indices stored in both operands contribute. Runs in
/// O(nnz(a) + nnz(b)).
pub fn sparse_dot<T: Scalar>(a: &SparseVector<T>, b: &SparseVector<T>) -> T::Acc {
    let (ia, va) = (a.indices(), a.values());
    let (ib, vb) = (b.indices(), b.values());

    let mut sum = T::Acc::zero();
    let (mut i, mut j) = (0, 0);
    while i < ia.len() && j < ib.len() {
        match ia[i].cmp(&ib[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += va[i].widen() * vb[j].widen();
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
