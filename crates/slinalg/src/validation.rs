//! Structural validation shared by the storage formats.
//!
//! Constructors run the cheap shape checks ([`validate_lengths`],
//! [`validate_pointers`]) so that line slicing can never read past the end of
//! an array. The full check including index bounds lives in
//! [`validate_compressed`] and [`validate_indices`], reached through each
//! format's `validate()` method.
//!
//! Sortedness is never an error: a compressed line with unsorted or repeated
//! indices is still a valid matrix for `spmv`, only not canonical. Such lines
//! are reported with [`tracing::warn`].

use crate::error::{Axis, SparseError};

/// Check that two aligned arrays have the same length.
///
/// # Errors
///
/// Returns [`SparseError::DimensionMismatch`] naming both arrays.
pub fn validate_lengths(
    left_name: &str,
    left_len: usize,
    right_name: &str,
    right_len: usize,
) -> Result<(), SparseError> {
    if left_len != right_len {
        return Err(SparseError::DimensionMismatch(format!(
            "{left_name} length {left_len} does not match {right_name} length {right_len}",
        )));
    }
    Ok(())
}

/// Validate the shape of a compressed pointer array.
///
/// Checks, in order:
///
/// 1. `ptr.len() == lines + 1`.
/// 2. `ptr[0] == 0`.
/// 3. `ptr` is monotonically non-decreasing.
/// 4. `ptr[lines] == nnz`.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_pointers(
    name: &str,
    ptr: &[usize],
    lines: usize,
    nnz: usize,
) -> Result<(), SparseError> {
    if ptr.len() != lines + 1 {
        return Err(SparseError::DimensionMismatch(format!(
            "{name} length {} does not equal {lines} + 1",
            ptr.len(),
        )));
    }

    if ptr[0] != 0 {
        return Err(SparseError::DimensionMismatch(format!(
            "{name}[0] = {} (expected 0)",
            ptr[0],
        )));
    }

    if let Some(position) = (1..ptr.len()).find(|&i| ptr[i] < ptr[i - 1]) {
        return Err(SparseError::NonMonotonicPointers { position });
    }

    if ptr[lines] != nnz {
        return Err(SparseError::DimensionMismatch(format!(
            "{name}[{lines}] = {} does not match nnz {nnz}",
            ptr[lines],
        )));
    }

    Ok(())
}

/// Check that every index in `indices` is below `bound`.
///
/// # Errors
///
/// Returns [`SparseError::IndexOutOfBounds`] for the first offending entry.
pub fn validate_indices(axis: Axis, indices: &[usize], bound: usize) -> Result<(), SparseError> {
    match indices.iter().position(|&i| i >= bound) {
        Some(position) => Err(SparseError::IndexOutOfBounds {
            axis,
            index: indices[position],
            bound,
            position,
        }),
        None => Ok(()),
    }
}

/// Full structural check of a compressed layout (CSR or CSC).
///
/// `axis` is the axis of the *stored* indices (columns for CSR, rows for CSC)
/// and `bound` its extent. Assumes [`validate_pointers`] already passed.
///
/// # Errors
///
/// Returns [`SparseError::IndexOutOfBounds`] for the first out-of-range index.
pub fn validate_compressed(
    axis: Axis,
    ptr: &[usize],
    indices: &[usize],
    bound: usize,
) -> Result<(), SparseError> {
    validate_indices(axis, indices, bound)?;

    for line in 0..ptr.len().saturating_sub(1) {
        let slice = &indices[ptr[line]..ptr[line + 1]];
        if let Some(w) = slice.windows(2).find(|w| w[1] <= w[0]) {
            tracing::warn!(
                line,
                "{axis} indices not canonical within line ({} follows {}); \
                 spgemm output and merge-based kernels expect sorted, unique indices",
                w[1],
                w[0],
            );
        }
    }

    Ok(())
}

/// `true` if every line's indices are strictly increasing.
pub fn is_canonical(ptr: &[usize], indices: &[usize]) -> bool {
    ptr.windows(2)
        .all(|w| indices[w[0]..w[1]].windows(2).all(|p| p[0] < p[1]))
}
