//! Compressed Sparse Row storage.

use crate::coo::CooMatrix;
use crate::csc::CscMatrix;
use crate::error::{Axis, SparseError};
use crate::scalar::Scalar;
use crate::validation::{is_canonical, validate_compressed, validate_lengths, validate_pointers};

/// Compressed Sparse Row (CSR) matrix.
///
/// Stores only non-zero entries for O(nnz) matrix-vector products and
/// row-wise access.
///
/// # Layout
///
/// For a matrix with `m` rows and `nnz` non-zeros:
/// - `row_ptr` has length `m + 1`
/// - `col_indices` and `values` each have length `nnz`
/// - Row `i` spans indices `row_ptr[i]..row_ptr[i+1]`
///
/// A matrix is immutable once built; operations produce new matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> CsrMatrix<T> {
    /// Build a CSR matrix from raw arrays.
    ///
    /// Checks that the arrays agree in length and that `row_ptr` is a valid
    /// pointer array. Column bounds and per-row ordering are the caller's
    /// responsibility; use [`validate`](Self::validate) to check them.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::DimensionMismatch`] or
    /// [`SparseError::NonMonotonicPointers`] for malformed arrays.
    pub fn new(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, SparseError> {
        validate_lengths("col_indices", col_indices.len(), "values", values.len())?;
        validate_pointers("row_ptr", &row_ptr, nrows, values.len())?;
        Ok(Self {
            nrows,
            ncols,
            row_ptr,
            col_indices,
            values,
        })
    }

    /// Assemble from arrays the crate built itself.
    pub(crate) fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), nrows + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        Self {
            nrows,
            ncols,
            row_ptr,
            col_indices,
            values,
        }
    }

    /// An `nrows x ncols` matrix with no stored entries.
    pub fn empty(nrows: usize, ncols: usize) -> Self {
        Self::from_parts_unchecked(nrows, ncols, vec![0; nrows + 1], Vec::new(), Vec::new())
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row pointer array (`nrows + 1` entries).
    #[inline]
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column index of every stored entry.
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Stored values.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of non-zeros in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nrows`.
    #[inline]
    pub fn row_nnz(&self, row: usize) -> usize {
        assert!(row < self.nrows, "row {row} out of range for {} rows", self.nrows);
        self.row_ptr[row + 1] - self.row_ptr[row]
    }

    /// Full structural check: pointer shape plus column bounds.
    ///
    /// Rows that are not in canonical order are logged at `warn` level.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SparseError> {
        validate_lengths("col_indices", self.col_indices.len(), "values", self.values.len())?;
        validate_pointers("row_ptr", &self.row_ptr, self.nrows, self.values.len())?;
        validate_compressed(Axis::Col, &self.row_ptr, &self.col_indices, self.ncols)
    }

    /// `true` if every row has strictly increasing column indices.
    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.row_ptr, &self.col_indices)
    }
}

impl<T: Scalar> CsrMatrix<T> {
    /// Build a square identity matrix of dimension `n`.
    pub fn identity(n: usize) -> Self {
        Self::from_parts_unchecked(n, n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }

    /// Iterate over `(col_index, value)` pairs of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nrows`.
    #[inline]
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, T)> + Clone + '_ {
        assert!(row < self.nrows, "row {row} out of range for {} rows", self.nrows);
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        self.col_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Transpose: produces `A^T` in CSR form.
    ///
    /// Uses a two-pass counting sort in O(nnz + rows + cols) time. Rows of
    /// the result come out sorted because source rows are visited in order.
    pub fn transpose(&self) -> CsrMatrix<T> {
        let (row_ptr, col_indices, values) = scatter_transpose(
            self.nrows,
            self.ncols,
            &self.row_ptr,
            &self.col_indices,
            &self.values,
        );
        CsrMatrix::from_parts_unchecked(self.ncols, self.nrows, row_ptr, col_indices, values)
    }

    /// Convert to column-compressed storage.
    pub fn to_csc(&self) -> CscMatrix<T> {
        let (col_ptr, row_indices, values) = scatter_transpose(
            self.nrows,
            self.ncols,
            &self.row_ptr,
            &self.col_indices,
            &self.values,
        );
        CscMatrix::from_parts_unchecked(self.nrows, self.ncols, col_ptr, row_indices, values)
    }

    /// Convert to coordinate storage, in row-major order.
    pub fn to_coo(&self) -> CooMatrix<T> {
        let mut coo = CooMatrix::with_capacity(self.nrows, self.ncols, self.nnz());
        for r in 0..self.nrows {
            for (c, v) in self.row(r) {
                coo.push_unchecked(r, c, v);
            }
        }
        coo
    }

    /// Expand into a dense row-major `nrows x ncols` array.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let mut dense = vec![vec![T::zero(); self.ncols]; self.nrows];
        for (r, dense_row) in dense.iter_mut().enumerate() {
            for (c, v) in self.row(r) {
                dense_row[c] += v;
            }
        }
        dense
    }
}

/// Counting-sort transpose of a compressed layout with `lines` lines over
/// `extent` positions. Returns the `(ptr, indices, values)` of the other
/// orientation.
pub(crate) fn scatter_transpose<T: Scalar>(
    lines: usize,
    extent: usize,
    ptr: &[usize],
    indices: &[usize],
    values: &[T],
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let nnz = values.len();

    // Pass 1: count entries per new line.
    let mut t_ptr = vec![0usize; extent + 1];
    for &i in indices {
        t_ptr[i + 1] += 1;
    }
    for i in 1..=extent {
        t_ptr[i] += t_ptr[i - 1];
    }

    // Pass 2: scatter entries into the transposed arrays.
    let mut t_indices = vec![0usize; nnz];
    let mut t_values = vec![T::zero(); nnz];
    let mut cursor = t_ptr.clone();

    for line in 0..lines {
        for idx in ptr[line]..ptr[line + 1] {
            let i = indices[idx];
            let dest = cursor[i];
            t_indices[dest] = line;
            t_values[dest] = values[idx];
            cursor[i] += 1;
        }
    }

    (t_ptr, t_indices, t_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// [[10, 0, 3], [0, 5, 0], [2, 0, 7]]
    fn sample() -> CsrMatrix<f64> {
        CsrMatrix::new(
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 2, 1, 0, 2],
            vec![10.0, 3.0, 5.0, 2.0, 7.0],
        )
        .unwrap()
    }

    #[test]
    fn row_iterates_pairs() {
        let a = sample();
        let row0: Vec<_> = a.row(0).collect();
        assert_eq!(row0, vec![(0, 10.0), (2, 3.0)]);
        assert_eq!(a.row(1).count(), 1);
        assert_eq!(a.row_nnz(2), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn row_out_of_range_panics() {
        let a = sample();
        let _ = a.row(3);
    }

    #[test]
    fn new_rejects_malformed_arrays() {
        assert!(matches!(
            CsrMatrix::new(2, 2, vec![0, 1], vec![0], vec![1.0]),
            Err(SparseError::DimensionMismatch(_))
        ));
        assert!(matches!(
            CsrMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![1.0]),
            Err(SparseError::DimensionMismatch(_))
        ));
        assert_eq!(
            CsrMatrix::new(2, 2, vec![0, 2, 1], vec![0, 1], vec![1.0, 2.0]),
            Err(SparseError::NonMonotonicPointers { position: 2 })
        );
    }

    #[test]
    fn validate_catches_column_bounds() {
        let bad = CsrMatrix::new(1, 2, vec![0, 1], vec![5], vec![1.0]).unwrap();
        assert!(matches!(
            bad.validate(),
            Err(SparseError::IndexOutOfBounds { index: 5, bound: 2, .. })
        ));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn transpose_twice_is_identity() {
        let a = sample();
        let t = a.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.row(0).collect::<Vec<_>>(), vec![(0, 10.0), (2, 2.0)]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn identity_and_empty() {
        let i = CsrMatrix::<f32>::identity(3);
        assert_eq!(i.nnz(), 3);
        assert!(i.is_canonical());

        let e = CsrMatrix::<f64>::empty(0, 4);
        assert_eq!(e.row_ptr(), &[0]);
        assert_eq!(e.nnz(), 0);
    }

    #[test]
    fn dense_expansion() {
        let d = sample().to_dense();
        assert_eq!(d[0], vec![10.0, 0.0, 3.0]);
        assert_eq!(d[2], vec![2.0, 0.0, 7.0]);
    }
}
