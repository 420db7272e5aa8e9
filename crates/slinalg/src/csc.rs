//! Compressed Sparse Column storage.

use crate::coo::CooMatrix;
use crate::csr::{scatter_transpose, CsrMatrix};
use crate::error::{Axis, SparseError};
use crate::scalar::Scalar;
use crate::validation::{is_canonical, validate_compressed, validate_lengths, validate_pointers};

/// Compressed Sparse Column (CSC) matrix.
///
/// The column-major mirror of [`CsrMatrix`]: column `j` spans
/// `col_ptr[j]..col_ptr[j+1]` of `row_indices` / `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix<T> {
    nrows: usize,
    ncols: usize,
    col_ptr: Vec<usize>,
    row_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> CscMatrix<T> {
    /// Build a CSC matrix from raw arrays.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::DimensionMismatch`] or
    /// [`SparseError::NonMonotonicPointers`] for malformed arrays.
    pub fn new(
        nrows: usize,
        ncols: usize,
        col_ptr: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, SparseError> {
        validate_lengths("row_indices", row_indices.len(), "values", values.len())?;
        validate_pointers("col_ptr", &col_ptr, ncols, values.len())?;
        Ok(Self {
            nrows,
            ncols,
            col_ptr,
            row_indices,
            values,
        })
    }

    pub(crate) fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        col_ptr: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(col_ptr.len(), ncols + 1);
        debug_assert_eq!(row_indices.len(), values.len());
        Self {
            nrows,
            ncols,
            col_ptr,
            row_indices,
            values,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    #[inline]
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of non-zeros in `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= ncols`.
    #[inline]
    pub fn col_nnz(&self, col: usize) -> usize {
        assert!(col < self.ncols, "column {col} out of range for {} columns", self.ncols);
        self.col_ptr[col + 1] - self.col_ptr[col]
    }

    /// Full structural check: pointer shape plus row bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SparseError> {
        validate_lengths("row_indices", self.row_indices.len(), "values", self.values.len())?;
        validate_pointers("col_ptr", &self.col_ptr, self.ncols, self.values.len())?;
        validate_compressed(Axis::Row, &self.col_ptr, &self.row_indices, self.nrows)
    }

    /// `true` if every column has strictly increasing row indices.
    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.col_ptr, &self.row_indices)
    }
}

impl<T: Scalar> CscMatrix<T> {
    /// Iterate over `(row_index, value)` pairs of `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= ncols`.
    #[inline]
    pub fn col(&self, col: usize) -> impl Iterator<Item = (usize, T)> + Clone + '_ {
        assert!(col < self.ncols, "column {col} out of range for {} columns", self.ncols);
        let start = self.col_ptr[col];
        let end = self.col_ptr[col + 1];
        self.row_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Convert to row-compressed storage.
    pub fn to_csr(&self) -> CsrMatrix<T> {
        let (row_ptr, col_indices, values) = scatter_transpose(
            self.ncols,
            self.nrows,
            &self.col_ptr,
            &self.row_indices,
            &self.values,
        );
        CsrMatrix::from_parts_unchecked(self.nrows, self.ncols, row_ptr, col_indices, values)
    }

    /// Convert to coordinate storage, in column-major order.
    pub fn to_coo(&self) -> CooMatrix<T> {
        let mut coo = CooMatrix::with_capacity(self.nrows, self.ncols, self.nnz());
        for c in 0..self.ncols {
            for (r, v) in self.col(c) {
                coo.push_unchecked(r, c, v);
            }
        }
        coo
    }
}
