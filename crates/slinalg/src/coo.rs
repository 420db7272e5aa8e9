//! Coordinate (triplet) storage for bulk construction and exchange.
//!
//! Entries are unordered and the same `(row, col)` may appear more than once.
//! Repeated coordinates are **summed** when the matrix is compressed with
//! [`CooMatrix::to_csr`] or [`CooMatrix::to_csc`], which is the usual
//! finite-element assembly convention.

use tracing::debug;

use crate::csc::CscMatrix;
use crate::csr::CsrMatrix;
use crate::error::{Axis, SparseError};
use crate::scalar::Scalar;
use crate::validation::{validate_indices, validate_lengths};

/// Coordinate-format sparse matrix: parallel `row_indices`, `col_indices` and
/// `values` arrays, one triplet per stored entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_indices: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> CooMatrix<T> {
    /// Build from raw triplet arrays.
    ///
    /// Only array lengths are checked here; index bounds are checked on
    /// compression and by [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::DimensionMismatch`] if the arrays differ in
    /// length.
    pub fn new(
        nrows: usize,
        ncols: usize,
        row_indices: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, SparseError> {
        validate_lengths("row_indices", row_indices.len(), "col_indices", col_indices.len())?;
        validate_lengths("col_indices", col_indices.len(), "values", values.len())?;
        Ok(Self {
            nrows,
            ncols,
            row_indices,
            col_indices,
            values,
        })
    }

    /// Empty `nrows x ncols` matrix with room for `capacity` triplets.
    pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Self {
        Self {
            nrows,
            ncols,
            row_indices: Vec::with_capacity(capacity),
            col_indices: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a triplet, checking that it lies inside the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] if `row` or `col` is out of
    /// range.
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<(), SparseError> {
        if row >= self.nrows {
            return Err(SparseError::IndexOutOfBounds {
                axis: Axis::Row,
                index: row,
                bound: self.nrows,
                position: self.nnz(),
            });
        }
        if col >= self.ncols {
            return Err(SparseError::IndexOutOfBounds {
                axis: Axis::Col,
                index: col,
                bound: self.ncols,
                position: self.nnz(),
            });
        }
        self.push_unchecked(row, col, value);
        Ok(())
    }

    pub(crate) fn push_unchecked(&mut self, row: usize, col: usize, value: T) {
        self.row_indices.push(row);
        self.col_indices.push(col);
        self.values.push(value);
    }

    /// Build from an iterator of `(row, col, value)` triplets.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] for the first triplet outside
    /// the matrix.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self, SparseError> {
        let triplets = triplets.into_iter();
        let mut coo = Self::with_capacity(nrows, ncols, triplets.size_hint().0);
        for (r, c, v) in triplets {
            coo.push(r, c, v)?;
        }
        Ok(coo)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored triplets, duplicates included.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Check that every triplet lies inside the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] for the first offending
    /// entry.
    pub fn validate(&self) -> Result<(), SparseError> {
        validate_indices(Axis::Row, &self.row_indices, self.nrows)?;
        validate_indices(Axis::Col, &self.col_indices, self.ncols)
    }
}

impl<T: Scalar> CooMatrix<T> {
    /// Iterate over the stored `(row, col, value)` triplets in storage order.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + Clone + '_ {
        self.row_indices
            .iter()
            .zip(self.col_indices.iter())
            .zip(self.values.iter())
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Compress into canonical CSR, summing repeated coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] if a triplet lies outside
    /// the matrix.
    pub fn to_csr(&self) -> Result<CsrMatrix<T>, SparseError> {
        self.validate()?;
        let (row_ptr, col_indices, values) = compress(
            self.nrows,
            &self.row_indices,
            &self.col_indices,
            &self.values,
        );
        Ok(CsrMatrix::from_parts_unchecked(
            self.nrows,
            self.ncols,
            row_ptr,
            col_indices,
            values,
        ))
    }

    /// Compress into canonical CSC, summing repeated coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] if a triplet lies outside
    /// the matrix.
    pub fn to_csc(&self) -> Result<CscMatrix<T>, SparseError> {
        self.validate()?;
        let (col_ptr, row_indices, values) = compress(
            self.ncols,
            &self.col_indices,
            &self.row_indices,
            &self.values,
        );
        Ok(CscMatrix::from_parts_unchecked(
            self.nrows,
            self.ncols,
            col_ptr,
            row_indices,
            values,
        ))
    }
}

/// Bucket triplets by `major` index, then sort each bucket by `minor` index
/// and sum runs of equal `minor` indices.
///
/// Bucketing is a stable counting sort, and per-bucket sorting is stable, so
/// duplicates are summed in insertion order.
fn compress<T: Scalar>(
    lines: usize,
    major: &[usize],
    minor: &[usize],
    values: &[T],
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let nnz = values.len();

    let mut bucket_ptr = vec![0usize; lines + 1];
    for &m in major {
        bucket_ptr[m + 1] += 1;
    }
    for i in 1..=lines {
        bucket_ptr[i] += bucket_ptr[i - 1];
    }

    let mut order = vec![0usize; nnz];
    let mut cursor = bucket_ptr.clone();
    for (k, &m) in major.iter().enumerate() {
        order[cursor[m]] = k;
        cursor[m] += 1;
    }

    let mut ptr = Vec::with_capacity(lines + 1);
    let mut indices = Vec::with_capacity(nnz);
    let mut out = Vec::with_capacity(nnz);
    let mut merged = 0usize;
    ptr.push(0);

    for line in 0..lines {
        let bucket = &mut order[bucket_ptr[line]..bucket_ptr[line + 1]];
        bucket.sort_by_key(|&k| minor[k]);

        let line_start = indices.len();
        for &k in bucket.iter() {
            let i = minor[k];
            if indices.len() > line_start && indices[indices.len() - 1] == i {
                let last = out.len() - 1;
                out[last] += values[k];
                merged += 1;
            } else {
                indices.push(i);
                out.push(values[k]);
            }
        }
        ptr.push(indices.len());
    }

    if merged > 0 {
        debug!(merged, nnz = indices.len(), "coo compression summed duplicate coordinates");
    }

    (ptr, indices, out)
}
