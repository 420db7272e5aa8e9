//! Sorted index/value sparse vector.

use crate::error::SparseError;
use crate::scalar::Scalar;
use crate::validation::validate_lengths;

/// A 1-D sparse array stored as parallel `indices` / `values` arrays.
///
/// `indices` is strictly increasing; position `i` of `values` belongs to
/// `indices[i]`. Any index not stored is an implicit zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector<T> {
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseVector<T> {
    /// Build a vector from caller-supplied arrays.
    ///
    /// Only the length agreement is checked; `indices` must already be sorted
    /// ascending without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::DimensionMismatch`] if the arrays differ in
    /// length.
    pub fn new(indices: Vec<usize>, values: Vec<T>) -> Result<Self, SparseError> {
        validate_lengths("indices", indices.len(), "values", values.len())?;
        Ok(Self { indices, values })
    }

    /// Empty vector with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Stored indices, ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Scalar> SparseVector<T> {
    /// Keep the non-zero entries of a dense slice.
    pub fn from_dense(dense: &[T]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, &v)| (i, v))
            .unzip();
        Self { indices, values }
    }

    /// Value at `index`, or zero if nothing is stored there.
    pub fn get(&self, index: usize) -> T {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => T::zero(),
        }
    }

    /// Set the value at `index`, overwriting an existing entry or inserting a
    /// new one in sorted position.
    ///
    /// O(nnz) because of the shift on insert; meant for construction, not for
    /// hot loops.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos] = value,
            Err(pos) => {
                self.indices.insert(pos, index);
                self.values.insert(pos, value);
            }
        }
    }

    /// Iterate over `(index, value)` pairs in ascending index order.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (usize, T)> + Clone + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Expand into a dense vector of length `width`.
    ///
    /// # Panics
    ///
    /// Panics if a stored index is `>= width`.
    pub fn to_dense(&self, width: usize) -> Vec<T> {
        let mut dense = vec![T::zero(); width];
        for (i, v) in self.entries() {
            dense[i] = v;
        }
        dense
    }

    /// Merge-based dot product with `other`; see [`sparse_dot`](crate::ops::sparse_dot).
    #[inline]
    pub fn dot(&self, other: &Self) -> T::Acc {
        crate::ops::sparse_dot(self, other)
    }
}
