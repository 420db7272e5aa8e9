//! Error types for the sparse kernels.
//!
//! Every error here is a contract violation: the caller handed over arrays or
//! parameters that do not describe a well-formed problem. Numeric outcomes such
//! as Conjugate Gradient failing to converge are *not* errors and are reported
//! through [`CgResult`](crate::cg::CgResult) instead.

use std::fmt;

/// Which axis of a matrix an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Row index.
    Row,
    /// Column index.
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

/// Primary error type for matrix construction and sparse operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SparseError {
    /// Array lengths or operand shapes do not agree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A stored index is outside the declared matrix shape.
    #[error("{axis} index {index} out of bounds for {bound} {axis}s (entry {position})")]
    IndexOutOfBounds {
        /// Axis the offending index belongs to.
        axis: Axis,
        /// Offending index.
        index: usize,
        /// Declared extent of that axis.
        bound: usize,
        /// Position of the entry in the index array.
        position: usize,
    },

    /// A compressed pointer array (`row_ptr` / `col_ptr`) decreases.
    #[error("pointer array is not monotonically non-decreasing at position {position}")]
    NonMonotonicPointers {
        /// Position where `ptr[position] < ptr[position - 1]`.
        position: usize,
    },

    /// A solver parameter is outside its valid range.
    #[error("parameter out of range: {name} = {value} (expected {expected})")]
    ParameterOutOfRange {
        /// Name of the parameter.
        name: String,
        /// The invalid value, formatted.
        value: String,
        /// Human-readable description of the valid range.
        expected: String,
    },
}
