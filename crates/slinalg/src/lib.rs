//! Sparse linear-algebra kernels.
//!
//! This crate provides compressed sparse storage formats, the numeric kernels
//! that operate on them, Gustavson sparse matrix-matrix multiplication, and a
//! Conjugate Gradient solver for symmetric positive-definite systems.
//!
//! # Formats
//!
//! | Type | Layout | Typical use |
//! |------|--------|-------------|
//! | [`CsrMatrix`](csr::CsrMatrix) | row-compressed | `spmv`, `spgemm`, CG |
//! | [`CscMatrix`](csc::CscMatrix) | column-compressed | column access |
//! | [`CooMatrix`](coo::CooMatrix) | unordered triplets | assembly and exchange |
//! | [`SparseVector`](sparse_vector::SparseVector) | sorted index/value pairs | sparse dot products |
//!
//! Conversions are always explicit (`to_csr`, `to_csc`, `to_coo`,
//! `transpose`). Repeated coordinates in a [`CooMatrix`](coo::CooMatrix) are
//! summed on compression.
//!
//! # Example
//!
//! ```rust
//! use slinalg::cg::{conjugate_gradient, CgParams};
//! use slinalg::coo::CooMatrix;
//!
//! // Build a symmetric positive-definite 3x3 matrix.
//! let coo = CooMatrix::from_triplets(3, 3, vec![
//!     (0, 0, 4.0), (0, 1, -1.0),
//!     (1, 0, -1.0), (1, 1, 4.0), (1, 2, -1.0),
//!     (2, 1, -1.0), (2, 2, 4.0),
//! ]).unwrap();
//! let a = coo.to_csr().unwrap();
//!
//! let b = vec![3.0, 2.0, 3.0];
//! let mut x = vec![0.0; 3];
//! let result = conjugate_gradient(&a, &b, &mut x, &CgParams::default()).unwrap();
//!
//! assert!(result.converged);
//! assert!((x[1] - 1.0).abs() < 1e-6);
//! ```

pub mod coo;
pub mod csc;
pub mod csr;
pub mod error;
pub mod ops;
pub mod scalar;
pub mod sparse_vector;
pub mod spgemm;
pub mod validation;

#[cfg(feature = "cg")]
pub mod cg;

pub use coo::CooMatrix;
pub use csc::CscMatrix;
pub use csr::CsrMatrix;
pub use error::SparseError;
pub use scalar::Scalar;
pub use sparse_vector::SparseVector;
