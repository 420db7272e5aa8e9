//! Conjugate Gradient solver for symmetric positive-definite systems.
//!
//! Solves `Ax = b` where `A` is a symmetric positive-definite (SPD) sparse
//! matrix in CSR format. In exact arithmetic CG converges in at most `n`
//! iterations for an `n x n` system; in practice it takes
//! `O(sqrt(kappa) * log(1/eps))` iterations where `kappa = cond(A)`.
//!
//! # Algorithm
//!
//! ```text
//! r = b - A*x
//! p = r
//! rsold = r . r
//!
//! for k in 0..max_iters:
//!     Ap = A * p
//!     alpha = rsold / (p . Ap)
//!     x  = x + alpha * p
//!     r  = r - alpha * Ap
//!     rsnew = r . r
//!     if sqrt(rsnew) < tolerance:
//!         converged; break
//!     beta = rsnew / rsold
//!     p  = r + beta * p
//!     rsold = rsnew
//! ```
//!
//! The tolerance is absolute: the solver stops once `||b - A x||_2` drops
//! below it.
//!
//! # Numerical precision
//!
//! The working vectors (`x`, `b`, `r`, `p`, `Ap`) are `f64` whatever the
//! matrix element type; matrix entries are widened on the fly by
//! [`spmv_f64`].
//!
//! # Outcomes
//!
//! Running out of iterations is not an error. The returned [`CgResult`]
//! carries `converged = false` and the residual reached, and `x` holds the
//! last iterate. The same applies when `p . Ap` stops being positive, which
//! happens when `A` is not SPD or the recurrence breaks down numerically.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::csr::CsrMatrix;
use crate::error::SparseError;
use crate::ops::{axpy, dot, spmv_f64};
use crate::scalar::Scalar;

/// Solver settings.
///
/// Deserialises with missing fields taken from [`Default`], so a config file
/// may set only the values it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CgParams {
    /// Maximum number of CG iterations.
    pub max_iters: usize,
    /// Absolute residual threshold: converged once `||r||_2 < tolerance`.
    pub tolerance: f64,
}

impl Default for CgParams {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            tolerance: 1e-8,
        }
    }
}

impl CgParams {
    /// Settings with an explicit iteration budget and tolerance.
    pub fn new(max_iters: usize, tolerance: f64) -> Self {
        Self {
            max_iters,
            tolerance,
        }
    }

    /// Replace the iteration budget.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Replace the absolute residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check that `tolerance` is positive and finite.
    ///
    /// `max_iters == 0` is allowed: the solve then only reports the initial
    /// residual.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::ParameterOutOfRange`].
    pub fn validate(&self) -> Result<(), SparseError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SparseError::ParameterOutOfRange {
                name: "tolerance".into(),
                value: self.tolerance.to_string(),
                expected: "positive finite value".into(),
            });
        }
        Ok(())
    }
}

/// Outcome of a [`conjugate_gradient`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgResult {
    /// Iterations executed.
    pub iters: usize,
    /// L2 norm of the last residual.
    pub final_residual: f64,
    /// Whether `final_residual < tolerance` was reached.
    pub converged: bool,
}

/// Solve `A x = b` by Conjugate Gradient.
///
/// `x` is the initial guess on entry and the solution (or last iterate) on
/// return. If the initial guess already meets the tolerance, `x` is left
/// untouched and the result reports zero iterations.
///
/// # Errors
///
/// Returns [`SparseError::DimensionMismatch`] unless `A` is square and
/// `b.len() == x.len() == A.nrows()`, and
/// [`SparseError::ParameterOutOfRange`] for an invalid tolerance.
/// Non-convergence is reported through [`CgResult::converged`].
pub fn conjugate_gradient<T: Scalar>(
    a: &CsrMatrix<T>,
    b: &[f64],
    x: &mut [f64],
    params: &CgParams,
) -> Result<CgResult, SparseError> {
    validate(a, b, x)?;
    params.validate()?;

    let n = a.nrows();

    // r = b - A*x
    let mut r = Vec::with_capacity(n);
    spmv_f64(a, x, &mut r)?;
    for (ri, &bi) in r.iter_mut().zip(b) {
        *ri = bi - *ri;
    }

    let mut rsold = dot(&r, &r);
    let mut result = CgResult {
        iters: 0,
        final_residual: rsold.sqrt(),
        converged: false,
    };

    debug!(
        "CG: n={}, nnz={}, tol={:.2e}, max_iters={}, ||r0||={:.6e}",
        n,
        a.nnz(),
        params.tolerance,
        params.max_iters,
        result.final_residual,
    );

    if result.final_residual < params.tolerance {
        debug!("CG: initial guess already within tolerance");
        result.converged = true;
        return Ok(result);
    }

    let mut p = r.clone();
    let mut ap = Vec::with_capacity(n);

    for k in 0..params.max_iters {
        spmv_f64(a, &p, &mut ap)?;

        let p_dot_ap = dot(&p, &ap);
        if !p_dot_ap.is_finite() || p_dot_ap <= 0.0 {
            warn!("CG: p.Ap = {p_dot_ap:.4e} at iteration {k}; matrix may not be SPD");
            break;
        }

        let alpha = rsold / p_dot_ap;

        // x = x + alpha * p
        axpy(alpha, &p, x);
        // r = r - alpha * Ap
        axpy(-alpha, &ap, &mut r);

        let rsnew = dot(&r, &r);
        result.final_residual = rsnew.sqrt();
        result.iters = k + 1;

        trace!("CG iter {k}: ||r|| = {:.6e}", result.final_residual);

        if result.final_residual < params.tolerance {
            result.converged = true;
            break;
        }

        let beta = rsnew / rsold;
        for (pi, &ri) in p.iter_mut().zip(&r) {
            *pi = ri + beta * *pi;
        }
        rsold = rsnew;
    }

    if result.converged {
        debug!(
            "CG converged after {} iterations: ||r|| = {:.6e}",
            result.iters, result.final_residual,
        );
    } else {
        warn!(
            "CG: no convergence after {} iterations, ||r|| = {:.6e} (tol {:.2e})",
            result.iters, result.final_residual, params.tolerance,
        );
    }

    Ok(result)
}

fn validate<T>(a: &CsrMatrix<T>, b: &[f64], x: &[f64]) -> Result<(), SparseError> {
    if a.nrows() != a.ncols() {
        return Err(SparseError::DimensionMismatch(format!(
            "CG requires a square matrix but got {}x{}",
            a.nrows(),
            a.ncols(),
        )));
    }
    if b.len() != a.nrows() {
        return Err(SparseError::DimensionMismatch(format!(
            "rhs length {} does not match matrix rows {}",
            b.len(),
            a.nrows(),
        )));
    }
    if x.len() != a.nrows() {
        return Err(SparseError::DimensionMismatch(format!(
            "x length {} does not match matrix rows {}",
            x.len(),
            a.nrows(),
        )));
    }
    Ok(())
}
