//! Bounded bisection root finder.
//!
//! Every iterative solve in the engine (critical depth, normal depth,
//! max-flow search, per-step backwater energy balance) goes through this
//! one primitive so they all share the same tolerance and iteration-cap
//! semantics. The iteration cap is the only defense against
//! non-convergent geometry: on exhaustion the caller gets
//! [`SolverError::NonConvergence`] and is expected to drop the offending
//! sample, not abort the batch.

use crate::error::SolverError;

/// Find a root of `f` in `[lo, hi]` by bisection.
///
/// Requires `f(lo)` and `f(hi)` to have opposite signs (an endpoint value
/// within `tol` of zero is accepted directly). Converges when the interval
/// half-width falls below `tol` or the residual magnitude does.
///
/// # Errors
///
/// - [`SolverError::NoBracket`] if the interval does not bracket a sign
///   change.
/// - [`SolverError::NonConvergence`] if `max_iter` iterations are
///   exhausted first.
pub fn bisect<F>(mut f: F, lo: f64, hi: f64, tol: f64, max_iter: usize) -> Result<f64, SolverError>
where
    F: FnMut(f64) -> f64,
{
    let f_lo = f(lo);
    if f_lo.abs() <= tol {
        return Ok(lo);
    }
    let f_hi = f(hi);
    if f_hi.abs() <= tol {
        return Ok(hi);
    }
    if f_lo * f_hi > 0.0 {
        return Err(SolverError::NoBracket { lo, hi });
    }

    let (mut a, mut b) = (lo, hi);
    let mut f_a = f_lo;
    for _ in 0..max_iter {
        let mid = 0.5 * (a + b);
        let f_mid = f(mid);
        if f_mid.abs() <= tol || 0.5 * (b - a).abs() <= tol {
            return Ok(mid);
        }
        if f_a * f_mid < 0.0 {
            b = mid;
        } else {
            a = mid;
            f_a = f_mid;
        }
    }
    Err(SolverError::NonConvergence {
        iterations: max_iter,
    })
}
