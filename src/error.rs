//! Error types for HPG creation.
//!
//! Two layers, matching the recovery policy:
//!
//! - [`SolverError`]: per-sample numerical failures. These are recovered
//!   locally — the offending flow sample is dropped and creation continues
//!   with the remaining samples.
//! - [`ParamError`]: rejected configuration values from the validated
//!   setters on `HpgParams`.
//!
//! Creation-level outcomes are reported as a stable integer code on the
//! creator (see [`ErrorCode`]) so that batch creation across many reaches
//! can continue past individual reach failures. Nothing is panicked or
//! propagated across the creation boundary.

use thiserror::Error;

/// Errors that can occur inside a single root-find or profile integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The search interval does not bracket a sign change.
    #[error("root not bracketed in [{lo}, {hi}]")]
    NoBracket { lo: f64, hi: f64 },

    /// The iteration cap was exhausted before the tolerance was met.
    #[error("no convergence after {iterations} iterations")]
    NonConvergence { iterations: usize },

    /// A non-physical intermediate state (negative depth, zero conveyance).
    #[error("non-physical depth {depth} at station {station}")]
    NonPhysical { station: f64, depth: f64 },

    /// A computed curve ended with too few points to be useful.
    #[error("curve has {got} points, {need} required")]
    TooFewPoints { got: usize, need: usize },

    /// The reach geometry cannot sustain any flow below the depth limit.
    #[error("degenerate geometry: no admissible flow")]
    DegenerateGeometry,
}

/// Errors from validated parameter setters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Value outside the admissible range for a parameter.
    #[error("{name} out of range: got {got}, expected {expected}")]
    OutOfRange {
        name: &'static str,
        got: f64,
        expected: &'static str,
    },
}

/// Errors from reach construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReachError {
    /// Reach length must be strictly positive.
    #[error("reach length must be > 0, got {0}")]
    NonPositiveLength(f64),
    /// Manning roughness must be strictly positive.
    #[error("roughness must be > 0, got {0}")]
    NonPositiveRoughness(f64),
}

/// Stable creation-level error codes, exposed as `i32` on the creator.
///
/// The partition is part of the public contract and will not be renumbered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    /// Creation succeeded with at least two valid curves.
    #[default]
    None = 0,
    /// The reach cannot sustain any flow below the depth limit.
    DegenerateGeometry = 1,
    /// Every sampled flow produced an invalid curve.
    NoValidCurves = 2,
    /// Creation completed but with fewer than two valid curves.
    InsufficientCurves = 3,
    /// Every sampled flow failed with a convergence error.
    ConvergenceFailure = 4,
}

impl ErrorCode {
    /// Integer form of the code (0 = no error).
    #[inline]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::None.as_i32(), 0);
        assert_eq!(ErrorCode::DegenerateGeometry.as_i32(), 1);
        assert_eq!(ErrorCode::NoValidCurves.as_i32(), 2);
        assert_eq!(ErrorCode::InsufficientCurves.as_i32(), 3);
        assert_eq!(ErrorCode::ConvergenceFailure.as_i32(), 4);
    }

    #[test]
    fn test_solver_error_display() {
        let e = SolverError::NonConvergence { iterations: 100 };
        assert_eq!(e.to_string(), "no convergence after 100 iterations");
    }
}
