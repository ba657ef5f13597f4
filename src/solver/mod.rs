//! Iterative numerical solvers.
//!
//! Provides the numerical machinery behind HPG creation:
//! - [`root`]: the shared bounded bisection primitive
//! - [`depth`]: critical and normal depth solves
//! - [`backwater`]: the standard-step gradually-varied-flow integrator
//!
//! All solvers share one [`NumericContext`] so a creation run is fully
//! reproducible from its inputs: same tolerance, same iteration cap, same
//! unit constants everywhere.

pub mod backwater;
pub mod depth;
pub mod root;

pub use backwater::{BackwaterIntegrator, Profile};
pub use depth::{critical_depth, normal_depth};
pub use root::bisect;

/// Shared numerical parameters for one creation run.
///
/// The configured convergence tolerance doubles as the epsilon for
/// "effectively equal" comparisons (depth limits, non-negativity); no
/// hard-coded epsilons appear in the solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericContext {
    /// Gravitational acceleration.
    pub g: f64,
    /// Manning conversion constant.
    pub kn: f64,
    /// Convergence tolerance for all root-finds.
    pub tol: f64,
    /// Iteration cap for all root-finds.
    pub max_iter: usize,
}
