//! # hpg-rs
//!
//! Hydraulic Performance Graph (HPG) generation for storm/sewer conveyance
//! reaches.
//!
//! An HPG is a precomputed family of flow-indexed backwater curves for one
//! conduit reach. Generating it once per reach lets a network simulator
//! interpolate upstream heads at every timestep instead of re-running the
//! iterative gradually-varied-flow solve.
//!
//! This crate provides the building blocks of that precomputation:
//! - Cross-section geometry (circular, rectangular, trapezoidal) behind a
//!   capability trait
//! - Critical-depth and normal-depth solves (bounded bisection)
//! - A standard-step backwater integrator with pressurized-flow transition
//! - Curvature-aware flow sampling over the admissible flow range
//! - The creation orchestrator with validated parameters and stable
//!   creation error codes
//!
//! # Example
//! ```
//! use hpg_rs::{HpgCreator, HpgParams, Reach, Shape, UnitSystem};
//!
//! let mut params = HpgParams::default();
//! params.set_units(UnitSystem::Si);
//!
//! let reach = Reach::new(50.0, 0.01, 0.013, 100.0, Shape::circular(1.0), false).unwrap();
//! let mut creator = HpgCreator::with_params(params);
//! let hpg = creator.auto_create_hpg(&reach);
//!
//! assert_eq!(creator.error_code(), 0);
//! assert!(!hpg.is_empty());
//! ```

pub mod creator;
pub mod error;
pub mod hpg;
pub mod reach;
pub mod sampler;
pub mod solver;
pub mod units;
pub mod xs;

// Re-export main types for convenience
pub use creator::{HpgCreator, HpgParams, MaxFlow};
pub use error::{ErrorCode, ParamError, ReachError, SolverError};
pub use hpg::{FlowCurve, Hpg, ProfilePoint};
pub use reach::Reach;
pub use sampler::{find_flow_increments, find_flow_increments_by_flow};
pub use solver::{BackwaterIntegrator, NumericContext, Profile, critical_depth, normal_depth};
pub use units::{UnitConstants, UnitSystem};
pub use xs::{Circular, CrossSection, Rectangular, Shape, Trapezoidal};

#[cfg(feature = "parallel")]
pub use creator::create_hpgs;
