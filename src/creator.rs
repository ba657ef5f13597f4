//! HPG creation: parameters and orchestration.
//!
//! [`HpgCreator`] drives the whole pipeline for one reach: bound the
//! admissible flow range, sample flows, integrate one backwater curve per
//! flow, validate, and assemble the accepted curves into an [`Hpg`].
//!
//! # Failure policy
//!
//! Per-flow failures (non-convergence, non-physical states, too-short
//! curves) drop that sample and creation continues — graceful degradation
//! of curve density rather than a hard abort. Only reach-level outcomes
//! (degenerate geometry, no valid curves at all) surface as a nonzero
//! error code on the creator; nothing panics or propagates across the
//! creation boundary, so batch creation over many reaches runs to
//! completion regardless of individual failures.

use crate::error::{ErrorCode, ParamError, SolverError};
use crate::hpg::{FlowCurve, Hpg};
use crate::reach::Reach;
use crate::sampler::find_flow_increments_by_flow;
use crate::solver::{BackwaterIntegrator, NumericContext, critical_depth, normal_depth};
use crate::units::{UnitConstants, UnitSystem};
use crate::xs::CrossSection;

/// Fraction of the maximum flow used as the smallest sampled flow, so that
/// every tabulated curve carries a strictly positive flow.
const MIN_FLOW_FRACTION: f64 = 0.01;

// =============================================================================
// Creation Parameters
// =============================================================================

/// Tunable numerical parameters for HPG creation.
///
/// Explicit value-semantics configuration: the creator copies it per
/// creation run, so the numerical behavior of a call is fully reproducible
/// from its inputs and concurrent multi-reach creation is trivially safe.
///
/// All setters validate; a rejected value leaves the previous one in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HpgParams {
    num_steps: usize,
    convergence_tol: f64,
    max_iterations: usize,
    max_depth_frac: f64,
    num_hpc: usize,
    num_points: usize,
    min_curve_points: usize,
    units: UnitSystem,
    constants: UnitConstants,
}

impl Default for HpgParams {
    fn default() -> Self {
        let units = UnitSystem::default();
        Self {
            num_steps: 400,
            convergence_tol: 1e-6,
            max_iterations: 100,
            max_depth_frac: 0.80,
            num_hpc: 20,
            num_points: 40,
            min_curve_points: 4,
            units,
            constants: UnitConstants::for_system(units),
        }
    }
}

impl HpgParams {
    /// Convergence tolerance for all root-finds.
    #[inline]
    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tol
    }

    /// Set the convergence tolerance (must be > 0).
    pub fn set_convergence_tolerance(&mut self, tol: f64) -> Result<(), ParamError> {
        if !(tol > 0.0) {
            return Err(ParamError::OutOfRange {
                name: "convergence_tolerance",
                got: tol,
                expected: "> 0",
            });
        }
        self.convergence_tol = tol;
        Ok(())
    }

    /// Maximum number of curves per HPG.
    #[inline]
    pub fn number_of_curves(&self) -> usize {
        self.num_hpc
    }

    /// Set the maximum number of curves per HPG (must be ≥ 2).
    pub fn set_number_of_curves(&mut self, curves: usize) -> Result<(), ParamError> {
        if curves < 2 {
            return Err(ParamError::OutOfRange {
                name: "number_of_curves",
                got: curves as f64,
                expected: ">= 2",
            });
        }
        self.num_hpc = curves;
        Ok(())
    }

    /// Maximum number of points retained per curve.
    #[inline]
    pub fn number_of_points_per_curve(&self) -> usize {
        self.num_points
    }

    /// Set the maximum points per curve (≥ 2, and ≥ the minimum curve size).
    pub fn set_number_of_points_per_curve(&mut self, points: usize) -> Result<(), ParamError> {
        if points < 2 || points < self.min_curve_points {
            return Err(ParamError::OutOfRange {
                name: "number_of_points_per_curve",
                got: points as f64,
                expected: ">= max(2, min_curve_size)",
            });
        }
        self.num_points = points;
        Ok(())
    }

    /// Depth fraction above which flow is treated as pressurized.
    #[inline]
    pub fn max_depth_fraction(&self) -> f64 {
        self.max_depth_frac
    }

    /// Set the pressurization depth fraction (0 < f ≤ 1).
    pub fn set_max_depth_fraction(&mut self, frac: f64) -> Result<(), ParamError> {
        if !(frac > 0.0 && frac <= 1.0) {
            return Err(ParamError::OutOfRange {
                name: "max_depth_fraction",
                got: frac,
                expected: "in (0, 1]",
            });
        }
        self.max_depth_frac = frac;
        Ok(())
    }

    /// Iteration cap for all root-finds.
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Set the iteration cap (must be > 0).
    pub fn set_max_iterations(&mut self, iterations: usize) -> Result<(), ParamError> {
        if iterations == 0 {
            return Err(ParamError::OutOfRange {
                name: "max_iterations",
                got: 0.0,
                expected: "> 0",
            });
        }
        self.max_iterations = iterations;
        Ok(())
    }

    /// Active unit system.
    #[inline]
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Set the unit system, re-deriving `g` and `kn` atomically.
    ///
    /// Idempotent: setting the same system twice yields identical
    /// constants.
    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
        self.constants = UnitConstants::for_system(units);
    }

    /// Gravity and Manning constants for the active unit system.
    #[inline]
    pub fn unit_constants(&self) -> UnitConstants {
        self.constants
    }

    /// Minimum number of points for a curve to be accepted.
    #[inline]
    pub fn min_curve_size(&self) -> usize {
        self.min_curve_points
    }

    /// Set the minimum curve size (≥ 1, and ≤ the per-curve point cap).
    pub fn set_min_curve_size(&mut self, size: usize) -> Result<(), ParamError> {
        if size == 0 || size > self.num_points {
            return Err(ParamError::OutOfRange {
                name: "min_curve_size",
                got: size as f64,
                expected: "in [1, number_of_points_per_curve]",
            });
        }
        self.min_curve_points = size;
        Ok(())
    }

    /// Number of stations per backwater integration.
    #[inline]
    pub fn num_backwater_steps(&self) -> usize {
        self.num_steps
    }

    /// Set the number of backwater stations (must be > 0).
    pub fn set_num_backwater_steps(&mut self, steps: usize) -> Result<(), ParamError> {
        if steps == 0 {
            return Err(ParamError::OutOfRange {
                name: "num_backwater_steps",
                got: 0.0,
                expected: "> 0",
            });
        }
        self.num_steps = steps;
        Ok(())
    }

    /// Shared numerical context derived from these parameters.
    #[inline]
    pub fn numeric_context(&self) -> NumericContext {
        NumericContext {
            g: self.constants.g,
            kn: self.constants.kn,
            tol: self.convergence_tol,
            max_iter: self.max_iterations,
        }
    }

    fn integrator(&self) -> BackwaterIntegrator {
        BackwaterIntegrator {
            num_steps: self.num_steps,
            num_points: self.num_points,
            max_depth_frac: self.max_depth_frac,
            ctx: self.numeric_context(),
        }
    }
}

// =============================================================================
// Max-Flow Search
// =============================================================================

/// Result of the maximum-admissible-flow search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxFlow {
    /// Largest flow whose critical depth stays at the depth limit.
    pub flow: f64,
    /// Critical depth at that flow (≈ `max_depth_frac × full_height`).
    pub critical_depth: f64,
}

// =============================================================================
// HPG Creator
// =============================================================================

/// Orchestrates HPG creation for one reach at a time.
///
/// Holds the tunable parameters plus a per-instance last-error code, reset
/// at the start of every [`auto_create_hpg`](Self::auto_create_hpg) call.
/// For concurrent creation across reaches, give each worker its own
/// creator (the type is `Clone` and cheap to copy).
#[derive(Clone, Debug, Default)]
pub struct HpgCreator {
    params: HpgParams,
    last_error: ErrorCode,
}

impl HpgCreator {
    /// Creator with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creator with explicit parameters.
    pub fn with_params(params: HpgParams) -> Self {
        Self {
            params,
            last_error: ErrorCode::None,
        }
    }

    /// Read access to the parameters.
    #[inline]
    pub fn params(&self) -> &HpgParams {
        &self.params
    }

    /// Mutable access to the parameters (validated setters live on
    /// [`HpgParams`]).
    #[inline]
    pub fn params_mut(&mut self) -> &mut HpgParams {
        &mut self.params
    }

    /// Error code from the most recent creation call (0 = no error).
    ///
    /// See [`ErrorCode`] for the stable partition.
    #[inline]
    pub fn error_code(&self) -> i32 {
        self.last_error.as_i32()
    }

    /// Largest flow for which the cross-section sustains a depth at or
    /// below `max_depth_frac × full_height` under critical-flow control.
    ///
    /// Critical flow is monotone increasing in depth, so the answer is the
    /// critical flow at the depth limit itself; the subsequent bounded
    /// critical-depth solve confirms the inverse within the configured
    /// tolerance and provides the reported depth. The probe depth stops
    /// one tolerance short of the crown, where a closed section's
    /// free-surface width vanishes, so a depth fraction of 1.0 probes the
    /// section just below full rather than the degenerate crown itself.
    pub fn find_max_flow(&self, reach: &Reach) -> Result<MaxFlow, SolverError> {
        let ctx = self.params.numeric_context();
        let h_full = reach.full_height();
        let y_limit = (self.params.max_depth_frac * h_full).min((1.0 - ctx.tol) * h_full);
        if h_full <= ctx.tol || reach.shape.area(y_limit) <= ctx.tol {
            return Err(SolverError::DegenerateGeometry);
        }
        let flow = reach.shape.critical_flow(y_limit, ctx.g);
        if flow <= ctx.tol {
            return Err(SolverError::DegenerateGeometry);
        }
        let yc = critical_depth(reach, flow, &ctx)?;
        Ok(MaxFlow {
            flow,
            critical_depth: yc,
        })
    }

    /// Compute one backwater curve for a flow.
    ///
    /// The downstream control depth is the largest of critical depth,
    /// normal depth (when one exists), and the supplied surcharged
    /// boundary depth, if any. For adverse or flat reaches the normal
    /// depth is undefined and the curve is controlled by critical depth or
    /// the boundary alone.
    pub fn compute_hpg_curve(
        &self,
        reach: &Reach,
        flow: f64,
        pressurized_height: Option<f64>,
    ) -> Result<FlowCurve, SolverError> {
        let ctx = self.params.numeric_context();
        let yc = critical_depth(reach, flow, &ctx)?;
        let yn = normal_depth(reach, flow, &ctx)?;

        let mut start = yc.max(yn.unwrap_or(0.0));
        if let Some(boundary) = pressurized_height {
            start = start.max(boundary);
        }

        let profile = self.params.integrator().integrate(reach, flow, start, yc)?;
        Ok(FlowCurve {
            flow,
            normal_depth: yn,
            critical_depth: yc,
            pressurized: profile.pressurized,
            points: profile.points,
        })
    }

    /// Compute and validate one backwater curve.
    ///
    /// On top of [`compute_hpg_curve`](Self::compute_hpg_curve)'s own
    /// failure modes, rejects curves that retained fewer than
    /// `min_curve_size` points before hitting the depth limit or the end
    /// of the reach.
    pub fn compute_valid_hpg_curve(
        &self,
        reach: &Reach,
        flow: f64,
        pressurized_height: Option<f64>,
    ) -> Result<FlowCurve, SolverError> {
        let curve = self.compute_hpg_curve(reach, flow, pressurized_height)?;
        let need = self.params.min_curve_points;
        if curve.len() < need {
            return Err(SolverError::TooFewPoints {
                got: curve.len(),
                need,
            });
        }
        Ok(curve)
    }

    /// Create a complete HPG for a reach.
    ///
    /// Degrades gracefully: a reach that cannot sustain any flow yields an
    /// empty table with [`ErrorCode::DegenerateGeometry`]; individual bad
    /// flow samples are dropped and creation continues. The returned table
    /// always satisfies the ascending-flow invariant, and an empty table
    /// always pairs with a nonzero [`error_code`](Self::error_code).
    pub fn auto_create_hpg(&mut self, reach: &Reach) -> Hpg {
        self.last_error = ErrorCode::None;
        let mut hpg = Hpg::new(reach.reverse_slope, self.params.units);

        let max_flow = match self.find_max_flow(reach) {
            Ok(m) => m,
            Err(SolverError::DegenerateGeometry) => {
                self.last_error = ErrorCode::DegenerateGeometry;
                return hpg;
            }
            Err(_) => {
                // the confirming critical-depth solve failed to converge
                self.last_error = ErrorCode::ConvergenceFailure;
                return hpg;
            }
        };

        let flows = find_flow_increments_by_flow(
            MIN_FLOW_FRACTION * max_flow.flow,
            max_flow.flow,
            self.params.num_hpc,
        );

        let mut attempts = 0usize;
        let mut convergence_failures = 0usize;
        for flow in flows {
            attempts += 1;
            match self.compute_valid_hpg_curve(reach, flow, None) {
                Ok(curve) => {
                    hpg.insert(curve);
                }
                Err(SolverError::NonConvergence { .. }) | Err(SolverError::NoBracket { .. }) => {
                    convergence_failures += 1;
                }
                Err(_) => {}
            }
        }

        if hpg.is_empty() {
            self.last_error = if attempts > 0 && convergence_failures == attempts {
                ErrorCode::ConvergenceFailure
            } else {
                ErrorCode::NoValidCurves
            };
        } else if hpg.len() < 2 {
            self.last_error = ErrorCode::InsufficientCurves;
        }
        hpg
    }
}

// =============================================================================
// Batch Creation
// =============================================================================

/// Create HPGs for many reaches in parallel, one creator per reach.
///
/// Creation is embarrassingly parallel across reaches: each call is
/// side-effect-free apart from its own creator's error field, which is
/// returned here alongside the table.
#[cfg(feature = "parallel")]
pub fn create_hpgs(params: &HpgParams, reaches: &[Reach]) -> Vec<(Hpg, i32)> {
    use rayon::prelude::*;

    reaches
        .par_iter()
        .map(|reach| {
            let mut creator = HpgCreator::with_params(*params);
            let hpg = creator.auto_create_hpg(reach);
            (hpg, creator.error_code())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xs::Shape;

    fn si_params() -> HpgParams {
        let mut p = HpgParams::default();
        p.set_units(UnitSystem::Si);
        p
    }

    fn si_pipe(slope: f64) -> Reach {
        Reach::new(50.0, slope, 0.013, 100.0, Shape::circular(1.0), false).unwrap()
    }

    #[test]
    fn test_default_parameters() {
        let p = HpgParams::default();
        assert_eq!(p.convergence_tolerance(), 1e-6);
        assert_eq!(p.max_iterations(), 100);
        assert_eq!(p.max_depth_fraction(), 0.80);
        assert_eq!(p.number_of_curves(), 20);
        assert_eq!(p.number_of_points_per_curve(), 40);
        assert_eq!(p.units(), UnitSystem::English);
    }

    #[test]
    fn test_setters_validate() {
        let mut p = HpgParams::default();
        assert!(p.set_convergence_tolerance(0.0).is_err());
        assert!(p.set_max_depth_fraction(1.5).is_err());
        assert!(p.set_max_iterations(0).is_err());
        assert!(p.set_min_curve_size(100).is_err());
        // rejected values leave the previous ones in place
        assert_eq!(p.convergence_tolerance(), 1e-6);
        assert_eq!(p.max_depth_fraction(), 0.80);
    }

    #[test]
    fn test_set_units_rederives_constants_atomically() {
        let mut p = HpgParams::default();
        p.set_units(UnitSystem::Si);
        let first = p.unit_constants();
        p.set_units(UnitSystem::Si);
        assert_eq!(p.unit_constants(), first);
        assert_eq!(first.g, 9.81);
        assert_eq!(first.kn, 1.0);
    }

    #[test]
    fn test_find_max_flow_hits_depth_limit() {
        let creator = HpgCreator::with_params(si_params());
        let reach = si_pipe(0.01);
        let m = creator.find_max_flow(&reach).unwrap();
        assert!(m.flow > 0.0);
        let y_limit = 0.80 * reach.full_height();
        assert!(
            (m.critical_depth - y_limit).abs() <= creator.params().convergence_tolerance(),
            "yc = {}, limit = {}",
            m.critical_depth,
            y_limit
        );
    }

    #[test]
    fn test_max_depth_fraction_one_is_not_degenerate() {
        // at a depth fraction of 1.0 the probe must stop short of the
        // crown, where a closed section's top width vanishes
        let mut params = si_params();
        params.set_max_depth_fraction(1.0).unwrap();
        let mut creator = HpgCreator::with_params(params);
        let reach = si_pipe(0.01);

        let m = creator.find_max_flow(&reach).unwrap();
        assert!(m.flow > 0.0);

        let hpg = creator.auto_create_hpg(&reach);
        assert_eq!(creator.error_code(), 0);
        assert!(hpg.len() >= 2);
    }

    #[test]
    fn test_unconverged_max_flow_maps_to_convergence_code() {
        // an iteration cap of 1 starves the confirming critical-depth
        // solve; that is a convergence failure, not degenerate geometry
        let mut params = si_params();
        params.set_max_iterations(1).unwrap();
        let mut creator = HpgCreator::with_params(params);
        let reach = si_pipe(0.01);

        assert_eq!(
            creator.find_max_flow(&reach),
            Err(SolverError::NonConvergence { iterations: 1 })
        );
        let hpg = creator.auto_create_hpg(&reach);
        assert!(hpg.is_empty());
        assert_eq!(creator.error_code(), ErrorCode::ConvergenceFailure.as_i32());
    }

    #[test]
    fn test_find_max_flow_degenerate_geometry() {
        let creator = HpgCreator::with_params(si_params());
        let reach = Reach::new(50.0, 0.01, 0.013, 100.0, Shape::circular(0.0), false).unwrap();
        assert_eq!(
            creator.find_max_flow(&reach),
            Err(SolverError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_compute_hpg_curve_is_deterministic() {
        let creator = HpgCreator::with_params(si_params());
        let reach = si_pipe(0.01);
        let a = creator.compute_hpg_curve(&reach, 0.3, None).unwrap();
        let b = creator.compute_hpg_curve(&reach, 0.3, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_flat_reach_curve_uses_critical_control() {
        let creator = HpgCreator::with_params(si_params());
        let reach = si_pipe(0.0);
        let curve = creator.compute_valid_hpg_curve(&reach, 0.3, None).unwrap();
        assert_eq!(curve.normal_depth, None);
        assert!(curve.len() >= creator.params().min_curve_size());
        let start = curve.downstream_depth().unwrap();
        assert!((start - curve.critical_depth).abs() < 1e-9);
    }

    #[test]
    fn test_surcharged_boundary_raises_control() {
        let creator = HpgCreator::with_params(si_params());
        let reach = si_pipe(0.001);
        let free = creator.compute_hpg_curve(&reach, 0.2, None).unwrap();
        let surcharged = creator.compute_hpg_curve(&reach, 0.2, Some(0.7)).unwrap();
        assert!(
            surcharged.downstream_depth().unwrap() > free.downstream_depth().unwrap()
        );
    }

    #[test]
    fn test_error_state_resets_between_calls() {
        let mut creator = HpgCreator::with_params(si_params());
        let bad = Reach::new(50.0, 0.01, 0.013, 100.0, Shape::circular(0.0), false).unwrap();
        creator.auto_create_hpg(&bad);
        assert_eq!(creator.error_code(), ErrorCode::DegenerateGeometry.as_i32());

        let good = si_pipe(0.01);
        let hpg = creator.auto_create_hpg(&good);
        assert!(!hpg.is_empty());
        assert_eq!(creator.error_code(), 0);
    }
}
