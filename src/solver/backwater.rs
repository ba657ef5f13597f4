//! Standard-step backwater integrator.
//!
//! Integrates the gradually-varied-flow equation upstream from a
//! downstream control, one station at a time. Between a known downstream
//! section and the unknown upstream section Δx away, the energy balance is
//!
//! ```text
//! E(y_up) = E(y_dn) + (S̄f − S₀)·Δx
//! ```
//!
//! with specific energy `E(y) = y + Q²/(2g A²)` and friction slope
//! `Sf(y) = (Q / K(y))²` averaged over the two sections. The upstream depth
//! is found by bisection on the subcritical branch `y ∈ [y_c, full]`, where
//! `E` is monotone increasing and the root is unique.
//!
//! Termination, checked at every station:
//! - depth reaches `max_depth_frac × full_height` → pressurized, stop
//!   normally with the flag set
//! - full reach length traversed → stop normally
//! - per-step bisection fails to converge → abort the curve
//! - non-physical depth or vanishing conveyance → abort the curve
//!
//! The full `num_steps` computation decides validity; only up to
//! `num_points` stations are retained in the output profile.

use crate::error::SolverError;
use crate::hpg::ProfilePoint;
use crate::reach::Reach;
use crate::solver::NumericContext;
use crate::solver::root::bisect;
use crate::xs::CrossSection;

/// One integrated water-surface profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// Retained stations, ordered downstream → upstream.
    pub points: Vec<ProfilePoint>,
    /// True when integration stopped at the pressurization threshold.
    pub pressurized: bool,
}

/// Standard-step integrator for one reach/flow/boundary combination.
#[derive(Clone, Copy, Debug)]
pub struct BackwaterIntegrator {
    /// Number of integration stations along the reach.
    pub num_steps: usize,
    /// Maximum number of stations retained in the output profile.
    pub num_points: usize,
    /// Fraction of full height treated as the pressurization threshold.
    pub max_depth_frac: f64,
    /// Shared numerical parameters.
    pub ctx: NumericContext,
}

impl BackwaterIntegrator {
    /// Integrate upstream from `start_depth` at the downstream end.
    ///
    /// `critical` is the critical depth for this flow; it anchors the
    /// subcritical bisection bracket. When the energy balance admits no
    /// subcritical solution (steep-slope drawdown), the depth is held at
    /// critical and the march continues.
    pub fn integrate(
        &self,
        reach: &Reach,
        flow: f64,
        start_depth: f64,
        critical: f64,
    ) -> Result<Profile, SolverError> {
        let h_full = reach.full_height();
        if h_full <= self.ctx.tol {
            return Err(SolverError::DegenerateGeometry);
        }
        let y_limit = self.max_depth_frac * h_full;
        let dx = reach.length / self.num_steps as f64;
        let s0 = reach.bed_slope();

        let energy = |y: f64| {
            let a = reach.shape.area(y);
            y + flow * flow / (2.0 * self.ctx.g * a * a)
        };
        let friction = |y: f64| {
            let k = reach.shape.conveyance(y, self.ctx.kn, reach.roughness);
            if k > 0.0 {
                let s = flow / k;
                s * s
            } else {
                f64::INFINITY
            }
        };

        let mut stations: Vec<(f64, f64)> = Vec::with_capacity(self.num_steps + 1);
        let mut pressurized = false;

        let mut y = start_depth.max(self.ctx.tol * h_full);
        stations.push((0.0, y));
        if y + self.ctx.tol >= y_limit {
            pressurized = true;
        }

        let mut step = 1;
        while !pressurized && step <= self.num_steps {
            let x = step as f64 * dx;
            let e_dn = energy(y);
            let sf_dn = friction(y);
            if !sf_dn.is_finite() {
                return Err(SolverError::NonPhysical {
                    station: x - dx,
                    depth: y,
                });
            }

            let residual = |y_up: f64| {
                let sf_avg = 0.5 * (friction(y_up) + sf_dn);
                energy(y_up) - e_dn - (sf_avg - s0) * dx
            };

            let lo = critical.max(self.ctx.tol * h_full);
            let y_up = if residual(lo) > 0.0 {
                // no subcritical root: profile pinned at critical depth
                lo
            } else {
                bisect(residual, lo, h_full, self.ctx.tol, self.ctx.max_iter)?
            };

            if y_up <= 0.0 || reach.shape.area(y_up) <= 0.0 {
                return Err(SolverError::NonPhysical {
                    station: x,
                    depth: y_up,
                });
            }

            y = y_up;
            stations.push((x, y));
            if y + self.ctx.tol >= y_limit {
                pressurized = true;
            }
            step += 1;
        }

        Ok(Profile {
            points: decimate(&stations, self.num_points, reach),
            pressurized,
        })
    }
}

/// Retain at most `max_points` stations, always including the first and
/// last computed station. A cap below 2 is treated as 2, since the first
/// and last station are always kept.
fn decimate(stations: &[(f64, f64)], max_points: usize, reach: &Reach) -> Vec<ProfilePoint> {
    let n = stations.len();
    let max_points = max_points.max(2);
    let to_point = |&(x, y): &(f64, f64)| ProfilePoint {
        station: x,
        depth: y,
        head: reach.invert_at(x) + y,
    };
    if n <= max_points {
        return stations.iter().map(to_point).collect();
    }
    let mut out = Vec::with_capacity(max_points);
    let mut last_idx = usize::MAX;
    for k in 0..max_points {
        let idx = (k as f64 * (n - 1) as f64 / (max_points - 1) as f64).round() as usize;
        if idx != last_idx {
            out.push(to_point(&stations[idx]));
            last_idx = idx;
        }
    }
    out
}
