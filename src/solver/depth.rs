//! Critical and normal depth solvers.
//!
//! Both are bounded root-finds over the cross-section's flow/depth
//! relationships:
//!
//! - critical depth: `Qc(y) = √(g A³ / T)` equals the target flow
//!   (Froude number 1)
//! - normal depth: Manning uniform flow `K(y) √S₀` equals the target flow
//!
//! Normal depth does not exist on a flat or adverse bed, and an open-channel
//! normal depth may not exist when the flow exceeds the full-conduit
//! capacity; both cases report `None` rather than an error.

use crate::error::SolverError;
use crate::reach::Reach;
use crate::solver::NumericContext;
use crate::solver::root::bisect;
use crate::xs::CrossSection;

/// Critical depth for the given flow.
///
/// Solved on the open interval just inside `(0, full_height)`; at the crown
/// the free-surface width vanishes and the critical-flow relation blows up,
/// so the bracket stops one tolerance short of full.
pub fn critical_depth(reach: &Reach, flow: f64, ctx: &NumericContext) -> Result<f64, SolverError> {
    let h = reach.full_height();
    if h <= ctx.tol || flow <= 0.0 {
        return Err(SolverError::DegenerateGeometry);
    }
    let lo = ctx.tol * h;
    let hi = (1.0 - ctx.tol) * h;
    bisect(
        |y| reach.shape.critical_flow(y, ctx.g) - flow,
        lo,
        hi,
        ctx.tol,
        ctx.max_iter,
    )
}

/// Normal depth for the given flow, if one exists.
///
/// Returns `Ok(None)` when the reach is flat or adverse (no gravity/friction
/// balance exists) or when the flow exceeds the maximum conveyance of the
/// section (no open-channel uniform depth). For closed shapes the
/// conveyance is not monotone to the crown — a circular section peaks near
/// 0.94 of the diameter — so admissibility is probed against the
/// conveyance peak and the root taken on the rising branch below it.
pub fn normal_depth(
    reach: &Reach,
    flow: f64,
    ctx: &NumericContext,
) -> Result<Option<f64>, SolverError> {
    if !reach.has_normal_depth() {
        return Ok(None);
    }
    let h = reach.full_height();
    if h <= ctx.tol || flow <= 0.0 {
        return Err(SolverError::DegenerateGeometry);
    }
    let sqrt_s = reach.slope.sqrt();
    let residual = |y: f64| reach.shape.conveyance(y, ctx.kn, reach.roughness) * sqrt_s - flow;
    let y_peak = conveyance_peak(reach, ctx);
    if residual(y_peak) < 0.0 {
        // flow exceeds the section's uniform-flow capacity
        return Ok(None);
    }
    bisect(residual, ctx.tol * h, y_peak, ctx.tol, ctx.max_iter).map(Some)
}

/// Depth of maximum conveyance, by bounded ternary search.
///
/// Conveyance is unimodal in depth for the shapes in this crate: monotone
/// to the crown for open channels, peaked just below the crown for closed
/// conduits.
fn conveyance_peak(reach: &Reach, ctx: &NumericContext) -> f64 {
    let k = |y: f64| reach.shape.conveyance(y, ctx.kn, reach.roughness);
    let (mut lo, mut hi) = (0.0, reach.full_height());
    for _ in 0..ctx.max_iter {
        if hi - lo <= ctx.tol {
            break;
        }
        let third = (hi - lo) / 3.0;
        let m1 = lo + third;
        let m2 = hi - third;
        if k(m1) < k(m2) {
            lo = m1;
        } else {
            hi = m2;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{UnitConstants, UnitSystem};
    use crate::xs::Shape;

    fn ctx() -> NumericContext {
        let uc = UnitConstants::for_system(UnitSystem::Si);
        NumericContext {
            g: uc.g,
            kn: uc.kn,
            tol: 1e-8,
            max_iter: 200,
        }
    }

    fn pipe(slope: f64, reverse: bool) -> Reach {
        Reach::new(50.0, slope, 0.013, 100.0, Shape::circular(1.0), reverse).unwrap()
    }

    #[test]
    fn test_critical_depth_is_froude_one() {
        let ctx = ctx();
        let r = pipe(0.01, false);
        let q = 0.5;
        let yc = critical_depth(&r, q, &ctx).unwrap();
        // Fr² = Q² T / (g A³) should be 1 at critical depth
        let a = r.shape.area(yc);
        let t = r.shape.top_width(yc);
        let fr2 = q * q * t / (ctx.g * a * a * a);
        assert!((fr2 - 1.0).abs() < 1e-4, "Fr² = {fr2}");
    }

    #[test]
    fn test_critical_depth_monotone_in_flow() {
        let ctx = ctx();
        let r = pipe(0.01, false);
        let y1 = critical_depth(&r, 0.2, &ctx).unwrap();
        let y2 = critical_depth(&r, 0.4, &ctx).unwrap();
        let y3 = critical_depth(&r, 0.8, &ctx).unwrap();
        assert!(y1 < y2 && y2 < y3);
    }

    #[test]
    fn test_normal_depth_reproduces_manning_flow() {
        let ctx = ctx();
        let r = pipe(0.01, false);
        let q = 0.5;
        let yn = normal_depth(&r, q, &ctx).unwrap().unwrap();
        let k = r.shape.conveyance(yn, ctx.kn, r.roughness);
        let q_check = k * r.slope.sqrt();
        assert!((q_check - q).abs() < 1e-4);
    }

    #[test]
    fn test_normal_depth_beyond_full_pipe_conveyance() {
        // circular conveyance peaks near 0.94 D, above the full-pipe
        // value: K_full√S ≈ 2.40, K_max√S ≈ 2.58 for this reach. A flow
        // between the two still has a uniform depth below the crown.
        let ctx = ctx();
        let r = pipe(0.01, false);
        let q = 2.45;
        let yn = normal_depth(&r, q, &ctx).unwrap().unwrap();
        assert!(yn > 0.8 && yn < 0.94, "yn = {yn}");
        let q_check = r.shape.conveyance(yn, ctx.kn, r.roughness) * r.slope.sqrt();
        assert!((q_check - q).abs() < 1e-4);

        // past the conveyance peak there is no uniform depth at all
        assert_eq!(normal_depth(&r, 2.7, &ctx).unwrap(), None);
    }

    #[test]
    fn test_flat_reach_has_no_normal_depth() {
        let ctx = ctx();
        let r = pipe(0.0, false);
        assert_eq!(normal_depth(&r, 0.5, &ctx).unwrap(), None);
    }

    #[test]
    fn test_adverse_reach_has_no_normal_depth() {
        let ctx = ctx();
        let r = pipe(0.01, true);
        assert_eq!(normal_depth(&r, 0.5, &ctx).unwrap(), None);
    }

    #[test]
    fn test_steep_slope_normal_below_critical() {
        let ctx = ctx();
        // steep slope: yn < yc
        let r = pipe(0.05, false);
        let q = 0.3;
        let yn = normal_depth(&r, q, &ctx).unwrap().unwrap();
        let yc = critical_depth(&r, q, &ctx).unwrap();
        assert!(yn < yc, "yn = {yn}, yc = {yc}");
    }

    #[test]
    fn test_degenerate_geometry_is_reported() {
        let ctx = ctx();
        let r = Reach::new(50.0, 0.01, 0.013, 100.0, Shape::circular(0.0), false).unwrap();
        assert_eq!(
            critical_depth(&r, 0.5, &ctx),
            Err(SolverError::DegenerateGeometry)
        );
    }
}
