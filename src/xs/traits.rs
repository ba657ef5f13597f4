//! Cross-section capability trait.
//!
//! The HPG engine never depends on concrete shapes, only on this trait:
//! flow area, top width, and wetted perimeter as functions of depth, plus
//! the full height of the section. Everything else the solvers need
//! (hydraulic radius, conveyance, critical flow) is derived here.
//!
//! # Contract
//!
//! For the bounded root-finders to terminate, implementations must be
//! defined on `[0, full_height]` with `area` and `wetted_perimeter`
//! monotone non-decreasing in depth. Depths outside the range are clamped.
//!
//! # Example
//! ```
//! use hpg_rs::xs::{Circular, CrossSection};
//!
//! let pipe = Circular::new(1.0);
//! let half_full = pipe.area(0.5);
//! assert!((half_full - std::f64::consts::PI / 8.0).abs() < 1e-12);
//! ```

/// Capability interface over conduit cross-section shapes.
pub trait CrossSection {
    /// Flow area at the given depth.
    fn area(&self, depth: f64) -> f64;

    /// Free-surface width at the given depth.
    fn top_width(&self, depth: f64) -> f64;

    /// Wetted perimeter at the given depth.
    fn wetted_perimeter(&self, depth: f64) -> f64;

    /// Full height (rise) of the section; diameter for circular shapes.
    fn full_height(&self) -> f64;

    /// Hydraulic radius A/P at the given depth, zero when dry.
    #[inline]
    fn hydraulic_radius(&self, depth: f64) -> f64 {
        let p = self.wetted_perimeter(depth);
        if p > 0.0 { self.area(depth) / p } else { 0.0 }
    }

    /// Critical flow at the given depth: Qc = √(g A³ / T).
    ///
    /// This is the flow for which the given depth is critical (Froude = 1).
    /// Monotone increasing in depth for the shapes in this crate, which is
    /// what makes the max-flow search a monotone bracket problem.
    #[inline]
    fn critical_flow(&self, depth: f64, g: f64) -> f64 {
        let a = self.area(depth);
        let t = self.top_width(depth);
        if a <= 0.0 || t <= 0.0 {
            return 0.0;
        }
        (g * a * a * a / t).sqrt()
    }

    /// Manning conveyance at the given depth: K = (kn / n) A R^(2/3).
    ///
    /// Uniform flow satisfies Q = K √S₀.
    #[inline]
    fn conveyance(&self, depth: f64, kn: f64, roughness: f64) -> f64 {
        let a = self.area(depth);
        if a <= 0.0 {
            return 0.0;
        }
        let r = self.hydraulic_radius(depth);
        (kn / roughness) * a * r.powf(2.0 / 3.0)
    }
}
