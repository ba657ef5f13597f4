//! Circular cross-section (the common sewer pipe case).
//!
//! Geometry is exact circular-segment arithmetic, not a lookup table.
//! With central angle θ = 2·acos(1 − 2y/D):
//!
//! ```text
//! A = D²/8 · (θ − sin θ)
//! P = D·θ/2
//! T = D·sin(θ/2)
//! ```

use super::CrossSection;

/// Circular conduit of a given diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circular {
    /// Inside diameter.
    pub diameter: f64,
}

impl Circular {
    /// Create a circular section. A non-positive diameter yields a
    /// degenerate section with zero area everywhere; the creator reports
    /// that as degenerate geometry rather than panicking here.
    #[inline]
    pub fn new(diameter: f64) -> Self {
        Self { diameter }
    }

    /// Central angle subtended by the water surface at depth `y`.
    #[inline]
    fn theta(&self, depth: f64) -> f64 {
        // clamp handles depth slightly past the crown from root-find overshoot
        let ratio = (1.0 - 2.0 * depth / self.diameter).clamp(-1.0, 1.0);
        2.0 * ratio.acos()
    }
}

impl CrossSection for Circular {
    fn area(&self, depth: f64) -> f64 {
        if self.diameter <= 0.0 || depth <= 0.0 {
            return 0.0;
        }
        let d = self.diameter;
        if depth >= d {
            return std::f64::consts::PI * d * d / 4.0;
        }
        let theta = self.theta(depth);
        d * d / 8.0 * (theta - theta.sin())
    }

    fn top_width(&self, depth: f64) -> f64 {
        if self.diameter <= 0.0 || depth <= 0.0 || depth >= self.diameter {
            return 0.0;
        }
        self.diameter * (self.theta(depth) / 2.0).sin()
    }

    fn wetted_perimeter(&self, depth: f64) -> f64 {
        if self.diameter <= 0.0 || depth <= 0.0 {
            return 0.0;
        }
        if depth >= self.diameter {
            return std::f64::consts::PI * self.diameter;
        }
        self.diameter * self.theta(depth) / 2.0
    }

    fn full_height(&self) -> f64 {
        self.diameter.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_half_full_area() {
        let pipe = Circular::new(2.0);
        // Half of the full circle: π D² / 8
        let expected = PI * 4.0 / 8.0;
        assert!((pipe.area(1.0) - expected).abs() < TOL);
    }

    #[test]
    fn test_full_area() {
        let pipe = Circular::new(1.0);
        assert!((pipe.area(1.0) - PI / 4.0).abs() < TOL);
        // past the crown the section is simply full
        assert!((pipe.area(1.5) - PI / 4.0).abs() < TOL);
    }

    #[test]
    fn test_top_width_at_half_depth_is_diameter() {
        let pipe = Circular::new(1.2);
        assert!((pipe.top_width(0.6) - 1.2).abs() < TOL);
    }

    #[test]
    fn test_top_width_symmetry() {
        let pipe = Circular::new(1.0);
        assert!((pipe.top_width(0.2) - pipe.top_width(0.8)).abs() < 1e-10);
    }

    #[test]
    fn test_area_monotone_in_depth() {
        let pipe = Circular::new(1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let y = i as f64 * 0.05;
            let a = pipe.area(y);
            assert!(a > prev, "area not monotone at y={y}");
            prev = a;
        }
    }

    #[test]
    fn test_degenerate_diameter() {
        let pipe = Circular::new(0.0);
        assert_eq!(pipe.area(0.5), 0.0);
        assert_eq!(pipe.top_width(0.5), 0.0);
        assert_eq!(pipe.full_height(), 0.0);
    }

    #[test]
    fn test_hydraulic_radius_full_pipe() {
        let pipe = Circular::new(1.0);
        // full pipe: R = A/P = (πD²/4)/(πD) = D/4
        assert!((pipe.hydraulic_radius(1.0) - 0.25).abs() < TOL);
    }
}
