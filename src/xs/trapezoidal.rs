//! Trapezoidal (open channel) cross-section.
//!
//! Side slope is expressed as horizontal run per unit rise (z : 1), the
//! usual open-channel convention. A side slope of zero degenerates to a
//! rectangular channel.

use super::CrossSection;

/// Trapezoidal channel with symmetric side slopes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoidal {
    /// Bottom width.
    pub bottom_width: f64,
    /// Horizontal run per unit rise of each bank (z in z:1).
    pub side_slope: f64,
    /// Bank-full height.
    pub height: f64,
}

impl Trapezoidal {
    /// Create a trapezoidal section.
    #[inline]
    pub fn new(bottom_width: f64, side_slope: f64, height: f64) -> Self {
        Self {
            bottom_width,
            side_slope,
            height,
        }
    }

    #[inline]
    fn clamp_depth(&self, depth: f64) -> f64 {
        depth.clamp(0.0, self.height.max(0.0))
    }
}

impl CrossSection for Trapezoidal {
    fn area(&self, depth: f64) -> f64 {
        if self.bottom_width <= 0.0 && self.side_slope <= 0.0 {
            return 0.0;
        }
        let y = self.clamp_depth(depth);
        y * (self.bottom_width + self.side_slope * y)
    }

    fn top_width(&self, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        let y = self.clamp_depth(depth);
        self.bottom_width + 2.0 * self.side_slope * y
    }

    fn wetted_perimeter(&self, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        let y = self.clamp_depth(depth);
        self.bottom_width + 2.0 * y * (1.0 + self.side_slope * self.side_slope).sqrt()
    }

    fn full_height(&self) -> f64 {
        self.height.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_area() {
        // b = 2, z = 1.5, y = 1 -> A = 1 * (2 + 1.5) = 3.5
        let xs = Trapezoidal::new(2.0, 1.5, 2.0);
        assert!((xs.area(1.0) - 3.5).abs() < TOL);
    }

    #[test]
    fn test_zero_side_slope_matches_rectangle() {
        use crate::xs::Rectangular;
        let trap = Trapezoidal::new(2.0, 0.0, 1.5);
        let rect = Rectangular::new(2.0, 1.5);
        assert!((trap.area(0.7) - rect.area(0.7)).abs() < TOL);
        assert!((trap.wetted_perimeter(0.7) - rect.wetted_perimeter(0.7)).abs() < TOL);
    }

    #[test]
    fn test_wetted_perimeter_345() {
        // z = 4/3 gives bank length 5/3 per unit rise
        let xs = Trapezoidal::new(1.0, 4.0 / 3.0, 2.0);
        let expected = 1.0 + 2.0 * 1.0 * (5.0 / 3.0);
        assert!((xs.wetted_perimeter(1.0) - expected).abs() < 1e-10);
    }
}
