//! Rectangular (box culvert) cross-section.

use super::CrossSection;

/// Rectangular conduit of a given width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangular {
    /// Bottom width.
    pub width: f64,
    /// Interior height (rise).
    pub height: f64,
}

impl Rectangular {
    /// Create a rectangular section.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    fn clamp_depth(&self, depth: f64) -> f64 {
        depth.clamp(0.0, self.height.max(0.0))
    }
}

impl CrossSection for Rectangular {
    fn area(&self, depth: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        self.width * self.clamp_depth(depth)
    }

    fn top_width(&self, depth: f64) -> f64 {
        if self.width <= 0.0 || depth <= 0.0 || depth >= self.height {
            return 0.0;
        }
        self.width
    }

    fn wetted_perimeter(&self, depth: f64) -> f64 {
        if self.width <= 0.0 || depth <= 0.0 {
            return 0.0;
        }
        let y = self.clamp_depth(depth);
        if y >= self.height {
            // closed box flowing full
            2.0 * (self.width + self.height)
        } else {
            self.width + 2.0 * y
        }
    }

    fn full_height(&self) -> f64 {
        self.height.max(0.0)
    }
}
