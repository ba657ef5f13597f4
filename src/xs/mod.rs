//! Conduit cross-section geometry.
//!
//! Provides the closed set of shapes the engine knows about:
//! - [`Circular`]: sewer pipes (exact circular-segment geometry)
//! - [`Rectangular`]: box culverts
//! - [`Trapezoidal`]: open channels
//!
//! # Capability Trait
//!
//! The solvers consume shapes only through the [`CrossSection`] trait
//! (area, top width, wetted perimeter, full height, and quantities derived
//! from those). [`Shape`] is an enum over the built-in variants for
//! zero-cost dispatch when the shape is known at model-load time.

mod circular;
mod rectangular;
mod trapezoidal;
pub mod traits;

pub use circular::Circular;
pub use rectangular::Rectangular;
pub use traits::CrossSection;
pub use trapezoidal::Trapezoidal;

/// Closed set of built-in cross-section shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Circular conduit.
    Circular(Circular),
    /// Rectangular conduit.
    Rectangular(Rectangular),
    /// Trapezoidal channel.
    Trapezoidal(Trapezoidal),
}

impl Shape {
    /// Circular shape of the given diameter.
    #[inline]
    pub fn circular(diameter: f64) -> Self {
        Self::Circular(Circular::new(diameter))
    }

    /// Rectangular shape of the given width and height.
    #[inline]
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self::Rectangular(Rectangular::new(width, height))
    }

    /// Trapezoidal shape.
    #[inline]
    pub fn trapezoidal(bottom_width: f64, side_slope: f64, height: f64) -> Self {
        Self::Trapezoidal(Trapezoidal::new(bottom_width, side_slope, height))
    }
}

impl CrossSection for Shape {
    #[inline]
    fn area(&self, depth: f64) -> f64 {
        match self {
            Self::Circular(s) => s.area(depth),
            Self::Rectangular(s) => s.area(depth),
            Self::Trapezoidal(s) => s.area(depth),
        }
    }

    #[inline]
    fn top_width(&self, depth: f64) -> f64 {
        match self {
            Self::Circular(s) => s.top_width(depth),
            Self::Rectangular(s) => s.top_width(depth),
            Self::Trapezoidal(s) => s.top_width(depth),
        }
    }

    #[inline]
    fn wetted_perimeter(&self, depth: f64) -> f64 {
        match self {
            Self::Circular(s) => s.wetted_perimeter(depth),
            Self::Rectangular(s) => s.wetted_perimeter(depth),
            Self::Trapezoidal(s) => s.wetted_perimeter(depth),
        }
    }

    #[inline]
    fn full_height(&self) -> f64 {
        match self {
            Self::Circular(s) => s.full_height(),
            Self::Rectangular(s) => s.full_height(),
            Self::Trapezoidal(s) => s.full_height(),
        }
    }
}
