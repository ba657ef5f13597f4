//! Immutable conduit reach description.
//!
//! A [`Reach`] is constructed once at model load and is read-only for the
//! life of a creation run. Station 0 is the downstream end; stations
//! increase going upstream.

use crate::error::ReachError;
use crate::xs::{CrossSection, Shape};

/// One conduit reach: geometry, slope, and roughness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    /// Conduit length along the invert.
    pub length: f64,
    /// Magnitude of the bed slope (non-negative; direction is `reverse_slope`).
    pub slope: f64,
    /// Manning roughness coefficient n.
    pub roughness: f64,
    /// Invert elevation at the downstream end.
    pub downstream_invert: f64,
    /// Cross-section shape.
    pub shape: Shape,
    /// True for an adverse slope: the bed rises in the flow direction,
    /// so no normal depth exists.
    pub reverse_slope: bool,
}

impl Reach {
    /// Create a reach, validating the invariants `length > 0` and
    /// `roughness > 0`.
    pub fn new(
        length: f64,
        slope: f64,
        roughness: f64,
        downstream_invert: f64,
        shape: Shape,
        reverse_slope: bool,
    ) -> Result<Self, ReachError> {
        if !(length > 0.0) {
            return Err(ReachError::NonPositiveLength(length));
        }
        if !(roughness > 0.0) {
            return Err(ReachError::NonPositiveRoughness(roughness));
        }
        Ok(Self {
            length,
            slope: slope.abs(),
            roughness,
            downstream_invert,
            shape,
            reverse_slope,
        })
    }

    /// Signed bed slope: positive when the bed drops in the flow
    /// direction, negative for an adverse reach.
    #[inline]
    pub fn bed_slope(&self) -> f64 {
        if self.reverse_slope {
            -self.slope
        } else {
            self.slope
        }
    }

    /// Invert elevation at the upstream end.
    #[inline]
    pub fn upstream_invert(&self) -> f64 {
        self.downstream_invert + self.bed_slope() * self.length
    }

    /// Invert elevation at a station measured upstream from the
    /// downstream end.
    #[inline]
    pub fn invert_at(&self, station: f64) -> f64 {
        self.downstream_invert + self.bed_slope() * station
    }

    /// Full height of the cross-section.
    #[inline]
    pub fn full_height(&self) -> f64 {
        self.shape.full_height()
    }

    /// True when the reach has no normal depth (flat or adverse bed).
    #[inline]
    pub fn has_normal_depth(&self) -> bool {
        !self.reverse_slope && self.slope > 0.0
    }
}
