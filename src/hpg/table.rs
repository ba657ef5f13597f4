//! The assembled Hydraulic Performance Graph.
//!
//! An [`Hpg`] is an ordered collection of accepted [`FlowCurve`]s with
//! strictly increasing flows. The downstream simulator queries it by
//! interpolation instead of re-running the iterative solve at every
//! timestep: within a curve by station, across curves linearly in flow.

use crate::hpg::FlowCurve;
use crate::units::UnitSystem;

/// Lookup table of backwater curves for one reach.
///
/// May be legitimately empty when no valid curve could be produced; the
/// creator pairs emptiness with a nonzero error code rather than an error
/// return.
#[derive(Clone, Debug, PartialEq)]
pub struct Hpg {
    curves: Vec<FlowCurve>,
    /// True when the source reach has an adverse slope.
    pub reverse_slope: bool,
    /// Unit system the table was computed in.
    pub units: UnitSystem,
}

impl Hpg {
    /// Create an empty table.
    pub fn new(reverse_slope: bool, units: UnitSystem) -> Self {
        Self {
            curves: Vec::new(),
            reverse_slope,
            units,
        }
    }

    /// Insert an accepted curve, keeping curves ordered by ascending flow.
    ///
    /// A curve whose flow duplicates an existing curve (to within f64
    /// equality) is rejected to preserve the strictly-increasing invariant.
    pub fn insert(&mut self, curve: FlowCurve) -> bool {
        match self
            .curves
            .binary_search_by(|c| c.flow.total_cmp(&curve.flow))
        {
            Ok(_) => false,
            Err(idx) => {
                self.curves.insert(idx, curve);
                true
            }
        }
    }

    /// Number of curves in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True when the table holds no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The curves, ordered by ascending flow.
    #[inline]
    pub fn curves(&self) -> &[FlowCurve] {
        &self.curves
    }

    /// Smallest and largest tabulated flows.
    pub fn flow_range(&self) -> Option<(f64, f64)> {
        let first = self.curves.first()?;
        let last = self.curves.last()?;
        Some((first.flow, last.flow))
    }

    /// Interpolated depth at (flow, station).
    ///
    /// Bilinear: linear in station within each bracketing curve, then
    /// linear in flow between the two. `None` outside the tabulated flow
    /// range or outside either curve's station range.
    pub fn depth_at(&self, flow: f64, station: f64) -> Option<f64> {
        let (lo, hi, t) = self.bracket(flow)?;
        let d_lo = lo.depth_at(station)?;
        let d_hi = hi.depth_at(station)?;
        Some(d_lo + t * (d_hi - d_lo))
    }

    /// Interpolated upstream-end head for a flow.
    ///
    /// This is the quantity the timestep loop needs most: the head at the
    /// upstream node implied by the reach's own downstream control.
    pub fn upstream_head(&self, flow: f64) -> Option<f64> {
        let (lo, hi, t) = self.bracket(flow)?;
        let h_lo = lo.upstream_head()?;
        let h_hi = hi.upstream_head()?;
        Some(h_lo + t * (h_hi - h_lo))
    }

    /// Find the curves bracketing `flow` and the interpolation weight.
    fn bracket(&self, flow: f64) -> Option<(&FlowCurve, &FlowCurve, f64)> {
        let (q_min, q_max) = self.flow_range()?;
        if flow < q_min || flow > q_max {
            return None;
        }
        let idx = self.curves.partition_point(|c| c.flow < flow);
        if idx == 0 {
            return Some((&self.curves[0], &self.curves[0], 0.0));
        }
        let lo = &self.curves[idx - 1];
        let hi = &self.curves[idx.min(self.curves.len() - 1)];
        if (hi.flow - lo.flow).abs() < f64::EPSILON {
            return Some((lo, hi, 0.0));
        }
        Some((lo, hi, (flow - lo.flow) / (hi.flow - lo.flow)))
    }
}
