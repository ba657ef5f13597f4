//! One flow-indexed backwater curve.

/// A single retained station on a backwater profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfilePoint {
    /// Distance upstream from the downstream end of the reach.
    pub station: f64,
    /// Water depth above the local invert.
    pub depth: f64,
    /// Water-surface elevation (invert + depth).
    pub head: f64,
}

/// Backwater curve for one fixed flow.
///
/// Points are ordered by strictly increasing station, downstream →
/// upstream. `normal_depth` is `None` for flat or adverse reaches, where
/// no gravity/friction balance exists.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowCurve {
    /// Flow rate this curve was computed for.
    pub flow: f64,
    /// Normal depth at this flow, when defined.
    pub normal_depth: Option<f64>,
    /// Critical depth at this flow.
    pub critical_depth: f64,
    /// True when the integration reached the pressurization threshold.
    pub pressurized: bool,
    /// Retained profile points.
    pub points: Vec<ProfilePoint>,
}

impl FlowCurve {
    /// Number of retained points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no points were retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Depth at the downstream control.
    #[inline]
    pub fn downstream_depth(&self) -> Option<f64> {
        self.points.first().map(|p| p.depth)
    }

    /// Head at the most upstream retained station.
    #[inline]
    pub fn upstream_head(&self) -> Option<f64> {
        self.points.last().map(|p| p.head)
    }

    /// Linearly interpolate depth at a station within the curve.
    ///
    /// Returns `None` outside the curve's station range.
    pub fn depth_at(&self, station: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if station < first.station || station > last.station {
            return None;
        }
        // partition point: first index with station >= query
        let idx = self.points.partition_point(|p| p.station < station);
        if idx == 0 {
            return Some(first.depth);
        }
        let (a, b) = (&self.points[idx - 1], &self.points[idx.min(self.len() - 1)]);
        if (b.station - a.station).abs() < f64::EPSILON {
            return Some(a.depth);
        }
        let t = (station - a.station) / (b.station - a.station);
        Some(a.depth + t * (b.depth - a.depth))
    }
}
