//! Flow-increment search.
//!
//! Turns a flow interval into a bounded, informative set of sample flows
//! for curve generation. The head–flow relationship of a conduit has the
//! most curvature at the two ends of the admissible range — near zero flow
//! (head very sensitive to flow) and near the pressurization limit — so
//! interior samples follow a Chebyshev-style cosine distribution that
//! clusters at both endpoints:
//!
//! ```text
//! q_k = q_min + (q_max − q_min) · (1 − cos(πk/(n−1))) / 2
//! ```
//!
//! The sequence always includes both endpoints, is strictly increasing
//! with ties collapsed, and never exceeds the requested count.

use std::f64::consts::PI;

use crate::reach::Reach;
use crate::solver::NumericContext;
use crate::xs::CrossSection;

/// Sample at most `n` flows spanning `[min_flow, max_flow]`.
///
/// Endpoints are always included. Degenerate brackets (empty span, or a
/// count below 2) collapse to the distinct endpoint values.
pub fn find_flow_increments_by_flow(min_flow: f64, max_flow: f64, n: usize) -> Vec<f64> {
    let (lo, hi) = if min_flow <= max_flow {
        (min_flow, max_flow)
    } else {
        (max_flow, min_flow)
    };
    if n <= 1 || hi - lo <= 0.0 {
        return if hi > lo { vec![lo, hi] } else { vec![lo] };
    }

    let span = hi - lo;
    let mut flows = Vec::with_capacity(n);
    for k in 0..n {
        let t = k as f64 / (n - 1) as f64;
        let q = lo + span * 0.5 * (1.0 - (PI * t).cos());
        // collapse ties from cosine flattening at the endpoints
        if flows.last().map_or(true, |&prev| q > prev) {
            flows.push(q);
        }
    }
    flows
}

/// Sample flows for a depth bracket.
///
/// Converts the depth bracket to a flow bracket through the critical-flow
/// relation (critical flow is monotone in depth for the shapes in this
/// crate), then delegates to [`find_flow_increments_by_flow`].
pub fn find_flow_increments(
    reach: &Reach,
    min_depth: f64,
    max_depth: f64,
    n: usize,
    ctx: &NumericContext,
) -> Vec<f64> {
    let q_min = reach.shape.critical_flow(min_depth, ctx.g);
    let q_max = reach.shape.critical_flow(max_depth, ctx.g);
    find_flow_increments_by_flow(q_min, q_max, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xs::Shape;

    #[test]
    fn test_strictly_increasing_and_endpoint_inclusive() {
        let flows = find_flow_increments_by_flow(0.1, 2.0, 20);
        assert_eq!(flows.len(), 20);
        assert_eq!(flows[0], 0.1);
        assert!((flows[19] - 2.0).abs() < 1e-12);
        for pair in flows.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_count_is_capped() {
        for n in [2, 5, 20, 40] {
            let flows = find_flow_increments_by_flow(0.0, 1.0, n);
            assert!(flows.len() <= n);
        }
    }

    #[test]
    fn test_clusters_at_both_ends() {
        let flows = find_flow_increments_by_flow(0.0, 1.0, 21);
        let first_gap = flows[1] - flows[0];
        let last_gap = flows[20] - flows[19];
        let mid_gap = flows[11] - flows[10];
        assert!(first_gap < mid_gap);
        assert!(last_gap < mid_gap);
    }

    #[test]
    fn test_degenerate_bracket_collapses() {
        assert_eq!(find_flow_increments_by_flow(1.0, 1.0, 10), vec![1.0]);
        assert_eq!(find_flow_increments_by_flow(0.5, 0.5, 1), vec![0.5]);
    }

    #[test]
    fn test_swapped_bracket_is_normalized() {
        let flows = find_flow_increments_by_flow(2.0, 0.1, 5);
        assert_eq!(flows[0], 0.1);
        assert!((flows[4] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_depth_bracket_variant() {
        let reach = crate::reach::Reach::new(
            50.0,
            0.01,
            0.013,
            100.0,
            Shape::circular(1.0),
            false,
        )
        .unwrap();
        let ctx = NumericContext {
            g: 9.81,
            kn: 1.0,
            tol: 1e-8,
            max_iter: 100,
        };
        let flows = find_flow_increments(&reach, 0.1, 0.8, 10, &ctx);
        assert!(flows.len() <= 10);
        assert!(flows[0] > 0.0);
        for pair in flows.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }
}
