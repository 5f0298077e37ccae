//! Open-arc vs closed-curve discrimination.

use contour_shapes_core::{curvature_variance, Contour};
use serde::{Deserialize, Serialize};

use crate::params::HeuristicThresholds;

/// Arc verdict for one contour together with the signals that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologyVerdict {
    pub is_arc: bool,
    /// Endpoint distance over open perimeter; 0 for a zero-length contour.
    pub gap_ratio: f64,
    /// `+inf` when the contour is too short to sample.
    pub curvature_variance: f64,
    pub endpoint_gap: f64,
}

/// Decide whether `contour` is an open arc.
///
/// A contour with at least `arc_min_points` points is an arc when its
/// endpoint gap is large relative to its length, or when its endpoints are
/// not closed and the curvature along it is consistent.
pub fn classify_topology(contour: &Contour, th: &HeuristicThresholds) -> TopologyVerdict {
    let endpoint_gap = contour.endpoint_gap();
    let open_perimeter = contour.open_perimeter();
    let gap_ratio = if open_perimeter > 0.0 {
        endpoint_gap / open_perimeter
    } else {
        0.0
    };
    let variance = curvature_variance(contour.points());

    let is_arc = contour.len() >= th.arc_min_points
        && (gap_ratio > th.arc_gap_ratio
            || (endpoint_gap >= th.closed_gap_px && variance < th.arc_curvature_variance));

    TopologyVerdict {
        is_arc,
        gap_ratio,
        curvature_variance: variance,
        endpoint_gap,
    }
}

/// Strict closedness: first and last point within `closed_gap_px`.
pub fn is_closed_curve(contour: &Contour, th: &HeuristicThresholds) -> bool {
    contour.endpoint_gap() < th.closed_gap_px
}
