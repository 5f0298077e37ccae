//! Circular arc parameters for open contours.

use std::f64::consts::TAU;

use contour_shapes_core::{angle_deg, fit_circle, normalize_deg, Contour};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::params::HeuristicThresholds;
use crate::record::ArcShape;

/// Why an open contour did not yield an arc.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ArcRejection {
    #[error("fitted radius {radius:.1} px is out of range")]
    RadiusOutOfRange { radius: f64 },
    #[error("arc span {span_deg:.1}° exceeds the limit")]
    SpanTooWide { span_deg: f64 },
    #[error("arc endpoints coincide in angle")]
    ZeroSpan,
}

/// Fit a circle through every contour point and describe the arc running
/// from the first to the last point in the direction of increasing angle.
pub fn parameterize_arc(
    contour: &Contour,
    th: &HeuristicThresholds,
) -> Result<ArcShape, ArcRejection> {
    let circle = fit_circle(&contour.to_f64());
    let radius = circle.radius;
    if !(radius > 0.0 && radius <= th.max_arc_radius) {
        return Err(ArcRejection::RadiusOutOfRange { radius });
    }

    let first = contour.first();
    let last = contour.last();
    let start = angle_deg(circle.center, Point2::new(first.x as f64, first.y as f64));
    let end = angle_deg(circle.center, Point2::new(last.x as f64, last.y as f64));
    let span = normalize_deg(end - start);
    if span > th.max_arc_span_deg {
        return Err(ArcRejection::SpanTooWide { span_deg: span });
    }
    if span <= 0.0 {
        return Err(ArcRejection::ZeroSpan);
    }

    Ok(ArcShape {
        center: circle.center,
        radius,
        start_angle_deg: start,
        end_angle_deg: end,
        span_deg: span,
        arc_length: span / 360.0 * TAU * radius,
        chord_length: contour.endpoint_gap(),
        start_point: first,
        end_point: last,
    })
}
