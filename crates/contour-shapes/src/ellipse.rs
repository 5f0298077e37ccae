//! Complete ellipse records for closed, curved contours.

use contour_shapes_core::{fit_ellipse_direct, Contour};

use crate::params::HeuristicThresholds;
use crate::record::EllipseShape;

/// Fit an ellipse to every point of `contour`.
///
/// `None` when the contour has fewer than `ellipse_min_points` points or the
/// fit is numerically degenerate.
pub fn fit_ellipse_record(contour: &Contour, th: &HeuristicThresholds) -> Option<EllipseShape> {
    if contour.len() < th.ellipse_min_points.max(5) {
        return None;
    }
    let fit = fit_ellipse_direct(&contour.to_f64())?;
    Some(EllipseShape {
        center: fit.center,
        semi_major: fit.semi_major,
        semi_minor: fit.semi_minor,
        angle_deg: fit.angle_deg,
        eccentricity: fit.eccentricity(),
    })
}
