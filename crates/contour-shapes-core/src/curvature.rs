//! Curvature-consistency signal along a contour.
//!
//! Constant-radius curves turn by the same amount at every step, so the
//! spread of the local turn signal is small. Corners and ragged boundaries
//! produce a wide spread.

use nalgebra::{Point2, Vector2};

use crate::contour::to_f64;

/// Contours shorter than this yield an infinite variance.
pub const MIN_CURVATURE_POINTS: usize = 6;

/// Offset between the centre sample and its neighbours.
const STRIDE: usize = 2;

/// Local turn samples `|v1 × v2|` of unit chords around each interior point.
///
/// Points whose forward or backward chord has zero length are skipped.
pub fn curvature_samples(points: &[Point2<i32>]) -> Vec<f64> {
    if points.len() < 2 * STRIDE + 1 {
        return Vec::new();
    }
    (STRIDE..points.len() - STRIDE)
        .filter_map(|i| {
            let prev = to_f64(points[i - STRIDE]);
            let cur = to_f64(points[i]);
            let next = to_f64(points[i + STRIDE]);
            let v1 = unit(cur - prev)?;
            let v2 = unit(next - cur)?;
            Some((v1.x * v2.y - v1.y * v2.x).abs())
        })
        .collect()
}

/// Population variance of [`curvature_samples`].
///
/// Returns `f64::INFINITY` for contours with fewer than
/// [`MIN_CURVATURE_POINTS`] points or without a single usable sample.
pub fn curvature_variance(points: &[Point2<i32>]) -> f64 {
    if points.len() < MIN_CURVATURE_POINTS {
        return f64::INFINITY;
    }
    let samples = curvature_samples(points);
    if samples.is_empty() {
        return f64::INFINITY;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n
}

#[inline]
fn unit(v: Vector2<f64>) -> Option<Vector2<f64>> {
    let len = v.norm();
    (len > 0.0).then(|| v / len)
}
