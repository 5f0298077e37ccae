//! Direct least-squares ellipse fit.
//!
//! Fits the conic `A x² + B xy + C y² + D x + E y + F = 0` under the ellipse
//! constraint `4AC − B² = 1` (Fitzgibbon, Pilu & Fisher 1999) using the
//! numerically stable block reduction of Halíř & Flusser (1998). Points are
//! shifted to their centroid and scaled to a mean radius of √2 before the
//! fit; the geometric ellipse is mapped back afterwards.

use nalgebra::{Matrix2, Matrix3, Matrix6, Point2, Vector3, Vector6};
use serde::{Deserialize, Serialize};

/// Minimum number of points for a unique conic.
const MIN_POINTS: usize = 5;

/// Collinear input makes the linear scatter block singular.
const MIN_CONDITION: f64 = 1e-12;

/// Geometric ellipse in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipseFit {
    pub center: Point2<f64>,
    /// Half length of the major axis.
    pub semi_major: f64,
    /// Half length of the minor axis, `0 < semi_minor <= semi_major`.
    pub semi_minor: f64,
    /// Orientation of the major axis from +x towards +y, degrees in `[0, 180)`.
    pub angle_deg: f64,
}

impl EllipseFit {
    /// Full axis lengths `(major, minor)`.
    pub fn full_axes(&self) -> (f64, f64) {
        (2.0 * self.semi_major, 2.0 * self.semi_minor)
    }

    pub fn eccentricity(&self) -> f64 {
        let (major, minor) = self.full_axes();
        eccentricity(major, minor)
    }
}

/// Eccentricity from two full axis lengths given in any order.
///
/// Returns 0 when the major axis has zero length.
pub fn eccentricity(width: f64, height: f64) -> f64 {
    let major = width.max(height);
    let minor = width.min(height);
    if major <= 0.0 {
        return 0.0;
    }
    let ratio = (minor / 2.0) / (major / 2.0);
    (1.0 - ratio * ratio).max(0.0).sqrt()
}

/// Fit an ellipse to `points`.
///
/// Returns `None` for fewer than five points or when the data does not
/// support a proper, finite ellipse (collinear input, singular scatter
/// matrix, hyperbolic solution).
pub fn fit_ellipse_direct(points: &[Point2<f64>]) -> Option<EllipseFit> {
    if points.len() < MIN_POINTS {
        return None;
    }

    let (mean, scale) = normalization(points)?;

    let mut scatter = Matrix6::<f64>::zeros();
    for p in points {
        let x = (p.x - mean.x) * scale;
        let y = (p.y - mean.y) * scale;
        let row = Vector6::new(x * x, x * y, y * y, x, y, 1.0);
        scatter += row * row.transpose();
    }

    let s1 = scatter.fixed_view::<3, 3>(0, 0).into_owned();
    let s2 = scatter.fixed_view::<3, 3>(0, 3).into_owned();
    let s3 = scatter.fixed_view::<3, 3>(3, 3).into_owned();

    let eig = s3.symmetric_eigenvalues();
    if eig.min() <= eig.max() * MIN_CONDITION {
        return None;
    }

    // Linear part as a function of the quadratic part: a2 = T a1.
    let t = -(s3.try_inverse()? * s2.transpose());
    let reduced = s1 + s2 * t;

    // Premultiply by the inverse of the constraint matrix [[0,0,2],[0,-1,0],[2,0,0]].
    let system = Matrix3::from_rows(&[
        reduced.row(2) * 0.5,
        reduced.row(1) * -1.0,
        reduced.row(0) * 0.5,
    ]);

    let a1 = constrained_eigenvector(&system)?;
    let a2 = t * a1;
    let conic = [a1[0], a1[1], a1[2], a2[0], a2[1], a2[2]];

    let normalized = conic_to_ellipse(&conic)?;
    let fit = EllipseFit {
        center: Point2::new(
            normalized.center.x / scale + mean.x,
            normalized.center.y / scale + mean.y,
        ),
        semi_major: normalized.semi_major / scale,
        semi_minor: normalized.semi_minor / scale,
        angle_deg: normalized.angle_deg,
    };

    is_finite(&fit).then_some(fit)
}

fn normalization(points: &[Point2<f64>]) -> Option<(Point2<f64>, f64)> {
    let n = points.len() as f64;
    let mean = Point2::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    );
    let mean_dist = points.iter().map(|p| (*p - mean).norm()).sum::<f64>() / n;
    if !(mean_dist.is_finite() && mean_dist > 1e-12) {
        return None;
    }
    Some((mean, std::f64::consts::SQRT_2 / mean_dist))
}

/// Eigenvector of the reduced system satisfying `4AC − B² > 0`.
///
/// Among real eigenvalues, picks the admissible vector with the smallest
/// eigenvalue magnitude (the algebraic residual of the fit).
fn constrained_eigenvector(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let scale = system.abs().max().max(1.0);
    let mut best: Option<(f64, Vector3<f64>)> = None;

    for ev in system.complex_eigenvalues().iter() {
        if ev.im.abs() > 1e-9 * scale {
            continue;
        }
        let lambda = ev.re;
        let Some(v) = null_vector(&(system - Matrix3::identity() * lambda)) else {
            continue;
        };
        let constraint = 4.0 * v[0] * v[2] - v[1] * v[1];
        if constraint <= 0.0 {
            continue;
        }
        if best.as_ref().is_none_or(|(l, _)| lambda.abs() < *l) {
            best = Some((lambda.abs(), v));
        }
    }

    best.map(|(_, v)| v)
}

/// Null vector of a rank-2 matrix as the largest cross product of its rows.
fn null_vector(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let rows: [Vector3<f64>; 3] = [
        m.row(0).transpose(),
        m.row(1).transpose(),
        m.row(2).transpose(),
    ];
    let candidates = [
        rows[0].cross(&rows[1]),
        rows[0].cross(&rows[2]),
        rows[1].cross(&rows[2]),
    ];
    let best = candidates
        .into_iter()
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))?;
    let norm = best.norm();
    (norm > 1e-15).then(|| best / norm)
}

/// Geometric parameters of the conic `[A, B, C, D, E, F]`.
fn conic_to_ellipse(c: &[f64; 6]) -> Option<EllipseFit> {
    let [a, b, cc, d, e, f] = *c;
    let denom = 4.0 * a * cc - b * b;
    if denom <= 0.0 {
        return None;
    }

    let cx = (b * e - 2.0 * cc * d) / denom;
    let cy = (b * d - 2.0 * a * e) / denom;
    let at_center = a * cx * cx + b * cx * cy + cc * cy * cy + d * cx + e * cy + f;

    let quad = Matrix2::new(a, b / 2.0, b / 2.0, cc);
    let eig = quad.symmetric_eigen();

    let mut axes = [(0.0f64, 0usize); 2];
    for (k, slot) in axes.iter_mut().enumerate() {
        let lambda = eig.eigenvalues[k];
        let sq = -at_center / lambda;
        if !(sq.is_finite() && sq > 0.0) {
            return None;
        }
        *slot = (sq.sqrt(), k);
    }
    axes.sort_by(|l, r| r.0.total_cmp(&l.0));
    let (semi_major, major_idx) = axes[0];
    let semi_minor = axes[1].0;

    let dir = eig.eigenvectors.column(major_idx);
    let angle_deg = dir[1].atan2(dir[0]).to_degrees().rem_euclid(180.0);
    let angle_deg = if angle_deg >= 180.0 { 0.0 } else { angle_deg };

    Some(EllipseFit {
        center: Point2::new(cx, cy),
        semi_major,
        semi_minor,
        angle_deg,
    })
}

fn is_finite(fit: &EllipseFit) -> bool {
    fit.center.x.is_finite()
        && fit.center.y.is_finite()
        && fit.semi_major.is_finite()
        && fit.semi_minor.is_finite()
        && fit.semi_minor > 0.0
        && fit.angle_deg.is_finite()
}
