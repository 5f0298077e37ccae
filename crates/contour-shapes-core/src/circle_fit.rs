//! Algebraic least-squares circle fit.
//!
//! Each point contributes the row `(-2x, -2y, 1) · (a, b, c)ᵀ = -(x² + y²)`;
//! the circle is `center = (a, b)`, `radius = sqrt(a² + b² - c)`. Points are
//! shifted to their centroid before solving to keep the normal equations well
//! conditioned.

use nalgebra::{Matrix3, Point2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Ratio of smallest to largest eigenvalue of the normal matrix below which
/// the system is treated as singular.
const MIN_CONDITION: f64 = 1e-12;

/// How a [`CircleFit`] was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleFitMethod {
    /// Solution of the algebraic least-squares system.
    LeastSquares,
    /// Centroid and mean centroid distance, used for degenerate input.
    CentroidFallback,
}

/// Fitted circle. Always finite, radius never negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    pub center: Point2<f64>,
    pub radius: f64,
    pub method: CircleFitMethod,
}

/// Fit a circle to `points`.
///
/// Never fails: fewer than three points, collinear input or a non-finite
/// solution fall back to the centroid with the mean centroid distance as
/// radius. An empty input yields the origin with radius 0.
pub fn fit_circle(points: &[Point2<f64>]) -> CircleFit {
    let Some(mean) = mean_point(points) else {
        return CircleFit {
            center: Point2::origin(),
            radius: 0.0,
            method: CircleFitMethod::CentroidFallback,
        };
    };

    solve_least_squares(points, mean).unwrap_or_else(|| centroid_fallback(points, mean))
}

fn mean_point(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.coords);
    Some(Point2::from(sum / points.len() as f64))
}

fn solve_least_squares(points: &[Point2<f64>], mean: Point2<f64>) -> Option<CircleFit> {
    if points.len() < 3 {
        return None;
    }

    let mut ata = Matrix3::<f64>::zeros();
    let mut atd = Vector3::<f64>::zeros();
    for p in points {
        let x = p.x - mean.x;
        let y = p.y - mean.y;
        let row = Vector3::new(-2.0 * x, -2.0 * y, 1.0);
        let rhs = -(x * x + y * y);
        ata += row * row.transpose();
        atd += row * rhs;
    }

    let eig = ata.symmetric_eigenvalues();
    let (lo, hi) = (eig.min(), eig.max());
    if !hi.is_finite() || lo <= hi * MIN_CONDITION {
        return None;
    }

    let sol = ata.cholesky()?.solve(&atd);
    let (a, b, c) = (sol[0], sol[1], sol[2]);
    let radius = (a * a + b * b - c).max(0.0).sqrt();
    let center = Point2::new(a + mean.x, b + mean.y);

    if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
        return None;
    }

    Some(CircleFit {
        center,
        radius,
        method: CircleFitMethod::LeastSquares,
    })
}

fn centroid_fallback(points: &[Point2<f64>], mean: Point2<f64>) -> CircleFit {
    let radius = points.iter().map(|p| (*p - mean).norm()).sum::<f64>() / points.len() as f64;
    CircleFit {
        center: mean,
        radius,
        method: CircleFitMethod::CentroidFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_circle(
        cx: f64,
        cy: f64,
        r: f64,
        from_deg: f64,
        to_deg: f64,
        n: usize,
    ) -> Vec<Point2<f64>> {
        (0..n)
            .map(|k| {
                let t = (from_deg + (to_deg - from_deg) * k as f64 / (n - 1) as f64).to_radians();
                Point2::new(cx + r * t.cos(), cy + r * t.sin())
            })
            .collect()
    }

    #[test]
    fn recovers_exact_circle() {
        let pts = sample_circle(120.0, -40.0, 33.0, 0.0, 350.0, 64);
        let fit = fit_circle(&pts);
        assert_eq!(fit.method, CircleFitMethod::LeastSquares);
        assert_abs_diff_eq!(fit.center.x, 120.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.center.y, -40.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.radius, 33.0, epsilon = 1e-8);
    }

    #[test]
    fn recovers_circle_from_short_arc() {
        let pts = sample_circle(10.0, 20.0, 500.0, 30.0, 60.0, 40);
        let fit = fit_circle(&pts);
        assert_abs_diff_eq!(fit.center.x, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fit.center.y, 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fit.radius, 500.0, epsilon = 1e-6);
    }

    #[test]
    fn collinear_points_fall_back_to_centroid() {
        let pts: Vec<_> = (0..10).map(|k| Point2::new(k as f64, 2.0 * k as f64)).collect();
        let fit = fit_circle(&pts);
        assert_eq!(fit.method, CircleFitMethod::CentroidFallback);
        assert_abs_diff_eq!(fit.center.x, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.center.y, 9.0, epsilon = 1e-12);
        assert!(fit.radius > 0.0);
    }

    #[test]
    fn too_few_points_fall_back() {
        let fit = fit_circle(&[Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)]);
        assert_eq!(fit.method, CircleFitMethod::CentroidFallback);
        assert_abs_diff_eq!(fit.center.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.radius, 2.0, epsilon = 1e-12);

        let empty = fit_circle(&[]);
        assert_eq!(empty.center, Point2::origin());
        assert_eq!(empty.radius, 0.0);
    }
}
