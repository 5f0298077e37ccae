//! Synthetic one-pixel contours and the reference test scene.
//!
//! Curves are sampled at sub-pixel steps, rounded to the pixel grid and
//! deduplicated, which gives 8-connected boundaries similar to what a contour
//! tracer returns. Open curves are traced in the direction of increasing
//! angle.

use contour_shapes_core::Contour;
use nalgebra::Point2;

use crate::io::ShapeDetectInput;
use crate::record::{CircleShape, LineShape};

/// Samples per pixel of curve length.
const SAMPLES_PER_PX: f64 = 2.0;

fn rasterize(samples: impl IntoIterator<Item = (f64, f64)>, closed: bool) -> Contour {
    let mut pixels = samples
        .into_iter()
        .map(|(x, y)| Point2::new(x.round() as i32, y.round() as i32));
    let first = pixels.next().unwrap_or_else(Point2::origin);

    let mut rest: Vec<Point2<i32>> = Vec::new();
    let mut prev = first;
    for p in pixels {
        if p != prev {
            rest.push(p);
            prev = p;
        }
    }
    if closed {
        while rest.last() == Some(&first) {
            rest.pop();
        }
    }
    Contour::with_first(first, rest)
}

fn ellipse_samples(
    center: (f64, f64),
    axes: (f64, f64),
    angle_deg: f64,
    start_deg: f64,
    span_deg: f64,
) -> impl Iterator<Item = (f64, f64)> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let n = (axes.0.max(axes.1) * span_deg.to_radians() * SAMPLES_PER_PX).ceil() as usize;
    let n = n.max(1);
    (0..=n).map(move |k| {
        let t = (start_deg + span_deg * k as f64 / n as f64).to_radians();
        let (u, v) = (axes.0 * t.cos(), axes.1 * t.sin());
        (center.0 + c * u - s * v, center.1 + s * u + c * v)
    })
}

/// Span from `start_deg` to `end_deg` going through increasing angles.
fn forward_span(start_deg: f64, end_deg: f64) -> f64 {
    let span = (end_deg - start_deg).rem_euclid(360.0);
    if span == 0.0 {
        360.0
    } else {
        span
    }
}

/// Closed contour of a full circle.
pub fn circle_contour(center: (f64, f64), radius: f64) -> Contour {
    ellipse_contour(center, (radius, radius), 0.0)
}

/// Closed contour of an ellipse with semi-axes `axes` rotated by `angle_deg`.
pub fn ellipse_contour(center: (f64, f64), axes: (f64, f64), angle_deg: f64) -> Contour {
    rasterize(ellipse_samples(center, axes, angle_deg, 0.0, 360.0), true)
}

/// Open contour of a circular arc from `start_deg` to `end_deg`.
pub fn arc_contour(center: (f64, f64), radius: f64, start_deg: f64, end_deg: f64) -> Contour {
    elliptical_arc_contour(center, (radius, radius), 0.0, start_deg, end_deg)
}

/// Open contour of an elliptical arc; angles are ellipse parameters.
pub fn elliptical_arc_contour(
    center: (f64, f64),
    axes: (f64, f64),
    angle_deg: f64,
    start_deg: f64,
    end_deg: f64,
) -> Contour {
    let span = forward_span(start_deg, end_deg);
    rasterize(
        ellipse_samples(center, axes, angle_deg, start_deg, span),
        false,
    )
}

/// Dense contour along straight edges through `vertices`.
///
/// A closed polyline returns to the first vertex without repeating it.
pub fn polyline_contour(vertices: &[(i32, i32)], closed: bool) -> Contour {
    let n = vertices.len();
    let edges = if closed { n } else { n.saturating_sub(1) };
    let mut samples: Vec<(f64, f64)> = Vec::new();
    for i in 0..edges {
        let (ax, ay) = vertices[i];
        let (bx, by) = vertices[(i + 1) % n];
        let steps = (bx - ax).abs().max((by - ay).abs()).max(1);
        samples.extend((0..steps).map(|k| {
            let t = k as f64 / steps as f64;
            (
                ax as f64 + (bx - ax) as f64 * t,
                ay as f64 + (by - ay) as f64 * t,
            )
        }));
    }
    if !closed {
        if let Some(&(x, y)) = vertices.last() {
            samples.push((x as f64, y as f64));
        }
    }
    rasterize(samples, closed)
}

/// Vertices of a regular polygon, truncated to integer pixels.
pub fn regular_polygon(
    center: (i32, i32),
    radius: f64,
    sides: usize,
    phase_deg: f64,
) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| {
            let t = (i as f64 * 360.0 / sides as f64 + phase_deg).to_radians();
            (
                (center.0 as f64 + radius * t.cos()) as i32,
                (center.1 as f64 + radius * t.sin()) as i32,
            )
        })
        .collect()
}

/// The 800×600 reference scene: polygons, full circles and ellipses and six
/// arcs as contours, plus the three line segments and two circles an
/// external Hough stage would report.
pub fn reference_scene() -> ShapeDetectInput {
    let contours = vec![
        polyline_contour(&[(50, 50), (200, 50), (200, 150), (50, 150)], true),
        circle_contour((350.0, 100.0), 60.0),
        polyline_contour(&[(500, 50), (450, 150), (550, 150)], true),
        ellipse_contour((150.0, 300.0), (80.0, 50.0), 30.0),
        polyline_contour(&regular_polygon((350, 300), 70.0, 5, -90.0), true),
        polyline_contour(&regular_polygon((550, 300), 60.0, 6, 0.0), true),
        circle_contour((650.0, 100.0), 40.0),
        ellipse_contour((500.0, 500.0), (100.0, 40.0), 45.0),
        arc_contour((100.0, 200.0), 50.0, 0.0, 90.0),
        arc_contour((250.0, 200.0), 40.0, 45.0, 225.0),
        arc_contour((400.0, 200.0), 35.0, 30.0, 300.0),
        elliptical_arc_contour((700.0, 200.0), (60.0, 30.0), 45.0, 60.0, 180.0),
        arc_contour((600.0, 350.0), 25.0, 120.0, 240.0),
        arc_contour((150.0, 450.0), 80.0, 40.0, 220.0),
    ];

    let line = |a: (f64, f64), b: (f64, f64)| LineShape {
        start: Point2::new(a.0, a.1),
        end: Point2::new(b.0, b.1),
    };
    let circle = |c: (f64, f64), radius: f64| CircleShape {
        center: Point2::new(c.0, c.1),
        radius,
    };

    ShapeDetectInput {
        contours,
        lines: vec![
            line((100.0, 450.0), (300.0, 500.0)),
            line((400.0, 450.0), (600.0, 480.0)),
            line((50.0, 520.0), (200.0, 520.0)),
        ],
        circles: vec![
            circle((350.0, 100.0), 60.0),
            circle((650.0, 100.0), 40.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_step(c: &Contour) -> i32 {
        c.points()
            .windows(2)
            .map(|w| (w[1].x - w[0].x).abs().max((w[1].y - w[0].y).abs()))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn closed_curves_are_connected_and_closed() {
        let c = circle_contour((350.0, 100.0), 60.0);
        assert!(c.len() > 100);
        assert_eq!(max_step(&c), 1);
        assert!(c.endpoint_gap() < 2.0);
    }

    #[test]
    fn polygon_contour_starts_at_first_vertex() {
        let c = polyline_contour(&[(50, 50), (200, 50), (200, 150), (50, 150)], true);
        assert_eq!(c.first(), Point2::new(50, 50));
        assert_eq!(c.last(), Point2::new(50, 51));
        assert_eq!(c.len(), 500);
        assert_eq!(max_step(&c), 1);
    }

    #[test]
    fn arcs_run_with_increasing_angle() {
        let c = arc_contour((100.0, 100.0), 50.0, 0.0, 90.0);
        assert_eq!(c.first(), Point2::new(150, 100));
        assert_eq!(c.last(), Point2::new(100, 150));

        let wrapped = arc_contour((0.0, 0.0), 10.0, 270.0, 90.0);
        assert_eq!(wrapped.first(), Point2::new(0, -10));
        assert_eq!(wrapped.last(), Point2::new(0, 10));
        assert!(wrapped.points().contains(&Point2::new(10, 0)));
    }

    #[test]
    fn regular_polygon_truncates_like_integer_casts() {
        let hex = regular_polygon((550, 300), 60.0, 6, 0.0);
        assert_eq!(hex.len(), 6);
        assert_eq!(hex[0], (610, 300));
        assert_eq!(hex[3], (490, 300));
    }

    #[test]
    fn reference_scene_contents() {
        let scene = reference_scene();
        assert_eq!(scene.contours.len(), 14);
        assert_eq!(scene.lines.len(), 3);
        assert_eq!(scene.circles.len(), 2);
    }
}
