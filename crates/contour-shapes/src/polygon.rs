//! Polygon approximation and naming.

use contour_shapes_core::{centroid, convex_hull, polygon_area, simplify_closed, Contour};
use nalgebra::Point2;

use crate::record::PolygonShape;

/// Minimal-vertex description of a contour plus the shape measures the
/// router needs to pick a branch.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonAnalysis {
    pub vertices: Vec<Point2<i32>>,
    pub area: f64,
    pub perimeter: f64,
    pub centroid: Point2<f64>,
    pub hull_area: f64,
    /// Contour area over hull area; 0 when the hull is degenerate.
    pub solidity: f64,
}

impl PolygonAnalysis {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Polygon record, or `None` when fewer than three vertices survive.
    pub fn to_record(&self) -> Option<PolygonShape> {
        let n = self.vertex_count();
        if n < 3 {
            return None;
        }
        Some(PolygonShape {
            name: polygon_name(n),
            vertices: self.vertices.clone(),
            area: self.area,
            perimeter: self.perimeter,
            centroid: self.centroid,
            solidity: self.solidity.min(1.0),
        })
    }
}

/// Simplify `contour` with a tolerance of `epsilon_factor` times its closed
/// perimeter and measure it.
pub fn approximate(contour: &Contour, epsilon_factor: f64) -> PolygonAnalysis {
    let perimeter = contour.closed_perimeter();
    let vertices = simplify_closed(contour.points(), epsilon_factor * perimeter);
    let area = contour.area();
    let hull_area = polygon_area(&convex_hull(contour.points()));
    let solidity = if hull_area > 0.0 { area / hull_area } else { 0.0 };

    PolygonAnalysis {
        vertices,
        area,
        perimeter,
        centroid: centroid(contour.points()),
        hull_area,
        solidity,
    }
}

/// Name of a polygon with `n` vertices.
pub fn polygon_name(n: usize) -> String {
    match n {
        3 => "triangle".to_string(),
        4 => "quadrilateral".to_string(),
        5 => "pentagon".to_string(),
        6 => "hexagon".to_string(),
        _ => format!("{n}-gon"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dense_rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        let mut pts = Vec::new();
        pts.extend((x0..x1).map(|x| (x, y0)));
        pts.extend((y0..y1).map(|y| (x1, y)));
        pts.extend((x0 + 1..=x1).rev().map(|x| (x, y1)));
        pts.extend((y0 + 1..=y1).rev().map(|y| (x0, y)));
        Contour::from_xy(&pts).expect("contour")
    }

    #[test]
    fn names_by_vertex_count() {
        let names: Vec<_> = (3..=7).map(polygon_name).collect();
        assert_eq!(
            names,
            ["triangle", "quadrilateral", "pentagon", "hexagon", "7-gon"]
        );
        assert_eq!(polygon_name(12), "12-gon");
    }

    #[test]
    fn rectangle_reduces_to_four_corners() {
        let c = dense_rect(50, 50, 200, 150);
        let poly = approximate(&c, 0.02);
        assert_eq!(poly.vertex_count(), 4);
        assert_abs_diff_eq!(poly.area, 150.0 * 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poly.perimeter, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poly.solidity, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly.centroid.x, 125.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poly.centroid.y, 100.0, epsilon = 1e-9);

        let rec = poly.to_record().expect("record");
        assert_eq!(rec.name, "quadrilateral");
        for corner in [(50, 50), (200, 50), (200, 150), (50, 150)] {
            assert!(rec.vertices.contains(&Point2::new(corner.0, corner.1)));
        }
    }

    #[test]
    fn concave_shape_has_lower_solidity() {
        // 20x20 square missing one 10x10 quadrant.
        let c = Contour::from_xy(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)])
            .expect("contour");
        let poly = approximate(&c, 0.01);
        assert_abs_diff_eq!(poly.area, 300.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly.hull_area, 350.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly.solidity, 300.0 / 350.0, epsilon = 1e-12);
        assert_eq!(poly.vertex_count(), 6);
    }

    #[test]
    fn degenerate_contour_produces_no_record() {
        let c = Contour::from_xy(&[(0, 0), (5, 0), (10, 0), (5, 0)]).expect("contour");
        let poly = approximate(&c, 0.02);
        assert_eq!(poly.solidity, 0.0);
        assert!(poly.to_record().is_none());
    }
}
