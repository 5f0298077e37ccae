//! Integer pixel contours as produced by an upstream contour extractor.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::polygon::polygon_area;

/// Errors raised when building a [`Contour`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContourError {
    #[error("contour must contain at least one point")]
    Empty,
}

/// Ordered boundary points of one connected component.
///
/// The sequence may describe a closed curve (last point adjacent to the
/// first) or an open one; nothing is assumed about which. The point list is
/// never empty and never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2<i32>>", into = "Vec<Point2<i32>>")]
pub struct Contour {
    points: Vec<Point2<i32>>,
}

impl TryFrom<Vec<Point2<i32>>> for Contour {
    type Error = ContourError;

    fn try_from(points: Vec<Point2<i32>>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Contour> for Vec<Point2<i32>> {
    fn from(contour: Contour) -> Self {
        contour.points
    }
}

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Result<Self, ContourError> {
        if points.is_empty() {
            return Err(ContourError::Empty);
        }
        Ok(Self { points })
    }

    /// Contour made of `first` followed by `rest`; never empty.
    pub fn with_first(first: Point2<i32>, rest: impl IntoIterator<Item = Point2<i32>>) -> Self {
        let mut points = vec![first];
        points.extend(rest);
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs.
    pub fn from_xy(points: &[(i32, i32)]) -> Result<Self, ContourError> {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Point2<i32> {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> Point2<i32> {
        self.points[self.points.len() - 1]
    }

    /// Points converted to `f64` for fitting.
    pub fn to_f64(&self) -> Vec<Point2<f64>> {
        self.points.iter().map(|p| to_f64(*p)).collect()
    }

    /// Euclidean distance between the first and the last point.
    pub fn endpoint_gap(&self) -> f64 {
        distance(self.first(), self.last())
    }

    /// Sum of consecutive segment lengths, without the closing segment.
    pub fn open_perimeter(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| distance(w[0], w[1]))
            .sum()
    }

    /// Perimeter of the contour treated as a closed polygon.
    pub fn closed_perimeter(&self) -> f64 {
        self.open_perimeter() + self.endpoint_gap()
    }

    /// Enclosed area of the contour treated as a closed polygon.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

#[inline]
pub(crate) fn to_f64(p: Point2<i32>) -> Point2<f64> {
    Point2::new(p.x as f64, p.y as f64)
}

#[inline]
pub(crate) fn distance(a: Point2<i32>, b: Point2<i32>) -> f64 {
    (to_f64(a) - to_f64(b)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_contour_is_rejected() {
        assert_eq!(Contour::new(Vec::new()), Err(ContourError::Empty));
    }

    #[test]
    fn perimeters_of_an_open_l_shape() {
        let c = Contour::from_xy(&[(0, 0), (3, 0), (3, 4)]).expect("contour");
        assert_abs_diff_eq!(c.open_perimeter(), 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.endpoint_gap(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.closed_perimeter(), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.area(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn with_first_keeps_order() {
        let c = Contour::with_first(Point2::new(1, 1), [Point2::new(2, 2), Point2::new(3, 1)]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.first(), Point2::new(1, 1));
        assert_eq!(c.last(), Point2::new(3, 1));
    }

    #[test]
    fn single_point_contour_has_zero_measures() {
        let c = Contour::with_first(Point2::new(5, 5), []);
        assert_eq!(c.len(), 1);
        assert!(!c.is_empty());
        assert_eq!(c.open_perimeter(), 0.0);
        assert_eq!(c.endpoint_gap(), 0.0);
        assert_eq!(c.area(), 0.0);
    }

    #[test]
    fn serde_uses_point_lists_and_validates() {
        let c = Contour::from_xy(&[(1, 2), (3, 4)]).expect("contour");
        let json = serde_json::to_string(&c).expect("serialize");
        assert_eq!(json, "[[1,2],[3,4]]");
        let back: Contour = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Contour>("[]").is_err());
    }
}
