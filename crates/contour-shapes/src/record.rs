//! Shape records emitted by the classifier.
//!
//! A record serializes as one flat JSON object whose `type` field names the
//! variant, e.g. `{"type":"arc","center":[100.0,100.0],"radius":50.0,...}`.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Straight segment from an external line detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

/// Full circle from an external circle detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point2<f64>,
    pub radius: f64,
}

/// Closed contour reduced to a simplified polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    /// `triangle`, `quadrilateral`, `pentagon`, `hexagon` or `<n>-gon`.
    pub name: String,
    /// Simplified vertices, at least three.
    pub vertices: Vec<Point2<i32>>,
    /// Area enclosed by the source contour.
    pub area: f64,
    /// Closed perimeter of the source contour.
    pub perimeter: f64,
    pub centroid: Point2<f64>,
    /// Contour area over convex hull area, in `(0, 1]`.
    pub solidity: f64,
}

/// Complete ellipse (or circle) fitted to a closed contour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    pub center: Point2<f64>,
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Orientation of the major axis in degrees, `[0, 180)`.
    pub angle_deg: f64,
    /// In `[0, 1)`; zero for a circle.
    pub eccentricity: f64,
}

/// Circular arc fitted to an open contour.
///
/// Angles are measured around `center` in image coordinates (+x towards +y)
/// and normalized to `[0, 360)`. The arc runs from `start_angle_deg` through
/// `span_deg` degrees of increasing angle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub center: Point2<f64>,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    pub span_deg: f64,
    pub arc_length: f64,
    pub chord_length: f64,
    pub start_point: Point2<i32>,
    pub end_point: Point2<i32>,
}

/// Variant discriminator of a [`ShapeRecord`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Polygon,
    Ellipse,
    Arc,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Arc => "arc",
        }
    }
}

/// One detected primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeRecord {
    Line(LineShape),
    Circle(CircleShape),
    Polygon(PolygonShape),
    Ellipse(EllipseShape),
    Arc(ArcShape),
}

impl ShapeRecord {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeRecord::Line(_) => ShapeKind::Line,
            ShapeRecord::Circle(_) => ShapeKind::Circle,
            ShapeRecord::Polygon(_) => ShapeKind::Polygon,
            ShapeRecord::Ellipse(_) => ShapeKind::Ellipse,
            ShapeRecord::Arc(_) => ShapeKind::Arc,
        }
    }

    /// `true` when every floating-point field is finite.
    pub fn is_finite(&self) -> bool {
        let finite_pt = |p: &Point2<f64>| p.x.is_finite() && p.y.is_finite();
        match self {
            ShapeRecord::Line(l) => finite_pt(&l.start) && finite_pt(&l.end),
            ShapeRecord::Circle(c) => finite_pt(&c.center) && c.radius.is_finite(),
            ShapeRecord::Polygon(p) => {
                finite_pt(&p.centroid)
                    && [p.area, p.perimeter, p.solidity]
                        .iter()
                        .all(|v| v.is_finite())
            }
            ShapeRecord::Ellipse(e) => {
                finite_pt(&e.center)
                    && [e.semi_major, e.semi_minor, e.angle_deg, e.eccentricity]
                        .iter()
                        .all(|v| v.is_finite())
            }
            ShapeRecord::Arc(a) => {
                finite_pt(&a.center)
                    && [
                        a.radius,
                        a.start_angle_deg,
                        a.end_angle_deg,
                        a.span_deg,
                        a.arc_length,
                        a.chord_length,
                    ]
                    .iter()
                    .all(|v| v.is_finite())
            }
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            ShapeRecord::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_ellipse(&self) -> Option<&EllipseShape> {
        match self {
            ShapeRecord::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&ArcShape> {
        match self {
            ShapeRecord::Arc(a) => Some(a),
            _ => None,
        }
    }
}
