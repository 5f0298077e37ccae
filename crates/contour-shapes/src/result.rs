use serde::{Deserialize, Serialize};

use crate::arc::ArcRejection;
use crate::record::{CircleShape, LineShape, ShapeKind, ShapeRecord};

/// Branch of the decision tree a contour was sent down.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Polygon,
    Ellipse,
    Arc,
}

/// Why a contour produced no record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BelowMinArea,
    /// Fewer than three vertices after simplification.
    DegeneratePolygon,
    EllipseFitFailed,
    ArcRejected(ArcRejection),
    /// The chosen branch produced a non-finite value.
    NonFinite,
}

/// Decision taken for the contour at `index` of the input list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourOutcome {
    pub index: usize,
    /// `None` when the contour was filtered before routing.
    pub route: Option<Route>,
    /// `None` when a record was emitted.
    pub skip: Option<SkipReason>,
}

impl ContourOutcome {
    pub fn emitted(&self) -> bool {
        self.skip.is_none()
    }
}

/// A contour that produced no record: the branch it reached, if any, and why
/// that branch gave up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourSkip {
    pub route: Option<Route>,
    pub reason: SkipReason,
}

impl ContourSkip {
    pub(crate) fn new(route: Option<Route>, reason: SkipReason) -> Self {
        Self { route, reason }
    }

    /// Outcome entry for the contour at `index`.
    pub fn outcome(self, index: usize) -> ContourOutcome {
        ContourOutcome {
            index,
            route: self.route,
            skip: Some(self.reason),
        }
    }
}

/// Number of records per type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShapeCounts {
    pub lines: usize,
    pub circles: usize,
    pub polygons: usize,
    pub ellipses: usize,
    pub arcs: usize,
}

impl ShapeCounts {
    pub fn from_shapes(shapes: &[ShapeRecord]) -> Self {
        let mut counts = Self::default();
        for shape in shapes {
            match shape.kind() {
                ShapeKind::Line => counts.lines += 1,
                ShapeKind::Circle => counts.circles += 1,
                ShapeKind::Polygon => counts.polygons += 1,
                ShapeKind::Ellipse => counts.ellipses += 1,
                ShapeKind::Arc => counts.arcs += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.lines + self.circles + self.polygons + self.ellipses + self.arcs
    }
}

/// Shapes of one frame plus the per-contour decisions behind them.
///
/// `shapes` holds externally detected lines, then externally detected
/// circles, then contour-derived records in contour order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeDetectionResult {
    pub shapes: Vec<ShapeRecord>,
    pub outcomes: Vec<ContourOutcome>,
}

impl ShapeDetectionResult {
    /// Prepend Hough-style line and circle detections, unchanged.
    pub fn with_external(
        mut self,
        lines: impl IntoIterator<Item = LineShape>,
        circles: impl IntoIterator<Item = CircleShape>,
    ) -> Self {
        let contour_shapes = std::mem::take(&mut self.shapes);
        self.shapes = lines
            .into_iter()
            .map(ShapeRecord::Line)
            .chain(circles.into_iter().map(ShapeRecord::Circle))
            .chain(contour_shapes)
            .collect();
        self
    }

    pub fn counts(&self) -> ShapeCounts {
        ShapeCounts::from_shapes(&self.shapes)
    }

    pub fn of_kind(&self, kind: ShapeKind) -> impl Iterator<Item = &ShapeRecord> + '_ {
        self.shapes.iter().filter(move |s| s.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn external_shapes_come_first() {
        let res = ShapeDetectionResult {
            shapes: vec![ShapeRecord::Circle(CircleShape {
                center: Point2::new(1.0, 1.0),
                radius: 2.0,
            })],
            outcomes: Vec::new(),
        }
        .with_external(
            [LineShape {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(1.0, 0.0),
            }],
            [CircleShape {
                center: Point2::new(5.0, 5.0),
                radius: 3.0,
            }],
        );

        let kinds: Vec<_> = res.shapes.iter().map(ShapeRecord::kind).collect();
        assert_eq!(kinds, [ShapeKind::Line, ShapeKind::Circle, ShapeKind::Circle]);
        assert_eq!(res.shapes[1].kind(), ShapeKind::Circle);
        let counts = res.counts();
        assert_eq!((counts.lines, counts.circles, counts.total()), (1, 2, 3));
        assert_eq!(res.of_kind(ShapeKind::Circle).count(), 2);
    }

    #[test]
    fn skip_reasons_serialize_in_snake_case() {
        let outcome = ContourOutcome {
            index: 3,
            route: Some(Route::Arc),
            skip: Some(SkipReason::ArcRejected(ArcRejection::SpanTooWide {
                span_deg: 300.0,
            })),
        };
        let json = serde_json::to_value(outcome).expect("serialize");
        assert_eq!(json["route"], "arc");
        assert_eq!(json["skip"]["arc_rejected"]["reason"], "span_too_wide");
        assert!(!outcome.emitted());
    }
}
