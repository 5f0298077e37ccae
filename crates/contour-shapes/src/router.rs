use contour_shapes_core::Contour;
use log::{debug, info};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::arc::{parameterize_arc, ArcRejection};
use crate::ellipse::fit_ellipse_record;
use crate::params::{ClassifierParams, ParamsError};
use crate::polygon::approximate;
use crate::record::{CircleShape, LineShape, ShapeRecord};
use crate::result::{ContourOutcome, ContourSkip, Route, ShapeDetectionResult, SkipReason};
use crate::topology::{classify_topology, is_closed_curve};

/// Routes each contour to the polygon, ellipse or arc branch.
///
/// Holds validated, immutable parameters; a classifier can be shared and
/// reused across frames.
#[derive(Clone, Debug)]
pub struct ShapeClassifier {
    params: ClassifierParams,
}

impl ShapeClassifier {
    pub fn new(params: ClassifierParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Classify one contour into at most one record.
    ///
    /// Branches are tried in a fixed order and the first one that applies
    /// decides; a failing branch skips the contour without trying another.
    pub fn classify_contour(&self, contour: &Contour) -> Result<ShapeRecord, ContourSkip> {
        let th = &self.params.heuristics;

        let area = contour.area();
        if area < self.params.min_area {
            return Err(ContourSkip::new(None, SkipReason::BelowMinArea));
        }

        let poly = approximate(contour, self.params.poly_epsilon);
        let topology = classify_topology(contour, th);

        let (route, record) = if topology.is_arc {
            let arc = parameterize_arc(contour, th).map_err(arc_skip)?;
            (Route::Arc, ShapeRecord::Arc(arc))
        } else if poly.vertex_count() >= th.ellipse_min_vertices
            && poly.solidity > th.ellipse_min_solidity
        {
            if is_closed_curve(contour, th) {
                let ellipse = fit_ellipse_record(contour, th).ok_or(ContourSkip::new(
                    Some(Route::Ellipse),
                    SkipReason::EllipseFitFailed,
                ))?;
                (Route::Ellipse, ShapeRecord::Ellipse(ellipse))
            } else {
                let arc = parameterize_arc(contour, th).map_err(arc_skip)?;
                (Route::Arc, ShapeRecord::Arc(arc))
            }
        } else {
            let polygon = poly.to_record().ok_or(ContourSkip::new(
                Some(Route::Polygon),
                SkipReason::DegeneratePolygon,
            ))?;
            (Route::Polygon, ShapeRecord::Polygon(polygon))
        };

        if !record.is_finite() {
            return Err(ContourSkip::new(Some(route), SkipReason::NonFinite));
        }
        Ok(record)
    }

    /// Classify every contour, keeping input order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, contours), fields(contours = contours.len()))
    )]
    pub fn classify(&self, contours: &[Contour]) -> ShapeDetectionResult {
        let mut result = ShapeDetectionResult::default();

        for (index, contour) in contours.iter().enumerate() {
            let outcome = match self.classify_contour(contour) {
                Ok(record) => {
                    let route = route_of(&record);
                    debug!(
                        "contour {index} ({} pts) -> {}",
                        contour.len(),
                        record.kind().as_str()
                    );
                    result.shapes.push(record);
                    ContourOutcome {
                        index,
                        route,
                        skip: None,
                    }
                }
                Err(skip) => {
                    debug!(
                        "contour {index} ({} pts) skipped: route={:?} reason={:?}",
                        contour.len(),
                        skip.route,
                        skip.reason
                    );
                    skip.outcome(index)
                }
            };
            result.outcomes.push(outcome);
        }

        let counts = result.counts();
        info!(
            "classified {} contours: {} polygons, {} ellipses, {} arcs, {} skipped",
            contours.len(),
            counts.polygons,
            counts.ellipses,
            counts.arcs,
            result.outcomes.iter().filter(|o| !o.emitted()).count()
        );
        result
    }

    /// Classify `contours` and merge in externally detected lines and circles.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, contours, lines, circles),
            fields(contours = contours.len(), lines = lines.len(), circles = circles.len())
        )
    )]
    pub fn detect(
        &self,
        contours: &[Contour],
        lines: &[LineShape],
        circles: &[CircleShape],
    ) -> ShapeDetectionResult {
        self.classify(contours)
            .with_external(lines.iter().cloned(), circles.iter().cloned())
    }
}

fn arc_skip(rejection: ArcRejection) -> ContourSkip {
    ContourSkip::new(Some(Route::Arc), SkipReason::ArcRejected(rejection))
}

fn route_of(record: &ShapeRecord) -> Option<Route> {
    match record {
        ShapeRecord::Polygon(_) => Some(Route::Polygon),
        ShapeRecord::Ellipse(_) => Some(Route::Ellipse),
        ShapeRecord::Arc(_) => Some(Route::Arc),
        ShapeRecord::Line(_) | ShapeRecord::Circle(_) => None,
    }
}
