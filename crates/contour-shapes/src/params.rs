use serde::{Deserialize, Serialize};

/// Invalid classifier configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("min_area must be a positive finite number (got {0})")]
    MinArea(f64),
    #[error("poly_epsilon must lie in (0, 1) (got {0})")]
    PolyEpsilon(f64),
    #[error("heuristic threshold `{name}` is out of range (got {value})")]
    Heuristic { name: &'static str, value: f64 },
}

/// Decision thresholds of the shape router.
///
/// The defaults are the tuned values that define the classification
/// behaviour; they are exposed for experimentation, not expected to change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    /// Endpoint gap over open perimeter above which a contour is an arc.
    pub arc_gap_ratio: f64,
    /// Curvature variance below which a not-closed contour is an arc.
    pub arc_curvature_variance: f64,
    /// Contours with fewer points are never classified as arcs.
    pub arc_min_points: usize,
    /// Endpoint distance in pixels below which a contour is closed.
    pub closed_gap_px: f64,
    /// Widest accepted arc span in degrees.
    pub max_arc_span_deg: f64,
    /// Largest accepted arc radius in pixels.
    pub max_arc_radius: f64,
    /// Minimum approximated vertex count for the curved-shape branch.
    pub ellipse_min_vertices: usize,
    /// Solidity that must be exceeded for the curved-shape branch.
    pub ellipse_min_solidity: f64,
    /// Raw contour points required by the ellipse fit.
    pub ellipse_min_points: usize,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            arc_gap_ratio: 0.10,
            arc_curvature_variance: 0.5,
            arc_min_points: 10,
            closed_gap_px: 10.0,
            max_arc_span_deg: 270.0,
            max_arc_radius: 1000.0,
            ellipse_min_vertices: 5,
            ellipse_min_solidity: 0.85,
            ellipse_min_points: 5,
        }
    }
}

impl HeuristicThresholds {
    fn validate(&self) -> Result<(), ParamsError> {
        let checks = [
            ("arc_gap_ratio", self.arc_gap_ratio, self.arc_gap_ratio >= 0.0),
            (
                "arc_curvature_variance",
                self.arc_curvature_variance,
                self.arc_curvature_variance >= 0.0,
            ),
            ("closed_gap_px", self.closed_gap_px, self.closed_gap_px > 0.0),
            (
                "max_arc_span_deg",
                self.max_arc_span_deg,
                self.max_arc_span_deg > 0.0 && self.max_arc_span_deg <= 360.0,
            ),
            ("max_arc_radius", self.max_arc_radius, self.max_arc_radius > 0.0),
            (
                "ellipse_min_solidity",
                self.ellipse_min_solidity,
                (0.0..=1.0).contains(&self.ellipse_min_solidity),
            ),
        ];
        for (name, value, ok) in checks {
            if !(ok && value.is_finite()) {
                return Err(ParamsError::Heuristic { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration of one classification run.
///
/// `line_vote_threshold` and `circle_vote_threshold` belong to the external
/// Hough detectors whose outputs are merged into the result; the classifier
/// carries them so a single document configures the whole pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Contours enclosing less area (px²) are discarded as noise.
    pub min_area: f64,
    /// Douglas–Peucker tolerance as a fraction of the closed perimeter.
    pub poly_epsilon: f64,
    pub line_vote_threshold: u32,
    pub circle_vote_threshold: u32,
    #[serde(default)]
    pub heuristics: HeuristicThresholds,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            poly_epsilon: 0.02,
            line_vote_threshold: 50,
            circle_vote_threshold: 30,
            heuristics: HeuristicThresholds::default(),
        }
    }
}

impl ClassifierParams {
    /// Check ranges once, before any contour is processed.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.min_area.is_finite() && self.min_area > 0.0) {
            return Err(ParamsError::MinArea(self.min_area));
        }
        if !(self.poly_epsilon > 0.0 && self.poly_epsilon < 1.0) {
            return Err(ParamsError::PolyEpsilon(self.poly_epsilon));
        }
        self.heuristics.validate()
    }
}
