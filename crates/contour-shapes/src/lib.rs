//! Contour-to-primitive shape classification.
//!
//! Given pixel contours extracted from an edge map, decides per contour
//! whether it is best described as a polygon, a complete ellipse or a partial
//! circular arc, and fits the parameters of the chosen primitive. Line and
//! full-circle detections from an external Hough stage are merged into the
//! result unchanged.
//!
//! ## Quickstart
//!
//! ```
//! use contour_shapes::{synthetic, ClassifierParams, ShapeClassifier, ShapeKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = ShapeClassifier::new(ClassifierParams::default())?;
//! let quarter = synthetic::arc_contour((100.0, 100.0), 50.0, 0.0, 90.0);
//!
//! let result = classifier.classify(&[quarter]);
//! let arc = result.shapes[0].as_arc().expect("an arc");
//! assert_eq!(result.shapes[0].kind(), ShapeKind::Arc);
//! assert!((arc.span_deg - 90.0).abs() < 5.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `contour_shapes::core`: contours and the geometric fits.
//! - [`ShapeClassifier`]: the per-contour decision tree.
//! - [`ShapeRecord`]: tagged output records, serialized with a `type` field.
//! - [`io`]: JSON input, parameter and report documents.
//! - [`synthetic`]: rasterized test contours and the reference scene.

mod arc;
mod ellipse;
pub mod io;
mod params;
mod polygon;
mod record;
mod result;
mod router;
pub mod synthetic;
mod topology;

pub use contour_shapes_core as core;
pub use contour_shapes_core::{init_with_level, Contour, ContourError};

pub use arc::{parameterize_arc, ArcRejection};
pub use ellipse::fit_ellipse_record;
pub use io::{ShapeDetectInput, ShapeDetectReport, ShapesIoError};
pub use params::{ClassifierParams, HeuristicThresholds, ParamsError};
pub use polygon::{approximate, polygon_name, PolygonAnalysis};
pub use record::{
    ArcShape, CircleShape, EllipseShape, LineShape, PolygonShape, ShapeKind, ShapeRecord,
};
pub use result::{
    ContourOutcome, ContourSkip, Route, ShapeCounts, ShapeDetectionResult, SkipReason,
};
pub use router::ShapeClassifier;
pub use topology::{classify_topology, is_closed_curve, TopologyVerdict};

#[cfg(feature = "tracing")]
pub use contour_shapes_core::init_tracing;
