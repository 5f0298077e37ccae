//! Geometric building blocks for contour shape classification.
//!
//! This crate is purely geometric. It knows nothing about which primitive a
//! contour "is"; it only measures contours and fits models to point sets:
//! - [`Contour`]: validated integer point sequences with perimeter/area helpers,
//! - polygon measures (moments, convex hull, Douglas–Peucker simplification),
//! - a curvature-consistency signal,
//! - algebraic least-squares circle and direct least-squares ellipse fits.
//!
//! The classifier policy lives in the `contour-shapes` crate.

mod angle;
mod circle_fit;
mod contour;
mod curvature;
mod ellipse_fit;
mod logger;
mod polygon;

pub use angle::{angle_deg, normalize_deg};
pub use circle_fit::{fit_circle, CircleFit, CircleFitMethod};
pub use contour::{Contour, ContourError};
pub use curvature::{curvature_samples, curvature_variance, MIN_CURVATURE_POINTS};
pub use ellipse_fit::{eccentricity, fit_ellipse_direct, EllipseFit};
pub use polygon::{
    centroid, convex_hull, polygon_area, signed_area, simplify_closed, simplify_open,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, LOG_ENV};
