//! JSON input, configuration and report documents.

use std::{fs, path::Path};

use contour_shapes_core::Contour;
use serde::{Deserialize, Serialize};

use crate::{
    CircleShape, ClassifierParams, ContourOutcome, LineShape, ShapeCounts, ShapeDetectionResult,
    ShapeRecord,
};

#[derive(thiserror::Error, Debug)]
pub enum ShapesIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One frame to classify: contours plus the outputs of the external line and
/// circle detectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeDetectInput {
    pub contours: Vec<Contour>,
    #[serde(default)]
    pub lines: Vec<LineShape>,
    #[serde(default)]
    pub circles: Vec<CircleShape>,
}

impl ShapeDetectInput {
    /// Load an input document from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapesIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this input to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapesIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl ClassifierParams {
    /// Load parameters from JSON on disk. Call [`ClassifierParams::validate`]
    /// (or build a classifier) before use.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapesIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapesIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Result of one CLI run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDetectReport {
    pub input_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub params: ClassifierParams,
    pub num_contours: usize,
    pub shapes: Vec<ShapeRecord>,
    pub counts: ShapeCounts,
    pub outcomes: Vec<ContourOutcome>,
}

impl ShapeDetectReport {
    /// Build a report from a finished detection.
    pub fn new(
        input_path: &Path,
        config_path: Option<&Path>,
        params: ClassifierParams,
        input: &ShapeDetectInput,
        res: ShapeDetectionResult,
    ) -> Self {
        Self {
            input_path: input_path.to_string_lossy().into_owned(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            params,
            num_contours: input.contours.len(),
            counts: res.counts(),
            shapes: res.shapes,
            outcomes: res.outcomes,
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ShapesIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ShapesIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
