//! JSON configuration and report helpers for star matching runs.

use crate::{Correspondence, MatchError, StarMatchParams, StarMatchResult};
use serde::{Deserialize, Serialize};
use starmatch_core::SimilarityTransform;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration of a matching run between two image files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarMatchConfig {
    pub image_a: String,
    pub image_b: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: StarMatchParams,
}

impl StarMatchConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("starmatch_report.json"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarMatchReport {
    pub image_a: String,
    pub image_b: String,
    pub config_path: String,
    pub params: StarMatchParams,
    #[serde(default)]
    pub num_stars: [usize; 2],
    #[serde(default)]
    pub num_segments: [usize; 2],
    #[serde(default)]
    pub transform: Option<SimilarityTransform>,
    #[serde(default)]
    pub correspondences: Vec<Correspondence>,
    #[serde(default)]
    pub rms_residual: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StarMatchReport {
    /// Build an empty report for a config.
    pub fn new(cfg: &StarMatchConfig, config_path: &Path) -> Self {
        Self {
            image_a: cfg.image_a.clone(),
            image_b: cfg.image_b.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            params: cfg.params,
            num_stars: [0, 0],
            num_segments: [0, 0],
            transform: None,
            correspondences: Vec::new(),
            rms_residual: None,
            error: None,
        }
    }

    /// Populate report fields from a finished run.
    pub fn set_result(&mut self, res: StarMatchResult) {
        self.rms_residual = res.rms_residual();
        self.num_stars = res.num_stars;
        self.num_segments = res.num_segments;
        self.transform = res.transform;
        self.correspondences = res.correspondences;
        self.error = None;
    }

    /// Record a failed run.
    pub fn set_error(&mut self, err: MatchError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
