//! File-backed model storage

use crate::error::Result;
use crate::model::LagRegression;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores a single [`LagRegression`] as JSON at a fixed path
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a model file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write `model`, replacing any stored one
    pub fn save(&self, model: &LagRegression) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(model)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), lag = model.lag(), "saved model");
        Ok(())
    }

    /// Read the stored model; `Ok(None)` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<LagRegression>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no stored model");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let model: LagRegression = serde_json::from_str(&json)?;
        model.validate()?;
        info!(path = %self.path.display(), lag = model.lag(), "loaded model");
        Ok(Some(model))
    }
}
