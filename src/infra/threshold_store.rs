// ============================================================
// Layer 6 — Threshold Store
// ============================================================
// Persists the result of a per-class threshold search so the
// tuned cut-offs can be reused by later scoring runs.
//
// File format (pretty JSON):
//   {
//     "thresholds": [0.31, 0.12, 0.2, ...],
//     "best_score": 0.9172
//   }

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::metrics::ThresholdSearch;

/// JSON file holding a [`ThresholdSearch`].
pub struct ThresholdStore {
    path: PathBuf,
}

impl ThresholdStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `search` as JSON, creating parent directories if needed.
    pub fn save(&self, search: &ThresholdSearch) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(search)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write thresholds to '{}'", self.path.display()))?;

        tracing::debug!(
            "Saved {} thresholds to '{}'",
            search.thresholds.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read back a previously saved search.
    pub fn load(&self) -> Result<ThresholdSearch> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read thresholds from '{}'. Run 'thresholds --output' first.",
                self.path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed thresholds file '{}'", self.path.display()))
    }
}
