// ============================================================
// Layer 3 — Training Configuration
// ============================================================
// All externally supplied hyperparameters, gathered in one
// serialisable struct. Nothing reads configuration from
// process-wide state: callers build a TrainingArgs (from JSON,
// CLI flags, or code) and hand the relevant section to the
// optimizer factory or the checkpoint writer.
//
// Example JSON (every field is optional):
//   {
//     "optimizer":  { "name": "adam", "lr": 0.001, "beta1": 0.9 },
//     "checkpoint": { "best_checkpoint": "runs/best/model_best" }
//   }
//
// No validation happens here beyond what serde enforces.
// The optimizer name is only checked when the factory
// dispatches on it.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::domain::error::Result;

// ─── TrainingArgs ─────────────────────────────────────────────────────────────
/// Top-level configuration consumed by the optimizer factory and
/// the checkpoint writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingArgs {
    pub optimizer:  OptimizerConfig,
    pub checkpoint: CheckpointConfig,
}

impl TrainingArgs {
    /// Read a TrainingArgs from a JSON file. Missing fields take
    /// their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write this configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        tracing::debug!("Saved training args to '{}'", path.as_ref().display());
        Ok(())
    }
}

// ─── OptimizerConfig ──────────────────────────────────────────────────────────
/// Hyperparameters forwarded verbatim to whichever optimizer `name`
/// selects. Fields that the selected optimizer does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// One of sgd, rmsprop, adam, adamw, adabound, radam (case-insensitive)
    pub name:         String,
    /// Base learning rate
    pub lr:           f64,
    /// SGD momentum factor; 0 disables momentum
    pub momentum:     f64,
    /// Nesterov momentum for SGD
    pub nesterov:     bool,
    /// L2 penalty (decoupled for AdamW and RAdam)
    pub weight_decay: f64,
    /// RMSprop smoothing constant
    pub alpha:        f64,
    /// First-moment decay for the Adam family
    pub beta1:        f64,
    /// Second-moment decay for the Adam family
    pub beta2:        f64,
    /// AdaBound's final (SGD-like) learning rate
    pub final_lr:     f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            name:         "sgd".to_string(),
            lr:           0.01,
            momentum:     0.9,
            nesterov:     false,
            weight_decay: 1e-4,
            alpha:        0.99,
            beta1:        0.9,
            beta2:        0.999,
            final_lr:     0.1,
        }
    }
}

// ─── CheckpointConfig ─────────────────────────────────────────────────────────
/// Where the "best model" copy lands when a checkpoint is flagged as best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub best_checkpoint: PathBuf,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            best_checkpoint: PathBuf::from("checkpoints/model_best"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "optimizer": { "name": "adam", "lr": 0.001 } }"#;
        let args: TrainingArgs = serde_json::from_str(json).unwrap();

        assert_eq!(args.optimizer.name, "adam");
        assert_eq!(args.optimizer.lr, 0.001);
        // Untouched fields keep their defaults
        assert_eq!(args.optimizer.beta2, 0.999);
        assert_eq!(args.checkpoint, CheckpointConfig::default());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");

        let mut args = TrainingArgs::default();
        args.optimizer.name = "radam".to_string();
        args.checkpoint.best_checkpoint = PathBuf::from("runs/best");
        args.to_json_file(&path).unwrap();

        let loaded = TrainingArgs::from_json_file(&path).unwrap();
        assert_eq!(loaded, args);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TrainingArgs::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::domain::error::Error::Io(_)));
    }
}
