// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//
//   score      — accuracy / precision / recall / F2 of a batch
//   thresholds — greedy per-class threshold search
//   topk       — top-k accuracy for single-label scores
//   optimizer  — resolve the optimizer a config would build
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::evaluate_use_case::ThresholdSource;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score predictions against multi-label targets
    Score(ScoreArgs),

    /// Search one decision threshold per class maximising F2
    Thresholds(ThresholdArgs),

    /// Top-k accuracy of class scores against integer labels
    Topk(TopKArgs),

    /// Show which optimizer a training config selects
    Optimizer(OptimizerArgs),
}

/// Arguments for the `score` command.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Headerless CSV of model scores, one row per sample
    #[arg(long)]
    pub predictions: PathBuf,

    /// Headerless CSV of 0/1 labels with the same shape
    #[arg(long)]
    pub targets: PathBuf,

    /// Uniform decision threshold (output > threshold is positive)
    #[arg(long, default_value_t = 0.5, conflicts_with = "thresholds_file")]
    pub threshold: f32,

    /// Per-class thresholds saved by `thresholds --output`
    #[arg(long)]
    pub thresholds_file: Option<PathBuf>,
}

impl ScoreArgs {
    pub fn threshold_source(&self) -> ThresholdSource {
        match &self.thresholds_file {
            Some(path) => ThresholdSource::File(path.clone()),
            None       => ThresholdSource::Uniform(self.threshold),
        }
    }
}

/// Arguments for the `thresholds` command.
#[derive(Args, Debug)]
pub struct ThresholdArgs {
    #[arg(long)]
    pub predictions: PathBuf,

    #[arg(long)]
    pub targets: PathBuf,

    /// Candidate grid size: thresholds step through i / resolution
    #[arg(long, default_value_t = 100)]
    pub resolution: usize,

    /// Threshold held by classes not yet optimised
    #[arg(long, default_value_t = 0.2)]
    pub initial: f32,

    /// Write the result as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Suppress the per-class progress log
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the `topk` command.
#[derive(Args, Debug)]
pub struct TopKArgs {
    /// Headerless CSV of class scores
    #[arg(long)]
    pub scores: PathBuf,

    /// One-column CSV of class indices
    #[arg(long)]
    pub labels: PathBuf,

    /// Comma-separated k values, e.g. 1,5
    #[arg(long, value_delimiter = ',', default_value = "1")]
    pub k: Vec<usize>,
}

/// Arguments for the `optimizer` command.
#[derive(Args, Debug)]
pub struct OptimizerArgs {
    /// TrainingArgs JSON file
    #[arg(long)]
    pub config: PathBuf,
}
