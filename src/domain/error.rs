//! Error type shared by the metric, optimizer and I/O helpers.
//!
//! The application layer wraps these in `anyhow::Error` with extra
//! context; library callers can match on the variants directly.

use thiserror::Error;

/// Errors raised by the library layers.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured optimizer name has no implementation.
    #[error("optimizer `{0}` is not implemented")]
    UnsupportedOptimizer(String),

    #[error("top-k value {k} exceeds the number of classes ({classes})")]
    TopKOutOfRange { k: usize, classes: usize },

    #[error("top-k requires at least one k")]
    EmptyTopK,

    #[error("output shape {output:?} does not match target shape {target:?}")]
    ShapeMismatch {
        output: Vec<usize>,
        target: Vec<usize>,
    },

    #[error("threshold vector has {got} entries, expected one per class ({expected})")]
    ThresholdLength { expected: usize, got: usize },

    #[error("threshold search resolution must be greater than zero")]
    InvalidResolution,

    #[error("invalid class label: {0}")]
    InvalidLabel(String),

    #[error("batch contains no samples")]
    EmptyBatch,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the library layers.
pub type Result<T> = std::result::Result<T, Error>;
