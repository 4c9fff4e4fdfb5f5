//! Training utilities for multi-label classification with Burn.
//!
//! - [`metrics`]: running averages, top-k accuracy, per-sample F2 scoring,
//!   library-style F-beta and greedy per-class threshold search
//! - [`ml`]: optimizer factory (SGD, RMSprop, Adam, AdamW, AdaBound, RAdam)
//! - [`infra`]: best-effort checkpoint writing and threshold persistence
//! - [`domain`]: configuration, thresholds and the error type

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod metrics;
pub mod ml;

pub use domain::error::{Error, Result};
