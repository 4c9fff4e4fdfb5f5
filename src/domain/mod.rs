// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by every other layer:
//
//   config.rs    — TrainingArgs, the explicit configuration
//                  object handed to the optimizer factory and
//                  the checkpoint writer.
//
//   error.rs     — The crate-wide Error enum.
//
//   threshold.rs — Decision thresholds applied when a
//                  continuous prediction is binarised.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO ndarray types
//   - Only structs, enums and their small helpers
//
// File I/O appears only in TrainingArgs' JSON helpers.

/// Optimizer and checkpoint configuration
pub mod config;

/// Crate-wide error type
pub mod error;

/// Uniform and per-class decision thresholds
pub mod threshold;
