// ============================================================
// Metrics Layer
// ============================================================
// Numeric helpers used while training and validating a
// multi-label classifier. All of them work on host-side
// ndarray values. Burn tensors are converted with the helpers
// in `tensor`.
//
//   average.rs    — RunningAverage: weighted mean of a metric stream
//   topk.rs       — top-k accuracy for single-label targets
//   confusion.rs  — per-row tp / tn / fp / fn counting
//   scores.rs     — accuracy, precision, recall and F2 per batch,
//                   with explicit rules for degenerate samples
//   fbeta.rs      — F-beta with samples / micro / macro averaging
//                   (the library-style counterpart of scores.rs)
//   thresholds.rs — greedy per-class threshold search for F2
//   tensor.rs     — Burn tensor ⇄ ndarray conversion
//
// scores.rs and fbeta.rs deliberately disagree on samples with
// no true and no predicted labels: the former scores them 1.0,
// the latter uses its zero_division value (0.0 by default).

/// Weighted running average
pub mod average;

/// Per-row confusion counts
pub mod confusion;

/// F-beta scoring with averaging strategies
pub mod fbeta;

/// Batch accuracy / precision / recall / F2
pub mod scores;

/// Burn tensor conversion
pub mod tensor;

/// Greedy per-class threshold optimisation
pub mod thresholds;

/// Top-k classification accuracy
pub mod topk;

pub use average::RunningAverage;
pub use fbeta::{f2_score, Average, FBetaScore};
pub use scores::{binarize, scores, BatchScores};
pub use thresholds::{ThresholdOptimizer, ThresholdSearch};
pub use topk::topk_accuracy;

use ndarray::ArrayView2;

use crate::domain::error::{Error, Result};

/// Reject batches whose output and target shapes differ, or that
/// contain no samples.
pub(crate) fn check_batch<A, B>(output: &ArrayView2<A>, target: &ArrayView2<B>) -> Result<()> {
    if output.shape() != target.shape() {
        return Err(Error::ShapeMismatch {
            output: output.shape().to_vec(),
            target: target.shape().to_vec(),
        });
    }
    if output.nrows() == 0 {
        return Err(Error::EmptyBatch);
    }
    Ok(())
}

/// A target entry counts as a positive label when it is non-zero
/// after truncation to an integer.
#[inline]
pub(crate) fn is_positive_label(t: f32) -> bool {
    t as i64 != 0
}
