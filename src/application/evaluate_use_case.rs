// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores a saved batch of predictions against its targets:
//
//   Step 1: Load predictions and targets     (Layer 4 - data)
//   Step 2: Resolve the threshold            (Layer 6 - infra,
//           either a uniform value or a      when a file is given)
//           saved per-class vector
//   Step 3: Manual scores + library F2       (metrics)
//
// TopKUseCase does the same for single-label top-k accuracy.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::loader::{load_labels, load_matrix};
use crate::domain::threshold::Threshold;
use crate::infra::threshold_store::ThresholdStore;
use crate::metrics::{f2_score, scores, topk_accuracy, BatchScores};

/// Where the decision threshold comes from.
#[derive(Debug, Clone)]
pub enum ThresholdSource {
    Uniform(f32),
    /// A JSON file written by the threshold search
    File(PathBuf),
}

impl ThresholdSource {
    fn resolve(&self) -> Result<Threshold> {
        match self {
            ThresholdSource::Uniform(t) => Ok(Threshold::Uniform(*t)),
            ThresholdSource::File(path) => Ok(ThresholdStore::new(path).load()?.threshold()),
        }
    }
}

/// Everything the `score` command reports.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub samples:  usize,
    pub classes:  usize,
    pub scores:   BatchScores,
    /// Samples-averaged F2 with library zero-division semantics
    pub f2_score: f64,
}

pub struct EvaluateUseCase {
    predictions: PathBuf,
    targets:     PathBuf,
    threshold:   ThresholdSource,
}

impl EvaluateUseCase {
    pub fn new(predictions: PathBuf, targets: PathBuf, threshold: ThresholdSource) -> Self {
        Self { predictions, targets, threshold }
    }

    pub fn execute(&self) -> Result<EvaluationReport> {
        let output = load_matrix(&self.predictions)?;
        let target = load_matrix(&self.targets)?;
        let threshold = self.threshold.resolve()?;
        tracing::info!(
            "Scoring {} samples x {} classes",
            output.nrows(),
            output.ncols()
        );

        let batch = scores(output.view(), target.view(), &threshold)
            .context("Cannot score predictions")?;
        let f2 = f2_score(output.view(), target.view(), &threshold)
            .context("Cannot compute library F2")?;

        Ok(EvaluationReport {
            samples:  output.nrows(),
            classes:  output.ncols(),
            scores:   batch,
            f2_score: f2,
        })
    }
}

pub struct TopKUseCase {
    scores: PathBuf,
    labels: PathBuf,
    topk:   Vec<usize>,
}

impl TopKUseCase {
    pub fn new(scores: PathBuf, labels: PathBuf, topk: Vec<usize>) -> Self {
        Self { scores, labels, topk }
    }

    /// (k, accuracy) pairs in the requested order.
    pub fn execute(&self) -> Result<Vec<(usize, f64)>> {
        let output = load_matrix(&self.scores)?;
        let labels = load_labels(&self.labels)?;

        let accuracies = topk_accuracy(output.view(), labels.view(), &self.topk)
            .context("Cannot compute top-k accuracy")?;
        Ok(self.topk.iter().copied().zip(accuracies).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ThresholdSearch;
    use std::fs;

    #[test]
    fn test_evaluate_with_uniform_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let predictions = dir.path().join("p.csv");
        let targets     = dir.path().join("t.csv");
        fs::write(&predictions, "0.1,0.2\n0.9,0.1\n").unwrap();
        fs::write(&targets, "0,0\n1,0\n").unwrap();

        let report = EvaluateUseCase::new(predictions, targets, ThresholdSource::Uniform(0.5))
            .execute()
            .unwrap();

        assert_eq!((report.samples, report.classes), (2, 2));
        assert_eq!(report.scores.as_tuple(), (1.0, 1.0, 1.0, 1.0));
        // The all-negative first row scores 0 under library semantics
        assert_eq!(report.f2_score, 0.5);
    }

    #[test]
    fn test_evaluate_with_saved_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let predictions = dir.path().join("p.csv");
        let targets     = dir.path().join("t.csv");
        let saved       = dir.path().join("thresholds.json");
        fs::write(&predictions, "0.3,0.3\n").unwrap();
        fs::write(&targets, "1,0\n").unwrap();
        ThresholdStore::new(&saved)
            .save(&ThresholdSearch { thresholds: vec![0.2, 0.4], best_score: 1.0 })
            .unwrap();

        let report = EvaluateUseCase::new(predictions, targets, ThresholdSource::File(saved))
            .execute()
            .unwrap();
        assert_eq!(report.scores.f2, 1.0);
        assert_eq!(report.f2_score, 1.0);
    }

    #[test]
    fn test_topk_pairs_follow_request() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("s.csv");
        let labels = dir.path().join("l.csv");
        fs::write(&scores, "0.9,0.1\n0.2,0.8\n").unwrap();
        fs::write(&labels, "1\n1\n").unwrap();

        let result = TopKUseCase::new(scores, labels, vec![2, 1]).execute().unwrap();
        assert_eq!(result, vec![(2, 1.0), (1, 0.5)]);
    }
}
