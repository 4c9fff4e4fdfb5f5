// ============================================================
// Layer 2 — ThresholdUseCase
// ============================================================
//   Step 1: Load predictions and targets     (Layer 4 - data)
//   Step 2: Greedy per-class search          (metrics)
//   Step 3: Persist the result, if asked     (Layer 6 - infra)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::loader::load_matrix;
use crate::infra::threshold_store::ThresholdStore;
use crate::metrics::{ThresholdOptimizer, ThresholdSearch};

pub struct ThresholdUseCase {
    predictions: PathBuf,
    targets:     PathBuf,
    optimizer:   ThresholdOptimizer,
    output:      Option<PathBuf>,
}

impl ThresholdUseCase {
    pub fn new(
        predictions: PathBuf,
        targets:     PathBuf,
        optimizer:   ThresholdOptimizer,
        output:      Option<PathBuf>,
    ) -> Self {
        Self { predictions, targets, optimizer, output }
    }

    pub fn execute(&self) -> Result<ThresholdSearch> {
        let output = load_matrix(&self.predictions)?;
        let target = load_matrix(&self.targets)?;
        tracing::info!("Searching thresholds for {} classes", output.ncols());

        let search = self
            .optimizer
            .optimise(target.view(), output.view())
            .context("Threshold search failed")?;

        if let Some(path) = &self.output {
            ThresholdStore::new(path).save(&search)?;
            tracing::info!("Thresholds written to '{}'", path.display());
        }

        Ok(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_search_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let predictions = dir.path().join("p.csv");
        let targets     = dir.path().join("t.csv");
        let saved       = dir.path().join("out/thresholds.json");
        fs::write(&predictions, "0.8,0.1\n0.3,0.6\n0.5,0.4\n").unwrap();
        fs::write(&targets, "1,0\n0,1\n1,1\n").unwrap();

        let search = ThresholdUseCase::new(
            predictions,
            targets,
            ThresholdOptimizer::new().with_verbose(false),
            Some(saved.clone()),
        )
        .execute()
        .unwrap();

        assert_eq!(search.thresholds.len(), 2);
        assert_eq!(ThresholdStore::new(&saved).load().unwrap(), search);
    }

    #[test]
    fn test_shape_mismatch_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let predictions = dir.path().join("p.csv");
        let targets     = dir.path().join("t.csv");
        fs::write(&predictions, "0.8,0.1\n").unwrap();
        fs::write(&targets, "1,0,1\n").unwrap();

        let result = ThresholdUseCase::new(predictions, targets, ThresholdOptimizer::new(), None).execute();
        assert!(result.is_err());
    }
}
