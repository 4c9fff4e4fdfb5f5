// ============================================================
// Metrics — Per-class Threshold Search
// ============================================================
// Finds one decision threshold per class that maximises the
// samples-averaged F2 of the whole batch, one class at a time:
//
//   thresholds = [initial; C]
//   for class in 0..C:
//       for step in 0..resolution:
//           thresholds[class] = step / resolution
//           score = F2(target, output > thresholds)
//           keep the candidate if score > best so far
//       thresholds[class] = best candidate
//
// This is greedy coordinate search: each class is tuned once,
// with earlier classes fixed at their tuned values and later
// classes still at `initial`. It can settle on a local optimum,
// and the returned score is the best score of the LAST class
// swept, not a global maximum.
//
// Each class starts the sweep with best = (0.0, 0.0) and the
// comparison is strict, so:
//   - ties keep the first (lowest) candidate
//   - a class whose every candidate scores 0 ends at 0.0

use ndarray::{Array2, ArrayView2, Axis, Zip};
use serde::{Deserialize, Serialize};

use super::{binarize, check_batch, fbeta::FBetaScore};
use crate::domain::{
    error::{Error, Result},
    threshold::Threshold,
};

/// Result of a threshold search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSearch {
    /// One threshold per class, in class order
    pub thresholds: Vec<f32>,
    /// Best score found while sweeping the last class
    pub best_score: f64,
}

impl ThresholdSearch {
    /// The thresholds as a per-class [`Threshold`] ready for scoring.
    pub fn threshold(&self) -> Threshold {
        Threshold::PerClass(self.thresholds.clone())
    }
}

/// Greedy per-class threshold optimiser.
#[derive(Debug, Clone)]
pub struct ThresholdOptimizer {
    resolution: usize,
    initial:    f32,
    verbose:    bool,
    scorer:     FBetaScore,
}

impl Default for ThresholdOptimizer {
    fn default() -> Self {
        Self {
            resolution: 100,
            initial:    0.2,
            verbose:    true,
            scorer:     FBetaScore::default(),
        }
    }
}

impl ThresholdOptimizer {
    /// Resolution 100, initial threshold 0.2, verbose, F2 scorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grid steps in [0, 1); candidates are `step / resolution`.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Threshold held by classes that have not been swept yet.
    pub fn with_initial(mut self, initial: f32) -> Self {
        self.initial = initial;
        self
    }

    /// Log the outcome of each class at info level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Scorer maximised by the search.
    pub fn with_scorer(mut self, scorer: FBetaScore) -> Self {
        self.scorer = scorer;
        self
    }

    /// Search thresholds for `output` against binary `target`,
    /// both `[batch_size, num_classes]`.
    pub fn optimise(&self, target: ArrayView2<f32>, output: ArrayView2<f32>) -> Result<ThresholdSearch> {
        if self.resolution == 0 {
            return Err(Error::InvalidResolution);
        }
        check_batch(&output, &target)?;

        let classes = target.ncols();
        let mut thresholds = vec![self.initial; classes];
        let mut predicted  = binarize(output, &Threshold::PerClass(thresholds.clone()))?;
        let mut best_score = 0.0;

        for class in 0..classes {
            let mut best_threshold = 0.0f32;
            best_score = 0.0;

            for step in 0..self.resolution {
                let candidate = step as f32 / self.resolution as f32;
                rebinarize_column(&mut predicted, output, class, candidate);

                let score = self.scorer.score(target, predicted.view())?;
                if score > best_score {
                    best_threshold = candidate;
                    best_score     = score;
                }
            }

            thresholds[class] = best_threshold;
            rebinarize_column(&mut predicted, output, class, best_threshold);

            if self.verbose {
                tracing::info!(class, threshold = best_threshold, score = best_score, "class threshold optimised");
            }
        }

        Ok(ThresholdSearch { thresholds, best_score })
    }
}

fn rebinarize_column(predicted: &mut Array2<bool>, output: ArrayView2<f32>, class: usize, threshold: f32) {
    Zip::from(predicted.index_axis_mut(Axis(1), class))
        .and(output.index_axis(Axis(1), class))
        .for_each(|p, &o| *p = o > threshold);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::f2_score;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_single_class_optimum_within_one_step() {
        // Positives score above 0.37, negatives at or below it.
        // With empty samples scored 1.0, F2 peaks only for t ∈ [0.37, 0.38).
        let output = array![[0.38f32], [0.45], [0.9], [0.365], [0.2], [0.1]];
        let target = array![[1.0f32], [1.0], [1.0], [0.0], [0.0], [0.0]];

        let search = ThresholdOptimizer::new()
            .with_resolution(100)
            .with_verbose(false)
            .with_scorer(FBetaScore::default().with_zero_division(1.0))
            .optimise(target.view(), output.view())
            .unwrap();

        assert_eq!(search.thresholds.len(), 1);
        assert_abs_diff_eq!(search.thresholds[0], 0.37, epsilon = 0.01);
        assert_abs_diff_eq!(search.best_score, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_classes_first_candidate_wins_ties() {
        // Class 0 separates for t ∈ [0.30, 0.50), class 1 for t ∈ [0.10, 0.40).
        let output = array![[0.8f32, 0.1], [0.3, 0.6], [0.5, 0.4]];
        let target = array![[1.0f32, 0.0], [0.0, 1.0], [1.0, 1.0]];

        let search = ThresholdOptimizer::new()
            .with_verbose(false)
            .optimise(target.view(), output.view())
            .unwrap();

        assert_abs_diff_eq!(search.thresholds[0], 0.30, epsilon = 1e-6);
        assert_abs_diff_eq!(search.thresholds[1], 0.10, epsilon = 1e-6);
        assert_abs_diff_eq!(search.best_score, 1.0, epsilon = 1e-12);

        let f2 = f2_score(output.view(), target.view(), &search.threshold()).unwrap();
        assert_abs_diff_eq!(f2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_improvement_keeps_zero() {
        // No positive labels anywhere: every candidate scores 0.
        let output = array![[0.9f32, 0.1], [0.4, 0.6]];
        let target = Array2::<f32>::zeros((2, 2));

        let search = ThresholdOptimizer::new()
            .with_resolution(10)
            .with_verbose(false)
            .optimise(target.view(), output.view())
            .unwrap();

        assert_eq!(search.thresholds, vec![0.0, 0.0]);
        assert_eq!(search.best_score, 0.0);
    }

    #[test]
    fn test_search_never_does_worse_than_initial() {
        let mut rng = StdRng::seed_from_u64(2020);
        let output = Array2::from_shape_fn((32, 6), |_| rng.gen::<f32>());
        let target = Array2::from_shape_fn((32, 6), |(b, c)| {
            // Labels loosely correlated with the scores
            if output[[b, c]] + rng.gen_range(-0.3f32..0.3) > 0.5 { 1.0 } else { 0.0 }
        });

        let baseline = f2_score(output.view(), target.view(), &Threshold::Uniform(0.2)).unwrap();
        let search = ThresholdOptimizer::new()
            .with_verbose(false)
            .optimise(target.view(), output.view())
            .unwrap();

        assert_eq!(search.thresholds.len(), 6);
        assert!(search.thresholds.iter().all(|t| (0.0..1.0).contains(t)));
        // The last class's best score is the score of the final vector
        let tuned = f2_score(output.view(), target.view(), &search.threshold()).unwrap();
        assert_abs_diff_eq!(tuned, search.best_score, epsilon = 1e-12);
        assert!(tuned >= baseline);
    }

    #[test]
    fn test_zero_resolution_is_rejected() {
        let output = Array2::<f32>::zeros((1, 1));
        let err = ThresholdOptimizer::new()
            .with_resolution(0)
            .optimise(output.view(), output.view())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResolution));
    }
}
