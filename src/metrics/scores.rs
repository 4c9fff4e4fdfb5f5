// ============================================================
// Metrics — Multi-label Batch Scores
// ============================================================
// Binarises continuous model output against a threshold and
// scores each sample (row) on its own confusion counts:
//
//   accuracy  = (tp + tn) / (tp + tn + fp + fn)
//   precision = tp / (tp + fp)
//   recall    = tp / (tp + fn)
//   F2        = 5·p·r / (4·p + r)
//
// Two degenerate rows get fixed values instead of a division:
//
//   tp = fp = fn = 0          → p = r = F2 = 1.0
//     (nothing predicted, nothing expected: trivially right)
//   tp = 0, fp > 0 or fn > 0  → p = r = F2 = 0.0
//     (a total miss)
//
// The batch result is the plain mean of each metric over rows.
// Accuracy is always defined because its denominator is the
// number of classes.

use ndarray::{Array2, ArrayView2, Zip};

use super::{check_batch, confusion::Confusion};
use crate::domain::{error::Result, threshold::Threshold};

/// Mean per-sample metrics for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchScores {
    pub accuracy:  f64,
    pub precision: f64,
    pub recall:    f64,
    pub f2:        f64,
}

impl BatchScores {
    /// (accuracy, precision, recall, f2)
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.accuracy, self.precision, self.recall, self.f2)
    }
}

/// `predict[b, c] = output[b, c] > threshold_for(c)`
pub fn binarize(output: ArrayView2<f32>, threshold: &Threshold) -> Result<Array2<bool>> {
    threshold.check_classes(output.ncols())?;

    let mut predicted = Array2::from_elem(output.raw_dim(), false);
    Zip::indexed(&mut predicted)
        .and(&output)
        .for_each(|(_, c), p, &o| *p = o > threshold.for_class(c));
    Ok(predicted)
}

/// Accuracy, precision, recall and F2 averaged over the samples of a batch.
///
/// `output` and `target` are `[batch_size, num_classes]`; targets are
/// binary labels.
pub fn scores(
    output:    ArrayView2<f32>,
    target:    ArrayView2<f32>,
    threshold: &Threshold,
) -> Result<BatchScores> {
    check_batch(&output, &target)?;
    let predicted = binarize(output, threshold)?;

    let mut sums = BatchScores { accuracy: 0.0, precision: 0.0, recall: 0.0, f2: 0.0 };
    let mut count = 0usize;

    for (p_row, t_row) in predicted.rows().into_iter().zip(target.rows()) {
        let c = Confusion::from_lane(p_row, t_row);
        let s = sample_scores(&c);

        sums.accuracy  += s.accuracy;
        sums.precision += s.precision;
        sums.recall    += s.recall;
        sums.f2        += s.f2;
        count += 1;
    }

    let n = count as f64;
    Ok(BatchScores {
        accuracy:  sums.accuracy / n,
        precision: sums.precision / n,
        recall:    sums.recall / n,
        f2:        sums.f2 / n,
    })
}

fn sample_scores(c: &Confusion) -> BatchScores {
    let (tp, tn, fp, fn_) = (c.tp as f64, c.tn as f64, c.fp as f64, c.fn_ as f64);
    let accuracy = (tp + tn) / (tp + fp + fn_ + tn);

    let (precision, recall, f2) = if c.tp == 0 && c.fp == 0 && c.fn_ == 0 {
        (1.0, 1.0, 1.0)
    } else if c.tp == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let p = tp / (tp + fp);
        let r = tp / (tp + fn_);
        (p, r, (5.0 * p * r) / (4.0 * p + r))
    };

    BatchScores { accuracy, precision, recall, f2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Error;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_all_negative_batch_is_perfect() {
        let output = Array2::<f32>::zeros((4, 6));
        let target = Array2::<f32>::zeros((4, 6));

        let s = scores(output.view(), target.view(), &Threshold::Uniform(0.5)).unwrap();
        assert_eq!(s.as_tuple(), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_pure_false_positives_score_zero() {
        let output = Array2::<f32>::ones((3, 4));
        let target = Array2::<f32>::zeros((3, 4));

        let s = scores(output.view(), target.view(), &Threshold::Uniform(0.5)).unwrap();
        assert_eq!(s.as_tuple(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_mixed_sample() {
        // predict = [1, 1, 0, 0], target = [1, 0, 1, 0]
        // tp = 1, fp = 1, fn = 1, tn = 1
        let output = array![[0.9f32, 0.7, 0.1, 0.2]];
        let target = array![[1.0f32, 0.0, 1.0, 0.0]];

        let s = scores(output.view(), target.view(), &Threshold::Uniform(0.5)).unwrap();
        assert_relative_eq!(s.accuracy, 0.5);
        assert_relative_eq!(s.precision, 0.5);
        assert_relative_eq!(s.recall, 0.5);
        // 5 · 0.25 / (2.0 + 0.5)
        assert_relative_eq!(s.f2, 0.5);
    }

    #[test]
    fn test_batch_mean_over_samples() {
        // Row 0: all negative, perfect. Row 1: tp = 2, fn = 1.
        let output = array![[0.1f32, 0.2, 0.3], [0.9, 0.8, 0.1]];
        let target = array![[0.0f32, 0.0, 0.0], [1.0, 1.0, 1.0]];

        let s = scores(output.view(), target.view(), &Threshold::Uniform(0.5)).unwrap();
        let r1 = 2.0 / 3.0;
        let f1 = 5.0 * r1 / (4.0 + r1);
        assert_relative_eq!(s.accuracy, (1.0 + r1) / 2.0);
        assert_relative_eq!(s.precision, 1.0);
        assert_relative_eq!(s.recall, (1.0 + r1) / 2.0);
        assert_relative_eq!(s.f2, (1.0 + f1) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_per_class_threshold() {
        let output = array![[0.3f32, 0.3]];
        let target = array![[1.0f32, 0.0]];

        // Class 0 positive at 0.2, class 1 negative at 0.4
        let t = Threshold::PerClass(vec![0.2, 0.4]);
        let s = scores(output.view(), target.view(), &t).unwrap();
        assert_eq!(s.as_tuple(), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_threshold_is_strict() {
        let output = array![[0.5f32, 0.6]];
        let predicted = binarize(output.view(), &Threshold::Uniform(0.5)).unwrap();
        assert_eq!(predicted, array![[false, true]]);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let output = Array2::<f32>::zeros((2, 3));
        let target = Array2::<f32>::zeros((2, 4));
        let err = scores(output.view(), target.view(), &Threshold::default()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wrong_threshold_length_is_rejected() {
        let output = Array2::<f32>::zeros((2, 3));
        let target = Array2::<f32>::zeros((2, 3));
        let err = scores(output.view(), target.view(), &Threshold::PerClass(vec![0.5])).unwrap_err();
        assert!(matches!(err, Error::ThresholdLength { expected: 3, got: 1 }));
    }
}
