//! F-beta scoring for binarised multi-label predictions.
//!
//! Follows scikit-learn's `fbeta_score` conventions:
//!
//! ```text
//! F = (1 + β²)·tp / ((1 + β²)·tp + β²·fn + fp)
//! ```
//!
//! When the denominator is zero (no true and no predicted labels in the
//! group being scored) the result is `zero_division`, 0.0 by default.
//! This is where [`f2_score`] parts ways with [`super::scores`], which
//! scores such samples 1.0.

use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::{binarize, check_batch, confusion::Confusion};
use crate::domain::{error::Result, threshold::Threshold};

/// How per-group F-beta values are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Score each sample (row), then take the unweighted mean
    #[default]
    Samples,
    /// Pool tp / fp / fn over the whole batch, then score once
    Micro,
    /// Score each class (column), then take the unweighted mean
    Macro,
}

/// F-beta scorer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FBetaScore {
    pub beta:          f64,
    pub average:       Average,
    pub zero_division: f64,
}

impl Default for FBetaScore {
    /// F2 averaged over samples, ill-defined groups scored 0.
    fn default() -> Self {
        Self { beta: 2.0, average: Average::Samples, zero_division: 0.0 }
    }
}

impl FBetaScore {
    /// F-beta with the given `beta` and the default averaging.
    pub fn new(beta: f64) -> Self {
        Self { beta, ..Self::default() }
    }

    /// How per-sample or per-class scores are combined.
    pub fn with_average(mut self, average: Average) -> Self {
        self.average = average;
        self
    }

    /// Score given to a group whose precision and recall are both undefined.
    pub fn with_zero_division(mut self, zero_division: f64) -> Self {
        self.zero_division = zero_division;
        self
    }

    /// Score binary `predicted` against `target`, both `[batch_size, num_classes]`.
    pub fn score(&self, target: ArrayView2<f32>, predicted: ArrayView2<bool>) -> Result<f64> {
        check_batch(&predicted, &target)?;

        let value = match self.average {
            Average::Samples => self.mean_over(Axis(0), target, predicted),
            Average::Macro   => self.mean_over(Axis(1), target, predicted),
            Average::Micro   => {
                let mut pooled = Confusion::default();
                for (p, t) in predicted.rows().into_iter().zip(target.rows()) {
                    pooled += Confusion::from_lane(p, t);
                }
                self.from_counts(&pooled)
            }
        };
        Ok(value)
    }

    /// Mean of per-lane scores, where lanes run along `axis`
    /// (Axis(0) → one lane per sample, Axis(1) → one lane per class).
    fn mean_over(&self, axis: Axis, target: ArrayView2<f32>, predicted: ArrayView2<bool>) -> f64 {
        let lanes = predicted.len_of(axis);
        if lanes == 0 {
            return self.zero_division;
        }
        let total: f64 = predicted
            .axis_iter(axis)
            .zip(target.axis_iter(axis))
            .map(|(p, t)| self.from_counts(&Confusion::from_lane(p, t)))
            .sum();
        total / lanes as f64
    }

    fn from_counts(&self, c: &Confusion) -> f64 {
        let beta2 = self.beta * self.beta;
        let numerator   = (1.0 + beta2) * c.tp as f64;
        let denominator = numerator + beta2 * c.fn_ as f64 + c.fp as f64;
        if denominator == 0.0 {
            self.zero_division
        } else {
            numerator / denominator
        }
    }
}

/// Samples-averaged F2 of `output > threshold` against `target`.
pub fn f2_score(
    output:    ArrayView2<f32>,
    target:    ArrayView2<f32>,
    threshold: &Threshold,
) -> Result<f64> {
    check_batch(&output, &target)?;
    let predicted = binarize(output, threshold)?;
    FBetaScore::default().score(target, predicted.view())
}
