// ============================================================
// Layer 3 — Decision Thresholds
// ============================================================
// A model emits one continuous score per class. A class is
// predicted positive when its score is STRICTLY greater than
// the threshold for that class:
//
//   predict[b, c] = output[b, c] > threshold_for(c)
//
// Two shapes are supported:
//   Uniform(t)     — the same cut-off for every class
//   PerClass(v)    — v[c] is the cut-off for class c,
//                    typically produced by the threshold search

use serde::{Deserialize, Serialize};

use crate::domain::error::{Error, Result};

/// Threshold applied when binarising continuous predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    /// One threshold shared by all classes
    Uniform(f32),
    /// One threshold per class, indexed by class id
    PerClass(Vec<f32>),
}

impl Threshold {
    /// Threshold for class `class`.
    ///
    /// Callers must run [`Threshold::check_classes`] first; a
    /// `PerClass` vector shorter than `class` panics here.
    pub fn for_class(&self, class: usize) -> f32 {
        match self {
            Threshold::Uniform(t) => *t,
            Threshold::PerClass(v) => v[class],
        }
    }

    /// Verify that a per-class vector covers exactly `num_classes` classes.
    pub fn check_classes(&self, num_classes: usize) -> Result<()> {
        match self {
            Threshold::Uniform(_) => Ok(()),
            Threshold::PerClass(v) if v.len() == num_classes => Ok(()),
            Threshold::PerClass(v) => Err(Error::ThresholdLength {
                expected: num_classes,
                got: v.len(),
            }),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Uniform(0.5)
    }
}

impl From<f32> for Threshold {
    fn from(t: f32) -> Self {
        Threshold::Uniform(t)
    }
}

impl From<Vec<f32>> for Threshold {
    fn from(v: Vec<f32>) -> Self {
        Threshold::PerClass(v)
    }
}

impl From<&[f32]> for Threshold {
    fn from(v: &[f32]) -> Self {
        Threshold::PerClass(v.to_vec())
    }
}
