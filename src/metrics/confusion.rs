//! Confusion counts for one row (sample) or one column (class) of a
//! binarised multi-label batch.

use ndarray::ArrayView1;

use super::is_positive_label;

/// True/false positive/negative counts over a set of (prediction, label) pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
}

impl Confusion {
    /// Count outcomes for paired predictions and targets.
    pub fn from_lane(predicted: ArrayView1<bool>, target: ArrayView1<f32>) -> Self {
        let mut c = Confusion::default();
        for (&p, &t) in predicted.iter().zip(target.iter()) {
            match (p, is_positive_label(t)) {
                (true, true)   => c.tp  += 1,
                (false, false) => c.tn  += 1,
                (true, false)  => c.fp  += 1,
                (false, true)  => c.fn_ += 1,
            }
        }
        c
    }

    /// Number of pairs counted.
    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }
}

impl std::ops::AddAssign for Confusion {
    fn add_assign(&mut self, rhs: Self) {
        self.tp  += rhs.tp;
        self.tn  += rhs.tn;
        self.fp  += rhs.fp;
        self.fn_ += rhs.fn_;
    }
}
