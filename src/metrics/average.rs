// ============================================================
// Metrics — Running Average
// ============================================================
// Accumulates a stream of scalar metric values (loss, accuracy,
// F2, ...) over an epoch, weighting each value by how many
// samples it summarises:
//
//   sum   += value * n
//   count += n
//   avg    = sum / count
//
// Typical lifecycle:
//   let mut loss = RunningAverage::new();
//   for batch in epoch { loss.update(batch_loss, batch_size); }
//   log(loss.avg());
//   loss.reset();            // next epoch
//
// `avg` is NaN when every update so far carried n = 0, because
// 0.0 / 0 is not a number. Reading `avg` before any update gives
// the reset value 0.0.

/// Weighted running mean of a scalar metric stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningAverage {
    val:   f64,
    sum:   f64,
    count: usize,
    avg:   f64,
}

impl RunningAverage {
    /// A fresh accumulator in the zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record `value` as the mean over `n` samples.
    pub fn update(&mut self, value: f64, n: usize) {
        self.val    = value;
        self.sum   += value * n as f64;
        self.count += n;
        self.avg    = self.sum / self.count as f64;
    }

    /// Shorthand for `update(value, 1)`.
    pub fn record(&mut self, value: f64) {
        self.update(value, 1);
    }

    /// Most recent value passed to `update`
    pub fn val(&self) -> f64 {
        self.val
    }

    /// Weighted sum of all values
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Total weight seen since the last reset
    pub fn count(&self) -> usize {
        self.count
    }

    /// Weighted mean since the last reset
    pub fn avg(&self) -> f64 {
        self.avg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_weighted_update() {
        let mut m = RunningAverage::new();
        m.update(1.0, 2);
        m.update(4.0, 1);

        assert_eq!(m.val(), 4.0);
        assert_eq!(m.count(), 3);
        assert_relative_eq!(m.sum(), 6.0);
        assert_relative_eq!(m.avg(), 2.0);
    }

    #[test]
    fn test_reset_returns_to_zero_state() {
        let mut m = RunningAverage::new();
        m.update(3.5, 10);
        m.record(-1.0);

        m.reset();
        assert_eq!(m, RunningAverage::default());
        assert_eq!((m.val(), m.sum(), m.count(), m.avg()), (0.0, 0.0, 0, 0.0));

        // A single update after reset sees no trace of earlier values
        m.update(5.0, 1);
        assert_eq!(m.avg(), 5.0);
    }

    #[test]
    fn test_zero_weight_only_gives_nan() {
        let mut m = RunningAverage::new();
        m.update(2.0, 0);
        assert!(m.avg().is_nan());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_avg_is_weighted_mean(
            updates in prop::collection::vec((-1.0e3f64..1.0e3, 1usize..64), 1..50)
        ) {
            let mut m = RunningAverage::new();
            for &(v, n) in &updates {
                m.update(v, n);
            }

            let total: usize = updates.iter().map(|&(_, n)| n).sum();
            let mean = updates.iter().map(|&(v, n)| v * n as f64).sum::<f64>() / total as f64;

            prop_assert_eq!(m.count(), total);
            prop_assert!((m.avg() - mean).abs() <= 1e-9 * mean.abs().max(1.0));
        }
    }
}
