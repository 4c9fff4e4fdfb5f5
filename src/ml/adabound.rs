// ============================================================
// Layer 5 — AdaBound Optimizer
// ============================================================
// Adam whose per-parameter step size is clipped into a band
// that narrows towards a fixed "final" learning rate, so
// training starts Adam-like and ends SGD-like.
//
//   m   = β1·m + (1-β1)·g
//   v   = β2·v + (1-β2)·g²
//   η   = lr · √(1-β2ᵗ) / (1-β1ᵗ)
//   lo  = final_lr' · (1 - 1/(γ·t + 1))
//   hi  = final_lr' · (1 + 1/(γ·t))
//   θ  -= clamp(η / (√v + ε), lo, hi) · m
//
// where final_lr' = final_lr · lr / base_lr follows any
// schedule applied to lr. Weight decay is L2 (added to g).
//
// Reference: Luo et al. (2019) Adaptive Gradient Methods with
//            Dynamic Bound of Learning Rate

use burn::{
    optim::SimpleOptimizer,
    prelude::*,
    record::Record,
};

/// AdaBound hyperparameters. Build through the optimizer factory.
#[derive(Clone, Debug)]
pub struct AdaBound {
    pub base_lr:      f64,
    pub final_lr:     f64,
    pub beta_1:       f64,
    pub beta_2:       f64,
    pub gamma:        f64,
    pub epsilon:      f64,
    pub weight_decay: f64,
}

impl AdaBound {
    /// The defaults of the reference implementation, bound to `lr`
    /// and `final_lr`.
    pub fn new(lr: f64, final_lr: f64) -> Self {
        Self {
            base_lr:      lr,
            final_lr,
            beta_1:       0.9,
            beta_2:       0.999,
            gamma:        1e-3,
            epsilon:      1e-8,
            weight_decay: 0.0,
        }
    }
}

/// Per-tensor moment estimates.
#[derive(Record, Clone)]
pub struct AdaBoundState<B: Backend, const D: usize> {
    pub time:     usize,
    pub moment_1: Tensor<B, D>,
    pub moment_2: Tensor<B, D>,
}

impl<B: Backend> SimpleOptimizer<B> for AdaBound {
    type State<const D: usize> = AdaBoundState<B, D>;

    fn step<const D: usize>(
        &self,
        lr:     f64,
        tensor: Tensor<B, D>,
        grad:   Tensor<B, D>,
        state:  Option<Self::State<D>>,
    ) -> (Tensor<B, D>, Option<Self::State<D>>) {
        let grad = if self.weight_decay != 0.0 {
            grad.add(tensor.clone().mul_scalar(self.weight_decay))
        } else {
            grad
        };

        let grad_sq = grad.clone().powf_scalar(2.0);
        let (time, moment_1, moment_2) = match state {
            Some(s) => (
                s.time + 1,
                s.moment_1.mul_scalar(self.beta_1).add(grad.mul_scalar(1.0 - self.beta_1)),
                s.moment_2.mul_scalar(self.beta_2).add(grad_sq.mul_scalar(1.0 - self.beta_2)),
            ),
            None => (
                1,
                grad.mul_scalar(1.0 - self.beta_1),
                grad_sq.mul_scalar(1.0 - self.beta_2),
            ),
        };

        let t      = time as f64;
        let bias_1 = 1.0 - self.beta_1.powf(t);
        let bias_2 = 1.0 - self.beta_2.powf(t);
        let step_size = lr * bias_2.sqrt() / bias_1;

        let final_lr = self.final_lr * lr / self.base_lr;
        let lower = final_lr * (1.0 - 1.0 / (self.gamma * t + 1.0));
        let upper = final_lr * (1.0 + 1.0 / (self.gamma * t));

        let update = moment_2
            .clone()
            .sqrt()
            .add_scalar(self.epsilon)
            .recip()
            .mul_scalar(step_size)
            .clamp(lower, upper)
            .mul(moment_1.clone());

        let state = AdaBoundState { time, moment_1, moment_2 };
        (tensor.sub(update), Some(state))
    }

    fn to_device<const D: usize>(mut state: Self::State<D>, device: &B::Device) -> Self::State<D> {
        state.moment_1 = state.moment_1.to_device(device);
        state.moment_2 = state.moment_2.to_device(device);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn values(t: Tensor<TestBackend, 1>) -> Vec<f32> {
        t.into_data().iter::<f32>().collect()
    }

    #[test]
    fn test_first_step_is_clamped_to_band() {
        let device = Default::default();
        let optim  = AdaBound::new(1e-3, 0.1);

        let param = Tensor::<TestBackend, 1>::from_floats([1.0, -1.0], &device);
        let grad  = Tensor::<TestBackend, 1>::from_floats([0.5, -0.5], &device);

        let (updated, state) = SimpleOptimizer::<TestBackend>::step(&optim, 1e-3, param, grad, None);
        let state = state.unwrap();
        assert_eq!(state.time, 1);

        // At t = 1 the Adam step (lr · √0.001 / 0.1 / (√(0.00025) + ε) ≈ 0.02)
        // lies inside [0.1 · (1 - 1/1.001), 0.1 · 1001] so it is kept;
        // the move is that step times m = 0.05.
        let moved: Vec<f32> = values(updated).iter().zip([1.0f32, -1.0]).map(|(a, b)| b - a).collect();
        assert!(moved[0] > 0.0 && moved[1] < 0.0);
        assert!((moved[0] + moved[1]).abs() < 1e-6);
        assert!((moved[0] - 1e-3).abs() < 1e-4);
    }

    #[test]
    fn test_state_accumulates_time() {
        let device = Default::default();
        let optim  = AdaBound::new(1e-2, 0.1);

        let param = Tensor::<TestBackend, 1>::from_floats([0.3], &device);
        let grad  = Tensor::<TestBackend, 1>::from_floats([1.0], &device);

        let (param, state) = SimpleOptimizer::<TestBackend>::step(&optim, 1e-2, param, grad.clone(), None);
        let (_, state) = SimpleOptimizer::<TestBackend>::step(&optim, 1e-2, param, grad, state);
        assert_eq!(state.unwrap().time, 2);
    }
}
