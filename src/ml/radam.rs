// ============================================================
// Layer 5 — RAdam Optimizer
// ============================================================
// Rectified Adam: plain momentum SGD while the variance of the
// adaptive learning rate is still untrustworthy, Adam with a
// variance-rectification factor afterwards.
//
//   ρ∞  = 2/(1-β2) - 1
//   ρt  = ρ∞ - 2t·β2ᵗ/(1-β2ᵗ)
//
//   ρt ≥ 5:  r  = √((ρt-4)(ρt-2)ρ∞ / ((ρ∞-4)(ρ∞-2)ρt))
//            θ -= lr · r · √(1-β2ᵗ)/(1-β1ᵗ) · m / (√v + ε)
//   ρt < 5:  θ -= lr / (1-β1ᵗ) · m
//
// Weight decay is decoupled: θ -= lr · wd · θ before the step.
//
// Reference: Liu et al. (2020) On the Variance of the Adaptive
//            Learning Rate and Beyond

use burn::{
    optim::SimpleOptimizer,
    prelude::*,
    record::Record,
};

/// Below this approximated SMA length the update skips the adaptive term.
const SMA_THRESHOLD: f64 = 5.0;

/// RAdam hyperparameters. Build through the optimizer factory.
#[derive(Clone, Debug)]
pub struct RAdam {
    pub beta_1:       f64,
    pub beta_2:       f64,
    pub epsilon:      f64,
    pub weight_decay: f64,
}

impl Default for RAdam {
    fn default() -> Self {
        Self {
            beta_1:       0.9,
            beta_2:       0.999,
            epsilon:      1e-8,
            weight_decay: 0.0,
        }
    }
}

/// Per-tensor moment estimates.
#[derive(Record, Clone)]
pub struct RAdamState<B: Backend, const D: usize> {
    pub time:     usize,
    pub moment_1: Tensor<B, D>,
    pub moment_2: Tensor<B, D>,
}

impl RAdam {
    /// ρt for step `time`; the rectified update applies once it reaches
    /// the SMA threshold.
    pub fn sma_length(&self, time: usize) -> f64 {
        let t       = time as f64;
        let beta_2t = self.beta_2.powf(t);
        let rho_inf = 2.0 / (1.0 - self.beta_2) - 1.0;
        rho_inf - 2.0 * t * beta_2t / (1.0 - beta_2t)
    }
}

impl<B: Backend> SimpleOptimizer<B> for RAdam {
    type State<const D: usize> = RAdamState<B, D>;

    fn step<const D: usize>(
        &self,
        lr:     f64,
        tensor: Tensor<B, D>,
        grad:   Tensor<B, D>,
        state:  Option<Self::State<D>>,
    ) -> (Tensor<B, D>, Option<Self::State<D>>) {
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

        let tensor = if self.weight_decay != 0.0 {
            tensor.clone().sub(tensor.mul_scalar(self.weight_decay * lr))
        } else {
            tensor
        };

        let t       = time as f64;
        let bias_1  = 1.0 - self.beta_1.powf(t);
        let bias_2  = 1.0 - self.beta_2.powf(t);
        let rho_inf = 2.0 / (1.0 - self.beta_2) - 1.0;
        let rho_t   = self.sma_length(time);

        let update = if rho_t >= SMA_THRESHOLD {
            let rect = ((rho_t - 4.0) * (rho_t - 2.0) * rho_inf
                / ((rho_inf - 4.0) * (rho_inf - 2.0) * rho_t))
                .sqrt();
            let step_size = lr * rect * bias_2.sqrt() / bias_1;
            moment_1
                .clone()
                .div(moment_2.clone().sqrt().add_scalar(self.epsilon))
                .mul_scalar(step_size)
        } else {
            moment_1.clone().mul_scalar(lr / bias_1)
        };

        let state = RAdamState { time, moment_1, moment_2 };
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

    #[test]
    fn test_warmup_steps_are_momentum_sgd() {
        let device = Default::default();
        let optim  = RAdam::default();
        assert!(optim.sma_length(1) < SMA_THRESHOLD);

        let param = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0], &device);
        let grad  = Tensor::<TestBackend, 1>::from_floats([0.5, -1.0], &device);

        // t = 1: m = 0.1·g, bias_1 = 0.1 → θ -= lr · g
        let (updated, _) = SimpleOptimizer::<TestBackend>::step(&optim, 0.1, param, grad, None);
        let v: Vec<f32> = updated.into_data().iter::<f32>().collect();
        assert!((v[0] - 0.95).abs() < 1e-6);
        assert!((v[1] - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_rectification_kicks_in() {
        let optim = RAdam::default();
        // ρt passes 5 after a handful of steps for β2 = 0.999
        let first = (1..100).find(|&t| optim.sma_length(t) >= SMA_THRESHOLD).unwrap();
        assert!(first > 1 && first < 10);
    }

    #[test]
    fn test_decoupled_weight_decay_shrinks_params() {
        let device = Default::default();
        let optim  = RAdam { weight_decay: 0.5, ..RAdam::default() };

        let param = Tensor::<TestBackend, 1>::from_floats([2.0], &device);
        let grad  = Tensor::<TestBackend, 1>::from_floats([0.0], &device);

        // Zero gradient: only the decay term moves θ, by lr · wd · θ
        let (updated, _) = SimpleOptimizer::<TestBackend>::step(&optim, 0.1, param, grad, None);
        let v: Vec<f32> = updated.into_data().iter::<f32>().collect();
        assert!((v[0] - 1.9).abs() < 1e-6);
    }
}
