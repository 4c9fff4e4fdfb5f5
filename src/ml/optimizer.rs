// ============================================================
// Layer 5 — Optimizer Factory
// ============================================================
// Turns an OptimizerConfig into a ready-to-step Burn optimizer
// for a given module type. The name in the config picks the
// algorithm; every hyperparameter is forwarded as-is:
//
//   sgd      → SgdConfig      (lr, momentum, nesterov, weight_decay)
//   rmsprop  → RmsPropConfig  (lr, alpha, weight_decay)
//   adam     → AdamConfig     (lr, beta1, beta2, weight_decay)
//   adamw    → AdamWConfig    (lr, beta1, beta2, weight_decay)
//   adabound → AdaBound       (lr, final_lr)
//   radam    → RAdam          (lr, beta1, beta2, weight_decay)
//
// Any other name is an UnsupportedOptimizer error. Nothing else
// is validated.
//
// Burn optimizers are bound to a module TYPE rather than to a
// parameter list: the module itself is passed into every step
// and the updated module comes back out.
//
// Reference: Burn Book §5 (Optimizers)

use burn::{
    module::AutodiffModule,
    optim::{
        adaptor::OptimizerAdaptor, decay::WeightDecayConfig, momentum::MomentumConfig,
        AdamConfig, AdamWConfig, GradientsParams, Optimizer, RmsPropConfig, SgdConfig,
    },
    tensor::backend::AutodiffBackend,
};
use std::{fmt, marker::PhantomData, str::FromStr};

use crate::domain::{
    config::OptimizerConfig,
    error::{Error, Result},
};
use crate::ml::{adabound::AdaBound, radam::RAdam};

// ─── OptimizerKind ────────────────────────────────────────────────────────────
/// The optimizers the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizerKind {
    Sgd,
    RmsProp,
    Adam,
    AdamW,
    AdaBound,
    RAdam,
}

impl FromStr for OptimizerKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sgd"      => Ok(Self::Sgd),
            "rmsprop"  => Ok(Self::RmsProp),
            "adam"     => Ok(Self::Adam),
            "adamw"    => Ok(Self::AdamW),
            "adabound" => Ok(Self::AdaBound),
            "radam"    => Ok(Self::RAdam),
            _          => Err(Error::UnsupportedOptimizer(name.to_string())),
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sgd      => "sgd",
            Self::RmsProp  => "rmsprop",
            Self::Adam     => "adam",
            Self::AdamW    => "adamw",
            Self::AdaBound => "adabound",
            Self::RAdam    => "radam",
        };
        f.write_str(name)
    }
}

// ─── ModelOptimizer ───────────────────────────────────────────────────────────
type StepFn<M> = Box<dyn FnMut(f64, M, GradientsParams) -> M + Send>;

/// A built optimizer for modules of type `M`, whatever algorithm backs it.
pub struct ModelOptimizer<M, B> {
    kind:     OptimizerKind,
    lr:       f64,
    step:     StepFn<M>,
    _backend: PhantomData<fn() -> B>,
}

impl<M, B> ModelOptimizer<M, B>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    /// Apply one update with the configured learning rate.
    pub fn step(&mut self, module: M, grads: GradientsParams) -> M {
        (self.step)(self.lr, module, grads)
    }

    /// Apply one update with an explicit learning rate (e.g. from a scheduler).
    pub fn step_with_lr(&mut self, lr: f64, module: M, grads: GradientsParams) -> M {
        (self.step)(lr, module, grads)
    }

    pub fn kind(&self) -> OptimizerKind {
        self.kind
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl<M, B> fmt::Debug for ModelOptimizer<M, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelOptimizer")
            .field("kind", &self.kind)
            .field("lr", &self.lr)
            .finish()
    }
}

fn boxed<M, B, O>(mut optim: O) -> StepFn<M>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
    O: Optimizer<M, B> + 'static,
{
    Box::new(move |lr, module, grads| optim.step(lr, module, grads))
}

fn weight_decay(penalty: f64) -> Option<WeightDecayConfig> {
    (penalty != 0.0).then(|| WeightDecayConfig::new(penalty as f32))
}

// ─── Factory ──────────────────────────────────────────────────────────────────
/// Build the optimizer named by `config` for modules of type `M`.
pub fn build_optimizer<B, M>(config: &OptimizerConfig) -> Result<ModelOptimizer<M, B>>
where
    B: AutodiffBackend + 'static,
    M: AutodiffModule<B> + 'static,
{
    let kind: OptimizerKind = config.name.parse()?;

    let step = match kind {
        OptimizerKind::Sgd => {
            // momentum = 0 means plain SGD, as in the classic formulation
            let momentum = (config.momentum != 0.0).then(|| {
                MomentumConfig::new()
                    .with_momentum(config.momentum)
                    .with_dampening(0.0)
                    .with_nesterov(config.nesterov)
            });
            boxed::<M, B, _>(
                SgdConfig::new()
                    .with_momentum(momentum)
                    .with_weight_decay(weight_decay(config.weight_decay))
                    .init::<B, M>(),
            )
        }
        OptimizerKind::RmsProp => boxed::<M, B, _>(
            RmsPropConfig::new()
                .with_alpha(config.alpha as f32)
                .with_weight_decay(weight_decay(config.weight_decay))
                .init::<B, M>(),
        ),
        OptimizerKind::Adam => boxed::<M, B, _>(
            AdamConfig::new()
                .with_beta_1(config.beta1 as f32)
                .with_beta_2(config.beta2 as f32)
                .with_weight_decay(weight_decay(config.weight_decay))
                .init::<B, M>(),
        ),
        OptimizerKind::AdamW => boxed::<M, B, _>(
            AdamWConfig::new()
                .with_beta_1(config.beta1 as f32)
                .with_beta_2(config.beta2 as f32)
                .with_weight_decay(config.weight_decay as f32)
                .init::<B, M>(),
        ),
        OptimizerKind::AdaBound => boxed::<M, B, _>(
            OptimizerAdaptor::<AdaBound, M, B>::from(AdaBound::new(config.lr, config.final_lr)),
        ),
        OptimizerKind::RAdam => {
            let radam = RAdam {
                beta_1:       config.beta1,
                beta_2:       config.beta2,
                weight_decay: config.weight_decay,
                ..RAdam::default()
            };
            boxed::<M, B, _>(OptimizerAdaptor::<RAdam, M, B>::from(radam))
        }
    };

    tracing::debug!("Built {} optimizer (lr={})", kind, config.lr);

    Ok(ModelOptimizer {
        kind,
        lr: config.lr,
        step,
        _backend: PhantomData,
    })
}
