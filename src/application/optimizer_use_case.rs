// ============================================================
// Layer 2 — OptimizerUseCase
// ============================================================
// Loads a TrainingArgs JSON file and resolves which optimizer
// the factory would build from it, without needing a model.
// An unknown optimizer name fails here exactly as it would at
// training time.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::config::TrainingArgs;
use crate::ml::optimizer::OptimizerKind;

/// The resolved optimizer and the hyperparameters it consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSummary {
    pub kind:            OptimizerKind,
    pub hyperparameters: Vec<(&'static str, String)>,
    pub best_checkpoint: PathBuf,
}

pub struct OptimizerUseCase {
    config_path: PathBuf,
}

impl OptimizerUseCase {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn execute(&self) -> Result<OptimizerSummary> {
        let args = TrainingArgs::from_json_file(&self.config_path).with_context(|| {
            format!("Cannot read training args from '{}'", self.config_path.display())
        })?;
        summarise(&args)
    }
}

/// Resolve the optimizer named in `args` and list the fields it uses.
pub fn summarise(args: &TrainingArgs) -> Result<OptimizerSummary> {
    let o = &args.optimizer;
    let kind: OptimizerKind = o.name.parse()?;

    let mut hyperparameters = vec![("lr", o.lr.to_string())];
    match kind {
        OptimizerKind::Sgd => {
            hyperparameters.push(("momentum", o.momentum.to_string()));
            hyperparameters.push(("nesterov", o.nesterov.to_string()));
            hyperparameters.push(("weight_decay", o.weight_decay.to_string()));
        }
        OptimizerKind::RmsProp => {
            hyperparameters.push(("alpha", o.alpha.to_string()));
            hyperparameters.push(("weight_decay", o.weight_decay.to_string()));
        }
        OptimizerKind::Adam | OptimizerKind::AdamW | OptimizerKind::RAdam => {
            hyperparameters.push(("beta1", o.beta1.to_string()));
            hyperparameters.push(("beta2", o.beta2.to_string()));
            hyperparameters.push(("weight_decay", o.weight_decay.to_string()));
        }
        OptimizerKind::AdaBound => {
            hyperparameters.push(("final_lr", o.final_lr.to_string()));
        }
    }

    Ok(OptimizerSummary {
        kind,
        hyperparameters,
        best_checkpoint: args.checkpoint.best_checkpoint.clone(),
    })
}
