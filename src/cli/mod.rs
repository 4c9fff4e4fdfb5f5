// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands them to the matching use
// case, and prints the result. No metric logic lives here.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, OptimizerArgs, ScoreArgs, ThresholdArgs, TopKArgs};

use crate::application::{
    evaluate_use_case::{EvaluateUseCase, TopKUseCase},
    optimizer_use_case::OptimizerUseCase,
    threshold_use_case::ThresholdUseCase,
};
use crate::metrics::ThresholdOptimizer;

#[derive(Parser, Debug)]
#[command(
    name = "multilabel-toolkit",
    version,
    about = "Score multi-label predictions, tune per-class thresholds, inspect optimizer configs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Score(args)      => run_score(args),
            Commands::Thresholds(args) => run_thresholds(args),
            Commands::Topk(args)       => run_topk(args),
            Commands::Optimizer(args)  => run_optimizer(args),
        }
    }
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let source = args.threshold_source();
    let report = EvaluateUseCase::new(args.predictions, args.targets, source).execute()?;

    println!("samples   : {}", report.samples);
    println!("classes   : {}", report.classes);
    println!("accuracy  : {:.4}", report.scores.accuracy);
    println!("precision : {:.4}", report.scores.precision);
    println!("recall    : {:.4}", report.scores.recall);
    println!("f2        : {:.4}", report.scores.f2);
    println!("f2 (lib)  : {:.4}", report.f2_score);
    Ok(())
}

fn run_thresholds(args: ThresholdArgs) -> Result<()> {
    let optimizer = ThresholdOptimizer::new()
        .with_resolution(args.resolution)
        .with_initial(args.initial)
        .with_verbose(!args.quiet);

    let search = ThresholdUseCase::new(args.predictions, args.targets, optimizer, args.output)
        .execute()?;

    for (class, t) in search.thresholds.iter().enumerate() {
        println!("class {:>3} : {:.2}", class, t);
    }
    println!("best f2   : {:.4}", search.best_score);
    Ok(())
}

fn run_topk(args: TopKArgs) -> Result<()> {
    let results = TopKUseCase::new(args.scores, args.labels, args.k).execute()?;
    for (k, acc) in results {
        println!("top-{:<3}: {:.2}%", k, acc * 100.0);
    }
    Ok(())
}

fn run_optimizer(args: OptimizerArgs) -> Result<()> {
    let summary = OptimizerUseCase::new(args.config).execute()?;

    println!("optimizer : {}", summary.kind);
    for (name, value) in &summary.hyperparameters {
        println!("  {:<12} = {}", name, value);
    }
    println!("best checkpoint : {}", summary.best_checkpoint.display());
    Ok(())
}
