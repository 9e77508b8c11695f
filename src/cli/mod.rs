// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands the work to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`  — trains the model on a .txt corpus
//   2. `probe`  — P(word) after d random other words
//   3. `assess` — model vs held-out text curves per word
//
// Results go to stdout; diagnostics go through tracing.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AssessArgs, Commands, ProbeArgs, TrainArgs};

use crate::application::{
    assess_use_case::AssessUseCase,
    probe_use_case::{word_list, ProbeUseCase},
    train_use_case::TrainUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "word-distance-lm",
    version = "0.1.0",
    about = "Train a next-word LSTM on .txt files, then probe how it models word distances."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. The CLI layer only routes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(args),
            Commands::Probe(args)  => run_probe(args),
            Commands::Assess(args) => run_assess(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on documents in: {}", args.data_dir);

    let artifacts = args.artifacts_dir.clone();
    let metrics   = TrainUseCase::new(args.into()).execute()?;

    match metrics.last() {
        Some(m) => println!("Training complete after {} epochs ({}). Saved to '{}'.", m.epoch, m.summary(), artifacts),
        None    => println!("Training complete. Saved to '{}'.", artifacts),
    }
    Ok(())
}

fn run_probe(args: ProbeArgs) -> Result<()> {
    if args.list {
        return print_word_list(&args.artifacts_dir);
    }
    let (Some(word), Some(distance), Some(tests)) = (args.word, args.distance, args.tests) else {
        anyhow::bail!("probe needs -w WORD -d DISTANCE -t TESTS (or -l)");
    };

    let mut use_case = ProbeUseCase::from_artifacts(&args.artifacts_dir, args.seed)?;
    let p = use_case.probe(&word, distance, tests)?;

    println!(
        "Probability of encountering the word {} after a sequence of {} words is {}",
        word, distance, p
    );
    Ok(())
}

fn run_assess(args: AssessArgs) -> Result<()> {
    if args.list {
        return print_word_list(&args.artifacts_dir);
    }
    if args.num_words.is_none() || args.max_distance.is_none() || args.tests.is_none() {
        anyhow::bail!("assess needs -n NUM_WORDS -d MAX_DISTANCE -t TESTS (or -l)");
    }

    let plots_dir = args.plots_dir.clone();
    let curves    = AssessUseCase::from_artifacts(args.into())?.execute()?;

    for curve in &curves {
        println!(
            "{}: model peak at distance {:?}, test data peak at distance {:?}",
            curve.word,
            curve.model_peak().map(|p| p.distance),
            curve.test_data_peak().map(|p| p.distance)
        );
    }
    println!("Wrote {} curves to '{}'", curves.len(), plots_dir);
    Ok(())
}

fn print_word_list(artifacts_dir: &str) -> Result<()> {
    for word in word_list(artifacts_dir)? {
        println!("{word}");
    }
    Ok(())
}
