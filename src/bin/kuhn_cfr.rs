//! Kuhn Poker CFR solver binary.
//!
//! Usage:
//!   cargo run --release --bin kuhn_cfr -- [OPTIONS]
//!
//! Options:
//!   --iterations <N>     Training iterations (default: 2000)
//!   --seed <N>           Random seed (optional)
//!   --json               Print the report as JSON
//!   --progress           Show a progress bar while training
//!
//! Set `RUST_LOG=debug` to trace per-iteration root utilities.

use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use kuhn_cfr::cfr::{CfrError, CfrTrainer, TrainConfig, DEFAULT_ITERATIONS};

#[derive(Parser, Debug)]
#[command(
    name = "kuhn_cfr",
    version,
    about = "Solve Kuhn Poker with Counterfactual Regret Minimization"
)]
struct Args {
    /// Number of training iterations
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u64,

    /// Random seed for reproducible deals
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show a progress bar while training
    #[arg(long)]
    progress: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CfrError> {
    let mut config = TrainConfig::new()
        .with_iterations(args.iterations)
        .with_progress_interval((args.iterations / 100).max(1));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut trainer = CfrTrainer::new(config)?;

    let stats = if args.progress {
        let bar = ProgressBar::new(args.iterations);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Training [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        let stats = trainer
            .train_with_callback(|stats| {
                bar.set_position(stats.iterations);
                bar.set_message(format!("EV {:.4}", stats.expected_game_value));
            })?
            .clone();
        bar.finish_and_clear();
        stats
    } else {
        trainer.train()?.clone()
    };

    let report = trainer.report();
    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print!("{}", report);
    println!();
    println!(
        "Trained {} iterations in {:.3}s ({:.0} it/s), {} info sets",
        stats.iterations, stats.elapsed_seconds, stats.iterations_per_second, stats.info_sets
    );
    println!("Exploitability: {:.5}", trainer.exploitability()?);

    Ok(())
}
