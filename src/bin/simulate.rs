//! Snakes and ladders simulator CLI.
//!
//! Run Monte Carlo games on a board file and report rolls-to-win statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- --board <FILE> [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- -c board.txt                 # 10k games, d6
//!   cargo run --bin simulate -- -c board.txt -x -S 42        # exact finish, fixed seed
//!   cargo run --bin simulate -- -c board.txt -e              # passing the end wins (default)
//!   cargo run --bin simulate -- -c board.txt -d 4 -p 1,1,1,3 # loaded d4
//!   cargo run --bin simulate -- -c board.txt -t 0 --json     # all cores, JSON dump

use anyhow::{Context, Result};
use clap::Parser;
use ladders::board::{load_board, OvershootPolicy};
use ladders::simulator::{run_simulation, SimConfig};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Estimate rolls-to-win on a snakes and ladders board by Monte Carlo play")]
struct Args {
    /// Board file: `<rows> <columns>` then one `S|L <start> <end>` per line
    #[arg(short = 'c', long)]
    board: PathBuf,

    /// Number of die faces
    #[arg(short = 'd', long, default_value_t = 6)]
    sides: usize,

    /// Comma-separated face weights, one per side (default: fair die)
    #[arg(short = 'p', long, value_delimiter = ',')]
    weights: Option<Vec<f64>>,

    /// Number of games to play
    #[arg(short = 'i', long, default_value_t = 10_000)]
    iterations: usize,

    /// Rolls allowed per game before it is abandoned
    #[arg(short = 's', long, default_value_t = 10_000)]
    max_steps: usize,

    /// Require an exact roll onto the last square
    #[arg(short = 'x', long, overrides_with = "exceed")]
    exact: bool,

    /// Win by reaching or passing the last square (the default)
    #[arg(short = 'e', long, overrides_with = "exact")]
    exceed: bool,

    /// Random seed (default: random, printed in the report)
    #[arg(short = 'S', long)]
    seed: Option<u64>,

    /// Worker threads; 1 plays from a single random stream, 0 uses every core
    #[arg(short = 't', long, default_value_t = 1)]
    threads: usize,

    /// Also write the report as JSON, to FILE or a timestamped file name
    #[arg(long, value_name = "FILE")]
    json: Option<Option<PathBuf>>,

    /// Log level for progress messages on stderr
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            die_sides: self.sides,
            die_weights: self.weights.clone(),
            overshoot: if self.exact && !self.exceed {
                OvershootPolicy::ExactOnly
            } else {
                OvershootPolicy::ClampToGoal
            },
            iterations: self.iterations,
            max_steps: self.max_steps,
            seed: self.seed,
            threads: self.threads,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("simulate failed: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let topology = load_board(&args.board)
        .with_context(|| format!("failed to load board {}", args.board.display()))?;
    let config = args.sim_config();
    let report = run_simulation(&config, topology).context("simulation failed")?;

    println!("{}", report.to_text());

    if let Some(path) = args.json {
        let path = path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "ladders_report_{}.json",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        });
        fs::write(&path, report.to_json())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
    }

    Ok(())
}
