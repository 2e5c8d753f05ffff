//! Monte Carlo simulation of snakes-and-ladders games.
//!
//! Play thousands of independent games on one board to estimate:
//! - Average rolls needed to reach the last square
//! - The fastest possible win and the rolls that produced it
//! - How often each snake and ladder is actually used
//!
//! Every game reads the same prebuilt transition table; only the random
//! stream differs between games.

mod config;
mod game;
mod report;
mod runner;
mod stats;

pub use config::SimConfig;
pub use game::{
    partition_rng, play_from, play_many, play_many_partitioned, play_one, with_workers,
    GameResult, SimulationBatch, PARTITION_GAMES,
};
pub use report::SimReport;
pub use runner::run_simulation;
pub use stats::{count_jump_traversals, FastestGame, Statistics};
