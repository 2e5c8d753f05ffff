//! Ladders - Monte Carlo Snakes and Ladders Simulator Library
//!
//! Builds a transition table for a board of squares joined by snakes and
//! ladders, plays many games on it with a fair or weighted die, and reports
//! rolls-to-win statistics and how often each jump is used.

pub mod board;
pub mod die;
pub mod error;
pub mod simulator;

pub use board::{BoardGraph, BoardTopology, Jump, JumpKind, OvershootPolicy};
pub use die::Die;
pub use error::{BoardFileError, ConfigError, SimError};
pub use simulator::{run_simulation, SimConfig, SimReport};
