//! Board topology, jump resolution and the per-square transition table.

pub mod loader;
pub mod logic;
pub mod types;

pub use loader::{load_board, parse_board};
pub use logic::*;
pub use types::*;
