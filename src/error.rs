//! Error types for board construction, simulation runs and board files.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid simulation parameters. Raised before any game is played.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("board must have at least one square")]
    EmptyBoard,
    #[error("die must have at least one side")]
    NoSides,
    #[error("expected {expected} die weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },
    #[error("weight for face {face} must be a finite non-negative number, got {weight}")]
    InvalidWeight { face: usize, weight: f64 },
    #[error("die weights must not all be zero")]
    ZeroTotalWeight,
    #[error("die weights sum to {total}, which is not a finite number")]
    WeightOverflow { total: f64 },
    #[error("step budget must be at least 1")]
    ZeroStepBudget,
    #[error("board of {size} squares with a {sides}-sided die is too large")]
    BoardTooLarge { size: usize, sides: usize },
}

/// Failure of a simulation run. No partial results accompany these.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not allocate {what} ({count} entries)")]
    Allocation {
        what: &'static str,
        count: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("could not start simulation workers")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors raised while reading a board description.
#[derive(Debug, Error)]
pub enum BoardFileError {
    #[error("could not read board file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("board file has no dimension line")]
    MissingHeader,
    #[error("line {line}: expected `<rows> <columns>`, got `{text}`")]
    InvalidHeader { line: usize, text: String },
    #[error("line {line}: expected `<S|L> <start> <end>`, got `{text}`")]
    InvalidJump { line: usize, text: String },
    #[error("line {line}: unknown jump kind `{kind}` (expected S or L)")]
    UnknownJumpKind { line: usize, kind: String },
    #[error("line {line}: squares are numbered from 1")]
    ZeroIndex { line: usize },
    #[error("line {line}: board of {rows}x{columns} squares is too large")]
    BoardTooLarge {
        line: usize,
        rows: usize,
        columns: usize,
    },
}

/// Reserve room for `count` more elements, reporting failure instead of aborting.
pub(crate) fn try_reserve<T>(
    vec: &mut Vec<T>,
    count: usize,
    what: &'static str,
) -> Result<(), SimError> {
    vec.try_reserve_exact(count)
        .map_err(|source| SimError::Allocation {
            what,
            count,
            source,
        })
}
