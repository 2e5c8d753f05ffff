//! Board topology and jump definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A snake or ladder: landing on `start` moves the player to `end`.
///
/// Squares are 0-based inside the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub start: usize,
    pub end: usize,
}

/// Direction of a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    Ladder,
    Snake,
    /// `start == end`: landing counts as a traversal but the player stays put.
    Loop,
}

impl Jump {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn kind(&self) -> JumpKind {
        match self.end.cmp(&self.start) {
            std::cmp::Ordering::Greater => JumpKind::Ladder,
            std::cmp::Ordering::Less => JumpKind::Snake,
            std::cmp::Ordering::Equal => JumpKind::Loop,
        }
    }

    /// True when both ends lie on a board of `size` squares.
    pub fn fits(&self, size: usize) -> bool {
        self.start < size && self.end < size
    }
}

impl JumpKind {
    pub fn name(&self) -> &'static str {
        match self {
            JumpKind::Ladder => "ladder",
            JumpKind::Snake => "snake",
            JumpKind::Loop => "loop",
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.start, self.end)
    }
}

/// What happens to a roll that would carry the player past the last square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OvershootPolicy {
    /// The player stops on the goal and wins.
    #[default]
    ClampToGoal,
    /// The player does not move; the goal must be hit exactly.
    ExactOnly,
}

impl OvershootPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            OvershootPolicy::ClampToGoal => "clamp to goal",
            OvershootPolicy::ExactOnly => "exact roll only",
        }
    }
}

/// Board dimensions and jumps as loaded, before any graph is derived.
///
/// The grid shape only determines the square count; square 0 is the start and
/// square `size() - 1` the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTopology {
    pub rows: usize,
    pub columns: usize,
    pub jumps: Vec<Jump>,
}

impl BoardTopology {
    pub fn new(rows: usize, columns: usize, jumps: Vec<Jump>) -> Self {
        Self {
            rows,
            columns,
            jumps,
        }
    }

    /// A single-row board of `size` squares.
    pub fn linear(size: usize, jumps: Vec<Jump>) -> Self {
        Self::new(1, size, jumps)
    }

    /// Total square count, or `None` if `rows * columns` overflows.
    pub fn checked_size(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }
}
