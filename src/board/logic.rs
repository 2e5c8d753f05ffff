//! Jump mapping and transition table construction.
//!
//! A roll from square `i` with face `f` is resolved in three steps: move to
//! `i + f`, apply the overshoot policy if that passes the last square, then
//! follow at most one jump from the landing square. [`resolve_move`] is the
//! only place these steps are combined. The transition table is filled from
//! it once during setup, and replaying a recorded game calls it again with the
//! same policy, so the two can never disagree.

use super::types::{BoardTopology, Jump, OvershootPolicy};
use crate::error::{try_reserve, ConfigError, SimError};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Where a single roll takes the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Square reached after overshoot handling, before any jump.
    pub landing: usize,
    /// Square the player ends on after following the jump at `landing`, if any.
    pub destination: usize,
}

/// Build the per-square jump mapping: `mapping[i]` is `i` unless a jump starts
/// at `i`.
///
/// Jumps with an end outside the board are dropped with a warning. When two
/// jumps share a start square the later one wins.
pub fn build_mapping(jumps: &[Jump], size: usize) -> Result<Vec<usize>, SimError> {
    if size == 0 {
        return Err(ConfigError::EmptyBoard.into());
    }

    let mut mapping = Vec::new();
    try_reserve(&mut mapping, size, "jump mapping")?;
    mapping.extend(0..size);

    let mut defined = HashSet::new();
    for (index, jump) in jumps.iter().enumerate() {
        if !jump.fits(size) {
            warn!(
                index,
                start = jump.start,
                end = jump.end,
                size,
                "dropping jump outside the board"
            );
            continue;
        }
        if !defined.insert(jump.start) {
            warn!(
                index,
                start = jump.start,
                end = jump.end,
                "jump redefines its start square, keeping the later definition"
            );
        }
        mapping[jump.start] = jump.end;
    }

    Ok(mapping)
}

/// Resolve one roll of `face` from `square` on a board described by `mapping`.
pub fn resolve_move(
    mapping: &[usize],
    square: usize,
    face: usize,
    policy: OvershootPolicy,
) -> Move {
    let size = mapping.len();
    let raw = square.saturating_add(face);
    let landing = if raw >= size {
        match policy {
            OvershootPolicy::ClampToGoal => size - 1,
            OvershootPolicy::ExactOnly => square,
        }
    } else {
        raw
    };
    Move {
        landing,
        destination: mapping[landing],
    }
}

/// Destination square for every `(square, face)` pair.
///
/// Stored row-major: the `sides` destinations of square `i` are contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGraph {
    size: usize,
    sides: usize,
    table: Vec<usize>,
}

impl TransitionGraph {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    /// The absorbing last square.
    pub fn goal(&self) -> usize {
        self.size - 1
    }

    /// Square reached from `square` by rolling `face` (1-based).
    #[inline]
    pub fn next(&self, square: usize, face: usize) -> usize {
        self.table[square * self.sides + face - 1]
    }

    /// Destinations from `square`, indexed by `face - 1`.
    pub fn row(&self, square: usize) -> &[usize] {
        let start = square * self.sides;
        &self.table[start..start + self.sides]
    }
}

/// Build the transition table for a die with `sides` faces.
pub fn build_transitions(
    mapping: &[usize],
    size: usize,
    sides: usize,
    policy: OvershootPolicy,
) -> Result<TransitionGraph, SimError> {
    if size == 0 {
        return Err(ConfigError::EmptyBoard.into());
    }
    if sides == 0 {
        return Err(ConfigError::NoSides.into());
    }
    debug_assert_eq!(mapping.len(), size, "mapping must cover every square");

    let entries = size
        .checked_mul(sides)
        .ok_or(ConfigError::BoardTooLarge { size, sides })?;
    let mut table = Vec::new();
    try_reserve(&mut table, entries, "transition table")?;

    for square in 0..size {
        for face in 1..=sides {
            table.push(resolve_move(mapping, square, face, policy).destination);
        }
    }

    debug!(size, sides, entries, policy = policy.name(), "built transition table");
    Ok(TransitionGraph { size, sides, table })
}

/// A board ready for play: topology, jump mapping and transition table for one
/// die size and overshoot policy. Immutable once built and safe to share
/// between simulation workers.
#[derive(Debug, Clone)]
pub struct BoardGraph {
    topology: BoardTopology,
    policy: OvershootPolicy,
    mapping: Vec<usize>,
    transitions: TransitionGraph,
}

impl BoardGraph {
    pub fn build(
        topology: BoardTopology,
        sides: usize,
        policy: OvershootPolicy,
    ) -> Result<Self, SimError> {
        let size = topology
            .checked_size()
            .ok_or(ConfigError::BoardTooLarge {
                size: usize::MAX,
                sides,
            })?;
        let mapping = build_mapping(&topology.jumps, size)?;
        let transitions = build_transitions(&mapping, size, sides, policy)?;
        Ok(Self {
            topology,
            policy,
            mapping,
            transitions,
        })
    }

    pub fn size(&self) -> usize {
        self.transitions.size()
    }

    pub fn goal(&self) -> usize {
        self.transitions.goal()
    }

    pub fn sides(&self) -> usize {
        self.transitions.sides()
    }

    pub fn policy(&self) -> OvershootPolicy {
        self.policy
    }

    pub fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    /// Jumps in definition order, including any dropped as out of range.
    pub fn jumps(&self) -> &[Jump] {
        &self.topology.jumps
    }

    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    pub fn transitions(&self) -> &TransitionGraph {
        &self.transitions
    }

    /// Resolve a roll with this board's own overshoot policy.
    pub fn resolve(&self, square: usize, face: usize) -> Move {
        resolve_move(&self.mapping, square, face, self.policy)
    }
}
