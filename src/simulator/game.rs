//! Playing single games and batches of games.

use crate::board::TransitionGraph;
use crate::die::Die;
use crate::error::{try_reserve, SimError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Games per random stream when a batch is split across workers.
pub const PARTITION_GAMES: usize = 4096;

/// Outcome of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameResult {
    /// Reached the goal; `rolls` holds every face rolled, in order.
    Finished { rolls: Vec<usize> },
    /// Ran out of steps before reaching the goal.
    Unfinished,
}

impl GameResult {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameResult::Finished { .. })
    }

    pub fn rolls_to_win(&self) -> Option<usize> {
        self.sequence().map(<[usize]>::len)
    }

    pub fn sequence(&self) -> Option<&[usize]> {
        match self {
            GameResult::Finished { rolls } => Some(rolls),
            GameResult::Unfinished => None,
        }
    }
}

/// Every game of one run, in the order they were played.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBatch {
    pub iterations: usize,
    pub step_budget: usize,
    pub results: Vec<GameResult>,
}

impl SimulationBatch {
    pub fn finished_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_finished()).count()
    }

    pub fn unfinished_count(&self) -> usize {
        self.results.len() - self.finished_count()
    }
}

/// Play one game from square 0.
pub fn play_one(
    graph: &TransitionGraph,
    die: &Die,
    step_budget: usize,
    rng: &mut impl Rng,
) -> GameResult {
    play_from(graph, die, 0, step_budget, rng)
}

/// Play one game starting on `start`.
///
/// The game ends as soon as a roll lands on the goal, so even a game that
/// starts there takes one roll. After `step_budget` rolls without reaching
/// the goal the game is abandoned and its rolls are discarded.
pub fn play_from(
    graph: &TransitionGraph,
    die: &Die,
    start: usize,
    step_budget: usize,
    rng: &mut impl Rng,
) -> GameResult {
    debug_assert!(die.sides() <= graph.sides(), "die has more faces than the graph");
    let goal = graph.goal();
    let mut square = start;
    let mut rolls = Vec::new();

    for _ in 0..step_budget {
        let face = die.roll(rng);
        rolls.push(face);
        square = graph.next(square, face);
        if square == goal {
            return GameResult::Finished { rolls };
        }
    }

    GameResult::Unfinished
}

/// Play `iterations` independent games one after another, all drawing from
/// `rng`.
pub fn play_many(
    graph: &TransitionGraph,
    die: &Die,
    iterations: usize,
    step_budget: usize,
    rng: &mut impl Rng,
) -> Result<SimulationBatch, SimError> {
    let mut results = Vec::new();
    try_reserve(&mut results, iterations, "game results")?;

    for _ in 0..iterations {
        results.push(play_one(graph, die, step_budget, rng));
    }

    Ok(SimulationBatch {
        iterations,
        step_budget,
        results,
    })
}

/// Play `iterations` games across worker threads.
///
/// Games are grouped into runs of [`PARTITION_GAMES`]; group `k` draws from
/// its own ChaCha stream `k` under `seed`. Results come back in group order,
/// so a seed reproduces the same batch whatever the thread count. `threads`
/// of 0 uses rayon's global pool.
pub fn play_many_partitioned(
    graph: &TransitionGraph,
    die: &Die,
    iterations: usize,
    step_budget: usize,
    seed: u64,
    threads: usize,
) -> Result<SimulationBatch, SimError> {
    let mut results = Vec::new();
    try_reserve(&mut results, iterations, "game results")?;

    let partitions = iterations.div_ceil(PARTITION_GAMES);
    let play_partitions = || -> Vec<Vec<GameResult>> {
        (0..partitions)
            .into_par_iter()
            .map(|partition| {
                let first = partition * PARTITION_GAMES;
                let games = PARTITION_GAMES.min(iterations - first);
                let mut rng = partition_rng(seed, partition);
                let played: Vec<GameResult> = (0..games)
                    .map(|_| play_one(graph, die, step_budget, &mut rng))
                    .collect();
                debug!(partition, games, "partition finished");
                played
            })
            .collect()
    };

    let partitions = with_workers(threads, play_partitions)?;

    for partition in partitions {
        results.extend(partition);
    }

    Ok(SimulationBatch {
        iterations,
        step_budget,
        results,
    })
}

/// Run `op` on a pool of `threads` workers, or on rayon's global pool when
/// `threads` is 0. Parallel iterators inside `op` stay on that pool.
pub fn with_workers<T, F>(threads: usize, op: F) -> Result<T, SimError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if threads == 0 {
        return Ok(op());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    Ok(pool.install(op))
}

/// Independent generator for one partition of a batch.
pub fn partition_rng(seed: u64, partition: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(partition as u64);
    rng
}
