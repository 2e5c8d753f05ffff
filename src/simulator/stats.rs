//! Statistics over a finished batch of games.

use super::game::SimulationBatch;
use crate::board::BoardGraph;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// The quickest finished game of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastestGame {
    pub rolls: usize,
    pub sequence: Vec<usize>,
}

/// Aggregated results of a batch. Only finished games contribute to the
/// roll statistics and jump counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub games: usize,
    pub finished: usize,
    pub unfinished: usize,

    /// Mean rolls to win, 0.0 when no game finished
    pub mean_rolls: f64,
    pub std_dev_rolls: f64,
    pub median_rolls: Option<usize>,
    pub slowest_rolls: Option<usize>,
    /// First game in batch order with the fewest rolls
    pub fastest: Option<FastestGame>,

    /// Traversals per jump, aligned with the board's jump order
    pub jump_counts: Vec<u64>,
    pub total_jump_traversals: u64,
}

impl Statistics {
    /// Aggregate `batch`, replaying finished games on `board` to attribute
    /// jump traversals.
    pub fn compute(board: &BoardGraph, batch: &SimulationBatch) -> Self {
        let mut lengths: Vec<usize> = batch
            .results
            .iter()
            .filter_map(|r| r.rolls_to_win())
            .collect();
        let finished = lengths.len();

        let mean_rolls = if finished > 0 {
            lengths.iter().sum::<usize>() as f64 / finished as f64
        } else {
            0.0
        };
        let std_dev_rolls = if finished > 0 {
            let variance = lengths
                .iter()
                .map(|&n| (n as f64 - mean_rolls).powi(2))
                .sum::<f64>()
                / finished as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let mut fastest: Option<FastestGame> = None;
        for sequence in batch.results.iter().filter_map(|r| r.sequence()) {
            if fastest.as_ref().map_or(true, |f| sequence.len() < f.rolls) {
                fastest = Some(FastestGame {
                    rolls: sequence.len(),
                    sequence: sequence.to_vec(),
                });
            }
        }

        lengths.sort_unstable();
        let median_rolls = lengths.get(lengths.len() / 2).copied();
        let slowest_rolls = lengths.last().copied();

        let jump_counts = count_jump_traversals(board, batch);
        let total_jump_traversals = jump_counts.iter().sum();

        Self {
            games: batch.results.len(),
            finished,
            unfinished: batch.results.len() - finished,
            mean_rolls,
            std_dev_rolls,
            median_rolls,
            slowest_rolls,
            fastest,
            jump_counts,
            total_jump_traversals,
        }
    }

    /// Share of all traversals taken by jump `index`, in percent.
    pub fn jump_share(&self, index: usize) -> f64 {
        if self.total_jump_traversals == 0 {
            return 0.0;
        }
        let count = self.jump_counts.get(index).copied().unwrap_or(0);
        100.0 * count as f64 / self.total_jump_traversals as f64
    }

    /// Fraction of games that reached the goal.
    pub fn completion_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.finished as f64 / self.games as f64
    }
}

/// Replay every finished game and count how often each jump definition was
/// followed. A move follows a jump when its landing square and destination
/// equal the jump's start and end.
pub fn count_jump_traversals(board: &BoardGraph, batch: &SimulationBatch) -> Vec<u64> {
    let jumps = board.jumps();
    let mut by_start: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, jump) in jumps.iter().enumerate() {
        by_start.entry(jump.start).or_default().push(index);
    }

    let empty = || vec![0u64; jumps.len()];
    batch
        .results
        .par_iter()
        .filter_map(|r| r.sequence())
        .fold(empty, |mut counts, sequence| {
            let mut square = 0;
            for &face in sequence {
                let step = board.resolve(square, face);
                if let Some(candidates) = by_start.get(&step.landing) {
                    for &index in candidates {
                        if jumps[index].end == step.destination {
                            counts[index] += 1;
                        }
                    }
                }
                square = step.destination;
            }
            counts
        })
        .reduce(empty, |mut total, counts| {
            for (t, c) in total.iter_mut().zip(counts) {
                *t += c;
            }
            total
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardTopology, Jump, OvershootPolicy};
    use crate::simulator::game::GameResult;

    fn batch(results: Vec<GameResult>) -> SimulationBatch {
        SimulationBatch {
            iterations: results.len(),
            step_budget: 100,
            results,
        }
    }

    fn finished(rolls: &[usize]) -> GameResult {
        GameResult::Finished {
            rolls: rolls.to_vec(),
        }
    }

    fn board(size: usize, jumps: Vec<Jump>, policy: OvershootPolicy) -> BoardGraph {
        BoardGraph::build(BoardTopology::linear(size, jumps), 6, policy).unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let board = board(10, vec![Jump::new(5, 9)], OvershootPolicy::ClampToGoal);
        let stats = Statistics::compute(&board, &batch(vec![]));
        assert_eq!(stats.mean_rolls, 0.0);
        assert_eq!(stats.fastest, None);
        assert_eq!(stats.median_rolls, None);
        assert_eq!(stats.jump_counts, vec![0]);
        assert_eq!(stats.total_jump_traversals, 0);
        assert_eq!(stats.completion_rate(), 0.0);
    }

    #[test]
    fn test_unfinished_games_excluded() {
        let board = board(10, vec![], OvershootPolicy::ClampToGoal);
        let stats = Statistics::compute(
            &board,
            &batch(vec![
                GameResult::Unfinished,
                finished(&[6, 3]),
                GameResult::Unfinished,
                finished(&[2, 2, 2, 3]),
            ]),
        );
        assert_eq!(stats.games, 4);
        assert_eq!(stats.finished, 2);
        assert_eq!(stats.unfinished, 2);
        assert!((stats.mean_rolls - 3.0).abs() < 1e-12);
        assert!((stats.std_dev_rolls - 1.0).abs() < 1e-12);
        assert_eq!(stats.slowest_rolls, Some(4));
        assert!((stats.completion_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_unfinished() {
        let board = board(10, vec![], OvershootPolicy::ClampToGoal);
        let stats = Statistics::compute(&board, &batch(vec![GameResult::Unfinished; 3]));
        assert_eq!(stats.mean_rolls, 0.0);
        assert_eq!(stats.fastest, None);
        assert_eq!(stats.unfinished, 3);
    }

    #[test]
    fn test_fastest_keeps_first_tie() {
        let board = board(10, vec![], OvershootPolicy::ClampToGoal);
        let stats = Statistics::compute(
            &board,
            &batch(vec![finished(&[3, 3, 3]), finished(&[5, 4]), finished(&[4, 5])]),
        );
        assert_eq!(
            stats.fastest,
            Some(FastestGame {
                rolls: 2,
                sequence: vec![5, 4]
            })
        );
    }

    #[test]
    fn test_jump_attribution() {
        // Ladder 2→7 and snake 8→1 on ten squares.
        let board = board(
            10,
            vec![Jump::new(2, 7), Jump::new(8, 1)],
            OvershootPolicy::ClampToGoal,
        );
        // 0 -2-> 2⇒7 -1-> 8⇒1 -1-> 2⇒7 -2-> 9
        let stats = Statistics::compute(&board, &batch(vec![finished(&[2, 1, 1, 2])]));
        assert_eq!(stats.jump_counts, vec![2, 1]);
        assert_eq!(stats.total_jump_traversals, 3);
        assert!((stats.jump_share(0) - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_attribution_uses_board_policy() {
        // Snake 3→1 on six squares, exact finish:
        // 0 -3-> 3⇒1 -6-> (overshoot, stay on 1) -2-> 3⇒1 -4-> 5
        // Replaying with a clamp would end the game on the second roll.
        let board = board(6, vec![Jump::new(3, 1)], OvershootPolicy::ExactOnly);
        let game = finished(&[3, 6, 2, 4]);
        let counts = count_jump_traversals(&board, &batch(vec![game]));
        assert_eq!(counts, vec![2]);
    }

    #[test]
    fn test_duplicate_start_only_last_attributed() {
        let board = board(
            10,
            vec![Jump::new(2, 7), Jump::new(2, 5)],
            OvershootPolicy::ClampToGoal,
        );
        let stats = Statistics::compute(&board, &batch(vec![finished(&[2, 4])]));
        assert_eq!(stats.jump_counts, vec![0, 1]);
        assert_eq!(stats.total_jump_traversals, 1);
    }

    #[test]
    fn test_identical_duplicates_both_counted() {
        let board = board(
            10,
            vec![Jump::new(2, 7), Jump::new(2, 7)],
            OvershootPolicy::ClampToGoal,
        );
        let stats = Statistics::compute(&board, &batch(vec![finished(&[2, 2])]));
        assert_eq!(stats.jump_counts, vec![1, 1]);
        assert_eq!(stats.total_jump_traversals, 2);
    }

    #[test]
    fn test_out_of_range_jump_never_counted() {
        let board = board(
            10,
            vec![Jump::new(4, 30), Jump::new(3, 8)],
            OvershootPolicy::ClampToGoal,
        );
        let stats = Statistics::compute(&board, &batch(vec![finished(&[4, 5]), finished(&[3, 1])]));
        assert_eq!(stats.jump_counts, vec![0, 1]);
    }
}
