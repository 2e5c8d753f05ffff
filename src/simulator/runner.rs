//! Main simulation runner.
//!
//! Builds the die and board graph from a [`SimConfig`], plays the batch and
//! aggregates it. The board graph and die are built once and shared
//! read-only by every game.

use super::config::SimConfig;
use super::game::{play_many, play_many_partitioned, with_workers};
use super::report::SimReport;
use super::stats::Statistics;
use crate::board::{BoardGraph, BoardTopology};
use crate::error::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::info;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, topology: BoardTopology) -> Result<SimReport, SimError> {
    config.validate()?;
    let die = config.build_die()?;
    let board = BoardGraph::build(topology, config.die_sides, config.overshoot)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        size = board.size(),
        jumps = board.jumps().len(),
        sides = config.die_sides,
        weighted = die.is_weighted(),
        policy = board.policy().name(),
        iterations = config.iterations,
        max_steps = config.max_steps,
        threads = config.threads,
        seed,
        "starting simulation"
    );

    let started = Instant::now();
    let batch = if config.is_partitioned() {
        play_many_partitioned(
            board.transitions(),
            &die,
            config.iterations,
            config.max_steps,
            seed,
            config.threads,
        )?
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        play_many(
            board.transitions(),
            &die,
            config.iterations,
            config.max_steps,
            &mut rng,
        )?
    };
    // Aggregation replays every game, so it shares the worker limit.
    let statistics = with_workers(config.threads, || Statistics::compute(&board, &batch))?;
    let elapsed = started.elapsed();

    info!(
        finished = statistics.finished,
        unfinished = statistics.unfinished,
        mean_rolls = statistics.mean_rolls,
        jump_traversals = statistics.total_jump_traversals,
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation complete"
    );

    Ok(SimReport::new(config, &board, seed, statistics, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Jump, OvershootPolicy};
    use crate::error::ConfigError;

    fn classic_board() -> BoardTopology {
        BoardTopology::new(
            10,
            10,
            vec![
                Jump::new(3, 13),
                Jump::new(8, 30),
                Jump::new(27, 83),
                Jump::new(16, 6),
                Jump::new(48, 25),
                Jump::new(97, 77),
            ],
        )
    }

    #[test]
    fn test_full_simulation() {
        let config = SimConfig {
            iterations: 500,
            seed: Some(42),
            ..Default::default()
        };

        let report = run_simulation(&config, classic_board()).unwrap();

        assert_eq!(report.seed, 42);
        assert_eq!(report.size, 100);
        assert_eq!(report.statistics.games, 500);
        assert!(report.statistics.finished > 0);
        assert!(report.statistics.mean_rolls > 1.0);
        assert_eq!(
            report.statistics.jump_counts.iter().sum::<u64>(),
            report.statistics.total_jump_traversals
        );
    }

    #[test]
    fn test_same_seed_same_statistics() {
        let config = SimConfig {
            iterations: 200,
            seed: Some(12345),
            ..SimConfig::exact_finish()
        };
        let a = run_simulation(&config, classic_board()).unwrap();
        let b = run_simulation(&config, classic_board()).unwrap();
        assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn test_partitioned_simulation() {
        let config = SimConfig {
            iterations: 300,
            seed: Some(7),
            threads: 2,
            ..Default::default()
        };
        let report = run_simulation(&config, classic_board()).unwrap();
        assert_eq!(report.statistics.games, 300);

        let again = run_simulation(&SimConfig { threads: 0, ..config }, classic_board()).unwrap();
        assert_eq!(report.statistics, again.statistics);
    }

    #[test]
    fn test_single_thread_run_matches_manual_pipeline() {
        let config = SimConfig {
            iterations: 150,
            seed: Some(11),
            ..Default::default()
        };
        let report = run_simulation(&config, classic_board()).unwrap();

        let board = BoardGraph::build(classic_board(), 6, config.overshoot).unwrap();
        let die = config.build_die().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let batch =
            play_many(board.transitions(), &die, 150, config.max_steps, &mut rng).unwrap();
        let (workers, expected) = with_workers(1, || {
            (rayon::current_num_threads(), Statistics::compute(&board, &batch))
        })
        .unwrap();
        assert_eq!(workers, 1);
        assert_eq!(report.statistics, expected);
    }

    #[test]
    fn test_overflowing_weights_fail_before_play() {
        let config = SimConfig {
            die_weights: Some(vec![f64::MAX; 6]),
            ..Default::default()
        };
        let err = run_simulation(&config, classic_board()).unwrap_err();
        assert!(matches!(
            err,
            SimError::Config(ConfigError::WeightOverflow { .. })
        ));
    }

    #[test]
    fn test_random_seed_is_reported() {
        let config = SimConfig::quick(10);
        let report = run_simulation(&config, classic_board()).unwrap();
        let replay = SimConfig {
            seed: Some(report.seed),
            ..config
        };
        let again = run_simulation(&replay, classic_board()).unwrap();
        assert_eq!(report.statistics, again.statistics);
    }

    #[test]
    fn test_invalid_config_fails_before_play() {
        let config = SimConfig {
            die_weights: Some(vec![0.0; 6]),
            ..Default::default()
        };
        let err = run_simulation(&config, classic_board()).unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::ZeroTotalWeight)));
    }

    #[test]
    fn test_empty_board_rejected() {
        let err = run_simulation(&SimConfig::quick(1), BoardTopology::new(0, 10, vec![]))
            .unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::EmptyBoard)));
    }

    #[test]
    fn test_overshoot_policy_threaded_through() {
        let config = SimConfig {
            iterations: 100,
            seed: Some(3),
            overshoot: OvershootPolicy::ExactOnly,
            ..Default::default()
        };
        let report = run_simulation(&config, classic_board()).unwrap();
        assert_eq!(report.config.overshoot, OvershootPolicy::ExactOnly);
        assert_eq!(report.statistics.games, 100);
    }
}
