//! Simulation configuration.

use crate::board::OvershootPolicy;
use crate::die::Die;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of faces on the die
    pub die_sides: usize,

    /// Per-face weights, one per side (None = fair die)
    pub die_weights: Option<Vec<f64>>,

    /// What a roll past the last square does
    pub overshoot: OvershootPolicy,

    /// Number of games to play
    pub iterations: usize,

    /// Maximum rolls per game before it is abandoned
    pub max_steps: usize,

    /// Random seed for reproducibility (None = random, reported afterwards)
    pub seed: Option<u64>,

    /// Worker threads. 1 plays every game from a single random stream;
    /// 0 uses one worker per core, each batch of games on its own stream.
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            die_sides: 6,
            die_weights: None,
            overshoot: OvershootPolicy::ClampToGoal,
            iterations: 10_000,
            max_steps: 10_000,
            seed: None,
            threads: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for smoke tests and quick estimates
    pub fn quick(iterations: usize) -> Self {
        Self {
            iterations,
            max_steps: 1_000,
            ..Default::default()
        }
    }

    /// Classic rules where the goal must be hit exactly
    pub fn exact_finish() -> Self {
        Self {
            overshoot: OvershootPolicy::ExactOnly,
            ..Default::default()
        }
    }

    /// Whether games are split across independent random streams
    pub fn is_partitioned(&self) -> bool {
        self.threads != 1
    }

    /// Build the die this configuration describes.
    pub fn build_die(&self) -> Result<Die, ConfigError> {
        Die::new(self.die_sides, self.die_weights.as_deref())
    }

    /// Check every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_die()?;
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }
        Ok(())
    }
}
