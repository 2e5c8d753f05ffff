//! Fair and weighted dice.

use crate::error::ConfigError;
use rand::Rng;
use serde::Serialize;

/// A die with `sides` faces numbered from 1.
///
/// A weighted die keeps the running sum of its face weights so a roll is one
/// uniform draw followed by a scan for the first face whose cumulative weight
/// reaches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Die {
    sides: usize,
    cumulative: Option<Vec<f64>>,
}

impl Die {
    /// Create a die, fair when `weights` is `None`.
    pub fn new(sides: usize, weights: Option<&[f64]>) -> Result<Self, ConfigError> {
        if sides == 0 {
            return Err(ConfigError::NoSides);
        }
        let cumulative = match weights {
            None => None,
            Some(weights) => Some(cumulative_weights(sides, weights)?),
        };
        Ok(Self { sides, cumulative })
    }

    /// A fair die.
    pub fn uniform(sides: usize) -> Result<Self, ConfigError> {
        Self::new(sides, None)
    }

    /// A die with one weight per face; the side count is the weight count.
    pub fn weighted(weights: &[f64]) -> Result<Self, ConfigError> {
        Self::new(weights.len(), Some(weights))
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    pub fn is_weighted(&self) -> bool {
        self.cumulative.is_some()
    }

    /// Probability of rolling `face`, or 0.0 outside `1..=sides`.
    pub fn probability(&self, face: usize) -> f64 {
        if face == 0 || face > self.sides {
            return 0.0;
        }
        match &self.cumulative {
            None => 1.0 / self.sides as f64,
            Some(cumulative) => {
                let below = if face > 1 { cumulative[face - 2] } else { 0.0 };
                (cumulative[face - 1] - below) / cumulative[self.sides - 1]
            }
        }
    }

    /// Roll the die, returning a face in `1..=sides`.
    pub fn roll(&self, rng: &mut impl Rng) -> usize {
        let Some(cumulative) = &self.cumulative else {
            return rng.gen_range(1..=self.sides);
        };

        let total = cumulative[self.sides - 1];
        let draw = rng.gen::<f64>() * total;
        cumulative
            .iter()
            .position(|&c| c >= draw)
            .map(|i| i + 1)
            .unwrap_or(self.sides)
    }
}

fn cumulative_weights(sides: usize, weights: &[f64]) -> Result<Vec<f64>, ConfigError> {
    if weights.len() != sides {
        return Err(ConfigError::WeightCountMismatch {
            expected: sides,
            actual: weights.len(),
        });
    }

    let mut running = 0.0;
    let mut cumulative = Vec::with_capacity(sides);
    for (i, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                face: i + 1,
                weight,
            });
        }
        running += weight;
        cumulative.push(running);
    }

    if !running.is_finite() {
        return Err(ConfigError::WeightOverflow { total: running });
    }
    if running <= 0.0 {
        return Err(ConfigError::ZeroTotalWeight);
    }
    Ok(cumulative)
}
