//! Simulation report generation.

use super::config::SimConfig;
use super::stats::Statistics;
use crate::board::{BoardGraph, Jump};
use serde::Serialize;
use std::time::Duration;

/// Everything a run produced, ready for display or export.
///
/// Squares are 0-based in the JSON form and numbered from 1 in the text
/// report, matching board files.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub config: SimConfig,
    /// Seed actually used, drawn at random when the config had none
    pub seed: u64,
    pub rows: usize,
    pub columns: usize,
    pub size: usize,
    pub jumps: Vec<Jump>,
    pub statistics: Statistics,
    pub elapsed_secs: f64,
}

impl SimReport {
    pub fn new(
        config: &SimConfig,
        board: &BoardGraph,
        seed: u64,
        statistics: Statistics,
        elapsed: Duration,
    ) -> Self {
        let topology = board.topology();
        Self {
            config: config.clone(),
            seed,
            rows: topology.rows,
            columns: topology.columns,
            size: board.size(),
            jumps: topology.jumps.clone(),
            statistics,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let stats = &self.statistics;
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  SNAKES & LADDERS SIMULATION\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Board: {}x{} ({} squares), {} jumps\n",
            self.rows,
            self.columns,
            self.size,
            self.jumps.len()
        ));
        report.push_str(&format!(
            "Die:   {} sides ({}), overshoot: {}\n",
            self.config.die_sides,
            if self.config.die_weights.is_some() {
                "weighted"
            } else {
                "fair"
            },
            self.config.overshoot.name()
        ));
        report.push_str(&format!(
            "Games: {} total, {} finished, {} unfinished (max {} rolls each)\n",
            stats.games, stats.finished, stats.unfinished, self.config.max_steps
        ));
        report.push_str(&format!(
            "Seed:  {}{}\n\n",
            self.seed,
            if self.config.is_partitioned() {
                " (partitioned streams)"
            } else {
                ""
            }
        ));

        report.push_str("── ROLLS TO WIN ─────────────────────────────────────────────────\n");
        report.push_str(&format!("  Average rolls to win: {:.2}\n", stats.mean_rolls));
        if let (Some(median), Some(slowest)) = (stats.median_rolls, stats.slowest_rolls) {
            report.push_str(&format!("  Std deviation:        {:.2}\n", stats.std_dev_rolls));
            report.push_str(&format!("  Median:               {}\n", median));
            report.push_str(&format!("  Slowest win:          {}\n", slowest));
        }
        report.push_str(&format!(
            "  Completion rate:      {:.1}%\n\n",
            stats.completion_rate() * 100.0
        ));

        report.push_str("── FASTEST GAME ─────────────────────────────────────────────────\n");
        match &stats.fastest {
            Some(fastest) => {
                let faces: Vec<String> = fastest.sequence.iter().map(|f| f.to_string()).collect();
                report.push_str(&format!(
                    "  Shortest game ({} rolls): {}\n\n",
                    fastest.rolls,
                    faces.join(" ")
                ));
            }
            None => report.push_str("  No game reached the goal.\n\n"),
        }

        report.push_str("── JUMP TRAVERSALS ──────────────────────────────────────────────\n");
        if self.jumps.is_empty() {
            report.push_str("  Board has no jumps.\n");
        }
        for (index, jump) in self.jumps.iter().enumerate() {
            let count = stats.jump_counts.get(index).copied().unwrap_or(0);
            report.push_str(&format!(
                "  {:>4}→{:<4} {:<6} : {:>8} times  ({:5.2}%){}\n",
                jump.start + 1,
                jump.end + 1,
                jump.kind().name(),
                count,
                stats.jump_share(index),
                if jump.fits(self.size) {
                    ""
                } else {
                    "  off board, ignored"
                }
            ));
        }
        report.push_str(&format!(
            "  Total traversals: {}\n",
            stats.total_jump_traversals
        ));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!("Completed in {:.2}s\n", self.elapsed_secs));

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
