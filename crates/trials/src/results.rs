//! Trial results storage and reporting

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::TrialConfig;
use crate::error::ResultsError;
use crate::game_runner::{TrialRecord, Winner};

/// Win/draw counts over a set of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws
    }
}

/// Complete results of a trial batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Configuration used
    pub config: TrialConfig,
    /// One record per trial, in trial order
    pub records: Vec<TrialRecord>,
}

impl TrialSummary {
    pub fn new(config: TrialConfig, records: Vec<TrialRecord>) -> Self {
        Self { config, records }
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for record in &self.records {
            match record.winner {
                Winner::White => tally.white_wins += 1,
                Winner::Black => tally.black_wins += 1,
                Winner::Draw => tally.draws += 1,
            }
        }
        tally
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ResultsError::Io {
            action: "failed to write",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
            action: "failed to read",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let tally = self.tally();
        let games = self.records.len().max(1) as f64;
        let avg = |f: fn(&TrialRecord) -> f64| self.records.iter().map(f).sum::<f64>() / games;

        let mut report = String::new();
        report.push_str(&format!(
            "=== Trials: {} (white) vs {} (black) ===\n\n",
            self.config.white, self.config.black
        ));
        report.push_str(&format!(
            "Config: {} trials, move limit {}\n\n",
            self.records.len(),
            self.config.max_moves
        ));

        report.push_str(&format!(
            "{:<8} {:<8} {:<22} {:>6} {:>12} {:>12}\n",
            "Trial", "Winner", "Termination", "Plies", "White ms", "Black ms"
        ));
        report.push_str(&"-".repeat(73));
        report.push('\n');

        for r in &self.records {
            report.push_str(&format!(
                "{:<8} {:<8} {:<22} {:>6} {:>12.2} {:>12.2}\n",
                r.trial,
                format!("{:?}", r.winner),
                format!("{:?}", r.termination),
                r.plies,
                r.white_avg_ms,
                r.black_avg_ms
            ));
        }

        report.push('\n');
        report.push_str(&format!(
            "White {} / Black {} / Draw {} over {} games\n",
            tally.white_wins,
            tally.black_wins,
            tally.draws,
            tally.total()
        ));
        report.push_str(&format!(
            "Average plies {:.1}, decision time {:.2} ms (white) {:.2} ms (black)\n",
            avg(|r| f64::from(r.plies)),
            avg(|r| r.white_avg_ms),
            avg(|r| r.black_avg_ms)
        ));

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
