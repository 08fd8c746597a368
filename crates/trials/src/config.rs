//! Trial settings, loaded from TOML and overridable from the command line.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chess_core::{Color, Engine};
use minimax_engine::{MinimaxConfig, MinimaxEngine};
use monte_carlo_engine::{MonteCarloConfig, MonteCarloEngine};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The players a trial can pit against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Random,
    Minimax,
    MonteCarlo,
}

impl PlayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerKind::Random => "random",
            PlayerKind::Minimax => "minimax",
            PlayerKind::MonteCarlo => "monte-carlo",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PlayerKind::Random),
            "minimax" => Ok(PlayerKind::Minimax),
            "monte-carlo" | "montecarlo" | "mc" => Ok(PlayerKind::MonteCarlo),
            _ => Err(ConfigError::UnknownPlayer(s.to_string())),
        }
    }
}

/// Settings for a batch of trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Number of games to play
    pub trials: u32,
    /// Worker threads (0 = one per core)
    pub threads: usize,
    /// Full-move number at which a game is adjudicated on material
    pub max_moves: u32,
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Base seed; every player in every trial derives its own stream from it.
    /// Without one the players draw from entropy.
    pub seed: Option<u64>,
    pub minimax: MinimaxConfig,
    pub monte_carlo: MonteCarloConfig,
    /// Where the JSON results go
    pub output: PathBuf,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            threads: 0,
            max_moves: 500,
            white: PlayerKind::Random,
            black: PlayerKind::MonteCarlo,
            seed: None,
            minimax: MinimaxConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            output: PathBuf::from("trial_results.json"),
        }
    }
}

impl TrialConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::Invalid("trials must be at least 1".into()));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::Invalid("max_moves must be at least 1".into()));
        }
        if self.monte_carlo.trials_per_move == 0 {
            return Err(ConfigError::Invalid(
                "monte_carlo.trials_per_move must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Seed for one side of one trial, or `None` when unseeded.
    pub fn player_seed(&self, trial: u32, color: Color) -> Option<u64> {
        self.seed.map(|base| {
            let stream = u64::from(trial) * 2 + color.idx() as u64;
            base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        })
    }

    /// A fresh engine for one side of one trial.
    pub fn build_player(&self, kind: PlayerKind, trial: u32, color: Color) -> Box<dyn Engine> {
        let seed = self.player_seed(trial, color);
        match (kind, seed) {
            (PlayerKind::Random, Some(s)) => Box::new(RandomEngine::seeded(s)),
            (PlayerKind::Random, None) => Box::new(RandomEngine::new()),
            (PlayerKind::Minimax, Some(s)) => Box::new(MinimaxEngine::seeded(self.minimax, s)),
            (PlayerKind::Minimax, None) => Box::new(MinimaxEngine::new(self.minimax)),
            (PlayerKind::MonteCarlo, Some(s)) => {
                Box::new(MonteCarloEngine::seeded(self.monte_carlo, s))
            }
            (PlayerKind::MonteCarlo, None) => Box::new(MonteCarloEngine::new(self.monte_carlo)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
