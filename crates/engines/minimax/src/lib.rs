//! Randomized Minimax Engine
//!
//! Plain minimax over a small random sample of moves at every node, scored
//! by a signed material and activity evaluation.

mod eval;
mod search;

pub use eval::{evaluate_minimax, MinimaxEval};
pub use search::{MinimaxConfig, RandomizedMinimax};

use chess_core::{Color, Engine, Position, RandomSampler, SearchResult};

/// Minimax behind the [`Engine`] trait. White maximizes, black minimizes.
pub struct MinimaxEngine {
    searcher: RandomizedMinimax<RandomSampler, MinimaxEval>,
}

impl MinimaxEngine {
    pub fn new(config: MinimaxConfig) -> Self {
        Self::with_sampler(config, RandomSampler::from_entropy())
    }

    /// Reproducible move choice for a given seed.
    pub fn seeded(config: MinimaxConfig, seed: u64) -> Self {
        Self::with_sampler(config, RandomSampler::seeded(seed))
    }

    fn with_sampler(config: MinimaxConfig, sampler: RandomSampler) -> Self {
        Self {
            searcher: RandomizedMinimax::new(config, sampler, MinimaxEval),
        }
    }

    pub fn config(&self) -> &MinimaxConfig {
        self.searcher.config()
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let maximizing = pos.side_to_move == Color::White;
        let depth = self.searcher.config().depth;
        self.searcher.search(pos, maximizing, depth)
    }

    fn name(&self) -> &str {
        "Randomized Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let config = self.searcher.config_mut();
        match name.to_ascii_lowercase().as_str() {
            "depth" => value.parse().map(|d| config.depth = d).is_ok(),
            "movestosample" => value.parse().map(|n| config.moves_to_sample = n).is_ok(),
            "piecestosample" => value.parse().map(|n| config.pieces_to_sample = n).is_ok(),
            "seed" => match value.parse() {
                Ok(seed) => {
                    let config = *config;
                    *self = Self::seeded(config, seed);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}
