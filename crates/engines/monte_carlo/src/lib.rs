//! Monte Carlo Engine
//!
//! Flat random-rollout search over a sample of root moves, scored with a
//! weighted evaluation seen from black's side.

mod eval;
mod search;

pub use eval::{
    center_control, evaluate_weighted, material_share, offense_defense, WeightedEval,
};
pub use search::{MonteCarloConfig, MonteCarloSearcher};

use chess_core::{Engine, Position, RandomSampler, SearchResult};

/// Monte Carlo search behind the [`Engine`] trait.
///
/// The choice always minimizes the weighted score, whichever colour the
/// engine is playing.
pub struct MonteCarloEngine {
    searcher: MonteCarloSearcher<RandomSampler, WeightedEval>,
}

impl MonteCarloEngine {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self::with_sampler(config, RandomSampler::from_entropy())
    }

    pub fn seeded(config: MonteCarloConfig, seed: u64) -> Self {
        Self::with_sampler(config, RandomSampler::seeded(seed))
    }

    fn with_sampler(config: MonteCarloConfig, sampler: RandomSampler) -> Self {
        Self {
            searcher: MonteCarloSearcher::new(config, sampler, WeightedEval),
        }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        self.searcher.config()
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new(MonteCarloConfig::default())
    }
}

impl Engine for MonteCarloEngine {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let depth = self.searcher.config().depth;
        self.searcher.search(pos, depth)
    }

    fn name(&self) -> &str {
        "Monte Carlo"
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let config = self.searcher.config_mut();
        match name.to_ascii_lowercase().as_str() {
            "depth" => value.parse().map(|d| config.depth = d).is_ok(),
            "candidates" => value.parse().map(|n| config.candidates = n).is_ok(),
            "trials" => value
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(|n| config.trials_per_move = n)
                .is_some(),
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
