//! Random Move Chess Engine
//!
//! Picks one legal move through a [`Sampler`]. Serves as the baseline
//! opponent in trials and as a smoke test for the rules engine.

use chess_core::{Engine, Position, RandomSampler, Rules, Sampler, SearchResult};


/// A chess engine that plays random legal moves.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine<S = RandomSampler> {
    sampler: S,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_sampler(RandomSampler::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_sampler(RandomSampler::seeded(seed))
    }
}

impl<S: Sampler> RandomEngine<S> {
    pub fn with_sampler(sampler: S) -> Self {
        Self { sampler }
    }
}

impl<S: Sampler + Send> Engine for RandomEngine<S> {
    fn search(&mut self, pos: &mut Position) -> SearchResult {
        let best_move = self.sampler.choose(&pos.legal_moves());
        SearchResult {
            best_move,
            score: 0.0,
            depth: 1,
            nodes: u64::from(best_move.is_some()),
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}
