//! Depth-limited minimax over a random subset of the legal moves.
//!
//! Each node looks at no more than `moves_to_sample` moves, drawn from the
//! full legal list. There is no pruning: the point is cheap, varied play
//! rather than a strong principal variation.

use chess_core::{LeafEvaluator, Move, Rules, Sampler, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Search knobs. Zero `moves_to_sample` makes every node a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    pub depth: u8,
    pub moves_to_sample: usize,
    /// Reported in logs but not used to restrict the sample.
    pub pieces_to_sample: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            moves_to_sample: 3,
            pieces_to_sample: 3,
        }
    }
}

pub struct RandomizedMinimax<S, E> {
    config: MinimaxConfig,
    sampler: S,
    evaluator: E,
    nodes: u64,
}

impl<S: Sampler, E> RandomizedMinimax<S, E> {
    pub fn new(config: MinimaxConfig, sampler: S, evaluator: E) -> Self {
        Self {
            config,
            sampler,
            evaluator,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MinimaxConfig {
        &mut self.config
    }

    /// Searches `depth` plies below `pos`. `maximizing` is the role of the
    /// side to move at the root.
    ///
    /// The position is handed back exactly as it was received.
    pub fn search<R>(&mut self, pos: &mut R, maximizing: bool, depth: u8) -> SearchResult
    where
        R: Rules,
        E: LeafEvaluator<R>,
    {
        self.nodes = 0;
        let (best_move, score) = self.minimax(pos, maximizing, depth);

        debug!(
            best = ?best_move.map(|m| m.to_string()),
            score,
            depth,
            nodes = self.nodes,
            moves_to_sample = self.config.moves_to_sample,
            pieces_to_sample = self.config.pieces_to_sample,
            "minimax search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    fn minimax<R>(&mut self, pos: &mut R, maximizing: bool, depth: u8) -> (Option<Move>, f64)
    where
        R: Rules,
        E: LeafEvaluator<R>,
    {
        if depth == 0 || pos.is_game_over() {
            return (None, self.evaluator.evaluate(pos, maximizing));
        }

        let moves = pos.legal_moves();
        let candidates = self.sampler.sample(&moves, self.config.moves_to_sample);
        if candidates.is_empty() {
            return (None, self.evaluator.evaluate(pos, maximizing));
        }

        let mut best: Option<(Move, f64)> = None;
        for mv in candidates {
            let outcome = pos.probe(mv, |child| self.minimax(child, !maximizing, depth - 1).1);
            let score = match outcome {
                Ok(score) => score,
                Err(err) => {
                    warn!(%err, "sampled move rejected, skipping branch");
                    continue;
                }
            };
            self.nodes += 1;

            let improves = match best {
                None => true,
                Some((_, held)) if maximizing => score > held,
                Some((_, held)) => score < held,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, worst_for(maximizing)),
        }
    }
}

fn worst_for(maximizing: bool) -> f64 {
    if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
