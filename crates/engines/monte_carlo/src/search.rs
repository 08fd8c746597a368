//! Flat Monte Carlo move selection.
//!
//! Every sampled candidate is played, followed by a run of uniformly random
//! moves, and the leaf is scored with the weighted evaluation. The candidate
//! with the lowest average over its trials is chosen. The searcher always
//! minimizes; there is no role parameter.

use chess_core::{LeafEvaluator, Move, Rules, Sampler, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Random plies played after each candidate.
    pub depth: u8,
    /// Candidate moves sampled at the root.
    pub candidates: usize,
    pub trials_per_move: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            depth: 10,
            candidates: 20,
            trials_per_move: 20,
        }
    }
}

pub struct MonteCarloSearcher<S, E> {
    config: MonteCarloConfig,
    sampler: S,
    evaluator: E,
    nodes: u64,
}

impl<S: Sampler, E> MonteCarloSearcher<S, E> {
    pub fn new(config: MonteCarloConfig, sampler: S, evaluator: E) -> Self {
        Self {
            config,
            sampler,
            evaluator,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MonteCarloConfig {
        &mut self.config
    }

    /// Picks the candidate with the lowest average rollout score. Rollouts
    /// are at most `depth` plies long.
    ///
    /// The position is handed back exactly as it was received.
    pub fn search<R>(&mut self, pos: &mut R, depth: u8) -> SearchResult
    where
        R: Rules,
        E: LeafEvaluator<R>,
    {
        self.nodes = 0;

        if depth == 0 || pos.is_game_over() {
            return SearchResult::leaf(self.evaluator.evaluate(pos, false), depth);
        }

        let moves = pos.legal_moves();
        let candidates = self.sampler.sample(&moves, self.config.candidates);
        if candidates.is_empty() {
            return SearchResult::leaf(self.evaluator.evaluate(pos, false), depth);
        }

        let trials = self.config.trials_per_move.max(1);
        let mut best: Option<(Move, f64)> = None;

        'candidates: for mv in candidates {
            let mut total = 0.0;
            for _ in 0..trials {
                match pos.probe(mv, |child| self.rollout(child, depth)) {
                    Ok(score) => total += score,
                    Err(err) => {
                        warn!(%err, "candidate rejected, skipping");
                        continue 'candidates;
                    }
                }
                self.nodes += 1;
            }

            let average = total / trials as f64;
            trace!(candidate = %mv, average, "candidate scored");
            if best.is_none_or(|(_, held)| average < held) {
                best = Some((mv, average));
            }
        }

        let (best_move, score) = match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, f64::INFINITY),
        };

        debug!(
            best = ?best_move.map(|m| m.to_string()),
            score,
            depth,
            trials,
            nodes = self.nodes,
            "monte carlo search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    /// Plays up to `depth` random moves, scores the leaf and takes every
    /// rollout move back.
    fn rollout<R>(&mut self, pos: &mut R, depth: u8) -> f64
    where
        R: Rules,
        E: LeafEvaluator<R>,
    {
        let mut played = 0u8;
        while played < depth && !pos.is_game_over() {
            let moves = pos.legal_moves();
            let Some(mv) = self.sampler.choose(&moves) else {
                break;
            };
            if let Err(err) = pos.apply(mv) {
                warn!(%err, "rollout move rejected, ending rollout");
                break;
            }
            played += 1;
        }
        self.nodes += u64::from(played);

        let score = self.evaluator.evaluate(pos, false);
        for _ in 0..played {
            let undone = pos.undo();
            debug_assert!(undone.is_some(), "rollout undo ran past the root");
        }
        trace!(plies = played, score, "rollout");
        score
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
