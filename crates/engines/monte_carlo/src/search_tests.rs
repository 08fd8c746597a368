use std::cell::Cell;

use super::*;
use crate::eval::{evaluate_weighted, WeightedEval};
use chess_core::{Color, InOrderSampler, Piece, Position, RandomSampler, RulesViolation};

/// A scripted game: the root offers one move per entry of `roots`, every
/// later position offers a single filler move. The game ends once
/// `max_plies` moves have been played.
struct Scripted {
    roots: usize,
    max_plies: usize,
    refused: Option<u8>,
    stack: Vec<Move>,
}

impl Scripted {
    fn new(roots: usize, max_plies: usize) -> Self {
        Self {
            roots,
            max_plies,
            refused: None,
            stack: Vec::new(),
        }
    }
}

impl Rules for Scripted {
    fn legal_moves(&self) -> Vec<Move> {
        if self.stack.len() >= self.max_plies {
            return Vec::new();
        }
        if self.stack.is_empty() {
            (0..self.roots as u8).map(|to| Move::new(0, to)).collect()
        } else {
            vec![Move::new(1, 1)]
        }
    }
    fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .collect()
    }
    fn apply(&mut self, mv: Move) -> Result<(), RulesViolation> {
        if self.stack.is_empty() && self.refused == Some(mv.to) {
            return Err(RulesViolation::IllegalMove {
                mv: mv.to_string(),
                fen: String::from("scripted"),
            });
        }
        self.stack.push(mv);
        Ok(())
    }
    fn undo(&mut self) -> Option<Move> {
        self.stack.pop()
    }
    fn is_game_over(&self) -> bool {
        self.stack.len() >= self.max_plies
    }
    fn is_checkmate(&self) -> bool {
        false
    }
    fn in_check(&self) -> bool {
        false
    }
    fn is_attacked(&self, _square: u8, _by: Color) -> bool {
        false
    }
    fn attacks_from(&self, _square: u8) -> Vec<u8> {
        Vec::new()
    }
    fn piece_at(&self, _square: u8) -> Option<Piece> {
        None
    }
    fn side_to_move(&self) -> Color {
        if self.stack.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

fn config(candidates: usize, trials_per_move: usize) -> MonteCarloConfig {
    MonteCarloConfig {
        candidates,
        trials_per_move,
        ..MonteCarloConfig::default()
    }
}

/// Scores a leaf by the root move that led to it.
fn by_root(scores: &[f64]) -> impl Fn(&Scripted, bool) -> f64 + '_ {
    move |game: &Scripted, _: bool| game.stack.first().map_or(f64::NAN, |m| scores[m.to as usize])
}

#[test]
fn defaults() {
    let cfg = MonteCarloConfig::default();
    assert_eq!((cfg.depth, cfg.candidates, cfg.trials_per_move), (10, 20, 20));
}

#[test]
fn lowest_average_wins_and_earliest_tie_holds() {
    let scores = [5.0, 2.0, 7.0, 2.0];
    let mut game = Scripted::new(scores.len(), 100);
    let mut search = MonteCarloSearcher::new(config(8, 3), InOrderSampler, by_root(&scores));

    let res = search.search(&mut game, 3);
    assert_eq!(res.best_move, Some(Move::new(0, 1)));
    assert_eq!(res.score, 2.0);
    assert!(game.stack.is_empty());
    // four candidates, three trials, one candidate ply and three rollout plies each
    assert_eq!(res.nodes, 4 * 3 * 4);
}

#[test]
fn only_sampled_candidates_are_considered() {
    let scores = [5.0, 4.0, 1.0];
    let mut game = Scripted::new(scores.len(), 100);
    let mut search = MonteCarloSearcher::new(config(2, 1), InOrderSampler, by_root(&scores));
    let res = search.search(&mut game, 2);
    assert_eq!(res.best_move, Some(Move::new(0, 1)));
}

#[test]
fn rollout_stops_at_game_over() {
    let deepest = Cell::new(0);
    let eval = |game: &Scripted, _: bool| {
        deepest.set(deepest.get().max(game.stack.len()));
        0.0
    };
    let mut game = Scripted::new(2, 3);
    let mut search = MonteCarloSearcher::new(config(2, 2), InOrderSampler, eval);
    let res = search.search(&mut game, 10);
    assert_eq!(deepest.get(), 3);
    assert!(game.stack.is_empty());
    assert_eq!(res.best_move, Some(Move::new(0, 0)));
}

#[test]
fn refused_candidate_is_skipped() {
    let scores = [3.0, 1.0, 2.0];
    let mut game = Scripted::new(scores.len(), 100);
    game.refused = Some(1);
    let mut search = MonteCarloSearcher::new(config(3, 2), InOrderSampler, by_root(&scores));
    let res = search.search(&mut game, 2);
    assert_eq!(res.best_move, Some(Move::new(0, 2)));
    assert_eq!(res.score, 2.0);

    let mut game = Scripted::new(1, 100);
    game.refused = Some(0);
    let res = search.search(&mut game, 2);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, f64::INFINITY);
}

#[test]
fn zero_candidates_returns_evaluation() {
    let mut pos = Position::startpos();
    let mut search = MonteCarloSearcher::new(config(0, 2), RandomSampler::seeded(1), WeightedEval);
    let res = search.search(&mut pos, 4);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, evaluate_weighted(&pos));
}

#[test]
fn depth_zero_and_game_over_are_leaves() {
    let mut search = MonteCarloSearcher::new(config(4, 2), RandomSampler::seeded(1), WeightedEval);

    let mut start = Position::startpos();
    let res = search.search(&mut start, 0);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, evaluate_weighted(&start));

    let mut mated = Position::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    let res = search.search(&mut mated, 5);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, evaluate_weighted(&mated));
}

#[test]
fn real_position_is_restored() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let before = pos.clone();
    let mut search = MonteCarloSearcher::new(config(5, 3), RandomSampler::seeded(42), WeightedEval);
    let res = search.search(&mut pos, 6);
    assert_eq!(pos, before);
    assert!(res.best_move.is_some_and(|m| pos.legal_moves().contains(&m)));
    assert!((0.0..=100.0).contains(&res.score));
}
