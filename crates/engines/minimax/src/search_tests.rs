use super::*;
use crate::eval::{evaluate_minimax, MinimaxEval};
use chess_core::{InOrderSampler, Piece, Position, RandomSampler, RulesViolation};

const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";

fn config(depth: u8, moves_to_sample: usize) -> MinimaxConfig {
    MinimaxConfig {
        depth,
        moves_to_sample,
        ..MinimaxConfig::default()
    }
}

#[test]
fn defaults() {
    let cfg = MinimaxConfig::default();
    assert_eq!((cfg.depth, cfg.moves_to_sample, cfg.pieces_to_sample), (5, 3, 3));
}

#[test]
fn depth_zero_is_the_evaluation() {
    let mut pos = Position::from_fen(BACK_RANK).unwrap();
    let mut search = RandomizedMinimax::new(config(0, 3), RandomSampler::seeded(1), MinimaxEval);
    for maximizing in [true, false] {
        let res = search.search(&mut pos, maximizing, 0);
        assert_eq!(res.best_move, None);
        assert_eq!(res.score, evaluate_minimax(&pos, maximizing));
        assert_eq!(res.nodes, 0);
    }
}

#[test]
fn game_over_root_returns_no_move() {
    let mut pos = Position::from_fen(FOOLS_MATE).unwrap();
    let mut search = RandomizedMinimax::new(config(3, 3), RandomSampler::seeded(1), MinimaxEval);
    let res = search.search(&mut pos, true, 3);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, f64::NEG_INFINITY);
}

#[test]
fn empty_sample_returns_evaluation() {
    let mut pos = Position::startpos();
    let mut search = RandomizedMinimax::new(config(2, 0), RandomSampler::seeded(1), MinimaxEval);
    let res = search.search(&mut pos, true, 2);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, 0.0);
}

#[test]
fn finds_back_rank_mate_with_full_sample() {
    let mut pos = Position::from_fen(BACK_RANK).unwrap();
    let mut search = RandomizedMinimax::new(config(1, 256), InOrderSampler, MinimaxEval);
    let res = search.search(&mut pos, true, 1);
    let mv = res.best_move.unwrap();
    assert_eq!((mv.from, mv.to), (0, 56));
    assert_eq!(res.score, f64::INFINITY);
}

#[test]
fn ties_keep_first_sampled_move() {
    let mut pos = Position::startpos();
    let first = pos.legal_moves()[0];
    let flat = |_: &Position, _: bool| 0.0;
    for maximizing in [true, false] {
        let mut search = RandomizedMinimax::new(config(2, 5), InOrderSampler, flat);
        let res = search.search(&mut pos, maximizing, 2);
        assert_eq!(res.best_move, Some(first));
        assert_eq!(res.score, 0.0);
    }
}

#[test]
fn search_leaves_position_untouched() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let before = pos.clone();
    let mut search = RandomizedMinimax::new(config(4, 4), RandomSampler::seeded(7), MinimaxEval);
    let res = search.search(&mut pos, true, 4);
    assert_eq!(pos, before);
    assert!(res.best_move.is_some_and(|m| pos.legal_moves().contains(&m)));
    assert!(res.nodes > 0);
}

#[test]
fn same_seed_same_choice() {
    let run = |seed| {
        let mut pos = Position::startpos();
        let mut search =
            RandomizedMinimax::new(config(3, 3), RandomSampler::seeded(seed), MinimaxEval);
        search.search(&mut pos, true, 3)
    };
    assert_eq!(run(11), run(11));
}

/// Delegates to a real position but refuses one move.
struct Refusing {
    inner: Position,
    refused: Move,
}

impl Rules for Refusing {
    fn legal_moves(&self) -> Vec<Move> {
        self.inner.legal_moves()
    }
    fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        self.inner.legal_moves_from(from)
    }
    fn apply(&mut self, mv: Move) -> Result<(), RulesViolation> {
        if mv.same_squares(&self.refused) {
            return Err(RulesViolation::IllegalMove {
                mv: mv.to_string(),
                fen: self.inner.to_fen(),
            });
        }
        self.inner.apply(mv)
    }
    fn undo(&mut self) -> Option<Move> {
        self.inner.undo()
    }
    fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }
    fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }
    fn in_check(&self) -> bool {
        Rules::in_check(&self.inner)
    }
    fn is_attacked(&self, square: u8, by: chess_core::Color) -> bool {
        self.inner.is_attacked(square, by)
    }
    fn attacks_from(&self, square: u8) -> Vec<u8> {
        Rules::attacks_from(&self.inner, square)
    }
    fn piece_at(&self, square: u8) -> Option<Piece> {
        Rules::piece_at(&self.inner, square)
    }
    fn side_to_move(&self) -> chess_core::Color {
        self.inner.side_to_move
    }
}

#[test]
fn refused_move_is_never_chosen() {
    let inner = Position::startpos();
    let moves = inner.legal_moves();
    let mut pos = Refusing {
        inner,
        refused: moves[0],
    };

    let mut search = RandomizedMinimax::new(config(1, 2), InOrderSampler, MinimaxEval);
    let res = search.search(&mut pos, true, 1);
    assert_eq!(res.best_move, Some(moves[1]));
    assert_eq!(res.nodes, 1);

    let mut only_refused = RandomizedMinimax::new(config(1, 1), InOrderSampler, MinimaxEval);
    let res = only_refused.search(&mut pos, true, 1);
    assert_eq!(res.best_move, None);
    assert_eq!(res.score, f64::NEG_INFINITY);
    assert_eq!(pos.inner, Position::startpos());
}
