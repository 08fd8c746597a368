//! The rules-engine contract the search engines are written against.
//!
//! Searchers never clone a position: they hold one `&mut` instance, apply a
//! move, look deeper, and undo it again. Everything they need to know about
//! chess goes through this trait, which keeps them testable against scripted
//! games as well as the real [`Position`].

use crate::board::Position;
use crate::error::RulesViolation;
use crate::movegen::{legal_moves, legal_moves_from};
use crate::types::{Color, Move, Piece};

pub trait Rules {
    /// All legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Move>;

    /// Legal moves of the piece on `from`.
    fn legal_moves_from(&self, from: u8) -> Vec<Move>;

    /// Plays a legal move. Fails without touching the position otherwise.
    fn apply(&mut self, mv: Move) -> Result<(), RulesViolation>;

    /// Takes back the most recent `apply`. `None` when nothing was applied.
    fn undo(&mut self) -> Option<Move>;

    fn is_game_over(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// Whether `square` is attacked by any piece of `by`.
    fn is_attacked(&self, square: u8, by: Color) -> bool;

    /// Squares attacked by the piece on `square`.
    fn attacks_from(&self, square: u8) -> Vec<u8>;

    fn piece_at(&self, square: u8) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Applies `mv`, runs `f` on the resulting position and undoes the move
    /// before returning, so the position is restored on every path out.
    fn probe<T>(&mut self, mv: Move, f: impl FnOnce(&mut Self) -> T) -> Result<T, RulesViolation>
    where
        Self: Sized,
    {
        self.apply(mv)?;
        let out = f(self);
        let undone = self.undo();
        debug_assert!(
            undone.is_some_and(|m| m.same_squares(&mv)),
            "probe undid {undone:?} instead of {mv:?}"
        );
        Ok(out)
    }
}

impl Rules for Position {
    fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        legal_moves_from(self, from)
    }

    fn apply(&mut self, mv: Move) -> Result<(), RulesViolation> {
        let resolved = legal_moves_from(self, mv.from)
            .into_iter()
            .find(|m| m.same_squares(&mv))
            .ok_or_else(|| self.violation(mv))?;
        self.make_move(resolved)
    }

    fn undo(&mut self) -> Option<Move> {
        self.unmake_move()
    }

    fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty()
            || self.is_insufficient_material()
            || self.is_fifty_move_draw()
            || self.is_threefold_repetition()
    }

    fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    fn is_attacked(&self, square: u8, by: Color) -> bool {
        self.is_square_attacked(square, by)
    }

    fn attacks_from(&self, square: u8) -> Vec<u8> {
        Position::attacks_from(self, square)
    }

    fn piece_at(&self, square: u8) -> Option<Piece> {
        Position::piece_at(self, square)
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }
}

/// Whether the piece on `square` attacks at least one enemy piece.
pub fn attacks_enemy<R: Rules + ?Sized>(pos: &R, square: u8) -> bool {
    let Some(pc) = pos.piece_at(square) else {
        return false;
    };
    pos.attacks_from(square)
        .into_iter()
        .any(|t| pos.piece_at(t).is_some_and(|other| other.color != pc.color))
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
