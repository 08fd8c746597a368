//! Signed positional evaluation used at minimax leaves.

use chess_core::{attacks_enemy, Color, LeafEvaluator, Rules, CENTER_SQUARES};

/// Fraction of a piece's weight earned for standing on a centre square.
pub const CENTER_WEIGHT: f64 = 0.4;
/// Bonus for attacking an enemy piece, and penalty for being attacked.
pub const CONTACT_BONUS: f64 = 2.0;
/// Per centre square attacked by a side, counted against the attacker.
pub const CENTER_ATTACK_PENALTY: f64 = 5.0;
/// Adjustment against the side to move when it is in check.
pub const CHECK_PENALTY: f64 = 5.0;

/// Evaluates the position with positive scores favouring white.
///
/// Every piece contributes its search weight (king = 1000) signed by colour,
/// plus a centre-occupation bonus, plus contact terms for attacking and
/// being attacked. Each centre square moves the score a flat amount against
/// whichever side attacks it.
///
/// On checkmate the score becomes infinite against the role whose turn it
/// is at the leaf: `-inf` when `maximizing`, `+inf` otherwise.
pub fn evaluate_minimax<R: Rules + ?Sized>(pos: &R, maximizing: bool) -> f64 {
    let mut score = 0.0;

    for square in 0..64u8 {
        let Some(pc) = pos.piece_at(square) else {
            continue;
        };
        let weight = pc.kind.search_weight();
        let sign = pc.color.sign();

        score += weight * sign;
        if CENTER_SQUARES.contains(&square) {
            score += weight * CENTER_WEIGHT * sign;
        }
        if attacks_enemy(pos, square) {
            score += CONTACT_BONUS * sign;
        }
        if pos.is_attacked(square, pc.color.other()) {
            score -= CONTACT_BONUS * sign;
        }
    }

    for square in CENTER_SQUARES {
        if pos.is_attacked(square, Color::White) {
            score -= CENTER_ATTACK_PENALTY;
        }
        if pos.is_attacked(square, Color::Black) {
            score += CENTER_ATTACK_PENALTY;
        }
    }

    if pos.is_checkmate() {
        score += if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    } else if pos.in_check() {
        score -= CHECK_PENALTY * pos.side_to_move().sign();
    }

    score
}

/// [`evaluate_minimax`] as a [`LeafEvaluator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxEval;

impl<R: Rules + ?Sized> LeafEvaluator<R> for MinimaxEval {
    fn evaluate(&self, pos: &R, maximizing: bool) -> f64 {
        evaluate_minimax(pos, maximizing)
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
