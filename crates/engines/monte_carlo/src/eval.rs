//! Weighted 0..=100 evaluation from black's point of view.
//!
//! Three sub-scores, each normalised to `[0, 100]`, are weighted and summed.
//! A higher total means a better position for black.

use chess_core::{attacks_enemy, Color, LeafEvaluator, Piece, Rules, CENTER_SQUARES};

pub const MATERIAL_WEIGHT: f64 = 0.8;
pub const CENTER_WEIGHT: f64 = 0.2;
pub const OFFENSE_WEIGHT: f64 = 0.5;

const OFFENSE_BASELINE: f64 = 50.0;
const ATTACK_FACTOR: f64 = 6.0;
const EXPOSURE_FACTOR: f64 = 3.0;

fn black_pieces<R: Rules + ?Sized>(pos: &R) -> impl Iterator<Item = (u8, Piece)> + '_ {
    (0..64u8).filter_map(move |sq| {
        pos.piece_at(sq)
            .filter(|pc| pc.color == Color::Black)
            .map(|pc| (sq, pc))
    })
}

/// Black's share of the material on the board, as a percentage.
/// 50 when neither side has any material left.
pub fn material_share<R: Rules + ?Sized>(pos: &R) -> f64 {
    let (mut black, mut white) = (0.0, 0.0);
    for sq in 0..64u8 {
        match pos.piece_at(sq) {
            Some(pc) if pc.color == Color::Black => black += pc.kind.material_value(),
            Some(pc) => white += pc.kind.material_value(),
            None => {}
        }
    }
    let total = black + white;
    if total == 0.0 {
        return 50.0;
    }
    black / total * 100.0
}

/// Black presence in the centre: the material value of black pieces standing
/// on a centre square, plus, for every black piece, one point per centre
/// square black attacks. Every point is worth 10, capped at 100.
pub fn center_control<R: Rules + ?Sized>(pos: &R) -> f64 {
    let contested = CENTER_SQUARES
        .iter()
        .filter(|&&c| pos.is_attacked(c, Color::Black))
        .count() as f64;

    let mut control = 0.0;
    for (sq, pc) in black_pieces(pos) {
        if CENTER_SQUARES.contains(&sq) {
            control += pc.kind.material_value();
        }
        control += contested;
    }
    (control / 10.0 * 100.0).min(100.0)
}

/// Attacks made by black pieces against those suffered, around a 50
/// baseline and clamped to `[0, 100]`.
pub fn offense_defense<R: Rules + ?Sized>(pos: &R) -> f64 {
    let mut score = OFFENSE_BASELINE;
    for (sq, pc) in black_pieces(pos) {
        let weight = pc.kind.search_weight();
        if attacks_enemy(pos, sq) {
            score += weight * ATTACK_FACTOR;
        }
        if pos.is_attacked(sq, Color::White) {
            score -= weight * EXPOSURE_FACTOR;
        }
    }
    score.clamp(0.0, 100.0)
}

pub fn evaluate_weighted<R: Rules + ?Sized>(pos: &R) -> f64 {
    let total = material_share(pos) * MATERIAL_WEIGHT
        + center_control(pos) * CENTER_WEIGHT
        + offense_defense(pos) * OFFENSE_WEIGHT;
    total.clamp(0.0, 100.0)
}

/// [`evaluate_weighted`] as a [`LeafEvaluator`]; the search role is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedEval;

impl<R: Rules + ?Sized> LeafEvaluator<R> for WeightedEval {
    fn evaluate(&self, pos: &R, _maximizing: bool) -> f64 {
        evaluate_weighted(pos)
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
