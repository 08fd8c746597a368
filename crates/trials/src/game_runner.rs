//! Plays one complete game between two engines.

use std::time::Instant;

use chess_core::{Color, Engine, PieceKind, Position, Rules};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    White,
    Black,
    Draw,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    Repetition,
    /// Decided on remaining material at the move limit
    MoveLimit,
    /// An engine returned no move in a live position
    NoMove,
}

/// Outcome of a single trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: u32,
    pub white: String,
    pub black: String,
    pub winner: Winner,
    pub termination: Termination,
    /// Plies played
    pub plies: u32,
    pub white_avg_ms: f64,
    pub black_avg_ms: f64,
    pub final_fen: String,
}

#[derive(Default)]
struct DecisionClock {
    total_ms: f64,
    decisions: u32,
}

impl DecisionClock {
    fn average(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / f64::from(self.decisions)
        }
    }
}

/// Runs games up to a full-move limit.
#[derive(Debug, Clone, Copy)]
pub struct GameRunner {
    max_moves: u32,
}

impl GameRunner {
    pub fn new(max_moves: u32) -> Self {
        Self { max_moves }
    }

    /// Plays a game from the starting position.
    pub fn play(&self, trial: u32, white: &mut dyn Engine, black: &mut dyn Engine) -> TrialRecord {
        self.play_from(trial, Position::startpos(), white, black)
    }

    pub fn play_from(
        &self,
        trial: u32,
        mut pos: Position,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
    ) -> TrialRecord {
        white.new_game();
        black.new_game();
        let mut clocks = [DecisionClock::default(), DecisionClock::default()];
        let mut plies = 0u32;
        let mut stalled = false;

        while pos.fullmove_number < self.max_moves && !pos.is_game_over() {
            let mover = pos.side_to_move;
            let started = Instant::now();
            let result = match mover {
                Color::White => white.search(&mut pos),
                Color::Black => black.search(&mut pos),
            };
            let clock = &mut clocks[mover.idx()];
            clock.total_ms += started.elapsed().as_secs_f64() * 1000.0;
            clock.decisions += 1;

            let Some(mv) = result.best_move else {
                warn!(trial, side = ?mover, fen = %pos.to_fen(), "no move in a live position");
                stalled = true;
                break;
            };
            if let Err(err) = pos.apply(mv) {
                warn!(trial, side = ?mover, %err, "engine chose an illegal move");
                stalled = true;
                break;
            }
            plies += 1;
        }

        let (winner, termination) = if stalled {
            (Winner::Draw, Termination::NoMove)
        } else {
            judge(&pos)
        };

        debug!(trial, ?winner, ?termination, plies, "game finished");

        TrialRecord {
            trial,
            white: white.name().to_string(),
            black: black.name().to_string(),
            winner,
            termination,
            plies,
            white_avg_ms: clocks[Color::White.idx()].average(),
            black_avg_ms: clocks[Color::Black.idx()].average(),
            final_fen: pos.to_fen(),
        }
    }
}

/// Result of a position where play stopped on its own or at the move limit.
fn judge(pos: &Position) -> (Winner, Termination) {
    if pos.is_checkmate() {
        let winner = match pos.side_to_move {
            Color::White => Winner::Black,
            Color::Black => Winner::White,
        };
        return (winner, Termination::Checkmate);
    }
    if pos.legal_moves().is_empty() {
        return (Winner::Draw, Termination::Stalemate);
    }
    if pos.is_insufficient_material() {
        return (Winner::Draw, Termination::InsufficientMaterial);
    }
    if pos.is_fifty_move_draw() {
        return (Winner::Draw, Termination::FiftyMoveRule);
    }
    if pos.is_threefold_repetition() {
        return (Winner::Draw, Termination::Repetition);
    }
    (adjudicate(pos), Termination::MoveLimit)
}

/// Compares remaining material, kings excluded.
pub fn adjudicate(pos: &Position) -> Winner {
    debug_assert_eq!(PieceKind::King.material_value(), 0.0);
    let white = pos.material(Color::White);
    let black = pos.material(Color::Black);
    if white > black {
        Winner::White
    } else if black > white {
        Winner::Black
    } else {
        Winner::Draw
    }
}

#[cfg(test)]
#[path = "game_runner_tests.rs"]
mod game_runner_tests;
