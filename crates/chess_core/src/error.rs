//! Error types raised by the rules engine.

use thiserror::Error;

/// The rules engine refused to play a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesViolation {
    /// The move is not in the legal move list of the current position.
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}

/// A FEN string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),
    #[error("expected 8 ranks in board section, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("rank {0} does not describe exactly 8 files")]
    FileCount(usize),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    Castling(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
}
