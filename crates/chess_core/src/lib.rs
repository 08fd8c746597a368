pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod sampling;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use movegen::*;
pub use perft::perft;
pub use rules::*;
pub use sampling::{InOrderSampler, RandomSampler, Sampler, sample};
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine seams shared by the minimax, Monte Carlo and random players
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best move found (None at a leaf or when nothing was sampled)
    pub best_move: Option<Move>,
    /// Evaluation score associated with the move; ±infinity marks checkmate lines
    pub score: f64,
    /// Depth the search was asked for
    pub depth: u8,
    /// Number of positions visited through `apply`
    pub nodes: u64,
}

impl SearchResult {
    /// A result with no move, e.g. a leaf or an empty candidate set.
    pub fn leaf(score: f64, depth: u8) -> Self {
        Self {
            best_move: None,
            score,
            depth,
            nodes: 0,
        }
    }
}

/// Scores a leaf position. `maximizing` is the search role whose turn it is
/// at the leaf; evaluators with a fixed perspective ignore it.
pub trait LeafEvaluator<R: ?Sized> {
    fn evaluate(&self, pos: &R, maximizing: bool) -> f64;
}

impl<R: ?Sized, F> LeafEvaluator<R> for F
where
    F: Fn(&R, bool) -> f64,
{
    fn evaluate(&self, pos: &R, maximizing: bool) -> f64 {
        self(pos, maximizing)
    }
}

/// Trait that all chess engines must implement.
///
/// The position is borrowed mutably for the duration of the search and is
/// handed back exactly as it was received.
pub trait Engine: Send {
    fn search(&mut self, pos: &mut Position) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "chess-lab"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
