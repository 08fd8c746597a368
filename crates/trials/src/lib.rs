//! Trial runner for the search players
//!
//! This crate provides infrastructure for:
//! - Playing complete games between two configured players
//! - Running many such games in parallel, one game per worker
//! - Storing the results as JSON and summarising them
//!
//! # Usage
//!
//! ```bash
//! # 100 games of random (white) against Monte Carlo (black)
//! cargo run --release -p trials -- run --trials 100
//!
//! # Settings from a file, minimax playing black
//! cargo run --release -p trials -- run --config trials.toml --black minimax
//!
//! # Summarise a previous run
//! cargo run -p trials -- report trial_results.json
//! ```

mod config;
mod error;
mod game_runner;
mod results;
mod runner;

pub use config::*;
pub use error::*;
pub use game_runner::*;
pub use results::*;
pub use runner::*;
