//! Parallel execution of a trial batch.
//!
//! Each trial is one rayon task that owns its position and both players;
//! nothing is shared between tasks except the read-only configuration.

use chess_core::Color;
use rayon::prelude::*;
use tracing::info;

use crate::config::TrialConfig;
use crate::error::ConfigError;
use crate::game_runner::{GameRunner, TrialRecord};
use crate::results::TrialSummary;

/// Plays one trial with freshly built players.
pub fn run_trial(config: &TrialConfig, trial: u32) -> TrialRecord {
    let mut white = config.build_player(config.white, trial, Color::White);
    let mut black = config.build_player(config.black, trial, Color::Black);
    let record = GameRunner::new(config.max_moves).play(trial, white.as_mut(), black.as_mut());
    info!(
        trial,
        winner = ?record.winner,
        termination = ?record.termination,
        plies = record.plies,
        "trial complete"
    );
    record
}

/// Runs every trial of `config` and collects the records in trial order.
pub fn run_trials(config: &TrialConfig) -> Result<TrialSummary, ConfigError> {
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    info!(
        trials = config.trials,
        threads = pool.current_num_threads(),
        white = %config.white,
        black = %config.black,
        "starting trials"
    );

    let mut records: Vec<TrialRecord> = pool.install(|| {
        (1..=config.trials)
            .into_par_iter()
            .map(|trial| run_trial(config, trial))
            .collect()
    });
    records.sort_by_key(|r| r.trial);

    Ok(TrialSummary::new(config.clone(), records))
}
