use std::path::PathBuf;

use thiserror::Error;

/// Problems with a trial configuration, detected before any game starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown player '{0}' (expected random, minimax or monte-carlo)")]
    UnknownPlayer(String),
    #[error("invalid setting: {0}")]
    Invalid(String),
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Problems reading or writing a results file.
#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed results: {0}")]
    Json(#[from] serde_json::Error),
}
