//! Trials CLI
//!
//! Play batches of games between the search players and summarise them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trials::{run_trials, PlayerKind, TrialConfig, TrialSummary};

#[derive(Parser, Debug)]
#[command(name = "trials", version, about = "Batch games between the chess search players")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a batch of trials and write the results as JSON
    Run {
        /// TOML settings file; flags below override it
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        #[arg(long, short = 'n')]
        trials: Option<u32>,

        /// Worker threads (0 = one per core)
        #[arg(long, short = 't')]
        threads: Option<usize>,

        /// Full-move limit before adjudication
        #[arg(long)]
        max_moves: Option<u32>,

        /// random, minimax or monte-carlo
        #[arg(long)]
        white: Option<PlayerKind>,

        #[arg(long)]
        black: Option<PlayerKind>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the summary of a saved results file
    Report { file: PathBuf },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    match Cli::parse().command {
        Command::Run {
            config,
            trials,
            threads,
            max_moves,
            white,
            black,
            seed,
            output,
        } => {
            let mut settings = match &config {
                Some(path) => TrialConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => TrialConfig::default(),
            };
            if let Some(n) = trials {
                settings.trials = n;
            }
            if let Some(n) = threads {
                settings.threads = n;
            }
            if let Some(n) = max_moves {
                settings.max_moves = n;
            }
            if let Some(kind) = white {
                settings.white = kind;
            }
            if let Some(kind) = black {
                settings.black = kind;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            if let Some(path) = output {
                settings.output = path;
            }

            let summary = run_trials(&settings).context("running trials")?;
            summary.print_report();
            summary
                .save(&settings.output)
                .with_context(|| format!("saving {}", settings.output.display()))?;
            info!(path = %settings.output.display(), "results written");
        }
        Command::Report { file } => {
            let summary = TrialSummary::load(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            summary.print_report();
        }
    }

    Ok(())
}
