use std::io::{self, BufRead, Write};

use anyhow::Result;
use chess_core::{move_to_uci, set_position_from_uci, Engine, Position, SearchResult};
use minimax_engine::MinimaxEngine;
use monte_carlo_engine::MonteCarloEngine;
use random_engine::RandomEngine;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const PLAYERS: [&str; 3] = ["minimax", "monte-carlo", "random"];

fn build_engine(kind: &str) -> Option<Box<dyn Engine>> {
    match kind.to_ascii_lowercase().as_str() {
        "minimax" => Some(Box::new(MinimaxEngine::default())),
        "monte-carlo" | "montecarlo" => Some(Box::new(MonteCarloEngine::default())),
        "random" => Some(Box::new(RandomEngine::new())),
        _ => None,
    }
}

/// State of one UCI conversation.
struct Session {
    pos: Position,
    engine: Box<dyn Engine>,
    /// Engine options in the order they were set, replayed on engine switch
    options: Vec<(String, String)>,
}

impl Session {
    fn new() -> Self {
        Self {
            pos: Position::startpos(),
            engine: Box::new(MinimaxEngine::default()),
            options: Vec::new(),
        }
    }

    /// Handles one command line. Returns `false` once the GUI asks to quit.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(true);
        };

        match command {
            "uci" => {
                writeln!(out, "id name ChessLab {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Engine type combo default minimax var {}",
                    PLAYERS.join(" var ")
                )?;
                writeln!(out, "option name Depth type spin default 5 min 1 max 12")?;
                writeln!(out, "option name Seed type string default <empty>")?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut self.pos, &parts[1..]) {
                    warn!(%err, line, "ignoring position command");
                }
            }
            "go" => {
                let result = self.engine.search(&mut self.pos);
                write_result(out, &result)?;
            }
            "quit" => return Ok(false),
            _ => debug!(line, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(true)
    }

    /// `setoption name <id> [value <x>]`
    fn set_option(&mut self, args: &[&str]) {
        let Some(name_at) = args.iter().position(|&a| a == "name") else {
            return;
        };
        let value_at = args
            .iter()
            .skip(name_at + 1)
            .position(|&a| a == "value")
            .map(|i| i + name_at + 1);
        let name = args
            .get(name_at + 1..value_at.unwrap_or(args.len()))
            .unwrap_or_default()
            .join(" ");
        if name.is_empty() {
            return;
        }
        let value = value_at
            .and_then(|i| args.get(i + 1..))
            .unwrap_or_default()
            .join(" ");

        if name.eq_ignore_ascii_case("engine") {
            match build_engine(&value) {
                Some(engine) => {
                    self.engine = engine;
                    for (n, v) in &self.options {
                        self.engine.set_option(n, v);
                    }
                }
                None => warn!(value = %value, "unknown engine"),
            }
            return;
        }

        if !self.engine.set_option(&name, &value) {
            debug!(name = %name, value = %value, "option not used by the current engine");
        }
        self.options.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.options.push((name, value));
    }
}

fn write_result(out: &mut impl Write, result: &SearchResult) -> io::Result<()> {
    if result.score.is_finite() {
        writeln!(
            out,
            "info depth {} score cp {} nodes {}",
            result.depth,
            (result.score * 100.0).round() as i64,
            result.nodes
        )?;
    }
    match result.best_move {
        Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv)),
        None => writeln!(out, "bestmove 0000"),
    }
}

fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        if !session.handle(&line?, &mut stdout)? {
            break;
        }
    }
    Ok(())
}
