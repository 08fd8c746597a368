//! Timing of a single decision by each search player, for flamegraphs.
//!
//! Usage:
//!   cargo flamegraph --profile profiling --example search_bench -p trials -- [seed]

use std::env;
use std::time::Instant;

use chess_core::{Engine, Position};
use minimax_engine::{MinimaxConfig, MinimaxEngine};
use monte_carlo_engine::{MonteCarloConfig, MonteCarloEngine};

const POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn main() -> anyhow::Result<()> {
    let seed: u64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut players: Vec<Box<dyn Engine>> = vec![
        Box::new(MinimaxEngine::seeded(MinimaxConfig::default(), seed)),
        Box::new(MonteCarloEngine::seeded(MonteCarloConfig::default(), seed)),
    ];

    for player in &mut players {
        println!("=== {} ===", player.name());
        for (name, fen) in POSITIONS {
            let mut pos = Position::from_fen(fen)?;
            let start = Instant::now();
            let result = player.search(&mut pos);
            let elapsed = start.elapsed();

            let best = result
                .best_move
                .map_or_else(|| "none".to_string(), |m| m.to_string());
            println!(
                "{name:.<24} {best:>6} {:>10} nodes in {elapsed:>8.3?}",
                result.nodes
            );
        }
        println!();
    }
    Ok(())
}
