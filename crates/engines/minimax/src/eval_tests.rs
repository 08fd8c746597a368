use super::*;
use chess_core::Position;

const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

#[test]
fn start_position_is_level() {
    let pos = Position::startpos();
    assert_eq!(evaluate_minimax(&pos, true), 0.0);
    assert_eq!(evaluate_minimax(&pos, false), 0.0);
}

#[test]
fn checkmate_sentinel_follows_role() {
    let pos = Position::from_fen(FOOLS_MATE).unwrap();
    assert_eq!(evaluate_minimax(&pos, true), f64::NEG_INFINITY);
    assert_eq!(evaluate_minimax(&pos, false), f64::INFINITY);
}

#[test]
fn centralised_queen_scores_occupation_and_control() {
    let pos = Position::from_fen("7k/8/8/8/4Q3/8/8/4K3 w - - 0 1").unwrap();
    // 9 + 9 * 0.4 for the queen, while d4, d5 and e5 under white control
    // count against white
    let score = evaluate_minimax(&pos, true);
    assert!((score - (-2.4)).abs() < 1e-9, "got {score}");
}

#[test]
fn centre_attacks_count_against_the_attacker() {
    let pos =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1").unwrap();
    // the f3 knight hits d4 and e5
    assert_eq!(evaluate_minimax(&pos, true), -10.0);
}

#[test]
fn check_against_black_adds_contact_and_penalty() {
    let pos = Position::from_fen("7k/8/8/8/8/8/8/4K2Q b - - 0 1").unwrap();
    // queen 9, +2 attacking, +2 for the attacked black king,
    // e4 and d5 controlled (-10), black to move in check (+5)
    assert_eq!(evaluate_minimax(&pos, false), 8.0);
}

#[test]
fn evaluation_is_repeatable() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let first = evaluate_minimax(&pos, true);
    assert_eq!(first, evaluate_minimax(&pos, true));
    assert_eq!(MinimaxEval.evaluate(&pos, true), first);
}
