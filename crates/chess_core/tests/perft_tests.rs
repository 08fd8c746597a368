use rayon::prelude::*;

use chess_core::{Position, Rules, perft};

/// (FEN, [(depth, expected nodes)])
const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902)],
    ),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039)],
    ),
    (
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[(1, 14), (2, 191), (3, 2_812)],
    ),
    (
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264)],
    ),
];

#[test]
fn perft_known_positions() {
    CASES.par_iter().for_each(|(fen, depths)| {
        for (depth, expected) in depths.iter() {
            let mut pos = Position::from_fen(fen).unwrap();
            let got = perft(&mut pos, *depth);
            assert!(
                got == *expected,
                "Perft mismatch for FEN '{}' at depth {}: expected {}, got {}",
                fen,
                depth,
                expected,
                got
            );
        }
    });
}

#[test]
fn perft_leaves_position_untouched() {
    CASES.par_iter().for_each(|(fen, _)| {
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        perft(&mut pos, 3);
        assert_eq!(pos, before);
        assert_eq!(pos.to_fen(), before.to_fen());
    });
}

#[test]
fn apply_then_undo_sequence_restores_serialized_form() {
    // Walk the first legal move repeatedly, then unwind the whole stack
    for fen in CASES.iter().map(|(fen, _)| *fen) {
        let mut pos = Position::from_fen(fen).unwrap();
        let start = pos.to_fen();
        let mut snapshots = vec![pos.to_fen()];
        for _ in 0..10 {
            let Some(first) = pos.legal_moves().first().copied() else {
                break;
            };
            pos.apply(first).unwrap();
            snapshots.push(pos.to_fen());
        }
        while pos.undo().is_some() {
            snapshots.pop();
            assert_eq!(Some(&pos.to_fen()), snapshots.last());
        }
        assert_eq!(pos.to_fen(), start);
    }
}
