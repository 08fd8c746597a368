use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_moves_from_single_square() {
    let pos = Position::startpos();
    // Knight on g1 has two jumps, the blocked rook on h1 has none
    assert_eq!(legal_moves_from(&pos, coord_to_sq("g1").unwrap()).len(), 2);
    assert!(legal_moves_from(&pos, coord_to_sq("h1").unwrap()).is_empty());
    // Black pieces are not movable while white is to move
    assert!(legal_moves_from(&pos, coord_to_sq("g8").unwrap()).is_empty());
}

#[test]
fn test_promotions_generated_for_each_piece() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promos: Vec<_> = legal_moves(&pos).into_iter().filter_map(|m| m.promo).collect();
    assert_eq!(promos.len(), 4);
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Bishop on e2 is pinned against the king by the rook on e8
    let pos = Position::from_fen("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, coord_to_sq("e2").unwrap()).is_empty());
}

#[test]
fn test_en_passant_flagged() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep: Vec<_> = legal_moves(&pos).into_iter().filter(|m| m.is_en_passant).collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].to, coord_to_sq("d6").unwrap());
}
