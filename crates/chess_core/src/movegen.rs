use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    out.retain(|&mv| pos.leaves_king_safe(mv));
}

/// Legal moves of the piece standing on `from` (empty if it is not the mover's).
pub fn legal_moves_from(pos: &Position, from: u8) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    if let Some(pc) = pos.piece_at(from)
        && pc.color == pos.side_to_move
    {
        piece_moves(pos, from, pc, &mut out);
        out.retain(|&mv| pos.leaves_king_safe(mv));
    }
    out
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for sq in 0..64u8 {
        if let Some(pc) = pos.piece_at(sq)
            && pc.color == pos.side_to_move
        {
            piece_moves(pos, sq, pc, out);
        }
    }
}

fn piece_moves(pos: &Position, sq: u8, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, sq, pc.color, out),
        PieceKind::Knight => gen_steps(pos, sq, pc.color, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(pos, sq, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(pos, sq, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(pos, sq, pc.color, out, &DIAGONALS);
            gen_slider(pos, sq, pc.color, out, &ORTHOGONALS);
        }
        PieceKind::King => {
            gen_steps(pos, sq, pc.color, out, &KING_DELTAS);
            gen_castle(pos, sq, pc.color, out);
        }
    }
}

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(PROMOTIONS.iter().map(|&pk| Move::with_promo(from, to, pk)));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    // forward 1, then forward 2 from the start rank
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

struct CastleRoute {
    king_to: u8,
    /// Squares between king and rook that must be empty.
    empty: &'static [u8],
    /// Squares the king crosses or lands on, which must not be attacked.
    safe: &'static [u8],
}

const WHITE_KING_SIDE: CastleRoute = CastleRoute {
    king_to: 6,
    empty: &[5, 6],
    safe: &[5, 6],
};
const WHITE_QUEEN_SIDE: CastleRoute = CastleRoute {
    king_to: 2,
    empty: &[3, 2, 1],
    safe: &[3, 2],
};
const BLACK_KING_SIDE: CastleRoute = CastleRoute {
    king_to: 62,
    empty: &[61, 62],
    safe: &[61, 62],
};
const BLACK_QUEEN_SIDE: CastleRoute = CastleRoute {
    king_to: 58,
    empty: &[59, 58, 57],
    safe: &[59, 58],
};

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    // Must be on original king square
    let (king_from, routes) = match c {
        Color::White => (
            4u8,
            [(pos.castling.wk, WHITE_KING_SIDE), (pos.castling.wq, WHITE_QUEEN_SIDE)],
        ),
        Color::Black => (
            60u8,
            [(pos.castling.bk, BLACK_KING_SIDE), (pos.castling.bq, BLACK_QUEEN_SIDE)],
        ),
    };
    if from != king_from || pos.is_in_check(c) {
        return;
    }

    let enemy = c.other();
    for (allowed, route) in routes {
        if allowed
            && route.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && !route.safe.iter().any(|&s| pos.is_square_attacked(s, enemy))
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, route.king_to)
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
