use crate::error::{FenError, RulesViolation};
use crate::movegen::legal_moves;
use crate::types::*;

pub type Mailbox = [Option<Piece>; 64];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

/// One applied move plus everything needed to take it back.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Ply {
    mv: Move,
    undo: Undo,
    /// Repetition key of the position the move was played from.
    key: u64,
}

/// Full game state. Moves are applied and taken back in strict stack order;
/// after a matching number of undos the value compares equal to what it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Mailbox,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<Ply>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights {
                wk: true,
                wq: true,
                bk: true,
                bq: true,
            },
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        };

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p
    }

    /// Forsyth-Edwards Notation parser used by tests, UCI setup and trials.
    /// The move counters are optional and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::InvalidPiece(ch)),
                    };
                    let square = sq(file, rank).ok_or(FenError::FileCount(8 - rank_idx))?;
                    board[square as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::FileCount(8 - rank_idx));
                }
            }
            if file != 8 {
                return Err(FenError::FileCount(8 - rank_idx));
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm_part.to_string())),
        };

        let mut castling = CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        };
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?)
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| FenError::Counter(halfmove_part.to_string()))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| FenError::Counter(fullmove_part.to_string()))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
        })
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        let ch = match pc.kind {
                            PieceKind::Pawn => 'p',
                            PieceKind::Knight => 'n',
                            PieceKind::Bishop => 'b',
                            PieceKind::Rook => 'r',
                            PieceKind::Queen => 'q',
                            PieceKind::King => 'k',
                        };
                        out.push(if pc.color == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        });
                    }
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Color::White { 'w' } else { 'b' });
        out.push(' ');
        let rights = [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ];
        if rights.iter().any(|(on, _)| *on) {
            out.extend(rights.iter().filter(|(on, _)| *on).map(|(_, c)| *c));
        } else {
            out.push('-');
        }
        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        king_square(&self.board, c)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Moves played since this position was set up, oldest first.
    pub fn history(&self) -> Vec<Move> {
        self.history.iter().map(|ply| ply.mv).collect()
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Sum of material values for one side (king excluded).
    pub fn material(&self, color: Color) -> f64 {
        self.board
            .iter()
            .flatten()
            .filter(|pc| pc.color == color)
            .map(|pc| pc.kind.material_value())
            .sum()
    }

    pub fn is_in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        square_attacked(&self.board, target, by)
    }

    /// Squares attacked by whatever stands on `from` (empty when vacant).
    /// Sliding rays stop at, and include, the first occupied square.
    pub fn attacks_from(&self, from: u8) -> Vec<u8> {
        let Some(pc) = self.piece_at(from) else {
            return Vec::new();
        };
        let f = file_of(from);
        let r = rank_of(from);
        let mut out = Vec::with_capacity(16);
        let steps = |deltas: &[(i8, i8)], out: &mut Vec<u8>| {
            out.extend(deltas.iter().filter_map(|(df, dr)| sq(f + df, r + dr)));
        };
        match pc.kind {
            PieceKind::Pawn => {
                let dr = if pc.color == Color::White { 1 } else { -1 };
                steps(&[(-1, dr), (1, dr)], &mut out);
            }
            PieceKind::Knight => steps(&KNIGHT_DELTAS, &mut out),
            PieceKind::King => steps(&KING_DELTAS, &mut out),
            PieceKind::Bishop => self.rays(from, &DIAGONALS, &mut out),
            PieceKind::Rook => self.rays(from, &ORTHOGONALS, &mut out),
            PieceKind::Queen => {
                self.rays(from, &DIAGONALS, &mut out);
                self.rays(from, &ORTHOGONALS, &mut out);
            }
        }
        out
    }

    fn rays(&self, from: u8, dirs: &[(i8, i8)], out: &mut Vec<u8>) {
        for (df, dr) in dirs {
            let mut f = file_of(from) + df;
            let mut r = rank_of(from) + dr;
            while let Some(to) = sq(f, r) {
                out.push(to);
                if self.piece_at(to).is_some() {
                    break;
                }
                f += df;
                r += dr;
            }
        }
    }

    /// Whether playing `mv` keeps the mover's own king out of check.
    /// Works on a scratch copy of the mailbox so the position is untouched.
    pub fn leaves_king_safe(&self, mv: Move) -> bool {
        let mut board = self.board;
        let Some(moved) = board[mv.from as usize] else {
            return false;
        };
        board[mv.from as usize] = None;
        if mv.is_en_passant
            && let Some(cs) = sq(file_of(mv.to), rank_of(mv.from))
        {
            board[cs as usize] = None;
        }
        board[mv.to as usize] = Some(moved);
        match king_square(&board, moved.color) {
            Some(ksq) => !square_attacked(&board, ksq, moved.color.other()),
            None => true,
        }
    }

    /// FNV hash over board, side, castling and en-passant for repetition detection.
    pub fn position_key(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h = h.wrapping_mul(0x100000001b3);
            h
        }

        let mut h = 0xcbf29ce484222325u64;
        h = mix(h, self.side_to_move.idx() as u64 + 1);
        h = mix(h, if self.castling.wk { 3 } else { 5 });
        h = mix(h, if self.castling.wq { 7 } else { 11 });
        h = mix(h, if self.castling.bk { 13 } else { 17 });
        h = mix(h, if self.castling.bq { 19 } else { 23 });
        if let Some(ep) = self.en_passant {
            h = mix(h, 29 + ep as u64);
        }
        for (i, square) in self.board.iter().enumerate() {
            let v = if let Some(pc) = square {
                // Offset keeps occupied squares distinct from empty ones.
                (i as u64) ^ ((pc.color.idx() as u64 + 1) << 6) ^ ((pc.kind as u64 + 1) << 9)
            } else {
                i as u64
            };
            h = mix(h, v);
        }
        h
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Current position has occurred at least three times in this game.
    pub fn is_threefold_repetition(&self) -> bool {
        let key = self.position_key();
        let earlier = self.history.iter().filter(|ply| ply.key == key).count();
        earlier + 1 >= 3
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        for (i, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    let shade = (file_of(i as u8) + rank_of(i as u8)) % 2;
                    bishop_shades[shade as usize] = true;
                }
                _ => return false,
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }

    /// Plays `mv` without legality checks and pushes it onto the history.
    pub(crate) fn make_move(&mut self, mv: Move) -> Result<(), RulesViolation> {
        let from = mv.from;
        let to = mv.to;
        let Some(moved) = self.piece_at(from) else {
            return Err(self.violation(mv));
        };
        let key = self.position_key();
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        // Handle en-passant capture
        let mut ep_captured_sq = None;
        if mv.is_en_passant
            && let Some(cs) = sq(file_of(to), rank_of(from))
        {
            captured = self.piece_at(cs);
            self.set_piece(cs, None);
            ep_captured_sq = Some(cs);
            reset_hmc = true;
        }

        // Move piece (promotion handled after)
        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        // Promotion
        if moved.kind == PieceKind::Pawn {
            let r = rank_of(to);
            if (moved.color == Color::White && r == 7) || (moved.color == Color::Black && r == 0) {
                let promo = mv.promo.unwrap_or(PieceKind::Queen);
                self.set_piece(
                    to,
                    Some(Piece {
                        color: moved.color,
                        kind: promo,
                    }),
                );
            }
        }

        // Castling rook move
        // White: e1->g1 rook h1->f1, e1->c1 rook a1->d1
        // Black: e8->g8 rook h8->f8, e8->c8 rook a8->d8
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares
                && let Some(rook) = self.piece_at(rf)
            {
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
                rook_move = Some((rf, rt));
            }
        }

        // Update castling rights if king/rook moved or rook captured
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 0 {
                        self.castling.wq = false;
                    }
                    if from == 7 {
                        self.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 56 {
                        self.castling.bq = false;
                    }
                    if from == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }
        // If rook captured on its home square, remove right
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            match cp.color {
                Color::White => {
                    if to == 0 {
                        self.castling.wq = false;
                    }
                    if to == 7 {
                        self.castling.wk = false;
                    }
                }
                Color::Black => {
                    if to == 56 {
                        self.castling.bq = false;
                    }
                    if to == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }

        // Double pawn push sets en-passant square
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(from);
            let tr = rank_of(to);
            if (moved.color == Color::White && fr == 1 && tr == 3)
                || (moved.color == Color::Black && fr == 6 && tr == 4)
            {
                // ep square is the square passed over
                self.en_passant = sq(file_of(from), (fr + tr) / 2);
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        // Switch side
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        self.history.push(Ply {
            mv,
            undo: Undo {
                captured,
                castling: prev_castling,
                en_passant: prev_ep,
                halfmove_clock: prev_hmc,
                fullmove_number: prev_fmn,
                moved_piece: moved,
                rook_move,
                ep_captured_sq,
            },
            key,
        });
        Ok(())
    }

    /// Takes back the most recent move, returning it.
    pub(crate) fn unmake_move(&mut self) -> Option<Move> {
        let Ply { mv, undo, .. } = self.history.pop()?;

        // Restore side
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        // Undo castling rook move
        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Move piece back; a promoted piece reverts to the pawn that moved
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        // Restore captured piece
        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
        Some(mv)
    }

    pub(crate) fn violation(&self, mv: Move) -> RulesViolation {
        RulesViolation::IllegalMove {
            mv: mv.to_string(),
            fen: self.to_fen(),
        }
    }

    /// Resolves caller-supplied squares/promotion against the legal list so
    /// castle and en-passant flags come from the generator.
    pub fn resolve_legal(&self, mv: Move) -> Option<Move> {
        legal_moves(self).into_iter().find(|m| {
            m.from == mv.from
                && m.to == mv.to
                && (m.promo == mv.promo
                    || (mv.promo.is_none() && m.promo == Some(PieceKind::Queen)))
        })
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn king_square(board: &Mailbox, c: Color) -> Option<u8> {
    board
        .iter()
        .position(|pc| *pc == Some(Piece { color: c, kind: PieceKind::King }))
        .map(|i| i as u8)
}

pub(crate) fn square_attacked(board: &Mailbox, target: u8, by: Color) -> bool {
    let piece_at = |s: u8| board[s as usize];
    let tf = file_of(target);
    let tr = rank_of(target);

    // Pawn attacks: the attacking pawn sits one rank behind the target
    // from its own point of view.
    let pawn_dirs: &[(i8, i8)] = match by {
        Color::White => &[(-1, -1), (1, -1)],
        Color::Black => &[(-1, 1), (1, 1)],
    };
    let hits = |deltas: &[(i8, i8)], kind: PieceKind| {
        deltas.iter().any(|(df, dr)| {
            sq(tf + df, tr + dr)
                .and_then(piece_at)
                .is_some_and(|pc| pc.color == by && pc.kind == kind)
        })
    };
    if hits(pawn_dirs, PieceKind::Pawn)
        || hits(&KNIGHT_DELTAS, PieceKind::Knight)
        || hits(&KING_DELTAS, PieceKind::King)
    {
        return true;
    }

    // Sliding: bishop/rook/queen
    let slides = |dirs: &[(i8, i8)], kind: PieceKind| {
        dirs.iter().any(|(df, dr)| {
            let mut f = tf + df;
            let mut r = tr + dr;
            while let Some(sq2) = sq(f, r) {
                if let Some(pc) = piece_at(sq2) {
                    return pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen);
                }
                f += df;
                r += dr;
            }
            false
        })
    };
    slides(&DIAGONALS, PieceKind::Bishop) || slides(&ORTHOGONALS, PieceKind::Rook)
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
