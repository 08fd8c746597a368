use thiserror::Error;

use crate::board::Position;
use crate::error::{FenError, RulesViolation};
use crate::rules::Rules;
use crate::types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UciPositionError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("unparseable move '{0}'")]
    BadMove(String),
    #[error(transparent)]
    Rules(#[from] RulesViolation),
}

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(match p {
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        });
    }
    s
}

/// Parses long algebraic text and matches it against the legal moves so the
/// castle / en-passant flags are correct. A missing promotion letter means
/// a queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4).map(u8::to_ascii_lowercase) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return None,
    };
    pos.resolve_legal(Move {
        promo,
        ..Move::new(from, to)
    })
}

/// Handles the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), UciPositionError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let setup = &args[..moves_at.unwrap_or(args.len())];

    let mut next = match setup.first() {
        Some(&"fen") => Position::from_fen(&setup[1..].join(" "))?,
        _ => Position::startpos(),
    };

    if let Some(idx) = moves_at {
        for txt in &args[idx + 1..] {
            let mv = parse_uci_move(&next, txt)
                .ok_or_else(|| UciPositionError::BadMove(txt.to_string()))?;
            next.apply(mv)?;
        }
    }
    *pos = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
