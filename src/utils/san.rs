//! Standard Algebraic Notation.
//!
//! Input is forgiving: hyphens and whitespace are dropped, `x` and trailing
//! `+`, `#`, `!`, `?` are optional, and castling may be spelled with `O`,
//! `o` or `0`. Output follows PGN conventions.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::commit_move;
use crate::utils::long_algebraic::{is_long_algebraic, long_algebraic_to_move};

/// Parsed SAN before it is matched against the legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanText {
    Castle(CastleSide),
    Ordinary {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

/// Accepts coordinate notation or SAN.
pub fn parse_move(text: &str, game_state: &GameState) -> ChessResult<Move> {
    let trimmed = text.trim();
    if is_long_algebraic(trimmed) {
        if let Ok(mv) = long_algebraic_to_move(trimmed, game_state) {
            return Ok(mv);
        }
    }
    parse_san(trimmed, game_state)
}

pub fn parse_san(san: &str, game_state: &GameState) -> ChessResult<Move> {
    match tokenize(san)? {
        SanText::Castle(side) => find_castle(san, side, game_state),
        SanText::Ordinary {
            kind,
            from_file,
            from_rank,
            to,
            promotion,
        } => {
            let candidates: Vec<Move> = game_state
                .all_legal_moves()?
                .into_iter()
                .filter(|mv| mv.to == to)
                .filter(|mv| game_state.piece_at(mv.from).map(|piece| piece.kind) == Some(kind))
                .filter(|mv| from_file.map_or(true, |file| mv.from.file() == file))
                .filter(|mv| from_rank.map_or(true, |rank| mv.from.rank() == rank))
                .collect();

            let matching: Vec<Move> = candidates
                .iter()
                .copied()
                .filter(|mv| mv.promotion == promotion)
                .collect();

            match matching.as_slice() {
                [mv] => Ok(*mv),
                [] if promotion.is_none() && !candidates.is_empty() => Err(
                    ChessError::AmbiguousMove(format!("{san}: choose a promotion piece (Q, R, B or N)")),
                ),
                [] => Err(ChessError::InvalidNotation(format!("{san} is not a possible move"))),
                _ => Err(ChessError::AmbiguousMove(format!("{san}: be more specific"))),
            }
        }
    }
}

fn find_castle(san: &str, side: CastleSide, game_state: &GameState) -> ChessResult<Move> {
    let color = game_state.side_to_move();
    let king = game_state.board().find_king(color)?;
    let (king_to, _) = side.destinations(color);
    game_state
        .legal_moves(king)?
        .into_iter()
        .find(|mv| mv.flag.castle_side() == Some(side) && mv.to == king_to)
        .ok_or_else(|| ChessError::InvalidNotation(format!("{san}: castling is not possible")))
}

fn tokenize(san: &str) -> ChessResult<SanText> {
    let invalid = || ChessError::InvalidNotation(format!("cannot read move '{san}'"));

    let cleaned: Vec<char> = san
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();
    let mut end = cleaned.len();
    while end > 0 && matches!(cleaned[end - 1], '+' | '#' | '!' | '?') {
        end -= 1;
    }
    let body = &cleaned[..end];

    if body.len() >= 2 && body.iter().all(|ch| matches!(ch, 'O' | 'o' | '0')) {
        return match body.len() {
            2 => Ok(SanText::Castle(CastleSide::KingSide)),
            3 => Ok(SanText::Castle(CastleSide::QueenSide)),
            _ => Err(invalid()),
        };
    }

    let (kind, mut rest) = match body.split_first() {
        Some((ch, tail)) if ch.is_ascii_uppercase() => {
            (PieceKind::from_letter(*ch).ok_or_else(invalid)?, tail)
        }
        _ => (PieceKind::Pawn, body),
    };

    let mut promotion = None;
    if let Some((ch, head)) = rest.split_last() {
        if ch.is_ascii_uppercase() {
            let promoted = PieceKind::from_letter(*ch)
                .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
                .ok_or_else(invalid)?;
            promotion = Some(promoted);
            rest = head.strip_suffix(&['=']).unwrap_or(head);
        }
    }

    let (head, destination) = match rest.len() {
        n if n >= 2 => rest.split_at(n - 2),
        _ => return Err(invalid()),
    };
    let to: Square = destination.iter().collect::<String>().parse().map_err(|_| invalid())?;
    let head = head.strip_suffix(&['x']).unwrap_or(head);

    let mut from_file = None;
    let mut from_rank = None;
    let mut disambiguation = head.iter().peekable();
    if let Some(ch) = disambiguation.next_if(|ch| ('a'..='h').contains(*ch)) {
        from_file = Some(*ch as u8 - b'a');
    }
    if let Some(ch) = disambiguation.next_if(|ch| ('1'..='8').contains(*ch)) {
        from_rank = Some(*ch as u8 - b'1');
    }
    if disambiguation.next().is_some() {
        return Err(invalid());
    }

    Ok(SanText::Ordinary {
        kind,
        from_file,
        from_rank,
        to,
        promotion,
    })
}

/// SAN for a legal `mv`, with minimal disambiguation and `+` / `#` markers.
pub fn move_to_san(game_state: &GameState, mv: Move) -> ChessResult<String> {
    let legal = game_state.all_legal_moves()?;
    if !legal.contains(&mv) {
        return Err(ChessError::IllegalMove(mv));
    }
    let piece = game_state
        .piece_at(mv.from)
        .ok_or_else(|| ChessError::InvariantViolation(format!("no piece on {}", mv.from)))?;

    let mut out = String::new();
    match mv.flag.castle_side() {
        Some(CastleSide::KingSide) => out.push_str("O-O"),
        Some(CastleSide::QueenSide) => out.push_str("O-O-O"),
        None => {
            let is_capture =
                game_state.board().is_occupied(mv.to, None) || mv.flag == MoveFlag::EnPassantCapture;

            if piece.kind == PieceKind::Pawn {
                if is_capture {
                    out.push(mv.from.file_char());
                }
            } else {
                out.push(piece.kind.letter());
                out.push_str(&disambiguation(game_state, &legal, mv, piece.kind));
            }
            if is_capture {
                out.push('x');
            }
            out.push_str(&mv.to.to_string());
            if let Some(kind) = mv.promotion {
                out.push('=');
                out.push(kind.letter());
            }
        }
    }

    let next = commit_move(game_state, mv)?;
    match next.outcome() {
        Outcome::Checkmate { .. } => out.push('#'),
        _ if next.is_in_check(next.side_to_move())? => out.push('+'),
        _ => {}
    }
    Ok(out)
}

fn disambiguation(game_state: &GameState, legal: &[Move], mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .filter(|other| game_state.piece_at(other.from).map(|piece| piece.kind) == Some(kind))
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|square| square.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|square| square.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}
