//! Coordinate notation (`e2e4`, `e7e8q`).
//!
//! Rendering is [`Move`]'s `Display`; parsing resolves the move flag from the
//! legal moves of the given state.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;

/// Whether `text` has the shape of a coordinate move, legal or not.
pub fn is_long_algebraic(text: &str) -> bool {
    let bytes = text.as_bytes();
    let square_at = |i: usize| {
        (b'a'..=b'h').contains(&bytes[i].to_ascii_lowercase()) && (b'1'..=b'8').contains(&bytes[i + 1])
    };
    match bytes.len() {
        4 => square_at(0) && square_at(2),
        5 => square_at(0) && square_at(2) && b"qrbnQRBN".contains(&bytes[4]),
        _ => false,
    }
}

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if !is_long_algebraic(text) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid coordinate move: {long_algebraic}"
        )));
    }

    let from: Square = text[0..2].parse()?;
    let to: Square = text[2..4].parse()?;
    let promotion = text[4..].chars().next().and_then(PieceKind::from_letter);

    let candidates: Vec<Move> = game_state
        .legal_moves(from)?
        .into_iter()
        .filter(|mv| mv.to == to)
        .collect();

    if let Some(mv) = candidates.iter().find(|mv| mv.promotion == promotion) {
        return Ok(*mv);
    }
    if promotion.is_none() && !candidates.is_empty() {
        return Err(ChessError::AmbiguousMove(format!(
            "{text} needs a promotion piece (q, r, b or n)"
        )));
    }

    let attempted = match promotion {
        Some(kind) => Move::promoting(from, to, kind),
        None => Move::new(from, to, MoveFlag::Normal),
    };
    Err(ChessError::IllegalMove(attempted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_flags_from_legal_moves() {
        let game = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &game).expect("e2e4");
        assert_eq!(mv.flag, MoveFlag::DoublePawnPush);
        assert_eq!(mv.to_string(), "e2e4");

        let castle_ready =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
        let castle = long_algebraic_to_move("e1c1", &castle_ready).expect("e1c1");
        assert_eq!(castle.flag, MoveFlag::CastleQueen);
    }

    #[test]
    fn promotion_piece_is_required() {
        let game = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        assert!(matches!(
            long_algebraic_to_move("b7b8", &game),
            Err(ChessError::AmbiguousMove(_))
        ));
        let mv = long_algebraic_to_move("b7b8n", &game).expect("b7b8n");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_bad_text_and_illegal_moves() {
        let game = GameState::new_game();
        assert!(matches!(
            long_algebraic_to_move("e2e9", &game),
            Err(ChessError::InvalidNotation(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("e2e5", &game),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(!is_long_algebraic("Nf3"));
    }
}
