//! FEN-to-GameState parser.
//!
//! Builds a validated [`GameState`] from a Forsyth-Edwards Notation string:
//! each side has exactly one king, no pawn stands on a back rank, and the
//! side not to move is not in check.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::DrawRules;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    parse_fen_with_rules(fen, DrawRules::default())
}

pub fn parse_fen_with_rules(fen: &str, draw_rules: DrawRules) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part, side_to_move)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid fullmove number: {fullmove_part}")))?;

    validate_position(&board, side_to_move)?;

    GameState::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
        draw_rules,
    )
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(&format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;
            let square = Square::new(file, rank)
                .map_err(|_| invalid(&format!("rank {} has too many files", rank + 1)))?;
            board.place(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank {} does not sum to 8 files", rank + 1)));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(invalid(&format!("invalid castling character: {ch}"))),
        }
    }
    Ok(rights)
}

fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square: Square = en_passant_part
        .parse()
        .map_err(|_| invalid(&format!("invalid en-passant square: {en_passant_part}")))?;

    // The target sits behind a pawn of the side that just moved.
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if square.rank() != expected_rank {
        return Err(invalid(&format!(
            "en-passant square {square} impossible with {side_to_move} to move"
        )));
    }
    Ok(Some(square))
}

fn validate_position(board: &Board, side_to_move: Color) -> ChessResult<()> {
    for color in Color::ALL {
        let kings = board.count(Piece::new(color, PieceKind::King));
        if kings != 1 {
            return Err(invalid(&format!("{color} must have exactly one king, found {kings}")));
        }
    }

    let stranded_pawn = board.pieces().any(|(square, piece)| {
        piece.kind == PieceKind::Pawn && (square.rank() == 0 || square.rank() == 7)
    });
    if stranded_pawn {
        return Err(invalid("pawns cannot stand on the first or eighth rank"));
    }

    let waiting = side_to_move.opposite();
    if is_king_in_check(board, waiting)? {
        return Err(invalid(&format!(
            "{waiting} is in check but it is {side_to_move}'s turn"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state, GameState::new_game());
        assert_eq!(game_state.side_to_move(), Color::White);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
    }

    #[test]
    fn parse_en_passant_and_clocks() {
        let game_state =
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
                .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square(), Some("e6".parse().expect("e6")));
        assert_eq!(game_state.fullmove_number(), 2);
    }

    #[test]
    fn rejects_malformed_fields() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_impossible_positions() {
        // Missing black king.
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // Two white kings.
        assert!(parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_err());
        // Black in check with White to move.
        assert!(parse_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1").is_err());
        // Pawn on the back rank.
        assert!(parse_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }
}
