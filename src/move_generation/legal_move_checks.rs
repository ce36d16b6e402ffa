use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{attacks_from, squares_with};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn is_in_check(game_state: &GameState, color: Color) -> ChessResult<bool> {
    is_king_in_check(&game_state.board, color)
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> ChessResult<bool> {
    let king_square = board.find_king(color)?;
    Ok(is_square_attacked(board, king_square, color.opposite()))
}

/// Whether any `attacker_color` piece attacks `square`. The square's own
/// occupant is irrelevant.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let occupancy = board.occupancy();

    // A pawn attacks `square` exactly when a pawn of the other color on
    // `square` would attack the pawn.
    let pawns = squares_with(board, attacker_color, &[PieceKind::Pawn]);
    if !(pawn_attacks(attacker_color.opposite(), square) & pawns).is_empty() {
        return true;
    }

    let knights = squares_with(board, attacker_color, &[PieceKind::Knight]);
    if !(knight_attacks(square) & knights).is_empty() {
        return true;
    }

    let kings = squares_with(board, attacker_color, &[PieceKind::King]);
    if !(king_attacks(square) & kings).is_empty() {
        return true;
    }

    let bishops_queens = squares_with(board, attacker_color, &[PieceKind::Bishop, PieceKind::Queen]);
    if !(bishop_attacks(square, occupancy) & bishops_queens).is_empty() {
        return true;
    }

    let rooks_queens = squares_with(board, attacker_color, &[PieceKind::Rook, PieceKind::Queen]);
    !(rook_attacks(square, occupancy) & rooks_queens).is_empty()
}

/// Union of every square attacked by `attacker_color`.
pub fn attacked_squares(board: &Board, attacker_color: Color) -> SquareSet {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == attacker_color)
        .fold(SquareSet::EMPTY, |attacked, (square, piece)| {
            attacked | attacks_from(board, square, piece)
        })
}
