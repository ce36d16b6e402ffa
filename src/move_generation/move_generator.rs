//! Pseudo-legal move dispatch.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Moves obeying piece movement rules for the piece on `square`, ignoring
/// whether they leave the mover's king in check. Castling is only produced
/// when its path is clear and unattacked.
///
/// Empty when `square` is empty or holds a piece of the side not to move.
pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<Move> {
    let mut out = Vec::new();
    let Some(piece) = game_state.board.piece_at(square) else {
        return out;
    };
    if piece.color != game_state.side_to_move {
        return out;
    }

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, square, &mut out),
        PieceKind::Knight => generate_knight_moves(game_state, square, &mut out),
        PieceKind::Bishop => generate_bishop_moves(game_state, square, &mut out),
        PieceKind::Rook => generate_rook_moves(game_state, square, &mut out),
        PieceKind::Queen => generate_queen_moves(game_state, square, &mut out),
        PieceKind::King => generate_king_moves(game_state, square, &mut out),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::pseudo_legal_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn pinned_piece_still_has_pseudo_moves() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("fen");
        let e2: Square = "e2".parse().expect("e2");
        assert_eq!(pseudo_legal_moves(&game, e2).len(), 6);
        assert!(game.legal_moves(e2).expect("moves").is_empty());
    }

    #[test]
    fn wrong_color_yields_nothing() {
        let game = GameState::new_game();
        assert!(pseudo_legal_moves(&game, Square::G8).is_empty());
        assert_eq!(pseudo_legal_moves(&game, Square::G1).len(), 2);
    }
}
