use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let board = &game_state.board;
    let side = game_state.side_to_move;
    let forward = side.forward();

    if let Some(one_step) = from.offset(0, forward) {
        if !board.is_occupied(one_step, None) {
            push_pawn_move(from, one_step, side, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if !board.is_occupied(two_step, None) {
                        out.push(Move::new(from, two_step, MoveFlag::DoublePawnPush));
                    }
                }
            }
        }
    }

    for to in pawn_attacks(side, from) {
        if board.is_occupied(to, Some(side.opposite())) {
            push_pawn_move(from, to, side, out);
        } else if game_state.en_passant_square == Some(to) && passed_pawn_behind(game_state, to) {
            out.push(Move::new(from, to, MoveFlag::EnPassantCapture));
        }
    }
}

// The pawn that just double-stepped must still sit behind the target.
fn passed_pawn_behind(game_state: &GameState, target: Square) -> bool {
    let side = game_state.side_to_move;
    target
        .offset(0, -side.forward())
        .and_then(|square| game_state.board.piece_at(square))
        == Some(Piece::new(side.opposite(), PieceKind::Pawn))
}

#[inline]
fn push_pawn_move(from: Square, to: Square, side: Color, out: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            out.push(Move::promoting(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to, MoveFlag::Normal));
    }
}
