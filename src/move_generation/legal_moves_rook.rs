use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_rook_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let board = &game_state.board;
    let targets = rook_attacks(from, board.occupancy());
    push_target_moves(board, from, game_state.side_to_move, targets, out);
}
