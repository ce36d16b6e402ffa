use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    push_target_moves(&game_state.board, from, side, knight_attacks(from), out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_knight_has_two_moves() {
        let game = GameState::new_game();
        let mut out = Vec::new();
        generate_knight_moves(&game, Square::G1, &mut out);
        assert_eq!(out.len(), 2);
    }
}
