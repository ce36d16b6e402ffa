use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Snapshot of everything a move changes, pushed by the executor and popped
/// by `undo`. History is not copied; it is popped alongside. The outcome
/// is recomputed on undo under the draw rules then in force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_board: Board,
    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}

impl UndoState {
    pub fn capture(game_state: &GameState, mv: Move) -> Self {
        Self {
            mv,
            prev_board: game_state.board,
            prev_side_to_move: game_state.side_to_move,
            prev_castling_rights: game_state.castling_rights,
            prev_en_passant_square: game_state.en_passant_square,
            prev_halfmove_clock: game_state.halfmove_clock,
            prev_fullmove_number: game_state.fullmove_number,
        }
    }
}
