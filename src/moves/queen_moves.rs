use crate::game_state::chess_types::{Square, SquareSet};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}
