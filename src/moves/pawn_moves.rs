//! Pawn capture patterns per color.

use crate::game_state::chess_types::{Color, Square, SquareSet};

/// The (at most two) squares a pawn of `color` on `square` captures onto.
pub fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    [-1i8, 1]
        .into_iter()
        .filter_map(|file_delta| square.offset(file_delta, color.forward()))
        .collect()
}
