//! Rook rays over the mailbox board.

use crate::game_state::chess_types::{Square, SquareSet};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Squares a rook on `square` reaches, stopping on (and including) the first
/// occupied square of each ray.
#[inline]
pub fn rook_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    for (file_step, rank_step) in ROOK_DIRECTIONS {
        attacks |= trace_ray(square, file_step, rank_step, occupancy);
    }
    attacks
}

pub(crate) fn trace_ray(
    square: Square,
    file_step: i8,
    rank_step: i8,
    occupancy: SquareSet,
) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    let mut cursor = square.offset(file_step, rank_step);

    while let Some(target) = cursor {
        attacks.insert(target);
        if occupancy.contains(target) {
            break;
        }
        cursor = target.offset(file_step, rank_step);
    }

    attacks
}
