//! Bishop rays over the mailbox board.

use crate::game_state::chess_types::{Square, SquareSet};
use crate::moves::rook_moves::trace_ray;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: SquareSet) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    for (file_step, rank_step) in BISHOP_DIRECTIONS {
        attacks |= trace_ray(square, file_step, rank_step, occupancy);
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::bishop_attacks;
    use crate::game_state::chess_types::{Square, SquareSet};

    #[test]
    fn bishop_from_d4_on_empty_board() {
        assert_eq!(bishop_attacks("d4".parse().expect("d4"), SquareSet::EMPTY).len(), 13);
    }

    #[test]
    fn bishop_ray_stops_at_blocker() {
        let c3: Square = "c3".parse().expect("c3");
        let attacks = bishop_attacks(Square::A1, SquareSet::from_square(c3));
        assert_eq!(attacks.len(), 2);
        assert!(!attacks.contains(Square::H8));
    }
}
