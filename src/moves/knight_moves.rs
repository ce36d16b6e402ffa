//! Knight jump patterns, precomputed per square.

use crate::game_state::chess_types::{Square, SquareSet};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [SquareSet; 64] = generate_knight_attacks();

/// Squares a knight on `square` jumps to, regardless of occupancy.
#[inline]
pub const fn knight_attacks(square: Square) -> SquareSet {
    KNIGHT_ATTACKS[square.index()]
}

const fn generate_knight_attacks() -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut i = 0usize;
        while i < KNIGHT_OFFSETS.len() {
            let (df, dr) = KNIGHT_OFFSETS[i];
            attacks |= set_if_valid(file + df, rank + dr);
            i += 1;
        }

        table[sq] = SquareSet(attacks);
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + (file as usize))
}

#[cfg(test)]
mod tests {
    use super::knight_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_from_d4_has_eight_targets() {
        let d4: Square = "d4".parse().expect("d4");
        assert_eq!(knight_attacks(d4).len(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        let targets = knight_attacks(Square::A1);
        assert_eq!(targets.len(), 2);
        assert!(targets.contains("b3".parse().expect("b3")));
        assert!(targets.contains("c2".parse().expect("c2")));
    }
}
