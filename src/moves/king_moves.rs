//! King step patterns, precomputed per square.

use crate::game_state::chess_types::{Square, SquareSet};

pub const KING_ATTACKS: [SquareSet; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> SquareSet {
    KING_ATTACKS[square.index()]
}

const fn generate_king_attacks() -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut df = -1;
        while df <= 1 {
            let mut dr = -1;
            while dr <= 1 {
                if df != 0 || dr != 0 {
                    attacks |= set_if_valid(file + df, rank + dr);
                }
                dr += 1;
            }
            df += 1;
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
    use super::king_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(Square::A1).len(), 3);
    }

    #[test]
    fn king_attacks_from_e4_has_eight_targets() {
        assert_eq!(king_attacks("e4".parse().expect("e4")).len(), 8);
    }
}
