//! Compact set of squares backed by a 64-bit mask (`bit 0 == a1`).
//!
//! Used for occupancy caches and attacked-square sets.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn from_square(square: Square) -> Self {
        SquareSet(1u64 << square.index())
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl Not for SquareSet {
    type Output = SquareSet;

    fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::game_state::chess_types::Square;

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [Square::H8, Square::A1, Square::E1].into_iter().collect();
        assert_eq!(set.len(), 3);
        let squares: Vec<Square> = set.iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E1, Square::H8]);
    }

    #[test]
    fn insert_and_remove() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::D1);
        assert!(set.contains(Square::D1));
        set.remove(Square::D1);
        assert!(set.is_empty());
    }
}
