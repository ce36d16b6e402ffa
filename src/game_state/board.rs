//! Mailbox board: 64 optional pieces plus per-color occupancy caches.
//!
//! `place` and `remove` are the only writers and keep the caches in sync with
//! the slots, so two boards with the same pieces always compare equal.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    occupancy_by_color: [SquareSet; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
            occupancy_by_color: [SquareSet::EMPTY; 2],
        }
    }

    /// Standard initial array.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                if let (Some(back), Some(pawn)) = (
                    Square::from_index(color.back_rank() * 8 + file),
                    Square::from_index(color.pawn_start_rank() * 8 + file),
                ) {
                    board.place(back, Piece::new(color, *kind));
                    board.place(pawn, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Puts `piece` on `square`, replacing whatever stood there.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        self.squares[square.index()] = Some(piece);
        self.occupancy_by_color[piece.color.index()].insert(square);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed = self.squares[square.index()].take();
        if let Some(piece) = removed {
            self.occupancy_by_color[piece.color.index()].remove(square);
        }
        removed
    }

    /// Whether `square` holds a piece, optionally restricted to `by_color`.
    #[inline]
    pub fn is_occupied(&self, square: Square, by_color: Option<Color>) -> bool {
        match by_color {
            Some(color) => self.occupancy_by_color[color.index()].contains(square),
            None => self.occupancy().contains(square),
        }
    }

    pub fn find_king(&self, color: Color) -> ChessResult<Square> {
        self.occupancy_by_color[color.index()]
            .iter()
            .find(|square| self.piece_at(*square) == Some(Piece::new(color, PieceKind::King)))
            .ok_or_else(|| ChessError::InvariantViolation(format!("no {color} king on the board")))
    }

    #[inline]
    pub fn occupancy(&self) -> SquareSet {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    #[inline]
    pub fn occupancy_of(&self, color: Color) -> SquareSet {
        self.occupancy_by_color[color.index()]
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupancy()
            .into_iter()
            .filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, p)| *p == piece).count()
    }
}
