//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a fixed-seed `StdRng`, so hashes are deterministic across
//! runs, which keeps repetition tests reproducible.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Key of a position: placement, side to move, castling rights and, when a
/// capture is actually available, the en-passant file.
pub fn position_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for (square, piece) in board.pieces() {
        key ^= tables.piece_square[piece.color.index()][piece.kind.index()][square.index()];
    }

    if side_to_move == Color::Black {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[castling_rights.bits()];

    if let Some(target) = en_passant_square {
        if en_passant_capture_available(board, side_to_move, target) {
            key ^= tables.en_passant_file[target.file() as usize];
        }
    }

    key
}

// A target nobody can capture onto does not distinguish positions.
fn en_passant_capture_available(board: &Board, side_to_move: Color, target: Square) -> bool {
    let pawn = Piece::new(side_to_move, PieceKind::Pawn);
    let behind = -side_to_move.forward();
    [-1i8, 1]
        .into_iter()
        .filter_map(|file_delta| target.offset(file_delta, behind))
        .any(|square| board.piece_at(square) == Some(pawn))
}

#[cfg(test)]
mod tests {
    use super::position_key;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let board = Board::starting_position();
        assert_eq!(
            position_key(&board, Color::White, CastlingRights::ALL, None),
            position_key(&board, Color::White, CastlingRights::ALL, None)
        );
    }

    #[test]
    fn side_to_move_and_rights_change_hash() {
        let board = Board::starting_position();
        let base = position_key(&board, Color::White, CastlingRights::ALL, None);
        assert_ne!(base, position_key(&board, Color::Black, CastlingRights::ALL, None));
        assert_ne!(base, position_key(&board, Color::White, CastlingRights::NONE, None));
    }

    #[test]
    fn uncapturable_en_passant_target_is_ignored() {
        let mut board = Board::empty();
        board.place(Square::E1, Piece::new(Color::White, PieceKind::King));
        board.place(Square::E8, Piece::new(Color::Black, PieceKind::King));
        let e4: Square = "e4".parse().expect("e4");
        let e3: Square = "e3".parse().expect("e3");
        board.place(e4, Piece::new(Color::White, PieceKind::Pawn));

        let without = position_key(&board, Color::Black, CastlingRights::NONE, None);
        let with = position_key(&board, Color::Black, CastlingRights::NONE, Some(e3));
        assert_eq!(without, with);

        board.place("d4".parse().expect("d4"), Piece::new(Color::Black, PieceKind::Pawn));
        let without = position_key(&board, Color::Black, CastlingRights::NONE, None);
        let with = position_key(&board, Color::Black, CastlingRights::NONE, Some(e3));
        assert_ne!(without, with);
    }
}
