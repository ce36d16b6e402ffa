use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Squares attacked by `piece` standing on `square`. Pawns attack diagonally
/// only; castling never attacks anything.
#[inline]
pub fn attacks_from(board: &Board, square: Square, piece: Piece) -> SquareSet {
    let occupancy = board.occupancy();
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}

/// Squares holding a `color` piece of one of `kinds`.
pub fn squares_with(board: &Board, color: Color, kinds: &[PieceKind]) -> SquareSet {
    board
        .occupancy_of(color)
        .iter()
        .filter(|square| {
            board
                .piece_at(*square)
                .is_some_and(|piece| kinds.contains(&piece.kind))
        })
        .collect()
}

/// Pushes a plain move to every target not held by the mover's own side.
#[inline]
pub fn push_target_moves(
    board: &Board,
    from: Square,
    color: Color,
    targets: SquareSet,
    out: &mut Vec<Move>,
) {
    let reachable = targets & !board.occupancy_of(color);
    out.extend(
        reachable
            .into_iter()
            .map(|to| Move::new(from, to, MoveFlag::Normal)),
    );
}

/// Moves pieces for `mv` on `board` without touching clocks or rights and
/// returns the captured piece. Shared by the executor and the legality
/// filter's scratch boards.
pub(crate) fn move_pieces(board: &mut Board, mv: Move, moving: Piece) -> Option<Piece> {
    board.remove(mv.from);

    let captured = match mv.flag {
        MoveFlag::EnPassantCapture => mv
            .to
            .offset(0, -moving.color.forward())
            .and_then(|victim| board.remove(victim)),
        _ => board.remove(mv.to),
    };

    let placed = match mv.promotion {
        Some(kind) => Piece::new(moving.color, kind),
        None => moving,
    };
    board.place(mv.to, placed);

    if let Some(side) = mv.flag.castle_side() {
        let (_, rook_to) = side.destinations(moving.color);
        if let Some(rook) = board.remove(side.rook_home(moving.color)) {
            board.place(rook_to, rook);
        }
    }

    captured
}

#[cfg(test)]
mod tests {
    use super::{move_pieces, squares_with};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn castling_moves_the_rook_too() {
        let mut board = Board::empty();
        let king = Piece::new(Color::White, PieceKind::King);
        board.place(Square::E1, king);
        board.place(Square::H1, Piece::new(Color::White, PieceKind::Rook));

        let captured = move_pieces(
            &mut board,
            Move::new(Square::E1, Square::G1, MoveFlag::CastleKing),
            king,
        );

        assert_eq!(captured, None);
        assert_eq!(board.piece_at(Square::G1), Some(king));
        assert_eq!(
            board.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(board.piece_at(Square::H1), None);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut board = Board::empty();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let e5: Square = "e5".parse().expect("e5");
        let d5: Square = "d5".parse().expect("d5");
        let d6: Square = "d6".parse().expect("d6");
        board.place(e5, pawn);
        board.place(d5, Piece::new(Color::Black, PieceKind::Pawn));

        let captured = move_pieces(&mut board, Move::new(e5, d6, MoveFlag::EnPassantCapture), pawn);

        assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(board.piece_at(d5), None);
        assert_eq!(board.piece_at(d6), Some(pawn));
    }

    #[test]
    fn squares_with_filters_by_kind() {
        let board = Board::starting_position();
        let sliders = squares_with(&board, Color::Black, &[PieceKind::Rook, PieceKind::Queen]);
        assert_eq!(sliders.len(), 3);
        assert!(sliders.contains(Square::D8));
    }
}
