use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    push_target_moves(&game_state.board, from, side, king_attacks(from), out);
    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let board = &game_state.board;
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    if king_from.rank() != side.back_rank() || king_from.file() != 4 {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for (castle_side, flag) in [
        (CastleSide::KingSide, MoveFlag::CastleKing),
        (CastleSide::QueenSide, MoveFlag::CastleQueen),
    ] {
        if !game_state.castling_rights.has(side, castle_side) {
            continue;
        }
        if board.piece_at(castle_side.rook_home(side)) != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }
        if castle_side
            .between(side)
            .iter()
            .any(|square| board.is_occupied(*square, None))
        {
            continue;
        }
        if castle_side
            .king_path(side)
            .iter()
            .any(|square| is_square_attacked(board, *square, enemy))
        {
            continue;
        }

        let (king_to, _) = castle_side.destinations(side);
        out.push(Move::new(king_from, king_to, flag));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::chess_types::*;

    fn king_moves(fen: &str) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("fen");
        let from = game.board().find_king(game.side_to_move()).expect("king");
        let mut out = Vec::new();
        generate_king_moves(&game, from, &mut out);
        out
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&Move::new(Square::E1, Square::G1, MoveFlag::CastleKing)));
        assert!(moves.contains(&Move::new(Square::E1, Square::C1, MoveFlag::CastleQueen)));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        let moves = king_moves("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
        assert!(!moves.iter().any(|mv| mv.flag == MoveFlag::CastleKing));
    }

    #[test]
    fn no_castling_onto_attacked_square() {
        let fen = "r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1";
        let moves = king_moves(fen);
        assert!(!moves.iter().any(|mv| mv.flag == MoveFlag::CastleKing));
        assert!(moves.iter().any(|mv| mv.flag == MoveFlag::CastleQueen));

        let game = GameState::from_fen(fen).expect("fen");
        let legal = game.legal_moves(Square::E1).expect("moves");
        assert!(!legal.iter().any(|mv| mv.to == Square::G1));

        let moves = king_moves("r3k2r/8/8/8/8/8/2r5/R3K2R w KQkq - 0 1");
        assert!(!moves.iter().any(|mv| mv.flag == MoveFlag::CastleQueen));
        assert!(moves.iter().any(|mv| mv.flag == MoveFlag::CastleKing));
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_blocked() {
        let attacked = king_moves("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(attacked.iter().any(|mv| mv.flag == MoveFlag::CastleQueen));

        let blocked = king_moves("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!blocked.iter().any(|mv| mv.flag == MoveFlag::CastleQueen));
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = king_moves("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
        assert!(!moves.iter().any(|mv| mv.is_castle()));
    }

    #[test]
    fn lost_right_means_no_castle() {
        let moves = king_moves("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1");
        assert!(!moves.iter().any(|mv| mv.flag == MoveFlag::CastleKing));
        assert!(moves.iter().any(|mv| mv.flag == MoveFlag::CastleQueen));
    }
}
