//! Legal move generation and outcome evaluation.
//!
//! Pseudo-legal candidates from [`pseudo_legal_moves`] are simulated on a
//! scratch board; any move leaving the mover's king attacked is dropped.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::move_pieces;
use crate::move_generation::move_generator::pseudo_legal_moves;

/// Legal moves of the side-to-move piece on `square`. Empty for empty
/// squares and opponent pieces.
pub fn legal_moves(game_state: &GameState, square: Square) -> ChessResult<Vec<Move>> {
    let pseudo = pseudo_legal_moves(game_state, square);
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if leaves_king_safe(&game_state.board, mv, game_state.side_to_move)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

/// Every legal move of the side to move, grouped by origin square a1..h8.
pub fn all_legal_moves(game_state: &GameState) -> ChessResult<Vec<Move>> {
    let mut legal = Vec::with_capacity(64);
    for square in game_state.board.occupancy_of(game_state.side_to_move) {
        legal.extend(legal_moves(game_state, square)?);
    }
    Ok(legal)
}

pub fn has_any_legal_move(game_state: &GameState) -> ChessResult<bool> {
    for square in game_state.board.occupancy_of(game_state.side_to_move) {
        if !legal_moves(game_state, square)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn leaves_king_safe(board: &Board, mv: Move, color: Color) -> ChessResult<bool> {
    let moving = board
        .piece_at(mv.from)
        .ok_or_else(|| ChessError::InvariantViolation(format!("no piece on {}", mv.from)))?;
    let mut scratch = *board;
    move_pieces(&mut scratch, mv, moving);
    Ok(!is_king_in_check(&scratch, color)?)
}

/// Status of `game_state` from the side to move's point of view.
///
/// Checkmate and stalemate are decided first, so a mating move that also
/// reaches a draw threshold still wins.
pub fn evaluate_outcome(game_state: &GameState) -> ChessResult<Outcome> {
    let side = game_state.side_to_move;
    let in_check = is_king_in_check(&game_state.board, side)?;

    if !has_any_legal_move(game_state)? {
        return Ok(if in_check {
            Outcome::Checkmate {
                winner: side.opposite(),
            }
        } else {
            Outcome::Stalemate
        });
    }

    let rules = game_state.draw_rules;
    if rules.insufficient_material && has_insufficient_material(&game_state.board) {
        return Ok(Outcome::DrawByInsufficientMaterial);
    }
    if let Some(limit) = rules.fifty_move_limit {
        if game_state.halfmove_clock >= limit {
            return Ok(Outcome::DrawByFiftyMove);
        }
    }
    if let Some(limit) = rules.repetition_limit {
        if game_state.repetition_count() >= usize::from(limit) {
            return Ok(Outcome::DrawByRepetition);
        }
    }

    Ok(if in_check {
        Outcome::Check
    } else {
        Outcome::Ongoing
    })
}

/// Neither side can ever deliver mate: bare kings, a single minor piece, or
/// only bishops that all stand on one square color.
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();
    for (square, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight | PieceKind::Bishop => minors.push((square, piece.kind)),
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(first, _), rest @ ..] => minors.iter().all(|(_, kind)| *kind == PieceKind::Bishop)
            && rest.iter().all(|(square, _)| square.is_dark() == first.is_dark()),
    }
}
