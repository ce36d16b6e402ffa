//! Move execution and undo.

use log::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{evaluate_outcome, legal_moves};
use crate::move_generation::legal_move_shared::move_pieces;

/// Validates `mv` against the legal moves of its origin square and returns
/// the successor state. `game_state` itself is never modified.
pub fn apply(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    if game_state.outcome.is_terminal() {
        warn!("rejected {mv}: game already ended ({})", game_state.outcome);
        return Err(ChessError::GameOver(game_state.outcome.to_string()));
    }

    if !legal_moves(game_state, mv.from)?.contains(&mv) {
        warn!("rejected illegal move {mv} for {}", game_state.side_to_move);
        return Err(ChessError::IllegalMove(mv));
    }

    let next = commit_move(game_state, mv)?;
    debug!(
        "applied {mv} for {}; outcome {:?}",
        game_state.side_to_move, next.outcome
    );
    Ok(next)
}

/// Executes a move already known to be legal.
pub(crate) fn commit_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let moving = game_state
        .board
        .piece_at(mv.from)
        .ok_or_else(|| ChessError::InvariantViolation(format!("no piece on {}", mv.from)))?;
    let moving_color = moving.color;

    let mut next = game_state.clone();
    next.undo_stack.push(UndoState::capture(game_state, mv));

    let captured = move_pieces(&mut next.board, mv, moving);

    update_castling_rights(&mut next.castling_rights, moving, mv, captured);

    // Update en-passant square.
    next.en_passant_square = match mv.flag {
        MoveFlag::DoublePawnPush => mv.from.offset(0, moving_color.forward()),
        _ => None,
    };

    // Update clocks.
    if moving.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.history.push(mv);
    next.side_to_move = moving_color.opposite();
    next.position_keys.push(next.position_key());
    next.outcome = evaluate_outcome(&next)?;

    Ok(next)
}

fn update_castling_rights(
    rights: &mut CastlingRights,
    moving: Piece,
    mv: Move,
    captured: Option<Piece>,
) {
    match moving.kind {
        PieceKind::King => rights.clear_color(moving.color),
        PieceKind::Rook => rights.clear_for_rook(moving.color, mv.from),
        _ => {}
    }

    // Capturing a rook on its home square.
    if let Some(victim) = captured {
        if victim.kind == PieceKind::Rook {
            rights.clear_for_rook(victim.color, mv.to);
        }
    }
}

/// The state before the most recent move, restored from its snapshot.
pub fn undo(game_state: &GameState) -> ChessResult<GameState> {
    let mut prev = game_state.clone();
    let snapshot = prev.undo_stack.pop().ok_or(ChessError::NothingToUndo)?;

    prev.history.pop();
    prev.position_keys.pop();

    prev.board = snapshot.prev_board;
    prev.side_to_move = snapshot.prev_side_to_move;
    prev.castling_rights = snapshot.prev_castling_rights;
    prev.en_passant_square = snapshot.prev_en_passant_square;
    prev.halfmove_clock = snapshot.prev_halfmove_clock;
    prev.fullmove_number = snapshot.prev_fullmove_number;
    prev.outcome = evaluate_outcome(&prev)?;

    debug!("undid {}", snapshot.mv);
    Ok(prev)
}
