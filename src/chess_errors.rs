//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board access, move
//! generation, move execution, notation parsing and the game session.
//!
//! Usage guidelines:
//! - `InvalidSquare`, `IllegalMove`, `InvalidNotation`, `AmbiguousMove` and
//!   the session variants are recoverable: the caller re-prompts the same
//!   player and the current `GameState` is untouched.
//! - `InvariantViolation` means a state was built without a king for one
//!   side. It indicates a bug in state construction and is not expected to be
//!   recovered from.

use thiserror::Error;

use crate::game_state::chess_types::Move;

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Coordinates or square text outside `a1..=h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// The move is not among the legal moves of its origin square.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// An internal invariant does not hold (for example a missing king).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A FEN string could not be parsed or describes an impossible position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Move text that does not follow SAN or coordinate notation, or that
    /// names no legal move.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    /// Move text matching more than one legal move.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),

    /// PGN text that could not be replayed.
    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    /// The game has already ended.
    #[error("game is already over: {0}")]
    GameOver(String),

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("no draw is available to claim")]
    NoDrawToClaim,

    #[error("no draw offer is pending")]
    NoDrawOffer,
}

pub type ChessResult<T> = Result<T, ChessError>;
