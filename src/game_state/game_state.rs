//! Immutable game state value.
//!
//! `GameState` is the central model of the engine. It stores the board,
//! turn and rights flags, clocks, the move history and the undo snapshots.
//! Successor states are only produced by
//! [`crate::move_generation::legal_move_apply::apply`]; hosts keep the live
//! game by reassigning a single `GameState` value.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::DrawRules;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::position_key;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_checks;
use crate::move_generation::legal_move_generator;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    /// Executed moves, oldest first.
    pub(crate) history: Vec<Move>,
    pub(crate) undo_stack: Vec<UndoState>,
    /// Zobrist key of every position reached, including the initial one.
    pub(crate) position_keys: Vec<u64>,

    pub(crate) draw_rules: DrawRules,
    pub(crate) outcome: Outcome,
}

impl GameState {
    /// Standard starting position with all castling rights and default draw rules.
    pub fn new_game() -> Self {
        Self::from_parts(
            Board::starting_position(),
            Color::White,
            CastlingRights::ALL,
            None,
            0,
            1,
            DrawRules::default(),
        )
        .expect("starting position should always have both kings")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Builds a state with no history and evaluates its outcome.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
        draw_rules: DrawRules,
    ) -> ChessResult<Self> {
        let mut game_state = Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            undo_stack: Vec::new(),
            position_keys: Vec::new(),
            draw_rules,
            outcome: Outcome::Ongoing,
        };
        game_state.position_keys.push(game_state.position_key());
        game_state.outcome = legal_move_generator::evaluate_outcome(&game_state)?;
        Ok(game_state)
    }

    /// Same position under different draw rules; the outcome is re-evaluated.
    pub fn with_draw_rules(&self, draw_rules: DrawRules) -> ChessResult<Self> {
        let mut next = self.clone();
        next.draw_rules = draw_rules;
        next.outcome = legal_move_generator::evaluate_outcome(&next)?;
        Ok(next)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn draw_rules(&self) -> DrawRules {
        self.draw_rules
    }

    /// Status computed after the last executed move.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Zobrist key of the current position.
    pub fn position_key(&self) -> u64 {
        position_key(
            &self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_square,
        )
    }

    /// How often the current position has occurred in this game.
    pub fn repetition_count(&self) -> usize {
        let current = self.position_key();
        self.position_keys.iter().filter(|key| **key == current).count()
    }

    pub fn legal_moves(&self, square: Square) -> ChessResult<Vec<Move>> {
        legal_move_generator::legal_moves(self, square)
    }

    pub fn all_legal_moves(&self) -> ChessResult<Vec<Move>> {
        legal_move_generator::all_legal_moves(self)
    }

    pub fn is_in_check(&self, color: Color) -> ChessResult<bool> {
        legal_move_checks::is_in_check(self, color)
    }

    pub fn apply(&self, mv: Move) -> ChessResult<GameState> {
        legal_move_apply::apply(self, mv)
    }

    pub fn undo(&self) -> ChessResult<GameState> {
        legal_move_apply::undo(self)
    }

    /// All 64 squares with their contents, rank 8 to rank 1, file a to h.
    pub fn render(&self) -> Vec<(Square, Option<Piece>)> {
        (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).map(move |file| (file, rank)))
            .filter_map(|(file, rank)| Square::from_index(rank * 8 + file))
            .map(|square| (square, self.board.piece_at(square)))
            .collect()
    }

    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.outcome(), Outcome::Ongoing);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant_square(), None);
        assert_eq!((game.halfmove_clock(), game.fullmove_number()), (0, 1));
        assert!(game.history().is_empty());
        assert_eq!(game.repetition_count(), 1);
    }

    #[test]
    fn render_lists_sixty_four_squares_from_a8() {
        let rendered = GameState::new_game().render();
        assert_eq!(rendered.len(), 64);
        assert_eq!(rendered[0].0, Square::A8);
        assert_eq!(
            rendered[0].1,
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(rendered[63].0, Square::H1);
        assert_eq!(rendered[27], ("d5".parse().expect("d5"), None));
    }
}
