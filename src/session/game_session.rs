//! Hot-seat game session.
//!
//! `GameSession` owns the live [`GameState`] and layers the player actions
//! that are not moves on top of it: resigning, offering, answering and
//! claiming draws. Every action either succeeds completely or leaves the
//! session untouched.

use std::fmt;

use log::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{DrawRules, CLAIMABLE_FIFTY_MOVE_HALFMOVES, CLAIMABLE_REPETITIONS};
use crate::game_state::chess_types::*;
use crate::utils::pgn::write_pgn;
use crate::utils::san::parse_move;

/// Grounds on which a player may claim a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawClaim {
    FiftyMove,
    Repetition,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Checkmate, stalemate or an automatic draw.
    Outcome(Outcome),
    Resignation { winner: Color },
    DrawAgreed,
    DrawClaimed(DrawClaim),
}

impl Termination {
    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            Termination::Outcome(outcome) => outcome.result_token(),
            Termination::Resignation {
                winner: Color::White,
            } => "1-0",
            Termination::Resignation {
                winner: Color::Black,
            } => "0-1",
            Termination::DrawAgreed | Termination::DrawClaimed(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Outcome(outcome) => write!(f, "{outcome}"),
            Termination::Resignation { winner } => {
                write!(f, "{} resigns, {winner} wins", winner.opposite())
            }
            Termination::DrawAgreed => f.write_str("draw by agreement"),
            Termination::DrawClaimed(DrawClaim::FiftyMove) => {
                f.write_str("draw claimed under the fifty-move rule")
            }
            Termination::DrawClaimed(DrawClaim::Repetition) => {
                f.write_str("draw claimed by threefold repetition")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    initial_state: GameState,
    state: GameState,
    draw_offer: Option<Color>,
    ended_by_players: Option<Termination>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn with_draw_rules(draw_rules: DrawRules) -> ChessResult<Self> {
        Ok(Self::from_state(GameState::new_game().with_draw_rules(draw_rules)?))
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    /// Starts a session at `state`. Moves it already holds belong to the
    /// starting position and cannot be taken back through the session.
    pub fn from_state(state: GameState) -> Self {
        Self {
            initial_state: state.clone(),
            state,
            draw_offer: None,
            ended_by_players: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Position the session started from.
    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial_state
    }

    /// Side whose draw offer awaits an answer.
    #[inline]
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    pub fn legal_moves(&self, square: Square) -> ChessResult<Vec<Move>> {
        self.state.legal_moves(square)
    }

    pub fn render(&self) -> Vec<(Square, Option<Piece>)> {
        self.state.render()
    }

    pub fn termination(&self) -> Option<Termination> {
        if let Some(termination) = self.ended_by_players {
            return Some(termination);
        }
        let outcome = self.state.outcome();
        outcome.is_terminal().then_some(Termination::Outcome(outcome))
    }

    fn ensure_active(&self) -> ChessResult<()> {
        match self.termination() {
            Some(termination) => Err(ChessError::GameOver(termination.to_string())),
            None => Ok(()),
        }
    }

    /// Plays `mv` for the side to move and returns the new outcome.
    pub fn play(&mut self, mv: Move) -> ChessResult<Outcome> {
        self.ensure_active()?;
        let mover = self.state.side_to_move();
        let next = self.state.apply(mv)?;

        // Moving instead of answering declines the opponent's offer.
        if self.draw_offer == Some(mover.opposite()) {
            self.draw_offer = None;
        }

        self.state = next;
        if let Some(termination) = self.termination() {
            info!("game over after {mv}: {termination}");
        }
        Ok(self.state.outcome())
    }

    /// Plays a move given in SAN or coordinate notation.
    pub fn play_text(&mut self, text: &str) -> ChessResult<Outcome> {
        self.ensure_active()?;
        let mv = parse_move(text, &self.state)?;
        self.play(mv)
    }

    /// Takes back the last move played in this session. Finished games stay
    /// finished unless they ended on the board.
    pub fn undo(&mut self) -> ChessResult<Move> {
        if let Some(termination) = self.ended_by_players {
            return Err(ChessError::GameOver(termination.to_string()));
        }
        if self.state.history().len() <= self.initial_state.history().len() {
            return Err(ChessError::NothingToUndo);
        }
        let taken_back = self
            .state
            .history()
            .last()
            .copied()
            .ok_or(ChessError::NothingToUndo)?;
        self.state = self.state.undo()?;
        self.draw_offer = None;
        Ok(taken_back)
    }

    pub fn resign(&mut self, color: Color) -> ChessResult<Termination> {
        self.ensure_active()?;
        let termination = Termination::Resignation {
            winner: color.opposite(),
        };
        self.ended_by_players = Some(termination);
        info!("{termination}");
        Ok(termination)
    }

    pub fn offer_draw(&mut self, color: Color) -> ChessResult<()> {
        self.ensure_active()?;
        self.draw_offer = Some(color);
        info!("{color} offers a draw");
        Ok(())
    }

    pub fn accept_draw(&mut self, color: Color) -> ChessResult<Termination> {
        self.ensure_active()?;
        self.take_offer_for(color)?;
        self.ended_by_players = Some(Termination::DrawAgreed);
        info!("{color} accepts the draw");
        Ok(Termination::DrawAgreed)
    }

    pub fn decline_draw(&mut self, color: Color) -> ChessResult<()> {
        self.ensure_active()?;
        self.take_offer_for(color)?;
        info!("{color} declines the draw");
        Ok(())
    }

    // Only the opponent of the offering side may answer.
    fn take_offer_for(&mut self, color: Color) -> ChessResult<()> {
        match self.draw_offer {
            Some(offered_by) if offered_by != color => {
                self.draw_offer = None;
                Ok(())
            }
            _ => Err(ChessError::NoDrawOffer),
        }
    }

    /// Ends the game as a draw when the current position has occurred three
    /// times or fifty moves passed without a capture or pawn move, even if
    /// the automatic thresholds are higher.
    pub fn claim_draw(&mut self) -> ChessResult<Termination> {
        self.ensure_active()?;
        let claim = if self.state.repetition_count() >= usize::from(CLAIMABLE_REPETITIONS) {
            DrawClaim::Repetition
        } else if self.state.halfmove_clock() >= CLAIMABLE_FIFTY_MOVE_HALFMOVES {
            DrawClaim::FiftyMove
        } else {
            return Err(ChessError::NoDrawToClaim);
        };

        let termination = Termination::DrawClaimed(claim);
        self.ended_by_players = Some(termination);
        info!("{termination}");
        Ok(termination)
    }

    /// Result token for the game so far.
    pub fn result_token(&self) -> &'static str {
        self.termination().map_or("*", Termination::result_token)
    }

    /// PGN of the session from its initial position.
    pub fn to_pgn(&self) -> ChessResult<String> {
        let start = self.initial_state.history().len();
        write_pgn(
            &self.initial_state,
            &self.state.history()[start..],
            self.result_token(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(session: &mut GameSession, moves: &[&str]) {
        for text in moves {
            session.play_text(text).expect("move should be legal");
        }
    }

    #[test]
    fn resignation_ends_the_game() {
        let mut session = GameSession::new();
        play_all(&mut session, &["e4"]);
        let termination = session.resign(Color::Black).expect("resign");

        assert_eq!(termination, Termination::Resignation { winner: Color::White });
        assert_eq!(session.result_token(), "1-0");
        assert!(matches!(session.play_text("e5"), Err(ChessError::GameOver(_))));
        assert!(matches!(session.undo(), Err(ChessError::GameOver(_))));
    }

    #[test]
    fn draw_offer_accept_and_decline() {
        let mut session = GameSession::new();
        play_all(&mut session, &["e4"]);
        session.offer_draw(Color::White).expect("offer");

        assert_eq!(session.accept_draw(Color::White), Err(ChessError::NoDrawOffer));
        session.decline_draw(Color::Black).expect("decline");
        assert_eq!(session.draw_offer(), None);
        assert_eq!(session.accept_draw(Color::Black), Err(ChessError::NoDrawOffer));

        session.offer_draw(Color::White).expect("offer again");
        assert_eq!(session.accept_draw(Color::Black), Ok(Termination::DrawAgreed));
        assert_eq!(session.result_token(), "1/2-1/2");
    }

    #[test]
    fn moving_lets_the_opponents_offer_lapse() {
        let mut session = GameSession::new();
        session.offer_draw(Color::White).expect("offer");
        play_all(&mut session, &["e4"]);
        assert_eq!(session.draw_offer(), Some(Color::White));

        play_all(&mut session, &["e5"]);
        assert_eq!(session.draw_offer(), None);
    }

    #[test]
    fn threefold_repetition_can_be_claimed_under_automatic_rules() {
        let mut session =
            GameSession::with_draw_rules(DrawRules::automatic_only()).expect("session");
        assert_eq!(session.claim_draw(), Err(ChessError::NoDrawToClaim));

        play_all(&mut session, &["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1", "Ng8"]);
        assert_eq!(session.state().repetition_count(), 3);
        assert!(session.termination().is_none());

        assert_eq!(
            session.claim_draw(),
            Ok(Termination::DrawClaimed(DrawClaim::Repetition))
        );
        assert!(session.termination().is_some());
    }

    #[test]
    fn fifty_move_claim() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 100 70")
            .and_then(|state| state.with_draw_rules(DrawRules::automatic_only()))
            .expect("fen");
        let mut session = GameSession::from_state(state);
        assert_eq!(
            session.claim_draw(),
            Ok(Termination::DrawClaimed(DrawClaim::FiftyMove))
        );
    }

    #[test]
    fn checkmate_is_a_termination() {
        let mut session = GameSession::new();
        play_all(&mut session, &["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(
            session.termination(),
            Some(Termination::Outcome(Outcome::Checkmate {
                winner: Color::Black
            }))
        );
        assert_eq!(session.result_token(), "0-1");

        let pgn = session.to_pgn().expect("pgn");
        assert!(pgn.contains("1. f3 e5 2. g4 Qh4# 0-1"));

        assert_eq!(
            session.undo(),
            Ok(Move::new("d8".parse().expect("d8"), "h4".parse().expect("h4"), MoveFlag::Normal))
        );
        assert!(session.termination().is_none());
    }

    #[test]
    fn undo_stops_at_the_session_start() {
        let mut opening = GameSession::new();
        play_all(&mut opening, &["e4", "e5"]);

        let mut session = GameSession::from_state(opening.state().clone());
        assert_eq!(session.undo(), Err(ChessError::NothingToUndo));
        assert_eq!(session.state().history().len(), 2);

        play_all(&mut session, &["Nf3"]);
        assert!(session.undo().is_ok());
        assert_eq!(session.undo(), Err(ChessError::NothingToUndo));

        let pgn = session.to_pgn().expect("pgn");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.trim_end().ends_with('*'));
    }
}
