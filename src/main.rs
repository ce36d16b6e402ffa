//! Two players, one terminal.
//!
//! Run with `cargo run`; set `RUST_LOG=debug` to see engine diagnostics,
//! `HOTSEAT_DRAW_RULES=standard|automatic|off` to pick draw thresholds and
//! `HOTSEAT_BOARD=static|rotating` to pick the board orientation.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use hotseat_chess::chess_errors::ChessError;
use hotseat_chess::game_state::chess_rules::DrawRules;
use hotseat_chess::game_state::chess_types::*;
use hotseat_chess::session::game_session::GameSession;
use hotseat_chess::utils::render_game_state::{render_game_state, BoardOrientation};
use hotseat_chess::utils::san::move_to_san;

const HELP: &str = "\
Enter moves in SAN (e4, Nf3, exd5, O-O, e8=Q) or coordinates (e2e4, e7e8q).
Append (=) to a move to offer a draw with it.

  moves <square>  list legal moves of the piece on <square>
  undo            take back the last move
  resign          give up the game
  draw            offer a draw
  accept/decline  answer your opponent's draw offer
  claim           claim a draw by threefold repetition or the fifty-move rule
  fen             print the position as FEN
  pgn             print the game as PGN
  flip            switch between a static and a rotating board
  help            show this text
  quit            leave the program";

fn draw_rules_from_env() -> Result<DrawRules> {
    match std::env::var("HOTSEAT_DRAW_RULES") {
        Ok(name) => DrawRules::from_name(&name)
            .with_context(|| format!("unknown HOTSEAT_DRAW_RULES value '{name}'")),
        Err(_) => Ok(DrawRules::default()),
    }
}

fn orientation_from_env() -> Result<BoardOrientation> {
    match std::env::var("HOTSEAT_BOARD") {
        Ok(name) => BoardOrientation::from_name(&name)
            .with_context(|| format!("unknown HOTSEAT_BOARD value '{name}'")),
        Err(_) => Ok(BoardOrientation::default()),
    }
}

enum Flow {
    Continue,
    Quit,
}

struct Terminal {
    session: GameSession,
    orientation: BoardOrientation,
}

impl Terminal {
    fn show_board(&self) {
        let state = self.session.state();
        println!("\n{}\n", render_game_state(state, self.orientation));
        match self.session.termination() {
            Some(termination) => println!("Game over: {termination}."),
            None => {
                if state.outcome() == Outcome::Check {
                    println!("{} is in check.", state.side_to_move());
                }
                if let Some(offered_by) = self.session.draw_offer() {
                    if offered_by != state.side_to_move() {
                        println!("{offered_by} offers a draw (accept / decline).");
                    }
                }
                print!("{} to move> ", state.side_to_move());
            }
        }
        io::stdout().flush().ok();
    }

    fn handle(&mut self, line: &str) -> Result<Flow> {
        let side = self.session.state().side_to_move();
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();

        match command.as_str() {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" | "h" => println!("{HELP}"),
            "fen" => println!("{}", self.session.state().get_fen()),
            "pgn" => println!("{}", self.session.to_pgn()?),
            "flip" => self.orientation = self.orientation.toggled(),
            "undo" => {
                let taken_back = self.session.undo()?;
                println!("Took back {taken_back}.");
            }
            "resign" | "r" => {
                self.session.resign(side)?;
            }
            "draw" => self.session.offer_draw(side)?,
            "accept" => {
                self.session.accept_draw(side)?;
            }
            "decline" => self.session.decline_draw(side)?,
            "claim" => {
                self.session.claim_draw()?;
            }
            "moves" => {
                let Some(text) = words.next() else {
                    bail!("usage: moves <square>");
                };
                let square: Square = text.parse()?;
                let state = self.session.state();
                let listed = self
                    .session
                    .legal_moves(square)?
                    .into_iter()
                    .map(|mv| move_to_san(state, mv))
                    .collect::<Result<Vec<_>, _>>()?;
                if listed.is_empty() {
                    println!("No legal moves from {square}.");
                } else {
                    println!("{}", listed.join(" "));
                }
            }
            _ => {
                let (text, offers_draw) = match line.trim().strip_suffix("(=)") {
                    Some(text) => (text, true),
                    None => (line.trim(), false),
                };
                self.session.play_text(text)?;
                if offers_draw && self.session.termination().is_none() {
                    self.session.offer_draw(side)?;
                }
            }
        }
        Ok(Flow::Continue)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let draw_rules = draw_rules_from_env()?;
    let orientation = orientation_from_env()?;
    let mut terminal = Terminal {
        session: GameSession::with_draw_rules(draw_rules)?,
        orientation,
    };

    println!("Hot-seat chess. Type 'help' for commands.");
    terminal.show_board();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            terminal.show_board();
            continue;
        }

        match terminal.handle(&line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => match err.downcast_ref::<ChessError>() {
                Some(chess_error) => println!("{chess_error}."),
                None => println!("{err:#}"),
            },
        }
        terminal.show_board();
    }

    Ok(())
}
