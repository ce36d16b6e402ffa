//! PGN read/write utilities for game history interchange.
//!
//! Serializes move history and headers to PGN text with SAN movetext and
//! parses PGN back by replaying each move, so every imported move is legal.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::san::{move_to_san, parse_move};

/// Seven Tag Roster, written first and in this order.
const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

const MOVETEXT_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub move_history: Vec<Move>,
    pub final_state: GameState,
    pub result: String,
}

pub fn write_pgn(initial_state: &GameState, move_history: &[Move], result: &str) -> ChessResult<String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Hotseat Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(initial_state, move_history, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    move_history: &[Move],
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let mut out = String::new();

    for key in SEVEN_TAG_ROSTER {
        if let Some(value) = headers.get(key) {
            out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
        }
    }
    for (key, value) in headers {
        if !SEVEN_TAG_ROSTER.contains(&key.as_str()) {
            out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
        }
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (ply, mv) in move_history.iter().enumerate() {
        let san = move_to_san(&state, *mv)?;
        let white_to_move = state.side_to_move() == Color::White;
        if white_to_move {
            movetext_parts.push(format!("{}. {}", state.fullmove_number(), san));
        } else if ply == 0 {
            movetext_parts.push(format!("{}... {}", state.fullmove_number(), san));
        } else {
            movetext_parts.push(san);
        }
        state = state.apply(*mv)?;
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());

    out.push_str(&wrap_movetext(&movetext_parts));
    out.push('\n');
    Ok(out)
}

fn wrap_movetext(parts: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;
    for part in parts {
        if line_len > 0 && line_len + 1 + part.len() > MOVETEXT_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(part);
        line_len += part.len();
    }
    out
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = match headers.get("FEN") {
        Some(fen) => GameState::from_fen(fen)?,
        None if headers.get("SetUp").map(|x| x.as_str()) == Some("1") => {
            return Err(ChessError::InvalidPgn(
                "SetUp is 1 but the FEN header is missing".to_owned(),
            ));
        }
        None => GameState::new_game(),
    };

    let mut state = initial_state.clone();
    let mut move_history = Vec::<Move>::new();
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join("\n"));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        let mv = parse_move(cleaned, &state).map_err(|err| {
            ChessError::InvalidPgn(format!(
                "move {} ({cleaned}): {err}",
                move_history.len() / 2 + 1
            ))
        })?;
        state = state.apply(mv)?;
        move_history.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        if result == "*" {
            result = normalize_result(header_result).to_owned();
        }
    }

    Ok(PgnGame {
        headers,
        initial_state,
        move_history,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidPgn(format!("invalid header line: {line}"));
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid());
    }

    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts.next().ok_or_else(invalid)?.trim();
    let value_raw = parts.next().ok_or_else(invalid)?.trim();

    if key.is_empty() || !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(invalid());
    }

    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut in_line_comment = false;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            ';' if brace_depth == 0 && paren_depth == 0 => in_line_comment = true,
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Drops a leading `12.` or `12...`, which may be glued to the move.
fn strip_move_number(token: &str) -> &str {
    let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && token[digits..].starts_with('.') {
        token[digits..].trim_start_matches('.')
    } else {
        token
    }
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
