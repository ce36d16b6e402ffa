//! Terminal-oriented Unicode board renderer.

use crate::game_state::chess_types::*;

/// How the board is turned when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardOrientation {
    /// White always at the bottom.
    #[default]
    Static,
    /// The side to move at the bottom.
    Rotating,
}

impl BoardOrientation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "static" | "s" => Some(Self::Static),
            "rotating" | "r" => Some(Self::Rotating),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Static => Self::Rotating,
            Self::Rotating => Self::Static,
        }
    }

    fn bottom(self, game_state: &GameState) -> Color {
        match self {
            Self::Static => Color::White,
            Self::Rotating => game_state.side_to_move(),
        }
    }
}

/// Render the board to a Unicode string for terminal output, with rank and
/// file labels on every edge. Empty squares show their color.
pub fn render_game_state(game_state: &GameState, orientation: BoardOrientation) -> String {
    let flipped = orientation.bottom(game_state) == Color::Black;
    let ranks: Vec<u8> = if flipped { (0..8).collect() } else { (0..8).rev().collect() };
    let files: Vec<u8> = if flipped { (0..8).rev().collect() } else { (0..8).collect() };

    let file_labels: String = files
        .iter()
        .map(|file| char::from(b'a' + file))
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("  {file_labels}\n"));

    for rank in &ranks {
        let label = char::from(b'1' + rank);
        out.push(label);
        out.push(' ');

        let row: Vec<String> = files
            .iter()
            .filter_map(|file| Square::from_index(rank * 8 + file))
            .map(|square| square_glyph(game_state, square).to_string())
            .collect();
        out.push_str(&row.join(" "));

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str(&format!("  {file_labels}"));
    out
}

fn square_glyph(game_state: &GameState, square: Square) -> char {
    match game_state.piece_at(square) {
        Some(piece) => piece_to_unicode(piece),
        None if square.is_dark() => '■',
        None => '□',
    }
}

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
