//! Core value types shared by every subsystem: colors, pieces, squares,
//! castling rights, moves and game outcomes.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::{ChessError, ChessResult};

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::square_set::SquareSet;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step of a pawn push for this color.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece kind. Color is carried separately by [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used by SAN and FEN (`P` for pawns).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Inverse of [`PieceKind::letter`], accepting either case.
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN character: upper case for White, lower case for Black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_letter(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(color, kind))
    }
}

/// Board coordinate. `file` 0 is the a-file, `rank` 0 is the first rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub const A1: Square = Square::at(0, 0);
    pub const B1: Square = Square::at(1, 0);
    pub const C1: Square = Square::at(2, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const F1: Square = Square::at(5, 0);
    pub const G1: Square = Square::at(6, 0);
    pub const H1: Square = Square::at(7, 0);
    pub const A8: Square = Square::at(0, 7);
    pub const B8: Square = Square::at(1, 7);
    pub const C8: Square = Square::at(2, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const F8: Square = Square::at(5, 7);
    pub const G8: Square = Square::at(6, 7);
    pub const H8: Square = Square::at(7, 7);

    /// Checked constructor for collaborator-supplied coordinates.
    pub fn new(file: u8, rank: u8) -> ChessResult<Self> {
        if file > 7 || rank > 7 {
            return Err(ChessError::InvalidSquare(format!(
                "file {file}, rank {rank} is off the board"
            )));
        }
        Ok(Self::at(file, rank))
    }

    /// Square from a `0..=63` index where `0 == a1` and `63 == h8`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index > 63 {
            return None;
        }
        Some(Self::at(index % 8, index / 8))
    }

    // Callers guarantee `file < 8 && rank < 8`.
    const fn at(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// The square displaced by `(file_delta, rank_delta)`, if still on the board.
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Dark squares are those where file and rank share parity (a1 is dark).
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }

        Ok(Self::at(file - b'a', rank - b'1'))
    }
}

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Starting square of the rook taking part in this castle.
    pub const fn rook_home(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => Square::H1,
            (Color::White, CastleSide::QueenSide) => Square::A1,
            (Color::Black, CastleSide::KingSide) => Square::H8,
            (Color::Black, CastleSide::QueenSide) => Square::A8,
        }
    }

    /// `(king_to, rook_to)` after castling.
    pub const fn destinations(self, color: Color) -> (Square, Square) {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => (Square::G1, Square::F1),
            (Color::White, CastleSide::QueenSide) => (Square::C1, Square::D1),
            (Color::Black, CastleSide::KingSide) => (Square::G8, Square::F8),
            (Color::Black, CastleSide::QueenSide) => (Square::C8, Square::D8),
        }
    }

    /// Squares between king and rook that must be empty.
    pub const fn between(self, color: Color) -> &'static [Square] {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => &[Square::F1, Square::G1],
            (Color::White, CastleSide::QueenSide) => &[Square::D1, Square::C1, Square::B1],
            (Color::Black, CastleSide::KingSide) => &[Square::F8, Square::G8],
            (Color::Black, CastleSide::QueenSide) => &[Square::D8, Square::C8, Square::B8],
        }
    }

    /// Squares the king crosses or lands on; none may be attacked.
    pub const fn king_path(self, color: Color) -> [Square; 2] {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => [Square::F1, Square::G1],
            (Color::White, CastleSide::QueenSide) => [Square::D1, Square::C1],
            (Color::Black, CastleSide::KingSide) => [Square::F8, Square::G8],
            (Color::Black, CastleSide::QueenSide) => [Square::D8, Square::C8],
        }
    }
}

/// The four castling permissions. Rights are only ever cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_kingside,
            (Color::White, CastleSide::QueenSide) => self.white_queenside,
            (Color::Black, CastleSide::KingSide) => self.black_kingside,
            (Color::Black, CastleSide::QueenSide) => self.black_queenside,
        }
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_kingside = false,
            (Color::White, CastleSide::QueenSide) => self.white_queenside = false,
            (Color::Black, CastleSide::KingSide) => self.black_kingside = false,
            (Color::Black, CastleSide::QueenSide) => self.black_queenside = false,
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::KingSide);
        self.clear(color, CastleSide::QueenSide);
    }

    /// Clears the right tied to a `color` rook leaving or captured on `square`.
    pub fn clear_for_rook(&mut self, color: Color, square: Square) {
        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if side.rook_home(color) == square {
                self.clear(color, side);
            }
        }
    }

    /// Packed `0..16` form (`K=1, Q=2, k=4, q=8`) used for hashing.
    pub const fn bits(self) -> usize {
        (self.white_kingside as usize)
            | (self.white_queenside as usize) << 1
            | (self.black_kingside as usize) << 2
            | (self.black_queenside as usize) << 3
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Special-move marker carried by every [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    CastleKing,
    CastleQueen,
    EnPassantCapture,
    DoublePawnPush,
}

impl MoveFlag {
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveFlag::CastleKing => Some(CastleSide::KingSide),
            MoveFlag::CastleQueen => Some(CastleSide::QueenSide),
            _ => None,
        }
    }
}

/// A move as produced by the generator and consumed by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flag: MoveFlag,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
            flag: MoveFlag::Normal,
        }
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag.castle_side().is_some()
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Game status after the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    DrawByFiftyMove,
    DrawByRepetition,
    DrawByInsufficientMaterial,
}

impl Outcome {
    /// Whether play has ended.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing | Outcome::Check)
    }

    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            Outcome::Stalemate
                | Outcome::DrawByFiftyMove
                | Outcome::DrawByRepetition
                | Outcome::DrawByInsufficientMaterial
        )
    }

    /// PGN result token.
    pub const fn result_token(self) -> &'static str {
        match self {
            Outcome::Checkmate {
                winner: Color::White,
            } => "1-0",
            Outcome::Checkmate {
                winner: Color::Black,
            } => "0-1",
            Outcome::Ongoing | Outcome::Check => "*",
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => f.write_str("game in progress"),
            Outcome::Check => f.write_str("check"),
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Outcome::Stalemate => f.write_str("draw by stalemate"),
            Outcome::DrawByFiftyMove => f.write_str("draw by the fifty-move rule"),
            Outcome::DrawByRepetition => f.write_str("draw by repetition"),
            Outcome::DrawByInsufficientMaterial => f.write_str("draw by insufficient material"),
        }
    }
}
