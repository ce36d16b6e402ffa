//! Canonical chess-rule constants and the configurable draw rules.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock at which a player may claim a fifty-move draw.
pub const CLAIMABLE_FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position at which a player may claim a repetition draw.
pub const CLAIMABLE_REPETITIONS: u8 = 3;

/// Which draw conditions end the game automatically.
///
/// Stalemate is always a draw. The other conditions can be switched off or
/// moved to later thresholds; a [`crate::session::game_session::GameSession`]
/// still lets players claim fifty-move and threefold draws before an
/// automatic threshold is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawRules {
    pub insufficient_material: bool,
    /// Halfmove-clock value ending the game, `None` to disable.
    pub fifty_move_limit: Option<u16>,
    /// Occurrences of the same position ending the game, `None` to disable.
    pub repetition_limit: Option<u8>,
}

impl DrawRules {
    /// Fifty-move rule and threefold repetition end the game immediately.
    pub const fn standard() -> Self {
        Self {
            insufficient_material: true,
            fifty_move_limit: Some(100),
            repetition_limit: Some(3),
        }
    }

    /// Only the seventy-five-move rule and fivefold repetition end the game
    /// on their own; the lower thresholds must be claimed.
    pub const fn automatic_only() -> Self {
        Self {
            insufficient_material: true,
            fifty_move_limit: Some(150),
            repetition_limit: Some(5),
        }
    }

    /// Games end only by checkmate or stalemate.
    pub const fn disabled() -> Self {
        Self {
            insufficient_material: false,
            fifty_move_limit: None,
            repetition_limit: None,
        }
    }

    /// Parses the names accepted by the terminal front-end.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::standard()),
            "automatic" => Some(Self::automatic_only()),
            "off" | "none" => Some(Self::disabled()),
            _ => None,
        }
    }
}

impl Default for DrawRules {
    fn default() -> Self {
        Self::standard()
    }
}
