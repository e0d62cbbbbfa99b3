//! Score interpretation
//!
//! Converts the engine's raw `info ... score cp|mate <n>` output into a
//! display value. Centipawns are normalized to white's point of view (UCI
//! scores are relative to the side to move); mate distances are passed
//! through as reported. Anything unparsable becomes [`Evaluation::Unknown`],
//! never an error.

use shakmaty::Color;
use std::fmt;

/// Placeholder shown when no usable score exists
pub const UNKNOWN_DISPLAY: &str = "\u{2014}";

/// A display evaluation of one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// White-relative centipawns; 100 equals one pawn
    Centipawn(i32),
    /// Forced mate in this many moves, as reported by the engine
    MateIn(i32),
    /// The engine gave no score we could parse
    Unknown,
}

impl Evaluation {
    /// Build an evaluation from the two tokens after `score` in an info line
    ///
    /// `turn` is the side to move in the queried position; black-to-move
    /// centipawn scores are negated so the result is always white-relative.
    pub fn from_uci_score(kind: &str, value: &str, turn: Color) -> Evaluation {
        match kind {
            "cp" => match value.parse::<i32>() {
                // i32::MIN has no negation; such a score degrades instead.
                Ok(cp) if turn == Color::Black => cp
                    .checked_neg()
                    .map(Evaluation::Centipawn)
                    .unwrap_or(Evaluation::Unknown),
                Ok(cp) => Evaluation::Centipawn(cp),
                Err(_) => Evaluation::Unknown,
            },
            "mate" => value
                .parse::<i32>()
                .map(Evaluation::MateIn)
                .unwrap_or(Evaluation::Unknown),
            _ => Evaluation::Unknown,
        }
    }

    /// Human-readable form: pawns to two decimals, mate distance, or a dash
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::MateIn(n) => write!(f, "Mate in {n}"),
            Evaluation::Centipawn(cp) => write!(f, "{:.2}", f64::from(*cp) / 100.0),
            Evaluation::Unknown => f.write_str(UNKNOWN_DISPLAY),
        }
    }
}
