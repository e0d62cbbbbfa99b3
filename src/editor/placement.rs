//! Manual piece placement
//!
//! Direct set/remove operations on the board that deliberately bypass the
//! rules oracle. Placement input arrives as short text tags (the dialog
//! accepts things like `"wq"`, `"bp"` or `"remove"`); the tags are parsed
//! into closed enums at this boundary so that anything unrecognized fails
//! with [`EditorError::InvalidPlacementInput`] before any square is touched.

use crate::editor::board::BoardState;
use crate::editor::error::{EditorError, EditorResult};
use shakmaty::{Color, Piece, Role, Square};
use std::str::FromStr;
use tracing::info;

/// Color half of a placement tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    White,
    Black,
}

impl ColorTag {
    pub fn color(self) -> Color {
        match self {
            ColorTag::White => Color::White,
            ColorTag::Black => Color::Black,
        }
    }
}

impl FromStr for ColorTag {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "white" => Ok(ColorTag::White),
            "b" | "black" => Ok(ColorTag::Black),
            other => Err(EditorError::InvalidPlacementInput {
                tag: other.to_string(),
            }),
        }
    }
}

/// Piece half of a placement tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceTag {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceTag {
    pub fn role(self) -> Role {
        match self {
            PieceTag::Pawn => Role::Pawn,
            PieceTag::Knight => Role::Knight,
            PieceTag::Bishop => Role::Bishop,
            PieceTag::Rook => Role::Rook,
            PieceTag::Queen => Role::Queen,
            PieceTag::King => Role::King,
        }
    }
}

impl FromStr for PieceTag {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p" | "pawn" => Ok(PieceTag::Pawn),
            "n" | "knight" => Ok(PieceTag::Knight),
            "b" | "bishop" => Ok(PieceTag::Bishop),
            "r" | "rook" => Ok(PieceTag::Rook),
            "q" | "queen" => Ok(PieceTag::Queen),
            "k" | "king" => Ok(PieceTag::King),
            other => Err(EditorError::InvalidPlacementInput {
                tag: other.to_string(),
            }),
        }
    }
}

/// What a placement spec string asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementAction {
    Place(ColorTag, PieceTag),
    Remove,
}

/// Parse a compact placement spec: `"wq"`, `"bn"`, `"remove"`
pub fn parse_spec(spec: &str) -> EditorResult<PlacementAction> {
    let spec = spec.trim().to_ascii_lowercase();
    if spec == "remove" {
        return Ok(PlacementAction::Remove);
    }
    let invalid = || EditorError::InvalidPlacementInput { tag: spec.clone() };
    let mut chars = spec.chars();
    let color = chars.next().ok_or_else(invalid)?;
    let piece = chars.next().ok_or_else(invalid)?;
    if chars.next().is_some() {
        return Err(invalid());
    }
    let color: ColorTag = color.to_string().parse()?;
    let piece: PieceTag = piece.to_string().parse()?;
    Ok(PlacementAction::Place(color, piece))
}

/// Write a piece straight onto the board, bypassing legality
pub fn place(board: &mut BoardState, square: Square, color: ColorTag, piece: PieceTag) {
    let piece = Piece {
        color: color.color(),
        role: piece.role(),
    };
    board.set_piece_at(square, piece);
    info!("[EDITOR] Placed {:?} {:?} on {}", piece.color, piece.role, square);
}

/// Clear a square unconditionally
pub fn remove(board: &mut BoardState, square: Square) {
    board.discard_piece_at(square);
    info!("[EDITOR] Removed piece from {}", square);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_place() {
        //! "wq" parses to a white-queen placement
        assert_eq!(
            parse_spec("wq").unwrap(),
            PlacementAction::Place(ColorTag::White, PieceTag::Queen)
        );
        assert_eq!(
            parse_spec(" BN ").unwrap(),
            PlacementAction::Place(ColorTag::Black, PieceTag::Knight)
        );
    }

    #[test]
    fn test_parse_spec_remove() {
        //! "remove" parses to the removal action
        assert_eq!(parse_spec("remove").unwrap(), PlacementAction::Remove);
    }

    #[test]
    fn test_parse_spec_rejects_unknown_tags() {
        //! Unrecognized tags fail with InvalidPlacementInput
        for bad in ["", "x", "xq", "wz", "wqq", "queen"] {
            let err = parse_spec(bad).unwrap_err();
            assert!(
                matches!(err, EditorError::InvalidPlacementInput { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_place_bypasses_legality() {
        //! Placement happily creates positions the rules would never allow
        let mut board = BoardState::new();
        let a1: Square = "a1".parse().unwrap();
        // Second white king on an occupied back-rank square.
        place(&mut board, a1, ColorTag::White, PieceTag::King);
        let piece = board.piece_at(a1).unwrap();
        assert_eq!(piece.role, Role::King);
        assert_eq!(piece.color, Color::White);
    }

    #[test]
    fn test_remove_clears_square() {
        //! remove() empties the square even if nothing was there
        let mut board = BoardState::new();
        let e2: Square = "e2".parse().unwrap();
        remove(&mut board, e2);
        assert!(board.piece_at(e2).is_none());
        let e4: Square = "e4".parse().unwrap();
        remove(&mut board, e4);
        assert!(board.piece_at(e4).is_none());
    }
}
