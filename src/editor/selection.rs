//! Two-click selection and move resolution
//!
//! The controller is a tiny state machine: `Idle` until a click lands on an
//! occupied square, then `Selected(origin)` until the second click either
//! commits a move, reselects another piece, or falls back to `Idle`. Move
//! legality is decided entirely by the rules oracle through
//! `UciMove::to_move`; an origin/destination pair that resolves to no legal
//! move is normal flow, not an error.
//!
//! # Promotion policy
//!
//! A pawn reaching the final rank is resolved without asking the user: the
//! direct move is tried first, then promotions in the fixed order queen,
//! rook, bishop, knight. The first legal match commits, so an ambiguous
//! promotion always becomes a queen when queening is legal.

use crate::editor::board::BoardState;
use shakmaty::uci::UciMove;
use shakmaty::{Move, Role, Square};
use tracing::debug;

/// Fixed promotion disambiguation order
const PROMOTION_ORDER: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

/// What a click did to the selection machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An occupied square became the selection origin
    Selected(Square),
    /// The second click landed on another occupied square with no legal move
    Reselected(Square),
    /// A legal move was resolved and committed to the board
    Moved(Move),
    /// The second click hit an empty square with no legal move; back to idle
    Deselected,
    /// Click on an empty square while idle; nothing to pick up
    Ignored,
}

/// Click-sequence state machine resolving two clicks into one legal move
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<Square>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected origin square, if any
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Drop any selection; called whenever the board changes under us
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Route one square activation through the state machine
    pub fn click(&mut self, square: Square, board: &mut BoardState) -> ClickOutcome {
        match self.selected {
            None => {
                if board.piece_at(square).is_some() {
                    self.selected = Some(square);
                    debug!("[SELECT] Selected {}", square);
                    ClickOutcome::Selected(square)
                } else {
                    ClickOutcome::Ignored
                }
            }
            Some(origin) => {
                // Moved is reported only when the commit actually lands; a
                // resolved move the board refuses falls through below.
                if let Some(m) = resolve_move(board, origin, square) {
                    if board.play(&m) {
                        self.selected = None;
                        debug!("[SELECT] Committed {} -> {}", origin, square);
                        return ClickOutcome::Moved(m);
                    }
                }
                if board.piece_at(square).is_some() {
                    self.selected = Some(square);
                    debug!("[SELECT] Reselected {}", square);
                    ClickOutcome::Reselected(square)
                } else {
                    self.selected = None;
                    debug!("[SELECT] Deselected, {} -> {} is not a move", origin, square);
                    ClickOutcome::Deselected
                }
            }
        }
    }
}

/// Resolve an origin/destination pair to a legal move, if one exists
///
/// Tries the direct move first, then each promotion in [`PROMOTION_ORDER`].
fn resolve_move(board: &BoardState, from: Square, to: Square) -> Option<Move> {
    let pos = board.position()?;
    let direct = UciMove::Normal {
        from,
        to,
        promotion: None,
    };
    if let Ok(m) = direct.to_move(&pos) {
        return Some(m);
    }
    for role in PROMOTION_ORDER {
        let candidate = UciMove::Normal {
            from,
            to,
            promotion: Some(role),
        };
        if let Ok(m) = candidate.to_move(&pos) {
            return Some(m);
        }
    }
    None
}
