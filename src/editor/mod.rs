//! Editor module - board editing and click interaction
//!
//! Everything between a UI event and the board lives here: the editable
//! [`BoardState`], direct placement that bypasses legality, the two-click
//! [`SelectionController`], and the coordinate-indexed [`SquareGrid`] click
//! table. [`BoardEditor`] ties them together and is the single surface a UI
//! talks to.
//!
//! # Module Organization
//!
//! - `board` - position value, turn flag, FEN load/format, move commit
//! - `placement` - tag-dispatched manual set/remove operations
//! - `selection` - click-sequence state machine with promotion fall-through
//! - `grid` - per-square click routing table
//! - `error` - rejected-input error types

pub mod board;
pub mod error;
pub mod grid;
pub mod placement;
pub mod selection;

pub use board::BoardState;
pub use error::{EditorError, EditorResult};
pub use grid::{SquareGrid, SquareHandler};
pub use placement::{ColorTag, PieceTag, PlacementAction};
pub use selection::{ClickOutcome, SelectionController};

use crate::engine::{BestMoveOutcome, BestMoveResult, EngineQuery, EngineResult, EngineSession};
use shakmaty::uci::UciMove;
use shakmaty::Square;
use tracing::info;

/// The editor façade: board, selection and the cached best-move display
///
/// Routes every UI-level operation and enforces the two cross-cutting rules
/// in one place: any mutation of the board outside the click flow resets the
/// selection, and anything that changes the position invalidates the cached
/// best-move/evaluation display. Flipping the side to move touches neither;
/// a turn flip is a viewpoint change, not an edit.
#[derive(Debug, Default)]
pub struct BoardEditor {
    board: BoardState,
    selection: SelectionController,
    analysis: Option<BestMoveResult>,
}

impl BoardEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// The best-move result currently on display, if still valid
    pub fn analysis(&self) -> Option<&BestMoveResult> {
        self.analysis.as_ref()
    }

    /// Route a square click through the selection machine
    pub fn click_square(&mut self, square: Square) -> ClickOutcome {
        let outcome = self.selection.click(square, &mut self.board);
        if matches!(outcome, ClickOutcome::Moved(_)) {
            self.analysis = None;
        }
        outcome
    }

    /// Place a piece manually; selection and analysis display are reset
    pub fn place_piece(&mut self, square: Square, color: ColorTag, piece: PieceTag) {
        placement::place(&mut self.board, square, color, piece);
        self.after_external_edit();
    }

    /// Place or remove from a compact tag spec (`"wq"`, `"bp"`, `"remove"`)
    ///
    /// An unrecognized spec is rejected without touching the board.
    pub fn place_from_spec(&mut self, square: Square, spec: &str) -> EditorResult<()> {
        match placement::parse_spec(spec)? {
            PlacementAction::Place(color, piece) => self.place_piece(square, color, piece),
            PlacementAction::Remove => self.remove_piece(square),
        }
        Ok(())
    }

    /// Clear a square manually; selection and analysis display are reset
    pub fn remove_piece(&mut self, square: Square) {
        placement::remove(&mut self.board, square);
        self.after_external_edit();
    }

    /// Back to the standard starting position
    pub fn reset(&mut self) {
        self.board.reset();
        self.after_external_edit();
    }

    /// Remove all pieces, keeping the side to move
    pub fn clear_board(&mut self) {
        self.board.clear();
        self.after_external_edit();
    }

    /// Flip the side to move; selection and analysis survive on purpose
    pub fn flip_side(&mut self) {
        self.board.toggle_turn();
    }

    /// Load a FEN, atomically; selection and display reset only on success
    pub fn load_fen(&mut self, fen: &str) -> EditorResult<()> {
        self.board.load_fen(fen)?;
        self.after_external_edit();
        Ok(())
    }

    /// Ask the engine for a best move and evaluation of the current position
    ///
    /// On success the result is cached for display until the next position
    /// change. `NoLegalMove` and engine failures leave the cache untouched.
    pub fn request_best_move(
        &mut self,
        session: &EngineSession,
        time_budget_secs: f64,
    ) -> EngineResult<BestMoveOutcome> {
        let query = EngineQuery::new(self.board.setup().clone(), time_budget_secs);
        let outcome = session.compute_best_move(&query)?;
        if let BestMoveOutcome::Best(result) = &outcome {
            info!(
                "[EDITOR] Best move {} ({}), eval {}",
                result.san, result.uci, result.evaluation
            );
            self.analysis = Some(result.clone());
        }
        Ok(outcome)
    }

    /// Push the cached best move onto the board, if it is still legal
    pub fn apply_best_move(&mut self) -> bool {
        let Some(result) = self.analysis.take() else {
            return false;
        };
        let Some(pos) = self.board.position() else {
            return false;
        };
        let Ok(uci) = result.uci.parse::<UciMove>() else {
            return false;
        };
        let Ok(m) = uci.to_move(&pos) else {
            return false;
        };
        let played = self.board.play(&m);
        if played {
            self.selection.clear();
            info!("[EDITOR] Applied engine move {}", result.uci);
        }
        played
    }

    fn after_external_edit(&mut self) {
        self.selection.clear();
        self.analysis = None;
    }
}
