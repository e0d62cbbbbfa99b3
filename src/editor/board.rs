//! Board state owned by the editor
//!
//! [`BoardState`] wraps a `shakmaty::Setup`: raw piece placement plus turn,
//! castling rights, en-passant square and move counters. The setup is a plain
//! value with no legality enforcement, so manual edits can produce positions
//! the rules oracle considers invalid (multiple kings, pawns on back ranks);
//! that is deliberate, this is an editor. Everything rule-shaped (legal
//! moves, FEN parsing and formatting, SAN) is delegated to shakmaty.

use crate::editor::error::{EditorError, EditorResult};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, Piece, Position, Setup, Square};
use tracing::{debug, info};

/// The editable position: placement, side to move and oracle bookkeeping
#[derive(Debug, Clone)]
pub struct BoardState {
    setup: Setup,
}

impl Default for BoardState {
    /// Standard starting position, white to move
    fn default() -> Self {
        Self {
            setup: Setup::default(),
        }
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the standard starting position, turn = white
    pub fn reset(&mut self) {
        self.setup = Setup::default();
        info!("[BOARD] Reset to starting position");
    }

    /// Remove every piece; the side to move is preserved
    ///
    /// Castling rights and the en-passant square are cleared along with the
    /// pieces they refer to.
    pub fn clear(&mut self) {
        let turn = self.setup.turn;
        let mut setup = Setup::empty();
        setup.turn = turn;
        self.setup = setup;
        info!("[BOARD] Cleared all pieces, {:?} to move", turn);
    }

    /// Flip the side to move without touching anything else
    ///
    /// Castling rights and the en-passant square are left exactly as they
    /// were, which can leave the oracle's bookkeeping out of sync with the
    /// displayed turn. Loading a FEN puts everything back in agreement.
    pub fn toggle_turn(&mut self) {
        self.setup.turn = !self.setup.turn;
        info!("[BOARD] Side to move flipped to {:?}", self.setup.turn);
    }

    /// Replace the whole position from FEN notation
    ///
    /// Atomic-or-reject: on a malformed string the prior position is kept
    /// byte for byte and [`EditorError::InvalidPositionFormat`] is returned.
    pub fn load_fen(&mut self, fen: &str) -> EditorResult<()> {
        let parsed: Fen =
            fen.trim()
                .parse()
                .map_err(|e: shakmaty::fen::ParseFenError| EditorError::InvalidPositionFormat {
                    input: fen.to_string(),
                    reason: e.to_string(),
                })?;
        self.setup = parsed.into_setup();
        info!("[BOARD] Loaded position from FEN, {:?} to move", self.setup.turn);
        Ok(())
    }

    /// Format the current position as FEN
    pub fn fen(&self) -> String {
        Fen(self.setup.clone()).to_string()
    }

    pub fn turn(&self) -> Color {
        self.setup.turn
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.setup.board.piece_at(square)
    }

    /// Direct write, bypassing all legality checks
    pub(crate) fn set_piece_at(&mut self, square: Square, piece: Piece) {
        self.setup.board.set_piece_at(square, piece);
    }

    /// Unconditional clear of one square
    pub(crate) fn discard_piece_at(&mut self, square: Square) {
        self.setup.board.discard_piece_at(square);
    }

    /// Snapshot of the underlying setup, for engine queries
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// The oracle's view of the current setup
    ///
    /// Returns `None` when the setup is not a position shakmaty can reason
    /// about (no kings, side not to move in check, and so on). Such setups
    /// simply have no legal moves as far as the editor is concerned.
    pub fn position(&self) -> Option<Chess> {
        Chess::from_setup(self.setup.clone(), CastlingMode::Standard).ok()
    }

    /// Commit a move that was validated against [`BoardState::position`]
    ///
    /// Returns false (and changes nothing) if the current setup has no oracle
    /// view to play the move on.
    pub(crate) fn play(&mut self, m: &Move) -> bool {
        let Some(mut pos) = self.position() else {
            debug!("[BOARD] Ignoring move on an unbuildable position");
            return false;
        };
        pos.play_unchecked(m);
        self.setup = pos.into_setup(EnPassantMode::Legal);
        true
    }
}
