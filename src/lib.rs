//! clickchess - click-driven chessboard editor core with engine queries
//!
//! Implements the interactive heart of a "set up a position, ask Stockfish"
//! board editor: the two-click selection state machine, direct piece
//! placement that bypasses legality, and a per-query UCI engine session that
//! turns raw search output into a display evaluation.
//!
//! # Module Organization
//!
//! - `core` - application infrastructure (engine settings, config persistence)
//! - `editor` - board state, placement, selection and click routing
//! - `engine` - per-query UCI process session and score interpretation
//!
//! # Architecture
//!
//! UI events feed [`editor::BoardEditor`], which owns the board and the
//! selection machine and keeps the cached best-move display honest. A
//! best-move request snapshots the board into an [`engine::EngineQuery`] and
//! runs one short-lived engine process through
//! [`engine::EngineSession::compute_best_move`]; the process is always torn
//! down before the call returns. Chess rules themselves (legal moves, FEN,
//! SAN) are delegated to `shakmaty` throughout; this crate never computes
//! them on its own.

pub mod core;
pub mod editor;
pub mod engine;

pub use editor::{BoardEditor, BoardState, ClickOutcome, SelectionController, SquareGrid};
pub use engine::{BestMoveOutcome, BestMoveResult, EngineQuery, EngineSession, Evaluation};
