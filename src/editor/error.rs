//! Error types for editor module
//!
//! Covers the two rejected-input cases of board editing: malformed position
//! notation and unrecognized placement tags. Both leave the board untouched.

use thiserror::Error;

/// Errors that can occur while editing the board
#[derive(Debug, Error)]
pub enum EditorError {
    /// Position notation (FEN) could not be parsed; prior position retained
    #[error("Invalid position format {input:?}: {reason}")]
    InvalidPositionFormat { input: String, reason: String },

    /// Manual placement tag not recognized; no mutation performed
    #[error("Invalid placement input {tag:?}: expected color 'w'/'b' and piece 'p','n','b','r','q','k', or \"remove\"")]
    InvalidPlacementInput { tag: String },
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
