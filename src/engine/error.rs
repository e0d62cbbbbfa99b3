//! Error types for engine module
//!
//! All engine failures are recovered at the session boundary and surfaced
//! once; none of them are fatal to the editor. A terminal position is not an
//! error at all (see `BestMoveOutcome::NoLegalMove`), and an unparsable score
//! is absorbed into `Evaluation::Unknown`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while querying the engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be spawned at the configured path
    #[error("Engine unavailable at {path:?}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process is running but the line protocol broke down
    #[error("Engine protocol error: {message}")]
    Protocol { message: String },

    /// I/O failure on the pipes to a running engine
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
