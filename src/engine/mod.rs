//! Engine module - per-query UCI subprocess and score interpretation
//!
//! One spawned engine process per best-move request, never pooled and never
//! shared: [`EngineSession`] owns the whole exchange and [`UciProcess`]
//! guarantees the child is gone before the call returns. Scores come back as
//! [`Evaluation`] values ready for display.
//!
//! # Module Organization
//!
//! - `session` - the query driver (two time-bounded search passes)
//! - `uci` - process spawn, line exchange, guaranteed teardown
//! - `score` - raw score to display-value conversion
//! - `error` - engine failure types

pub mod error;
pub mod score;
pub mod session;
pub mod uci;

pub use error::{EngineError, EngineResult};
pub use score::Evaluation;
pub use session::{BestMoveOutcome, BestMoveResult, EngineQuery, EngineSession};
pub use uci::UciProcess;
