//! Core module - application infrastructure
//!
//! Holds the pieces that are not chess: the engine settings surface consumed
//! by the query subsystem, its JSON persistence, and the core error types.
//!
//! # Resources
//!
//! - [`EngineSettings`] - engine executable path and default time budget
//! - [`CoreError`] / [`CoreResult`] - settings I/O and parse failures

pub mod config;
pub mod error;

pub use config::EngineSettings;
pub use error::{CoreError, CoreResult};
