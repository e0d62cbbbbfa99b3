//! Engine settings persistence
//!
//! Saves and loads [`EngineSettings`] to/from a JSON file. The settings hold
//! the two values the engine-query subsystem consumes: the path of the UCI
//! engine executable and the default time budget applied when a request comes
//! in with a non-positive budget.
//!
//! # Error Handling
//!
//! [`EngineSettings::load_or_default`] never fails: unreadable or malformed
//! files are logged and replaced by defaults. The strict [`EngineSettings::load`]
//! and [`EngineSettings::save`] variants report [`CoreError`] for callers that
//! need to know.

use crate::core::error::CoreResult;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "engine_settings.json";

/// Default engine executable, resolved through PATH
const DEFAULT_ENGINE_PATH: &str = "stockfish";

/// Default thinking time per search request, in seconds
const DEFAULT_TIME_BUDGET_SECS: f64 = 0.25;

/// Configuration surface consumed by the engine session
///
/// `default_time_budget_secs` must be positive; the session falls back to the
/// built-in default if a loaded file carries a non-positive value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Path to the UCI engine executable
    pub engine_path: PathBuf,

    /// Time budget substituted when a query asks for zero or less
    pub default_time_budget_secs: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from(DEFAULT_ENGINE_PATH),
            default_time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
        }
    }
}

impl EngineSettings {
    /// Resolve the per-user settings file path
    ///
    /// Falls back to a local `engine_settings.json` if the system config
    /// directory cannot be determined.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "clickchess", "clickchess") {
            proj_dirs.config_dir().join(SETTINGS_FILENAME)
        } else {
            PathBuf::from(SETTINGS_FILENAME)
        }
    }

    /// The default time budget, guarded against bad persisted values
    pub fn effective_default_budget(&self) -> f64 {
        if self.default_time_budget_secs > 0.0 {
            self.default_time_budget_secs
        } else {
            DEFAULT_TIME_BUDGET_SECS
        }
    }

    /// Load settings, using defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[SETTINGS] No settings file at {:?}. Using defaults.", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded engine settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings from {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save settings to a JSON file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved engine settings to {:?}", path);
        Ok(())
    }
}
