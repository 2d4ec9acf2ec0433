//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database path, storage key, logging and board size settings.
//! - Read overrides from `FRETBOARD_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are ignored.
//! - An unparsable fret count falls back to the default.
//! - Fret counts above `MAX_TOTAL_FRETS` are clamped.

use crate::logging::default_log_level;
use crate::music::layout::MAX_TOTAL_FRETS;
use crate::music::DEFAULT_TOTAL_FRETS;
use crate::repo::chord_store::CHORD_STORAGE_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FRETBOARD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FRETBOARD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FRETBOARD_LOG_DIR";
pub const TOTAL_FRETS_ENV: &str = "FRETBOARD_TOTAL_FRETS";

const DEFAULT_DB_FILE_NAME: &str = "fretboard_chords.sqlite3";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding the chord store.
    pub db_path: PathBuf,
    /// Key of the chord collection record.
    pub storage_key: String,
    pub log_level: String,
    /// Absolute log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    /// Frets drawn by the full-size board.
    pub total_frets: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: CHORD_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            total_frets: DEFAULT_TOTAL_FRETS,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(frets) = read(TOTAL_FRETS_ENV).and_then(|value| value.parse::<u32>().ok()) {
            config.total_frets = frets.min(MAX_TOTAL_FRETS);
        }
        config
    }
}
