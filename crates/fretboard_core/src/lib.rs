//! Core domain logic for the bass fretboard chord workbench.
//! This crate owns music math, selection state and the saved chord library.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod music;
pub mod repo;
pub mod search;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chord::{parse_tag_input, Chord, ChordDraft, ChordId, ChordValidationError};
pub use model::note::Note;
pub use model::selection::{DetectedChord, DisplayRange};
pub use music::layout::{normalized_fret_positions, FretboardLayout, Inlay, MAX_TOTAL_FRETS};
pub use music::{
    fret_position_fraction, fret_positions, frequency, generate_id, note_from_fret, PitchClass,
};
pub use repo::chord_store::{
    ChordStore, SqliteChordStore, StoreError, StoreResult, CHORD_STORAGE_KEY,
};
pub use search::filter::{search_chords, ChordQuery};
pub use service::chord_library::ChordLibrary;
pub use service::selection::SelectionState;
pub use service::session::FretboardSession;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
