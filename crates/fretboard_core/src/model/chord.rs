//! Saved chord model.
//!
//! # Responsibility
//! - Define the persisted chord record and the draft shape used to create it.
//! - Own the save-dialog input rules (name trimming, comma-separated tags).
//!
//! # Invariants
//! - `id` and `created_at` are assigned once by the chord library.
//! - `root_note` is a snapshot of the first note at save time.
//! - `chord_type` is reserved and never populated by core logic.

use crate::model::note::Note;
use crate::music::PitchClass;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque chord identity produced by [`crate::music::generate_id`].
pub type ChordId = String;

/// Named, taggable set of notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub id: ChordId,
    pub name: String,
    /// Notes in selection order.
    pub notes: Vec<Note>,
    /// Free-text labels; search treats them case-insensitively.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_note: Option<PitchClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_type: Option<String>,
}

impl Chord {
    /// Materializes a draft with the given identity and creation time.
    pub fn from_draft(draft: ChordDraft, id: ChordId, created_at: i64) -> Self {
        Self {
            id,
            name: draft.name,
            notes: draft.notes,
            tags: draft.tags,
            created_at,
            root_note: draft.root_note,
            chord_type: draft.chord_type,
        }
    }
}

/// Chord content before identity assignment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChordDraft {
    pub name: String,
    pub notes: Vec<Note>,
    pub tags: Vec<String>,
    pub root_note: Option<PitchClass>,
    pub chord_type: Option<String>,
}

/// Reasons a draft may not be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordValidationError {
    EmptyName,
    NoNotes,
}

impl Display for ChordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "chord name must not be empty"),
            Self::NoNotes => write!(f, "chord must contain at least one note"),
        }
    }
}

impl Error for ChordValidationError {}

impl ChordDraft {
    /// Builds a draft from save-dialog input.
    ///
    /// The name is trimmed, `tag_input` is split on commas with blank entries
    /// dropped, and `root_note` is the first note's pitch class.
    pub fn from_selection(name: &str, notes: &[Note], tag_input: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            notes: notes.to_vec(),
            tags: parse_tag_input(tag_input),
            root_note: notes.first().map(|note| note.note_name),
            chord_type: None,
        }
    }

    /// Checks the save-flow preconditions.
    pub fn validate(&self) -> Result<(), ChordValidationError> {
        if self.name.trim().is_empty() {
            return Err(ChordValidationError::EmptyName);
        }
        if self.notes.is_empty() {
            return Err(ChordValidationError::NoNotes);
        }
        Ok(())
    }
}

/// Splits comma-separated tag input.
///
/// Tags are trimmed, blanks dropped, and case-insensitive duplicates removed
/// keeping the first spelling.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if tag.is_empty() {
            continue;
        }
        let lowered = tag.to_lowercase();
        if tags.iter().any(|existing| existing.to_lowercase() == lowered) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}
