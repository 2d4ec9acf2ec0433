//! Substring filter over chord name, tags, root note and chord type.
//!
//! # Invariants
//! - Blank queries return the full collection unchanged.
//! - Matches keep collection order; there is no ranking.
//! - Each field is matched independently; one hit includes the chord.

use crate::model::chord::Chord;

/// Normalized query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordQuery {
    needle: Option<String>,
}

impl ChordQuery {
    /// Parses raw user input. Whitespace-only input matches everything.
    pub fn new(text: &str) -> Self {
        let needle = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        Self { needle }
    }

    /// Whether this query matches every chord.
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    /// Whether `chord` satisfies this query.
    pub fn matches(&self, chord: &Chord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        let contains = |field: &str| field.to_lowercase().contains(needle);

        contains(chord.name.as_str())
            || chord.tags.iter().any(|tag| contains(tag.as_str()))
            || chord
                .root_note
                .is_some_and(|root| contains(root.as_str()))
            || chord.chord_type.as_deref().is_some_and(contains)
    }
}

/// Returns the chords matching `query`, in collection order.
pub fn search_chords<'a>(chords: &'a [Chord], query: &str) -> Vec<&'a Chord> {
    let query = ChordQuery::new(query);
    chords.iter().filter(|chord| query.matches(chord)).collect()
}
