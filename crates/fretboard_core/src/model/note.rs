//! Fretted note record.

use crate::music::{frequency, note_from_fret, PitchClass};
use serde::{Deserialize, Serialize};

/// One fretted position with its derived pitch data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Index into the tuning table, 0 = top (G) string.
    pub string: usize,
    /// 0 = open string.
    pub fret: u32,
    /// Derived from `(string, fret)`.
    pub note_name: PitchClass,
    /// Derived from `(string, fret)`; older records may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl Note {
    /// Builds the note at `(string, fret)` with derived fields filled in.
    ///
    /// # Panics
    /// - When `string` is outside the tuning table.
    pub fn at(string: usize, fret: u32) -> Self {
        Self {
            string,
            fret,
            note_name: note_from_fret(string, fret),
            frequency: Some(frequency(string, fret)),
        }
    }

    /// Whether this note occupies `(string, fret)`.
    pub fn is_at(&self, string: usize, fret: u32) -> bool {
        self.string == string && self.fret == fret
    }
}
