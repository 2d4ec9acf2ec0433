//! Selection-side records that are never persisted.

use serde::{Deserialize, Serialize};

/// Default first visible fret.
pub const DEFAULT_START_FRET: u32 = 0;
/// Default last visible fret.
pub const DEFAULT_END_FRET: u32 = 12;

/// Visible fret window. Callers keep `start_fret <= end_fret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRange {
    pub start_fret: u32,
    pub end_fret: u32,
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self {
            start_fret: DEFAULT_START_FRET,
            end_fret: DEFAULT_END_FRET,
        }
    }
}

impl DisplayRange {
    pub fn contains(&self, fret: u32) -> bool {
        (self.start_fret..=self.end_fret).contains(&fret)
    }
}

/// Chord-recognition annotation.
///
/// Reserved slot: nothing in core populates it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedChord {
    pub detected_name: String,
    /// 0.0 to 1.0.
    pub confidence: f32,
}
