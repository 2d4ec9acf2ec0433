//! Selection working set.
//!
//! # Responsibility
//! - Track which fretboard positions are selected, in toggle order.
//! - Hold the visible fret window and the detected-chord slot.
//!
//! # Invariants
//! - At most one note per `(string, fret)`.
//! - Removing a note preserves the order of the remaining notes.
//! - Clearing or loading drops any detected-chord annotation.

use crate::model::note::Note;
use crate::model::selection::{DetectedChord, DisplayRange};
use log::debug;

/// In-memory selection state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selected_notes: Vec<Note>,
    display_range: DisplayRange,
    current_chord: Option<DetectedChord>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `(string, fret)` or deselects it when already selected.
    ///
    /// Returns `true` when the position is selected afterwards.
    ///
    /// # Panics
    /// - When `string` is outside the tuning table and not yet selected.
    pub fn toggle(&mut self, string: usize, fret: u32) -> bool {
        if let Some(index) = self
            .selected_notes
            .iter()
            .position(|note| note.is_at(string, fret))
        {
            self.selected_notes.remove(index);
            debug!(
                "event=selection_toggle module=selection status=ok action=remove selected_count={}",
                self.selected_notes.len()
            );
            return false;
        }

        self.selected_notes.push(Note::at(string, fret));
        debug!(
            "event=selection_toggle module=selection status=ok action=add selected_count={}",
            self.selected_notes.len()
        );
        true
    }

    /// Empties the selection and the detected-chord slot.
    pub fn clear(&mut self) {
        self.selected_notes.clear();
        self.current_chord = None;
    }

    /// Replaces the whole selection with `notes`.
    pub fn load_notes(&mut self, notes: Vec<Note>) {
        self.selected_notes = notes;
        self.current_chord = None;
        debug!(
            "event=selection_load module=selection status=ok selected_count={}",
            self.selected_notes.len()
        );
    }

    /// Records the visible fret window. Bounds are not checked here.
    pub fn set_display_range(&mut self, start_fret: u32, end_fret: u32) {
        self.display_range = DisplayRange {
            start_fret,
            end_fret,
        };
    }

    /// Attaches a chord-recognition result to the current selection.
    pub fn annotate(&mut self, detected: DetectedChord) {
        self.current_chord = Some(detected);
    }

    pub fn notes(&self) -> &[Note] {
        &self.selected_notes
    }

    pub fn is_selected(&self, string: usize, fret: u32) -> bool {
        self.selected_notes.iter().any(|note| note.is_at(string, fret))
    }

    pub fn is_empty(&self) -> bool {
        self.selected_notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected_notes.len()
    }

    pub fn display_range(&self) -> DisplayRange {
        self.display_range
    }

    pub fn current_chord(&self) -> Option<&DetectedChord> {
        self.current_chord.as_ref()
    }
}
