//! Session facade over selection and chord collection.
//!
//! # Responsibility
//! - Give the rendering layer one owned object for every documented
//!   operation.
//! - Enforce the save-flow rule: a chord needs a name and a selection.

use crate::model::chord::{Chord, ChordDraft, ChordValidationError};
use crate::model::note::Note;
use crate::repo::chord_store::ChordStore;
use crate::service::chord_library::ChordLibrary;
use crate::service::selection::SelectionState;
use log::debug;

/// Selection working set plus persisted chord library.
pub struct FretboardSession<S: ChordStore> {
    selection: SelectionState,
    library: ChordLibrary<S>,
}

impl<S: ChordStore> FretboardSession<S> {
    /// Opens a session with an empty selection and a rehydrated library.
    pub fn open(store: S) -> Self {
        Self {
            selection: SelectionState::new(),
            library: ChordLibrary::open(store),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn library(&self) -> &ChordLibrary<S> {
        &self.library
    }

    pub fn toggle(&mut self, string: usize, fret: u32) -> bool {
        self.selection.toggle(string, fret)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn load_notes(&mut self, notes: Vec<Note>) {
        self.selection.load_notes(notes);
    }

    pub fn set_display_range(&mut self, start_fret: u32, end_fret: u32) {
        self.selection.set_display_range(start_fret, end_fret);
    }

    /// Saves the current selection as a chord.
    ///
    /// `tag_input` is comma-separated. On success the selection equals the
    /// saved notes.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank.
    /// - `NoNotes` when nothing is selected.
    pub fn save_selection(
        &mut self,
        name: &str,
        tag_input: &str,
    ) -> Result<Chord, ChordValidationError> {
        let draft = ChordDraft::from_selection(name, self.selection.notes(), tag_input);
        if let Err(err) = draft.validate() {
            debug!("event=chord_save module=session status=rejected reason={err}");
            return Err(err);
        }
        Ok(self.library.add(draft, &mut self.selection))
    }

    /// Adds a caller-built draft without save-flow validation.
    pub fn add(&mut self, draft: ChordDraft) -> Chord {
        self.library.add(draft, &mut self.selection)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.library.remove(id)
    }

    pub fn search(&self, query: &str) -> Vec<&Chord> {
        self.library.search(query)
    }

    /// Loads the notes of saved chord `id` into the selection.
    ///
    /// Returns `false` and leaves the selection untouched when `id` is
    /// unknown.
    pub fn recall(&mut self, id: &str) -> bool {
        let Some(chord) = self.library.get(id) else {
            return false;
        };
        let notes = chord.notes.clone();
        self.selection.load_notes(notes);
        true
    }
}
