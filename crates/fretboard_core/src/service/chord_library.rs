//! Saved chord collection.
//!
//! # Responsibility
//! - Hold the in-memory chord list and mirror it to a [`ChordStore`].
//! - Provide add/remove/search over the collection.
//!
//! # Invariants
//! - Chord ids are unique within the collection.
//! - Every mutation is followed by a full save of the collection.
//! - Storage failures never surface to callers: reads degrade to an empty
//!   collection, writes keep the last in-memory state.
//!
//! # Side effects
//! - `add` replaces the caller's selection with the saved notes.

use crate::model::chord::{Chord, ChordDraft};
use crate::music::{generate_id, now_epoch_ms};
use crate::repo::chord_store::{ChordStore, StoreError};
use crate::search::filter::search_chords;
use crate::service::selection::SelectionState;
use log::{debug, error, info, warn};
use std::time::Instant;

/// Chord collection manager over a durable store.
pub struct ChordLibrary<S: ChordStore> {
    store: S,
    chords: Vec<Chord>,
    last_persist_error: Option<String>,
}

impl<S: ChordStore> ChordLibrary<S> {
    /// Rehydrates the collection from `store`.
    ///
    /// A missing record starts empty. An unreadable record is logged and
    /// also starts empty.
    pub fn open(store: S) -> Self {
        let chords = match store.load() {
            Ok(Some(chords)) => {
                info!(
                    "event=chords_load module=chords status=ok chord_count={}",
                    chords.len()
                );
                chords
            }
            Ok(None) => {
                info!("event=chords_load module=chords status=ok chord_count=0 source=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=chords_load module=chords status=degraded error_code={} error={err}",
                    store_error_code(&err)
                );
                Vec::new()
            }
        };

        Self {
            store,
            chords,
            last_persist_error: None,
        }
    }

    /// Continues from an in-memory collection without reading `store`.
    ///
    /// Hosts that outlive a single library use this to carry the
    /// last-known-good collection across a failed write.
    pub fn resume(store: S, chords: Vec<Chord>) -> Self {
        debug!(
            "event=chords_resume module=chords status=ok chord_count={}",
            chords.len()
        );
        Self {
            store,
            chords,
            last_persist_error: None,
        }
    }

    /// Saves `draft` as a new chord and loads its notes into `selection`.
    ///
    /// Empty names or note lists are not rejected here; the save flow checks
    /// them before calling.
    pub fn add(&mut self, draft: ChordDraft, selection: &mut SelectionState) -> Chord {
        let chord = Chord::from_draft(draft, generate_id(), now_epoch_ms());
        self.chords.push(chord.clone());
        self.persist("chord_add");
        selection.load_notes(chord.notes.clone());
        chord
    }

    /// Deletes the chord with `id`. Returns `false` when no chord matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.chords.iter().position(|chord| chord.id == id) else {
            return false;
        };
        self.chords.remove(index);
        self.persist("chord_remove");
        true
    }

    /// Case-insensitive substring search; blank queries return everything.
    pub fn search(&self, query: &str) -> Vec<&Chord> {
        search_chords(&self.chords, query)
    }

    pub fn get(&self, id: &str) -> Option<&Chord> {
        self.chords.iter().find(|chord| chord.id == id)
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Releases the store and returns the collection.
    pub fn into_chords(self) -> Vec<Chord> {
        self.chords
    }

    /// Message of the most recent failed save, cleared by the next success.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn persist(&mut self, event: &'static str) {
        let started_at = Instant::now();
        match self.store.save(&self.chords) {
            Ok(()) => {
                self.last_persist_error = None;
                info!(
                    "event={event} module=chords status=ok chord_count={} duration_ms={}",
                    self.chords.len(),
                    started_at.elapsed().as_millis()
                );
            }
            Err(err) => {
                error!(
                    "event={event} module=chords status=error chord_count={} duration_ms={} error_code={} error={err}",
                    self.chords.len(),
                    started_at.elapsed().as_millis(),
                    store_error_code(&err)
                );
                self.last_persist_error = Some(err.to_string());
            }
        }
    }
}

fn store_error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::Db(_) => "store_db_failed",
        StoreError::Serialization(_) => "store_encoding_failed",
        StoreError::UnsupportedStoreVersion { .. } => "store_version_unsupported",
        StoreError::InvalidData(_) => "store_invalid_data",
    }
}
