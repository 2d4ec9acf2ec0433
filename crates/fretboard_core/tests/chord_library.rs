use fretboard_core::db::open_db_in_memory;
use fretboard_core::{
    Chord, ChordDraft, ChordLibrary, ChordStore, Note, PitchClass, SelectionState,
    SqliteChordStore, StoreError, StoreResult,
};
use std::cell::RefCell;
use std::rc::Rc;

fn draft(name: &str, notes: &[(usize, u32)], tags: &str) -> ChordDraft {
    let notes: Vec<Note> = notes
        .iter()
        .map(|(string, fret)| Note::at(*string, *fret))
        .collect();
    ChordDraft::from_selection(name, &notes, tags)
}

#[test]
fn add_assigns_identity_and_resyncs_selection() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    selection.toggle(0, 9);

    let chord = library.add(
        draft("Root 5th", &[(3, 0), (2, 2)], "power, simple"),
        &mut selection,
    );

    assert!(!chord.id.is_empty());
    assert!(chord.created_at > 0);
    assert_eq!(chord.root_note, Some(PitchClass::E));
    assert_eq!(chord.tags, vec!["power".to_string(), "simple".to_string()]);
    assert_eq!(chord.chord_type, None);
    assert_eq!(library.len(), 1);
    assert_eq!(selection.notes(), chord.notes.as_slice());
    assert!(!selection.is_selected(0, 9));
}

#[test]
fn add_then_remove_restores_previous_contents() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    library.add(draft("first", &[(3, 3)], ""), &mut selection);
    let before: Vec<Chord> = library.chords().to_vec();

    let added = library.add(draft("second", &[(2, 5)], "x"), &mut selection);
    assert!(library.remove(&added.id));
    assert_eq!(library.chords(), before.as_slice());
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    library.add(draft("kept", &[(1, 0)], ""), &mut selection);

    assert!(!library.remove("missing"));
    assert!(!library.remove("missing"));
    assert_eq!(library.len(), 1);
}

#[test]
fn add_does_not_reject_empty_drafts() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    selection.toggle(3, 0);

    let chord = library.add(ChordDraft::default(), &mut selection);
    assert!(chord.notes.is_empty());
    assert!(selection.is_empty());
    assert_eq!(library.len(), 1);
}

#[test]
fn search_matches_name_tag_and_root_case_insensitively() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    let root_fifth = library.add(
        draft("Root 5th", &[(3, 0), (2, 2)], "power, simple"),
        &mut selection,
    );
    let octave = library.add(draft("Octave shape", &[(2, 0), (0, 2)], "Jazz"), &mut selection);

    let hits = library.search("pow");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, root_fifth.id);

    let hits = library.search("OCTAVE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, octave.id);

    let hits = library.search("a");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, octave.id);

    assert!(library.search("zzz").is_empty());
}

#[test]
fn blank_search_returns_whole_collection_in_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut library = ChordLibrary::open(SqliteChordStore::new(&mut conn));
    let mut selection = SelectionState::new();
    for name in ["c", "a", "b"] {
        library.add(draft(name, &[(0, 0)], ""), &mut selection);
    }

    for query in ["", "   ", "\t\n"] {
        let names: Vec<&str> = library
            .search(query)
            .iter()
            .map(|chord| chord.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}

#[derive(Default)]
struct FlakyState {
    saved: Option<Vec<Chord>>,
    fail_writes: bool,
    fail_reads: bool,
    writes: usize,
}

#[derive(Clone, Default)]
struct FlakyStore(Rc<RefCell<FlakyState>>);

impl ChordStore for FlakyStore {
    fn load(&self) -> StoreResult<Option<Vec<Chord>>> {
        let state = self.0.borrow();
        if state.fail_reads {
            return Err(StoreError::InvalidData("corrupted".to_string()));
        }
        Ok(state.saved.clone())
    }

    fn save(&mut self, chords: &[Chord]) -> StoreResult<()> {
        let mut state = self.0.borrow_mut();
        state.writes += 1;
        if state.fail_writes {
            return Err(StoreError::InvalidData("quota exceeded".to_string()));
        }
        state.saved = Some(chords.to_vec());
        Ok(())
    }
}

#[test]
fn unreadable_store_starts_empty() {
    let store = FlakyStore::default();
    store.0.borrow_mut().fail_reads = true;

    let library = ChordLibrary::open(store);
    assert!(library.is_empty());
}

#[test]
fn failed_writes_keep_in_memory_collection() {
    let store = FlakyStore::default();
    let handle = store.clone();
    let mut library = ChordLibrary::open(store);
    let mut selection = SelectionState::new();

    handle.0.borrow_mut().fail_writes = true;
    let chord = library.add(draft("kept", &[(3, 0)], ""), &mut selection);
    assert_eq!(library.len(), 1);
    assert!(library.last_persist_error().is_some());
    assert!(handle.0.borrow().saved.is_none());

    handle.0.borrow_mut().fail_writes = false;
    assert!(library.remove(&chord.id));
    assert!(library.last_persist_error().is_none());
    assert_eq!(handle.0.borrow().saved.as_deref(), Some(&[][..]));
}

#[test]
fn every_mutation_writes_and_no_op_remove_does_not() {
    let store = FlakyStore::default();
    let handle = store.clone();
    let mut library = ChordLibrary::open(store);
    let mut selection = SelectionState::new();

    let chord = library.add(draft("one", &[(2, 0)], ""), &mut selection);
    library.add(draft("two", &[(2, 2)], ""), &mut selection);
    assert_eq!(handle.0.borrow().writes, 2);

    library.remove("missing");
    assert_eq!(handle.0.borrow().writes, 2);

    library.remove(&chord.id);
    assert_eq!(handle.0.borrow().writes, 3);
    let saved = handle.0.borrow().saved.clone().expect("saved collection");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "two");
}

#[test]
fn resume_carries_unsaved_chords_into_a_new_library() {
    let store = FlakyStore::default();
    let handle = store.clone();
    let mut selection = SelectionState::new();
    handle.0.borrow_mut().fail_writes = true;

    let mut library = ChordLibrary::open(store.clone());
    let chord = library.add(draft("unsaved", &[(3, 0)], ""), &mut selection);
    let carried = library.into_chords();

    let reopened = ChordLibrary::open(store.clone());
    assert!(reopened.is_empty());

    let resumed = ChordLibrary::resume(store, carried);
    assert_eq!(resumed.get(&chord.id), Some(&chord));
    assert_eq!(handle.0.borrow().writes, 1);
}
