//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the documented fretboard operations to Dart via FRB.
//! - Hold the process-wide selection the UI draws from.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Out-of-range string indices are rejected here, before core lookups.
//! - The process keeps the last-known-good chord collection; reads are
//!   served from it and a failed write never drops a chord from it.
//! - Mutations open the database per call and release it on return.
//! - Board sizes are clamped to `MAX_TOTAL_FRETS`.

use fretboard_core::db::open_db;
use fretboard_core::music::STRING_COUNT;
use fretboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, note_from_fret,
    ping as ping_inner, search_chords, Chord, ChordDraft, ChordLibrary, CoreConfig,
    FretboardLayout, Inlay, Note, SelectionState, SqliteChordStore, MAX_TOTAL_FRETS,
};
use log::warn;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static CONFIG: OnceLock<CoreConfig> = OnceLock::new();
static SELECTION: Lazy<Mutex<SelectionState>> = Lazy::new(|| Mutex::new(SelectionState::new()));
static LIBRARY: Lazy<Mutex<ChordCache>> = Lazy::new(|| Mutex::new(None));

/// Last-known-good chord collection; `None` until the first load.
type ChordCache = Option<Vec<Chord>>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Initializes logging from `FRETBOARD_LOG_LEVEL` / `FRETBOARD_LOG_DIR`.
///
/// Returns an empty string on success or when no log directory is set.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    let config = config();
    match config.log_dir.as_ref() {
        Some(dir) => init_logging(config.log_level.clone(), dir.display().to_string()),
        None => String::new(),
    }
}

/// One selected or saved note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub string: u32,
    pub fret: u32,
    pub note_name: String,
    pub frequency: Option<f64>,
}

/// Selection snapshot returned after every selection call.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    pub notes: Vec<NoteView>,
    pub start_fret: u32,
    pub end_fret: u32,
    /// Empty on success.
    pub message: String,
}

/// Saved chord as shown in the library list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordView {
    pub id: String,
    pub name: String,
    pub notes: Vec<NoteView>,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub root_note: Option<String>,
    pub chord_type: Option<String>,
}

/// Result envelope for chord mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordActionResponse {
    pub ok: bool,
    pub chord: Option<ChordView>,
    pub message: String,
}

impl ChordActionResponse {
    fn success(message: impl Into<String>, chord: Option<ChordView>) -> Self {
        Self {
            ok: true,
            chord,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            chord: None,
            message: message.into(),
        }
    }
}

/// Result envelope for library search.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordSearchResponse {
    pub items: Vec<ChordView>,
    pub message: String,
}

/// Inlay marker placement.
#[derive(Debug, Clone, PartialEq)]
pub struct InlayView {
    pub fret: u32,
    pub double: bool,
    pub x: f64,
}

/// Pixel geometry for one fretboard view.
#[derive(Debug, Clone, PartialEq)]
pub struct FretLayoutView {
    /// Index 0 is the nut.
    pub wire_x: Vec<f64>,
    /// Index 0 is the open-string button.
    pub note_x: Vec<f64>,
    pub inlays: Vec<InlayView>,
    /// Open-string labels, top string first.
    pub string_labels: Vec<String>,
}

/// Pitch-class label at `(string, fret)`, or empty for an unknown string.
#[flutter_rust_bridge::frb(sync)]
pub fn note_label(string: u32, fret: u32) -> String {
    match checked_string(string) {
        Some(index) => note_from_fret(index, fret).as_str().to_string(),
        None => String::new(),
    }
}

/// Geometry for a board drawing frets `0..=total_frets` across `width_px`.
///
/// Sizes above `MAX_TOTAL_FRETS` are drawn at `MAX_TOTAL_FRETS`.
#[flutter_rust_bridge::frb(sync)]
pub fn fret_layout(total_frets: u32, width_px: f64) -> FretLayoutView {
    if total_frets > MAX_TOTAL_FRETS {
        warn!(
            "event=ffi_fret_layout module=ffi status=clamped requested={total_frets} max={MAX_TOTAL_FRETS}"
        );
    }
    let total_frets = total_frets.min(MAX_TOTAL_FRETS);
    let layout = FretboardLayout::new(total_frets, width_px);
    let frets = 0..=total_frets;
    FretLayoutView {
        wire_x: frets
            .clone()
            .filter_map(|fret| layout.fret_wire_x(fret))
            .collect(),
        note_x: frets.filter_map(|fret| layout.note_x(fret)).collect(),
        inlays: layout
            .inlays()
            .into_iter()
            .map(|(fret, inlay, x)| InlayView {
                fret,
                double: inlay == Inlay::Double,
                x,
            })
            .collect(),
        string_labels: (0..STRING_COUNT)
            .map(|string| note_from_fret(string, 0).as_str().to_string())
            .collect(),
    }
}

/// Board size from configuration, for hosts that do not pick their own.
#[flutter_rust_bridge::frb(sync)]
pub fn default_total_frets() -> u32 {
    config().total_frets
}

#[flutter_rust_bridge::frb(sync)]
pub fn selection_toggle(string: u32, fret: u32) -> SelectionView {
    toggle_in(&mut lock_selection(), string, fret)
}

#[flutter_rust_bridge::frb(sync)]
pub fn selection_clear() -> SelectionView {
    let mut selection = lock_selection();
    selection.clear();
    to_selection_view(&selection, "")
}

#[flutter_rust_bridge::frb(sync)]
pub fn selection_snapshot() -> SelectionView {
    to_selection_view(&lock_selection(), "")
}

#[flutter_rust_bridge::frb(sync)]
pub fn selection_set_display_range(start_fret: u32, end_fret: u32) -> SelectionView {
    let mut selection = lock_selection();
    selection.set_display_range(start_fret, end_fret);
    to_selection_view(&selection, "")
}

/// Saves the current selection; on success the selection equals the saved
/// notes.
#[flutter_rust_bridge::frb(sync)]
pub fn chord_save(name: String, tags: String) -> ChordActionResponse {
    save_in(
        &mut lock_selection(),
        &mut lock_library(),
        &config().db_path,
        &name,
        &tags,
    )
}

/// Removes a saved chord. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn chord_remove(id: String) -> ChordActionResponse {
    remove_in(&mut lock_library(), &config().db_path, id.trim())
}

/// Case-insensitive library search; blank queries list everything.
#[flutter_rust_bridge::frb(sync)]
pub fn chord_search(query: String) -> ChordSearchResponse {
    search_in(&mut lock_library(), &config().db_path, &query)
}

/// Loads a saved chord's notes into the selection.
#[flutter_rust_bridge::frb(sync)]
pub fn chord_recall(id: String) -> ChordActionResponse {
    recall_in(
        &mut lock_selection(),
        &mut lock_library(),
        &config().db_path,
        id.trim(),
    )
}

fn config() -> &'static CoreConfig {
    CONFIG.get_or_init(CoreConfig::from_env)
}

fn lock_selection() -> MutexGuard<'static, SelectionState> {
    SELECTION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn lock_library() -> MutexGuard<'static, ChordCache> {
    LIBRARY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn checked_string(string: u32) -> Option<usize> {
    let index = usize::try_from(string).ok()?;
    (index < STRING_COUNT).then_some(index)
}

fn toggle_in(selection: &mut SelectionState, string: u32, fret: u32) -> SelectionView {
    let Some(index) = checked_string(string) else {
        return to_selection_view(
            selection,
            &format!("selection_toggle rejected: string {string} is outside the tuning"),
        );
    };
    selection.toggle(index, fret);
    to_selection_view(selection, "")
}

fn save_in(
    selection: &mut SelectionState,
    cache: &mut ChordCache,
    db_path: &Path,
    name: &str,
    tags: &str,
) -> ChordActionResponse {
    let draft = ChordDraft::from_selection(name, selection.notes(), tags);
    if let Err(err) = draft.validate() {
        return ChordActionResponse::failure(format!("chord_save rejected: {err}"));
    }

    with_library(cache, db_path, |library| {
        let chord = library.add(draft, selection);
        let message = match library.last_persist_error() {
            Some(err) => format!("Chord saved for this session only: {err}"),
            None => "Chord saved.".to_string(),
        };
        ChordActionResponse::success(message, Some(to_chord_view(&chord)))
    })
    .unwrap_or_else(|err| ChordActionResponse::failure(format!("chord_save failed: {err}")))
}

fn remove_in(cache: &mut ChordCache, db_path: &Path, id: &str) -> ChordActionResponse {
    with_library(cache, db_path, |library| {
        if !library.remove(id) {
            return ChordActionResponse::success("No chord with that id.", None);
        }
        match library.last_persist_error() {
            Some(err) => ChordActionResponse::success(
                format!("Chord removed for this session only: {err}"),
                None,
            ),
            None => ChordActionResponse::success("Chord removed.", None),
        }
    })
    .unwrap_or_else(|err| ChordActionResponse::failure(format!("chord_remove failed: {err}")))
}

fn search_in(cache: &mut ChordCache, db_path: &Path, query: &str) -> ChordSearchResponse {
    let result = with_chords(cache, db_path, |chords| {
        search_chords(chords, query)
            .into_iter()
            .map(to_chord_view)
            .collect::<Vec<_>>()
    });

    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No chords found.".to_string()
            } else {
                format!("Found {} chord(s).", items.len())
            };
            ChordSearchResponse { items, message }
        }
        Err(err) => ChordSearchResponse {
            items: Vec::new(),
            message: format!("chord_search failed: {err}"),
        },
    }
}

fn recall_in(
    selection: &mut SelectionState,
    cache: &mut ChordCache,
    db_path: &Path,
    id: &str,
) -> ChordActionResponse {
    let found = with_chords(cache, db_path, |chords| {
        chords.iter().find(|chord| chord.id == id).cloned()
    });
    match found {
        Ok(Some(chord)) => {
            selection.load_notes(chord.notes.clone());
            ChordActionResponse::success("Chord loaded.", Some(to_chord_view(&chord)))
        }
        Ok(None) => ChordActionResponse::failure("chord_recall failed: no chord with that id"),
        Err(err) => ChordActionResponse::failure(format!("chord_recall failed: {err}")),
    }
}

/// Read-only access; the database is touched only before the first load.
fn with_chords<T>(
    cache: &mut ChordCache,
    db_path: &Path,
    f: impl FnOnce(&[Chord]) -> T,
) -> Result<T, String> {
    if let Some(chords) = cache.as_deref() {
        return Ok(f(chords));
    }
    with_library(cache, db_path, |library| f(library.chords()))
}

fn with_library<T>(
    cache: &mut ChordCache,
    db_path: &Path,
    f: impl FnOnce(&mut ChordLibrary<SqliteChordStore<'_>>) -> T,
) -> Result<T, String> {
    let mut conn = open_db(db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("chord DB open failed: {err}")
    })?;
    let store = SqliteChordStore::with_key(&mut conn, config().storage_key.clone());
    let mut library = match cache.take() {
        Some(chords) => ChordLibrary::resume(store, chords),
        None => ChordLibrary::open(store),
    };
    let result = f(&mut library);
    *cache = Some(library.into_chords());
    Ok(result)
}

fn to_note_view(note: &Note) -> NoteView {
    NoteView {
        string: u32::try_from(note.string).unwrap_or(u32::MAX),
        fret: note.fret,
        note_name: note.note_name.as_str().to_string(),
        frequency: note.frequency,
    }
}

fn to_selection_view(selection: &SelectionState, message: &str) -> SelectionView {
    let range = selection.display_range();
    SelectionView {
        notes: selection.notes().iter().map(to_note_view).collect(),
        start_fret: range.start_fret,
        end_fret: range.end_fret,
        message: message.to_string(),
    }
}

fn to_chord_view(chord: &Chord) -> ChordView {
    ChordView {
        id: chord.id.clone(),
        name: chord.name.clone(),
        notes: chord.notes.iter().map(to_note_view).collect(),
        tags: chord.tags.clone(),
        created_at: chord.created_at,
        root_note: chord.root_note.map(|root| root.as_str().to_string()),
        chord_type: chord.chord_type.clone(),
    }
}
