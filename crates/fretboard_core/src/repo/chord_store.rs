//! Chord collection store over a SQLite key-value table.
//!
//! # Responsibility
//! - Serialize the full chord collection into one versioned JSON envelope.
//! - Read the envelope back and validate it before handing it to services.
//!
//! # Invariants
//! - Envelope shape: `{"name", "version", "state": {"savedChords": [...]}}`.
//! - Every save runs in its own immediate transaction; an early return drops
//!   and rolls back the transaction.
//! - A record written by a newer envelope version is refused.

use crate::db::DbError;
use crate::model::chord::Chord;
use crate::music::{note_from_fret, STRING_COUNT};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed namespace key of the chord collection record.
pub const CHORD_STORAGE_KEY: &str = "bass-chord-storage";

/// Envelope version written by this build.
pub const STORE_FORMAT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for chord collection reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    UnsupportedStoreVersion { found: u32, supported: u32 },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "chord envelope encoding failed: {err}"),
            Self::UnsupportedStoreVersion { found, supported } => write!(
                f,
                "chord envelope version {found} is newer than supported {supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted chord data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::UnsupportedStoreVersion { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Durable storage contract for the chord collection.
pub trait ChordStore {
    /// Reads the persisted collection. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> StoreResult<Option<Vec<Chord>>>;
    /// Replaces the persisted collection with `chords`.
    fn save(&mut self, chords: &[Chord]) -> StoreResult<()>;
}

#[derive(Debug, Deserialize)]
struct StoredEnvelope {
    name: String,
    version: u32,
    state: StoredState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    saved_chords: Vec<Chord>,
}

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    name: &'a str,
    version: u32,
    state: StateRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateRef<'a> {
    saved_chords: &'a [Chord],
}

/// SQLite-backed chord store bound to one storage key.
pub struct SqliteChordStore<'conn> {
    conn: &'conn mut Connection,
    key: String,
}

impl<'conn> SqliteChordStore<'conn> {
    /// Store under [`CHORD_STORAGE_KEY`].
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self::with_key(conn, CHORD_STORAGE_KEY)
    }

    /// Store under a caller-chosen key.
    pub fn with_key(conn: &'conn mut Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ChordStore for SqliteChordStore<'_> {
    fn load(&self) -> StoreResult<Option<Vec<Chord>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(value) => decode_envelope(&value, &self.key).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, chords: &[Chord]) -> StoreResult<()> {
        let value = encode_envelope(chords, &self.key)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), value],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// Encodes `chords` as the versioned envelope stored under `key`.
pub fn encode_envelope(chords: &[Chord], key: &str) -> StoreResult<String> {
    let envelope = EnvelopeRef {
        name: key,
        version: STORE_FORMAT_VERSION,
        state: StateRef {
            saved_chords: chords,
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decodes and validates an envelope read from `key`.
pub fn decode_envelope(raw: &str, key: &str) -> StoreResult<Vec<Chord>> {
    let envelope: StoredEnvelope = serde_json::from_str(raw)?;
    if envelope.version > STORE_FORMAT_VERSION {
        return Err(StoreError::UnsupportedStoreVersion {
            found: envelope.version,
            supported: STORE_FORMAT_VERSION,
        });
    }
    if envelope.name != key {
        return Err(StoreError::InvalidData(format!(
            "envelope name `{}` does not match key `{key}`",
            envelope.name
        )));
    }

    let chords = envelope.state.saved_chords;
    validate_chords(&chords)?;
    Ok(chords)
}

fn validate_chords(chords: &[Chord]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(chords.len());
    for chord in chords {
        if !seen.insert(chord.id.as_str()) {
            return Err(StoreError::InvalidData(format!(
                "duplicate chord id `{}`",
                chord.id
            )));
        }
        if let Some(note) = chord.notes.iter().find(|note| note.string >= STRING_COUNT) {
            return Err(StoreError::InvalidData(format!(
                "chord `{}` references string {} outside the tuning",
                chord.id, note.string
            )));
        }
        if let Some(note) = chord
            .notes
            .iter()
            .find(|note| note.note_name != note_from_fret(note.string, note.fret))
        {
            return Err(StoreError::InvalidData(format!(
                "chord `{}` stores {} at string {} fret {}",
                chord.id,
                note.note_name.as_str(),
                note.string,
                note.fret
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_envelope, encode_envelope, StoreError, CHORD_STORAGE_KEY};
    use crate::model::chord::Chord;
    use crate::model::note::Note;

    fn chord(id: &str) -> Chord {
        Chord {
            id: id.to_string(),
            name: "octave".to_string(),
            notes: vec![Note::at(3, 0), Note::at(1, 2)],
            tags: vec!["shape".to_string()],
            created_at: 1_700_000_000_000,
            root_note: None,
            chord_type: None,
        }
    }

    #[test]
    fn envelope_carries_name_version_and_camel_case_fields() {
        let raw = encode_envelope(&[chord("a1")], CHORD_STORAGE_KEY).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["name"], CHORD_STORAGE_KEY);
        assert_eq!(value["version"], 1);
        assert_eq!(value["state"]["savedChords"][0]["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(value["state"]["savedChords"][0]["notes"][0]["noteName"], "E");
    }

    #[test]
    fn decode_rejects_newer_version() {
        let raw = format!(
            r#"{{"name":"{CHORD_STORAGE_KEY}","version":99,"state":{{"savedChords":[]}}}}"#
        );
        let err = decode_envelope(&raw, CHORD_STORAGE_KEY).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedStoreVersion { found: 99, .. }
        ));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let raw = encode_envelope(&[chord("dup"), chord("dup")], CHORD_STORAGE_KEY).unwrap();
        let err = decode_envelope(&raw, CHORD_STORAGE_KEY).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[test]
    fn decode_rejects_note_name_that_disagrees_with_position() {
        let raw = encode_envelope(&[chord("a1")], CHORD_STORAGE_KEY)
            .expect("encode")
            .replacen(r#""noteName":"E""#, r#""noteName":"F""#, 1);
        let err = decode_envelope(&raw, CHORD_STORAGE_KEY).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(message) if message.contains("fret 0")));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_envelope("{not json", CHORD_STORAGE_KEY).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
