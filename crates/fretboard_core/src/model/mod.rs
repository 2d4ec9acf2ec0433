//! Fretboard domain model.
//!
//! # Responsibility
//! - Define the note, chord and selection records shared by services,
//!   storage and FFI layers.
//!
//! # Invariants
//! - Derived note fields are computed from Music Math only.
//! - Chords are immutable after creation; only removal destroys them.

pub mod chord;
pub mod note;
pub mod selection;
