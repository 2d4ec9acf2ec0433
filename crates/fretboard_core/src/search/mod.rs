//! Chord collection search.
//!
//! # Responsibility
//! - Case-insensitive substring filtering over saved chords.
//! - Keep match rules in one place for services and FFI.

pub mod filter;
