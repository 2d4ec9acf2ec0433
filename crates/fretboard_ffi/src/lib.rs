//! Flutter-facing bindings for the fretboard core.

pub mod api;
