//! Repository layer for durable chord storage.
//!
//! # Responsibility
//! - Define the storage contract the chord library persists through.
//! - Keep SQL and JSON envelope details out of the service layer.
//!
//! # Invariants
//! - The whole collection is written under one fixed key per save.
//! - Reads reject invalid persisted state instead of masking it; the caller
//!   decides how to degrade.

pub mod chord_store;
