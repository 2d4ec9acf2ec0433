//! Core use-case services.
//!
//! # Responsibility
//! - Own the selection working set and the saved chord collection.
//! - Orchestrate save-from-selection and recall-into-selection flows.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod chord_library;
pub mod selection;
pub mod session;
