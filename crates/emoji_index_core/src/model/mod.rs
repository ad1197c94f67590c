//! Emoji index data model.
//!
//! # Responsibility
//! - Define the category enumeration, per-emoji record and grouped index.
//! - Own the serialized shape of the output document.
//!
//! # Invariants
//! - Records are grouped by `CategoryId`; ignored chart sections never appear.

pub mod category;
pub mod index;
pub mod record;
