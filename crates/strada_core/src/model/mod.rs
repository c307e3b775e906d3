//! Domain model for people and their employment history.
//!
//! # Responsibility
//! - Define the record shapes shared by stores, services and callers.
//! - Keep serde naming aligned with the external JSON representation.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer id; `0` means unset.
//! - Ids are never reused after deletion.

pub mod employment;
pub mod user;

/// Integer identity shared by every persisted record.
pub type RecordId = i64;

/// Id value carried by records that were never persisted.
pub const UNSET_ID: RecordId = 0;
