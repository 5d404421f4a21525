//! Persistence adapters for the contact list.
//!
//! # Responsibility
//! - Define the load/save contract the contact store persists through.
//! - Isolate the storage key and wire format from store logic.
//!
//! # Invariants
//! - Loading never fails fatally; bad data degrades to an empty list.
//! - Saving always writes the full sequence.

pub mod contact_repo;
