//! Contact use-case services.
//!
//! # Responsibility
//! - Own the authoritative contact list and filter.
//! - Translate UI intents into store commands and view snapshots.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod contact_store;
pub mod filter;
pub mod session;
