//! Domain model for phonebook contacts.
//!
//! # Responsibility
//! - Define the canonical contact record shared by store, storage and UI.
//! - Keep presence checks next to the data they guard.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Contacts are immutable after creation; deletion removes them outright.

pub mod contact;
