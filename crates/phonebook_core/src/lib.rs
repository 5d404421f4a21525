//! Core domain logic for the phonebook.
//! This crate is the single source of truth for contact list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::resolve_db_path;
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogLevel, LoggingConfig,
};
pub use model::contact::{Contact, ContactId, ContactValidationError};
pub use repo::contact_repo::{
    ContactPersistence, RepoError, RepoResult, StorageContactRepository, CONTACTS_STORAGE_KEY,
};
pub use service::contact_store::{AddContactError, ContactCommand, ContactStore, StoreSignal};
pub use service::filter::filter_contacts;
pub use service::session::{
    ContactListBody, Notice, PhonebookSession, PhonebookView, UiIntent, DUPLICATE_NAME_MESSAGE,
    EMPTY_LIST_MESSAGE,
};
pub use storage::{
    KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
