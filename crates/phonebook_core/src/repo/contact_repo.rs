//! Contact list persistence over key-value storage.
//!
//! # Responsibility
//! - Serialize the whole contact sequence as one JSON array under one key.
//! - Rehydrate that array at startup.
//!
//! # Invariants
//! - Wire shape is `[{ "id": .., "name": .., "number": .. }, ..]`, in store order.
//! - `load` maps absent, unreadable or malformed data to an empty list.
//! - Contact names and numbers never appear in log lines.

use crate::model::contact::Contact;
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized contact list.
pub const CONTACTS_STORAGE_KEY: &str = "contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for contact list load/save.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid persisted contact data: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Load/save contract consumed by the contact store.
pub trait ContactPersistence {
    /// Reads the persisted sequence; empty on absence or any failure.
    fn load(&self) -> Vec<Contact>;
    /// Overwrites the persisted sequence.
    fn save(&self, contacts: &[Contact]) -> RepoResult<()>;
}

impl<P: ContactPersistence + ?Sized> ContactPersistence for &P {
    fn load(&self) -> Vec<Contact> {
        (**self).load()
    }

    fn save(&self, contacts: &[Contact]) -> RepoResult<()> {
        (**self).save(contacts)
    }
}

/// JSON-in-one-key persistence adapter.
pub struct StorageContactRepository<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> StorageContactRepository<S> {
    /// Creates an adapter using the default `contacts` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CONTACTS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted sequence, surfacing failures.
    ///
    /// Returns `Ok(None)` when the key is absent. A stored JSON `null` is
    /// treated the same way. Only a payload that is not a JSON array is an
    /// error; array entries that are not valid contacts are skipped so the
    /// next save does not drop their valid neighbours.
    pub fn try_load(&self) -> RepoResult<Option<Vec<Contact>>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        let Some(entries) = serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw)? else {
            return Ok(None);
        };

        let contacts = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Contact>(entry) {
                Ok(contact) => Some(contact),
                Err(_) => {
                    // serde messages can echo field values; log the position only.
                    warn!("event=contacts_load module=repo status=skipped_entry index={index}");
                    None
                }
            })
            .collect();
        Ok(Some(contacts))
    }
}

impl<S: KeyValueStorage> ContactPersistence for StorageContactRepository<S> {
    fn load(&self) -> Vec<Contact> {
        match self.try_load() {
            Ok(Some(contacts)) => {
                debug!(
                    "event=contacts_load module=repo status=ok count={}",
                    contacts.len()
                );
                contacts
            }
            Ok(None) => {
                debug!("event=contacts_load module=repo status=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=contacts_load module=repo status=degraded error_code=contacts_load_failed error={err}"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, contacts: &[Contact]) -> RepoResult<()> {
        let payload = serde_json::to_string(contacts)?;
        self.storage.set_item(&self.key, &payload)?;
        debug!(
            "event=contacts_save module=repo status=ok count={} bytes={}",
            contacts.len(),
            payload.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactPersistence, StorageContactRepository, CONTACTS_STORAGE_KEY};
    use crate::model::contact::Contact;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    #[test]
    fn load_from_absent_key_is_empty() {
        let repo = StorageContactRepository::new(MemoryStorage::new());
        assert!(repo.load().is_empty());
        assert!(repo.try_load().unwrap().is_none());
    }

    #[test]
    fn stored_null_loads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CONTACTS_STORAGE_KEY, "null").unwrap();
        let repo = StorageContactRepository::new(storage);

        assert!(repo.try_load().unwrap().is_none());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn save_writes_expected_wire_shape() {
        let repo = StorageContactRepository::new(MemoryStorage::new());
        let contact = Contact::with_id("id-1", "Ann", "123").unwrap();
        repo.save(std::slice::from_ref(&contact)).unwrap();

        let raw = repo
            .storage()
            .get_item(CONTACTS_STORAGE_KEY)
            .unwrap()
            .expect("saved payload should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": "id-1", "name": "Ann", "number": "123" }])
        );
    }

    #[test]
    fn custom_key_is_respected() {
        let storage = MemoryStorage::new();
        let repo = StorageContactRepository::with_key(&storage, "other");
        repo.save(&[]).unwrap();

        assert_eq!(repo.key(), "other");
        assert!(storage.get_item("other").unwrap().is_some());
        assert!(storage.get_item(CONTACTS_STORAGE_KEY).unwrap().is_none());
    }
}
