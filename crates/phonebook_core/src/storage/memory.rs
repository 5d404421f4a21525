//! In-memory storage for tests and ephemeral sessions.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Single-threaded map-backed storage.
///
/// An optional byte quota mimics browser storage limits: writes whose value
/// exceeds it are rejected and leave the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage that rejects values larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::Rejected(format!(
                    "value of {} bytes exceeds quota of {quota} bytes",
                    value.len()
                )));
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::{KeyValueStorage, StorageError};

    #[test]
    fn set_item_overwrites_previous_value() {
        let storage = MemoryStorage::new();
        storage.set_item("contacts", "[]").unwrap();
        storage.set_item("contacts", "[1]").unwrap();

        assert_eq!(storage.get_item("contacts").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn quota_rejects_oversized_value_and_keeps_old_one() {
        let storage = MemoryStorage::with_quota(4);
        storage.set_item("k", "1234").unwrap();

        let err = storage.set_item("k", "12345").unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove_item("missing").unwrap();
        assert!(storage.is_empty());
    }
}
