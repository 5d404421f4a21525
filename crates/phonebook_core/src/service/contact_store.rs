//! Contact store: the authoritative contact list and filter.
//!
//! # Responsibility
//! - Apply add/delete/filter commands to in-memory state.
//! - Guard against duplicate names on insertion.
//! - Persist the full list after each effective mutation.
//!
//! # Invariants
//! - New contacts are prepended; `contacts` is most-recent first.
//! - No two contacts added through the store share an exact `name`.
//! - A rejected add leaves state and storage untouched.
//! - A failed save never rolls back the in-memory mutation.

use crate::model::contact::{Contact, ContactId, ContactValidationError};
use crate::repo::contact_repo::ContactPersistence;
use crate::service::filter::filter_contacts;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why an add was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddContactError {
    /// A contact with exactly this name already exists.
    DuplicateName(String),
    /// The new contact failed presence checks.
    Validation(ContactValidationError),
}

impl Display for AddContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "{name} is already in the contact list"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AddContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateName(_) => None,
        }
    }
}

impl From<ContactValidationError> for AddContactError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Command values accepted by [`ContactStore::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactCommand {
    AddContact { name: String, number: String },
    DeleteContact { id: ContactId },
    SetFilter { text: String },
}

/// Signals raised toward the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSignal {
    /// An add was refused because the name is taken.
    DuplicateNameWarning { name: String },
    /// An add succeeded; any open "add contact" dialog should close.
    CloseAddDialog,
}

/// In-memory contact list with write-through persistence.
pub struct ContactStore<P: ContactPersistence> {
    persistence: P,
    contacts: Vec<Contact>,
    filter: String,
}

impl<P: ContactPersistence> ContactStore<P> {
    /// Creates a store hydrated from `persistence.load()`.
    pub fn open(persistence: P) -> Self {
        let contacts = persistence.load();
        info!(
            "event=store_open module=store status=ok count={}",
            contacts.len()
        );
        Self {
            persistence,
            contacts,
            filter: String::new(),
        }
    }

    /// Adds a contact at the front of the list.
    ///
    /// # Errors
    /// - `DuplicateName` when an existing contact has the exact same name.
    /// - `Validation` when `name` is empty.
    pub fn add_contact(
        &mut self,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Contact, AddContactError> {
        let name = name.into();
        if self.contains_name(&name) {
            info!("event=contact_add module=store status=duplicate");
            return Err(AddContactError::DuplicateName(name));
        }

        let contact = Contact::new(name, number).inspect_err(|_| {
            info!("event=contact_add module=store status=invalid");
        })?;
        self.contacts.insert(0, contact.clone());
        info!(
            "event=contact_add module=store status=ok contact_id={} count={}",
            contact.id(),
            self.contacts.len()
        );
        self.persist();
        Ok(contact)
    }

    /// Removes the contact with `id`.
    ///
    /// Returns `false` without touching storage when no contact matches.
    pub fn delete_contact(&mut self, id: &ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|contact| contact.id() != id);
        if self.contacts.len() == before {
            info!("event=contact_delete module=store status=absent contact_id={id}");
            return false;
        }

        info!(
            "event=contact_delete module=store status=ok contact_id={id} count={}",
            self.contacts.len()
        );
        self.persist();
        true
    }

    /// Replaces the current filter text.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn filter(&self) -> &str {
        self.filter.as_str()
    }

    /// Contacts matching the current filter, in store order.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        filter_contacts(&self.contacts, &self.filter)
    }

    /// All contacts, most recent first.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Applies one command and returns the signals it raised.
    pub fn dispatch(&mut self, command: ContactCommand) -> Vec<StoreSignal> {
        match command {
            ContactCommand::AddContact { name, number } => match self.add_contact(name, number) {
                Ok(_) => vec![StoreSignal::CloseAddDialog],
                Err(AddContactError::DuplicateName(name)) => {
                    vec![StoreSignal::DuplicateNameWarning { name }]
                }
                Err(AddContactError::Validation(_)) => Vec::new(),
            },
            ContactCommand::DeleteContact { id } => {
                self.delete_contact(&id);
                Vec::new()
            }
            ContactCommand::SetFilter { text } => {
                self.set_filter(text);
                Vec::new()
            }
        }
    }

    fn contains_name(&self, name: &str) -> bool {
        self.contacts.iter().any(|contact| contact.name() == name)
    }

    fn persist(&self) {
        if let Err(err) = self.persistence.save(&self.contacts) {
            warn!(
                "event=contacts_save module=store status=error error_code=contacts_save_failed count={} error={err}",
                self.contacts.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddContactError, ContactCommand, ContactStore, StoreSignal};
    use crate::model::contact::ContactValidationError;
    use crate::repo::contact_repo::StorageContactRepository;
    use crate::storage::MemoryStorage;

    fn empty_store() -> ContactStore<StorageContactRepository<MemoryStorage>> {
        ContactStore::open(StorageContactRepository::new(MemoryStorage::new()))
    }

    #[test]
    fn empty_name_is_rejected_without_mutation() {
        let mut store = empty_store();
        let err = store.add_contact("", "123").unwrap_err();

        assert_eq!(
            err,
            AddContactError::Validation(ContactValidationError::EmptyName)
        );
        assert_eq!(store.contact_count(), 0);
    }

    #[test]
    fn duplicate_check_is_case_sensitive_and_untrimmed() {
        let mut store = empty_store();
        store.add_contact("Ann", "1").unwrap();
        store.add_contact("ann", "2").unwrap();
        store.add_contact("Ann ", "3").unwrap();

        assert_eq!(store.contact_count(), 3);
    }

    #[test]
    fn duplicate_check_ignores_number() {
        let mut store = empty_store();
        store.add_contact("Ann", "1").unwrap();
        let err = store.add_contact("Ann", "1").unwrap_err();

        assert_eq!(err, AddContactError::DuplicateName("Ann".to_string()));
        assert_eq!(err.to_string(), "Ann is already in the contact list");
    }

    #[test]
    fn dispatch_maps_outcomes_to_signals() {
        let mut store = empty_store();
        let added = store.dispatch(ContactCommand::AddContact {
            name: "Ann".to_string(),
            number: "123".to_string(),
        });
        assert_eq!(added, vec![StoreSignal::CloseAddDialog]);

        let duplicate = store.dispatch(ContactCommand::AddContact {
            name: "Ann".to_string(),
            number: "456".to_string(),
        });
        assert_eq!(
            duplicate,
            vec![StoreSignal::DuplicateNameWarning {
                name: "Ann".to_string()
            }]
        );

        let invalid = store.dispatch(ContactCommand::AddContact {
            name: String::new(),
            number: "0".to_string(),
        });
        assert!(invalid.is_empty());

        let filtered = store.dispatch(ContactCommand::SetFilter {
            text: "zzz".to_string(),
        });
        assert!(filtered.is_empty());
        assert!(store.visible_contacts().is_empty());

        let id = store.contacts()[0].id().clone();
        assert!(store.dispatch(ContactCommand::DeleteContact { id }).is_empty());
        assert_eq!(store.contact_count(), 0);
    }
}
