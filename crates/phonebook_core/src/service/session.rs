//! Presentation-facing phonebook session.
//!
//! # Responsibility
//! - Pair the contact store with the "add contact" dialog state.
//! - Turn UI intents into store commands and store signals into UI state.
//! - Produce render-ready view snapshots.
//!
//! # Invariants
//! - The dialog closes after every successful add.
//! - A duplicate add leaves the dialog open and raises a notice.
//! - List-vs-empty is decided by the total contact count, not the filtered one.

use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::ContactPersistence;
use crate::service::contact_store::{AddContactError, ContactCommand, ContactStore, StoreSignal};

/// Message shown in place of the list when the phonebook has no contacts.
pub const EMPTY_LIST_MESSAGE: &str = "Contact list is empty.";
/// Body of the warning raised for a duplicate name.
pub const DUPLICATE_NAME_MESSAGE: &str = "This user is already in the contact list.";

/// User intents forwarded by a UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    OpenAddDialog,
    CloseAddDialog,
    /// Escape key while the dialog is shown.
    PressEscape,
    SubmitAddContact { name: String, number: String },
    ClickDelete { id: ContactId },
    TypeFilter { text: String },
}

/// Non-blocking warning for the UI to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn duplicate_name(name: String) -> Self {
        Self {
            title: name,
            message: DUPLICATE_NAME_MESSAGE.to_string(),
        }
    }
}

/// What to render below the filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactListBody {
    /// Filtered contacts; may be empty when the filter matches nothing.
    Contacts(Vec<Contact>),
    /// The phonebook has no contacts at all.
    Empty(&'static str),
}

/// Render snapshot of the whole phonebook screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookView {
    pub filter: String,
    pub add_dialog_open: bool,
    pub total_count: usize,
    pub body: ContactListBody,
}

/// Store plus dialog state for one application session.
pub struct PhonebookSession<P: ContactPersistence> {
    store: ContactStore<P>,
    add_dialog_open: bool,
}

impl<P: ContactPersistence> PhonebookSession<P> {
    /// Opens a session hydrated from `persistence`, dialog closed.
    pub fn open(persistence: P) -> Self {
        Self {
            store: ContactStore::open(persistence),
            add_dialog_open: false,
        }
    }

    pub fn store(&self) -> &ContactStore<P> {
        &self.store
    }

    pub fn add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
    }

    pub fn toggle_add_dialog(&mut self) {
        self.add_dialog_open = !self.add_dialog_open;
    }

    /// Adds a contact and closes the dialog on success.
    ///
    /// Same outcome as `handle(SubmitAddContact)`, but hands back the created
    /// contact or the refusal reason.
    pub fn submit_add_contact(
        &mut self,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Contact, AddContactError> {
        let contact = self.store.add_contact(name, number)?;
        self.close_add_dialog();
        Ok(contact)
    }

    /// Deletes a contact; `false` when `id` was not present.
    pub fn delete_contact(&mut self, id: &ContactId) -> bool {
        self.store.delete_contact(id)
    }

    /// Applies one UI intent.
    ///
    /// Returns a notice when the UI should show a warning.
    pub fn handle(&mut self, intent: UiIntent) -> Option<Notice> {
        let command = match intent {
            UiIntent::OpenAddDialog => {
                self.open_add_dialog();
                return None;
            }
            UiIntent::CloseAddDialog | UiIntent::PressEscape => {
                self.close_add_dialog();
                return None;
            }
            UiIntent::SubmitAddContact { name, number } => {
                ContactCommand::AddContact { name, number }
            }
            UiIntent::ClickDelete { id } => ContactCommand::DeleteContact { id },
            UiIntent::TypeFilter { text } => ContactCommand::SetFilter { text },
        };

        let mut notice = None;
        for signal in self.store.dispatch(command) {
            match signal {
                StoreSignal::CloseAddDialog => self.close_add_dialog(),
                StoreSignal::DuplicateNameWarning { name } => {
                    notice = Some(Notice::duplicate_name(name));
                }
            }
        }
        notice
    }

    /// Builds the current render snapshot.
    pub fn view(&self) -> PhonebookView {
        let total_count = self.store.contact_count();
        let body = if total_count > 0 {
            let visible = self.store.visible_contacts();
            ContactListBody::Contacts(visible.into_iter().cloned().collect())
        } else {
            ContactListBody::Empty(EMPTY_LIST_MESSAGE)
        };

        PhonebookView {
            filter: self.store.filter().to_string(),
            add_dialog_open: self.add_dialog_open,
            total_count,
            body,
        }
    }
}
