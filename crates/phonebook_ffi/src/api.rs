//! FFI use-case API for the Flutter phonebook shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level phonebook calls to Dart via FRB.
//! - Own the single process-wide phonebook session.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call runs under one session lock, so each response is a
//!   consistent snapshot.
//! - The session is opened lazily on first use from `PHONEBOOK_DB_PATH`.

use log::info;
use phonebook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    resolve_db_path, AddContactError, Contact, ContactId, ContactListBody, PhonebookSession,
    PhonebookView, SqliteKeyValueStorage, StorageContactRepository, UiIntent,
    DUPLICATE_NAME_MESSAGE,
};
use std::sync::Mutex;

type SqliteSession = PhonebookSession<StorageContactRepository<SqliteKeyValueStorage>>;

static SESSION: Mutex<Option<SqliteSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One contact row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Full-screen render snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookViewResponse {
    /// `false` when the session could not be opened.
    pub ok: bool,
    /// Filtered contacts, most recent first.
    pub items: Vec<ContactItem>,
    /// Unfiltered contact count.
    pub total_count: u32,
    pub filter: String,
    pub add_dialog_open: bool,
    /// Set when the phonebook has no contacts at all.
    pub empty_message: Option<String>,
    /// Diagnostics message; empty on success.
    pub message: String,
}

impl PhonebookViewResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            total_count: 0,
            filter: String::new(),
            add_dialog_open: false,
            empty_message: None,
            message: message.into(),
        }
    }
}

impl From<PhonebookView> for PhonebookViewResponse {
    fn from(view: PhonebookView) -> Self {
        let (items, empty_message) = match view.body {
            ContactListBody::Contacts(contacts) => {
                (contacts.iter().map(to_contact_item).collect(), None)
            }
            ContactListBody::Empty(message) => (Vec::new(), Some(message.to_string())),
        };
        Self {
            ok: true,
            items,
            total_count: u32::try_from(view.total_count).unwrap_or(u32::MAX),
            filter: view.filter,
            add_dialog_open: view.add_dialog_open,
            empty_message,
            message: String::new(),
        }
    }
}

/// Action response envelope for add/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether the action changed or confirmed state as requested.
    pub ok: bool,
    /// Created contact id for add; target id for delete.
    pub contact_id: Option<String>,
    /// Warning dialog title when the UI should show a notice.
    pub notice_title: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, contact_id: String) -> Self {
        Self {
            ok: true,
            contact_id: Some(contact_id),
            notice_title: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            notice_title: None,
            message: message.into(),
        }
    }

    fn notice(title: String, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            notice_title: Some(title),
            message: message.into(),
        }
    }
}

/// Submits the add-contact form.
///
/// # FFI contract
/// - On success the add dialog is closed and the new id is returned.
/// - A duplicate name returns `ok=false` with `notice_title` set to the name.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_add(name: String, number: String) -> ContactActionResponse {
    let outcome = with_session(|session| session.submit_add_contact(name, number));
    match outcome {
        Ok(Ok(contact)) => {
            ContactActionResponse::success("Contact added.", contact.id().to_string())
        }
        Ok(Err(AddContactError::DuplicateName(name))) => {
            ContactActionResponse::notice(name, DUPLICATE_NAME_MESSAGE)
        }
        Ok(Err(err)) => ContactActionResponse::failure(format!("contacts_add failed: {err}")),
        Err(err) => ContactActionResponse::failure(format!("contacts_add failed: {err}")),
    }
}

/// Deletes one contact by id.
///
/// # FFI contract
/// - Unknown ids are not an error: `ok=true` with a "nothing deleted" message.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(id: String) -> ContactActionResponse {
    let contact_id = ContactId::from(id.clone());
    match with_session(|session| session.delete_contact(&contact_id)) {
        Ok(true) => ContactActionResponse::success("Contact deleted.", id),
        Ok(false) => ContactActionResponse::success("Contact not found; nothing deleted.", id),
        Err(err) => ContactActionResponse::failure(format!("contacts_delete failed: {err}")),
    }
}

/// Replaces the filter text and returns the refreshed view.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_set_filter(text: String) -> PhonebookViewResponse {
    view_after(|session| {
        session.handle(UiIntent::TypeFilter { text });
    })
}

/// Returns the current view snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_view() -> PhonebookViewResponse {
    view_after(|_| {})
}

/// Returns the unfiltered contact count, or 0 when the session cannot open.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_count() -> u32 {
    with_session(|session| session.store().contact_count())
        .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Opens the add-contact dialog and returns the refreshed view.
#[flutter_rust_bridge::frb(sync)]
pub fn add_dialog_open() -> PhonebookViewResponse {
    view_after(|session| {
        session.handle(UiIntent::OpenAddDialog);
    })
}

/// Closes the add-contact dialog (close button, backdrop click or Escape).
#[flutter_rust_bridge::frb(sync)]
pub fn add_dialog_close() -> PhonebookViewResponse {
    view_after(|session| {
        session.handle(UiIntent::CloseAddDialog);
    })
}

fn view_after(f: impl FnOnce(&mut SqliteSession)) -> PhonebookViewResponse {
    match with_session(|session| {
        f(session);
        session.view()
    }) {
        Ok(view) => view.into(),
        Err(err) => PhonebookViewResponse::failure(format!("phonebook view failed: {err}")),
    }
}

fn with_session<T>(f: impl FnOnce(&mut SqliteSession) -> T) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        *guard = Some(open_session()?);
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("phonebook session unavailable".to_string()),
    }
}

fn open_session() -> Result<SqliteSession, String> {
    let db_path = resolve_db_path(None);
    let storage = SqliteKeyValueStorage::open(&db_path)
        .map_err(|err| format!("phonebook storage open failed: {err}"))?;
    info!(
        "event=session_open module=ffi status=ok db_path={}",
        db_path.display()
    );
    Ok(PhonebookSession::open(StorageContactRepository::new(
        storage,
    )))
}

fn to_contact_item(contact: &Contact) -> ContactItem {
    ContactItem {
        id: contact.id().to_string(),
        name: contact.name().to_string(),
        number: contact.number().to_string(),
    }
}
