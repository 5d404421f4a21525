//! Contact domain model.
//!
//! # Responsibility
//! - Define the `{ id, name, number }` record persisted and rendered by the app.
//! - Generate fresh identifiers for newly added contacts.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - `id` and `name` are non-empty; `number` is free-form.
//! - Deserialization applies the same presence checks as construction.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of one contact.
///
/// New ids are UUID v4 strings. Persisted ids are accepted as any non-empty
/// string so data written by other id generators keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Presence-check failures for contact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `id` must not be empty.
    EmptyId,
    /// `name` must not be empty.
    EmptyName,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "contact id must not be empty"),
            Self::EmptyName => write!(f, "contact name must not be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// One phonebook entry.
///
/// Fields are private so a contact cannot change after creation; read them
/// through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactRecord")]
pub struct Contact {
    id: ContactId,
    name: String,
    number: String,
}

/// Unchecked wire shape used during deserialization.
#[derive(Deserialize)]
struct ContactRecord {
    id: ContactId,
    name: String,
    number: String,
}

impl TryFrom<ContactRecord> for Contact {
    type Error = ContactValidationError;

    fn try_from(value: ContactRecord) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.name, value.number)
    }
}

impl Contact {
    /// Creates a contact with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is empty. No trimming is applied.
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        Self::with_id(ContactId::generate(), name, number)
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Used when rehydrating persisted contacts.
    pub fn with_id(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let contact = Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Checks presence invariants.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.id.is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(())
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn number(&self) -> &str {
        self.number.as_str()
    }
}
