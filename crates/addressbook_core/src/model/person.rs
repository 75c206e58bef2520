//! Person domain model.
//!
//! # Responsibility
//! - Define the contact record owned by the person store.
//! - Provide display derivations that are computed, never persisted.
//!
//! # Invariants
//! - `id` is a store-assigned surrogate key with no business meaning.
//! - `first_name` and `last_name` are non-blank for every persisted row.
//! - A missing phone is `None`, never an empty string.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the person store on insert. Ids are never
/// reused, even after the row is deleted.
pub type PersonId = i64;

/// Persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store-assigned surrogate key.
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    /// Free-form phone number; no format is enforced.
    pub phone: Option<String>,
}

/// Input record for creating a person. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl NewPerson {
    /// Creates an input record with no phone number.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
        }
    }

    /// Checks required fields without touching the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name_fields(&self.first_name, &self.last_name)
    }
}

impl Person {
    /// Display-only full name, `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks required fields without touching the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name_fields(&self.first_name, &self.last_name)
    }
}

fn validate_name_fields(first_name: &str, last_name: &str) -> Result<(), ValidationError> {
    if first_name.trim().is_empty() {
        return Err(ValidationError::FirstNameRequired);
    }
    if last_name.trim().is_empty() {
        return Err(ValidationError::LastNameRequired);
    }
    Ok(())
}
