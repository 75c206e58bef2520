//! Address domain model.
//!
//! # Responsibility
//! - Define the address record owned by the address store.
//! - Derive the one-line label shown in address lists.
//!
//! # Invariants
//! - `person_id` is assigned at creation and never changes afterwards.
//! - `address_line` is non-blank for every persisted row.
//! - Missing optional fields are `None`, never empty strings.

use crate::model::person::PersonId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the address store on insert.
pub type AddressId = i64;

/// Label substituted for a missing title in `display_text`.
const UNTITLED_LABEL: &str = "Address";

/// Persisted address record, always owned by exactly one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Store-assigned surrogate key.
    pub id: AddressId,
    /// Owning person; immutable after creation.
    pub person_id: PersonId,
    /// Short label such as "Home" or "Work".
    pub title: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    /// Street-level line; the only required location field.
    pub address_line: String,
}

/// Input record for creating an address. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub person_id: PersonId,
    pub title: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub address_line: String,
}

impl NewAddress {
    /// Creates an input record with all optional fields unset.
    pub fn new(person_id: PersonId, address_line: impl Into<String>) -> Self {
        Self {
            person_id,
            title: None,
            city: None,
            district: None,
            address_line: address_line.into(),
        }
    }

    /// Checks required fields without touching the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_address_line(&self.address_line)
    }
}

impl Address {
    /// One-line list label: `"{title} - {city} {district} | {address_line}"`.
    ///
    /// A missing or whitespace-only title renders as "Address"; any other
    /// title is rendered exactly as stored. Missing city or district render
    /// as empty strings, keeping the separators in place so rows stay
    /// visually aligned.
    pub fn display_text(&self) -> String {
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_LABEL);
        format!(
            "{} - {} {} | {}",
            title,
            self.city.as_deref().unwrap_or(""),
            self.district.as_deref().unwrap_or(""),
            self.address_line
        )
    }

    /// Checks required fields without touching the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_address_line(&self.address_line)
    }
}

fn validate_address_line(address_line: &str) -> Result<(), ValidationError> {
    if address_line.trim().is_empty() {
        return Err(ValidationError::AddressLineRequired);
    }
    Ok(())
}
