//! Domain model for the address book.
//!
//! # Responsibility
//! - Define the canonical person and address records used by core logic.
//! - Host field-level validation shared by repositories and services.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned integer id.
//! - Validation rejects blank required fields before anything is written.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod address;
pub mod person;

/// Field-level validation failure raised before any write is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `first_name` is empty or whitespace-only.
    FirstNameRequired,
    /// `last_name` is empty or whitespace-only.
    LastNameRequired,
    /// `address_line` is empty or whitespace-only.
    AddressLineRequired,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::FirstNameRequired => {
                write!(f, "first name must not be empty")
            }
            ValidationError::LastNameRequired => {
                write!(f, "last name must not be empty")
            }
            ValidationError::AddressLineRequired => {
                write!(f, "address line must not be empty")
            }
        }
    }
}

impl Error for ValidationError {}
