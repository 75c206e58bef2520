//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce model validation before persistence.
//! - Repository APIs return semantic errors (`PersonNotFound`,
//!   `AddressNotFound`) in addition to DB transport errors.

pub mod address_repo;
pub mod person_repo;
