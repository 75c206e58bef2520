//! Core domain logic for the address book.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{Address, AddressId, NewAddress};
pub use model::person::{NewPerson, Person, PersonId};
pub use model::ValidationError;
pub use repo::address_repo::{AddressRepository, SqliteAddressRepository};
pub use repo::person_repo::{
    PersonOverview, PersonRepository, RepoError, RepoResult, SqlitePersonRepository,
};
pub use service::address_service::{AddressForm, AddressService};
pub use service::directory_service::{DirectoryService, PersonDetail, PersonForm};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
