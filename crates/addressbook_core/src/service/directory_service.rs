//! Person directory use-case service.
//!
//! # Responsibility
//! - Provide list/search/detail entry points for the main person view.
//! - Normalize raw form input before it reaches the repositories.
//! - Orchestrate person deletion together with owned addresses.
//!
//! # Invariants
//! - Form fields are trimmed; blank optional fields become `None`.
//! - Service APIs never bypass repository validation contracts.
//! - The service layer remains storage-agnostic.

use crate::model::address::Address;
use crate::model::person::{NewPerson, Person, PersonId};
use crate::model::ValidationError;
use crate::repo::address_repo::AddressRepository;
use crate::repo::person_repo::{PersonOverview, PersonRepository, RepoResult};

/// Raw user input for creating or editing a person, as captured from
/// input fields. Normalization happens here, not in the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    pub first_name: String,
    pub last_name: String,
    /// Raw phone field; blank input means "no phone".
    pub phone: String,
}

impl PersonForm {
    /// Normalizes the form into an insert record.
    pub fn new_person(&self) -> Result<NewPerson, ValidationError> {
        Ok(NewPerson {
            first_name: normalized_required(&self.first_name, ValidationError::FirstNameRequired)?,
            last_name: normalized_required(&self.last_name, ValidationError::LastNameRequired)?,
            phone: normalized_optional(&self.phone),
        })
    }

    /// Normalizes the form into a full record targeting an existing id.
    pub fn apply_to(&self, id: PersonId) -> Result<Person, ValidationError> {
        let new_person = self.new_person()?;
        Ok(Person {
            id,
            first_name: new_person.first_name,
            last_name: new_person.last_name,
            phone: new_person.phone,
        })
    }
}

/// Read model for the person detail view: the person plus every owned
/// address, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetail {
    pub person: Person,
    pub addresses: Vec<Address>,
}

/// Use-case service for the person directory.
pub struct DirectoryService<P: PersonRepository, A: AddressRepository> {
    persons: P,
    addresses: A,
}

impl<P: PersonRepository, A: AddressRepository> DirectoryService<P, A> {
    /// Creates a service using the provided repository implementations.
    pub fn new(persons: P, addresses: A) -> Self {
        Self { persons, addresses }
    }

    /// Lists every person, newest first.
    pub fn list_people(&self) -> RepoResult<Vec<Person>> {
        self.persons.list_persons()
    }

    /// Lists every person with their address count, newest first.
    pub fn list_overview(&self) -> RepoResult<Vec<PersonOverview>> {
        self.persons.list_person_overviews()
    }

    /// Case-insensitive substring search over full name and phone.
    /// A blank query behaves like `list_people`.
    pub fn search_people(&self, query: &str) -> RepoResult<Vec<Person>> {
        self.persons.search_persons(query)
    }

    /// Gets one person together with every owned address.
    pub fn person_detail(&self, id: PersonId) -> RepoResult<Option<PersonDetail>> {
        let Some(person) = self.persons.get_person(id)? else {
            return Ok(None);
        };
        let addresses = self.addresses.list_for_person(id)?;
        Ok(Some(PersonDetail { person, addresses }))
    }

    /// Creates a person from raw form input and returns the new id.
    pub fn create_person(&self, form: &PersonForm) -> RepoResult<PersonId> {
        let new_person = form.new_person()?;
        self.persons.create_person(&new_person)
    }

    /// Overwrites an existing person from raw form input.
    pub fn update_person(&self, id: PersonId, form: &PersonForm) -> RepoResult<()> {
        let person = form.apply_to(id)?;
        self.persons.update_person(&person)
    }

    /// Deletes a person and every owned address atomically. Returns the
    /// number of addresses removed; a missing id removes nothing.
    pub fn delete_person(&self, id: PersonId) -> RepoResult<usize> {
        self.persons.delete_person_with_addresses(id)
    }
}

/// Trims `value` and rejects blank input with the given error.
pub(crate) fn normalized_required(
    value: &str,
    missing: ValidationError,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed.to_string())
}

/// Trims `value`; blank input collapses to `None`.
pub(crate) fn normalized_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
