//! Address use-case service.
//!
//! # Responsibility
//! - Provide address entry points for the person detail view.
//! - Normalize raw form input before it reaches the repository.
//!
//! # Invariants
//! - Form fields are trimmed; blank optional fields become `None`.
//! - Updates preserve the address's owning person unchanged.

use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::person::PersonId;
use crate::model::ValidationError;
use crate::repo::address_repo::AddressRepository;
use crate::repo::person_repo::{RepoError, RepoResult};
use crate::service::directory_service::{normalized_optional, normalized_required};

/// Raw user input for creating or editing an address, as captured from
/// input fields. Normalization happens here, not in the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub title: String,
    pub city: String,
    pub district: String,
    pub address_line: String,
}

impl AddressForm {
    /// Normalizes the form into an insert record owned by `person_id`.
    pub fn new_address(&self, person_id: PersonId) -> Result<NewAddress, ValidationError> {
        Ok(NewAddress {
            person_id,
            title: normalized_optional(&self.title),
            city: normalized_optional(&self.city),
            district: normalized_optional(&self.district),
            address_line: normalized_required(
                &self.address_line,
                ValidationError::AddressLineRequired,
            )?,
        })
    }

    /// Normalizes the form into a full record, keeping the existing id
    /// and owner.
    pub fn apply_to(&self, existing: &Address) -> Result<Address, ValidationError> {
        let new_address = self.new_address(existing.person_id)?;
        Ok(Address {
            id: existing.id,
            person_id: existing.person_id,
            title: new_address.title,
            city: new_address.city,
            district: new_address.district,
            address_line: new_address.address_line,
        })
    }
}

/// Use-case service for address management.
pub struct AddressService<A: AddressRepository> {
    repo: A,
}

impl<A: AddressRepository> AddressService<A> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    /// Lists every address owned by one person, newest first.
    pub fn list_for_person(&self, person_id: PersonId) -> RepoResult<Vec<Address>> {
        self.repo.list_for_person(person_id)
    }

    /// Gets one address by id.
    pub fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>> {
        self.repo.get_address(id)
    }

    /// Creates an address for `person_id` from raw form input and returns
    /// the new id.
    pub fn add_address(&self, person_id: PersonId, form: &AddressForm) -> RepoResult<AddressId> {
        let new_address = form.new_address(person_id)?;
        self.repo.create_address(&new_address)
    }

    /// Overwrites an existing address from raw form input. The owning
    /// person never changes, whatever the form says.
    pub fn update_address(&self, id: AddressId, form: &AddressForm) -> RepoResult<()> {
        let existing = self
            .repo
            .get_address(id)?
            .ok_or(RepoError::AddressNotFound(id))?;
        let updated = form.apply_to(&existing)?;
        self.repo.update_address(&updated)
    }

    /// Deletes one address. Missing ids are a silent no-op.
    pub fn remove_address(&self, id: AddressId) -> RepoResult<()> {
        self.repo.delete_address(id)
    }
}

#[cfg(test)]
mod tests {
    use super::AddressForm;
    use crate::model::address::Address;
    use crate::model::ValidationError;

    #[test]
    fn form_trims_fields_and_drops_blank_optionals() {
        let form = AddressForm {
            title: "  Home ".to_string(),
            city: "   ".to_string(),
            district: String::new(),
            address_line: " 10 Downing St  ".to_string(),
        };

        let new_address = form.new_address(3).unwrap();
        assert_eq!(new_address.person_id, 3);
        assert_eq!(new_address.title.as_deref(), Some("Home"));
        assert_eq!(new_address.city, None);
        assert_eq!(new_address.district, None);
        assert_eq!(new_address.address_line, "10 Downing St");
    }

    #[test]
    fn form_rejects_blank_address_line() {
        let form = AddressForm {
            address_line: "   ".to_string(),
            ..AddressForm::default()
        };

        assert_eq!(
            form.new_address(1).unwrap_err(),
            ValidationError::AddressLineRequired
        );
    }

    #[test]
    fn apply_to_keeps_id_and_owner() {
        let existing = Address {
            id: 9,
            person_id: 4,
            title: Some("Old".to_string()),
            city: Some("Leeds".to_string()),
            district: None,
            address_line: "1 Old Rd".to_string(),
        };
        let form = AddressForm {
            title: "New".to_string(),
            city: String::new(),
            district: "Centre".to_string(),
            address_line: "2 New Rd".to_string(),
        };

        let updated = form.apply_to(&existing).unwrap();
        assert_eq!(updated.id, 9);
        assert_eq!(updated.person_id, 4);
        assert_eq!(updated.title.as_deref(), Some("New"));
        assert_eq!(updated.city, None);
        assert_eq!(updated.district.as_deref(), Some("Centre"));
        assert_eq!(updated.address_line, "2 New Rd");
    }
}
