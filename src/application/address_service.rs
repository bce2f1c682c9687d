use std::sync::Arc;

use uuid::Uuid;

use crate::domain::address::{Address, AddressFields, AddressPatch};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;

pub struct AddressService {
    repo: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self, user_id: Uuid) -> Result<Vec<Address>, DomainError> {
        self.repo.list_for_user(user_id)
    }

    pub fn create(&self, user_id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        fields.validate()?;
        self.repo.create(user_id, fields)
    }

    pub fn get(&self, user_id: Uuid, id: Uuid) -> Result<Address, DomainError> {
        self.repo
            .find_for_user(user_id, id)?
            .ok_or_else(|| DomainError::not_found("Address not found"))
    }

    pub fn replace(&self, user_id: Uuid, id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        let existing = self.get(user_id, id)?;
        fields.validate()?;
        self.repo.update(existing.id, fields)
    }

    pub fn patch(&self, user_id: Uuid, id: Uuid, patch: AddressPatch) -> Result<Address, DomainError> {
        let existing = self.get(user_id, id)?;
        let mut fields = existing.fields;
        fields.apply(patch);
        fields.validate()?;
        self.repo.update(existing.id, fields)
    }

    pub fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let existing = self.get(user_id, id)?;
        self.repo.delete(existing.id)
    }
}
