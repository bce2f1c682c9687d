use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CatalogRepository, WishlistRepository};
use crate::domain::wishlist::{ensure_entry_owner, WishlistItem};

pub struct WishlistService {
    catalog: Arc<dyn CatalogRepository>,
    repo: Arc<dyn WishlistRepository>,
}

impl WishlistService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, repo: Arc<dyn WishlistRepository>) -> Self {
        Self { catalog, repo }
    }

    pub fn list(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, DomainError> {
        self.repo.list_for_user(user_id)
    }

    pub fn add(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError> {
        self.ensure_addable(user_id, product_id)?;
        self.repo.create(user_id, product_id)
    }

    /// Entries of other users are reported as missing.
    pub fn get(&self, user_id: Uuid, id: Uuid) -> Result<WishlistItem, DomainError> {
        self.repo
            .find(id)?
            .filter(|item| item.entry.user_id == user_id)
            .ok_or_else(|| DomainError::not_found("Item is not present in wishlist"))
    }

    pub fn change_product(
        &self,
        user_id: Uuid,
        id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistItem, DomainError> {
        let item = self.get(user_id, id)?;
        if item.entry.product_id == product_id {
            return Ok(item);
        }
        self.ensure_addable(user_id, product_id)?;
        self.repo.update_product(id, product_id)
    }

    pub fn remove(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let item = self
            .repo
            .find(id)?
            .ok_or_else(|| DomainError::not_found("Item is not present in wishlist"))?;
        ensure_entry_owner(&item.entry, user_id)?;
        self.repo.delete(id)
    }

    fn ensure_addable(&self, user_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        if self.catalog.find_by_id(product_id)?.is_none() {
            return Err(DomainError::not_found("Product does not exist"));
        }
        if self.repo.exists(user_id, product_id)? {
            return Err(DomainError::invalid("Product is already in your wishlist"));
        }
        Ok(())
    }
}
