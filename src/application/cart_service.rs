use std::sync::Arc;

use uuid::Uuid;

use crate::domain::cart::{ensure_open_line_owner, CartLine, CartView, QuantityChange};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CatalogRepository};

/// Result of a quantity change: the line is either kept with a new quantity or gone.
#[derive(Debug)]
pub enum LineUpdate {
    Updated(CartLine),
    Removed,
}

pub struct CartService {
    catalog: Arc<dyn CatalogRepository>,
    carts: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { catalog, carts }
    }

    pub fn add_item(&self, user_id: Uuid, slug: &str, quantity: i32) -> Result<CartLine, DomainError> {
        let product = self
            .catalog
            .find_by_slug(slug)?
            .ok_or_else(|| DomainError::not_found("Product does not exist"))?;

        self.carts.add_to_line(user_id, product.id, quantity)
    }

    pub fn update_quantity(
        &self,
        user_id: Uuid,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<LineUpdate, DomainError> {
        let line = self.owned_line(user_id, line_id, "update")?;
        match QuantityChange::from_requested(quantity)? {
            QuantityChange::Remove => {
                self.carts.delete_line(line.id)?;
                Ok(LineUpdate::Removed)
            }
            QuantityChange::Set(q) => self.carts.set_quantity(line.id, q).map(LineUpdate::Updated),
        }
    }

    pub fn remove_item(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError> {
        let line = self.owned_line(user_id, line_id, "delete")?;
        self.carts.delete_line(line.id)
    }

    pub fn view_cart(&self, user_id: Uuid) -> Result<CartView, DomainError> {
        Ok(CartView::new(self.carts.open_entries(user_id)?))
    }

    fn owned_line(&self, user_id: Uuid, line_id: Uuid, action: &str) -> Result<CartLine, DomainError> {
        let line = self
            .carts
            .find_line(line_id)?
            .ok_or_else(|| DomainError::not_found("Item is not present in Cart"))?;
        ensure_open_line_owner(&line, user_id, action)?;
        Ok(line)
    }
}
