use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::Product;
use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WishlistItem {
    pub entry: WishlistEntry,
    pub product: Product,
}

pub fn ensure_entry_owner(entry: &WishlistEntry, user_id: Uuid) -> Result<(), DomainError> {
    if entry.user_id != user_id {
        return Err(DomainError::forbidden("Not Authorized"));
    }
    Ok(())
}
