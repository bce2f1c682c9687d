pub mod address_repo;
pub mod cart_repo;
pub mod catalog_repo;
pub mod models;
pub mod order_repo;
pub mod wishlist_repo;

#[cfg(test)]
pub(crate) mod memory;
#[cfg(test)]
pub(crate) mod test_db;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::not_found("Record not found"),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DomainError::invalid("duplicate entry")
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
