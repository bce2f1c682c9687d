use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::WishlistRepository;
use crate::domain::wishlist::WishlistItem;
use crate::schema::{products, wishlist_items};

use super::models::{NewWishlistRow, ProductRow, WishlistRow};

fn into_item((entry, product): (WishlistRow, ProductRow)) -> Result<WishlistItem, DomainError> {
    Ok(WishlistItem {
        entry: entry.into(),
        product: Product::try_from(product)?,
    })
}

pub struct DieselWishlistRepository {
    pool: DbPool,
}

impl DieselWishlistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn load_item(conn: &mut PgConnection, id: Uuid) -> Result<Option<WishlistItem>, DomainError> {
        wishlist_items::table
            .inner_join(products::table)
            .filter(wishlist_items::id.eq(id))
            .select((WishlistRow::as_select(), ProductRow::as_select()))
            .first::<(WishlistRow, ProductRow)>(conn)
            .optional()?
            .map(into_item)
            .transpose()
    }
}

impl WishlistRepository for DieselWishlistRepository {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, DomainError> {
        let mut conn = self.pool.get()?;
        wishlist_items::table
            .inner_join(products::table)
            .filter(wishlist_items::user_id.eq(user_id))
            .order(wishlist_items::created_at.desc())
            .select((WishlistRow::as_select(), ProductRow::as_select()))
            .load::<(WishlistRow, ProductRow)>(&mut conn)?
            .into_iter()
            .map(into_item)
            .collect()
    }

    fn exists(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let found = diesel::select(exists(
            wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id))
                .filter(wishlist_items::product_id.eq(product_id)),
        ))
        .get_result(&mut conn)?;
        Ok(found)
    }

    fn create(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let id = Uuid::new_v4();
            diesel::insert_into(wishlist_items::table)
                .values(&NewWishlistRow {
                    id,
                    user_id,
                    product_id,
                })
                .execute(conn)?;
            Self::load_item(conn, id)?
                .ok_or_else(|| DomainError::Internal("wishlist entry vanished after insert".to_string()))
        })
    }

    fn find(&self, id: Uuid) -> Result<Option<WishlistItem>, DomainError> {
        let mut conn = self.pool.get()?;
        Self::load_item(&mut conn, id)
    }

    fn update_product(&self, id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::update(wishlist_items::table.find(id))
                .set(wishlist_items::product_id.eq(product_id))
                .execute(conn)?;
            Self::load_item(conn, id)?
                .ok_or_else(|| DomainError::not_found("Item is not present in wishlist"))
        })
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(wishlist_items::table.find(id)).execute(&mut conn)?;
        Ok(())
    }
}
