use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{merged_quantity, validate_quantity, CartEntry, CartLine};
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{order_items, products};

use super::models::{CartLineRow, NewCartLineRow, ProductRow};

const MAX_ADD_ATTEMPTS: usize = 2;

pub(super) fn into_entry((line, product): (CartLineRow, ProductRow)) -> Result<CartEntry, DomainError> {
    Ok(CartEntry {
        line: line.into(),
        product: Product::try_from(product)?,
    })
}

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn find_line(&self, line_id: Uuid) -> Result<Option<CartLine>, DomainError> {
        let mut conn = self.pool.get()?;
        let line = order_items::table
            .find(line_id)
            .select(CartLineRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(line.map(CartLine::from))
    }

    fn add_to_line(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartLine, DomainError> {
        validate_quantity(quantity)?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            for attempt in 1..=MAX_ADD_ATTEMPTS {
                // The row lock makes concurrent merges into one line queue up,
                // each seeing the quantity the previous one committed.
                let open = order_items::table
                    .filter(order_items::user_id.eq(user_id))
                    .filter(order_items::product_id.eq(product_id))
                    .filter(order_items::is_ordered.eq(false))
                    .select(CartLineRow::as_select())
                    .for_update()
                    .load::<CartLineRow>(conn)?
                    .into_iter()
                    .next();

                if let Some(line) = open {
                    let merged = merged_quantity(line.quantity, quantity)?;
                    log::debug!("Cart line {} quantity {} -> {}", line.id, line.quantity, merged);
                    let line = diesel::update(order_items::table.find(line.id))
                        .set(order_items::quantity.eq(merged))
                        .returning(CartLineRow::as_returning())
                        .get_result(conn)?;
                    return Ok(line.into());
                }

                // A concurrent first add can win the open-line unique index.
                // The savepoint keeps the outer transaction usable so the next
                // pass merges into the winner's line.
                let inserted = conn.transaction::<_, DieselError, _>(|conn| {
                    diesel::insert_into(order_items::table)
                        .values(&NewCartLineRow {
                            id: Uuid::new_v4(),
                            user_id,
                            product_id,
                            quantity,
                        })
                        .returning(CartLineRow::as_returning())
                        .get_result(conn)
                });
                match inserted {
                    Ok(line) => return Ok(line.into()),
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        log::debug!(
                            "Open line for product {} created concurrently (attempt {})",
                            product_id,
                            attempt
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(DomainError::Internal(format!(
                "could not add product {} to the cart",
                product_id
            )))
        })
    }

    fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<CartLine, DomainError> {
        let mut conn = self.pool.get()?;
        let line = diesel::update(
            order_items::table
                .find(line_id)
                .filter(order_items::is_ordered.eq(false)),
        )
        .set(order_items::quantity.eq(quantity))
        .returning(CartLineRow::as_returning())
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| DomainError::not_found("Item is not present in Cart"))?;
        Ok(line.into())
    }

    fn delete_line(&self, line_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(
            order_items::table
                .find(line_id)
                .filter(order_items::is_ordered.eq(false)),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::not_found("Item is not present in Cart"));
        }
        Ok(())
    }

    fn open_entries(&self, user_id: Uuid) -> Result<Vec<CartEntry>, DomainError> {
        let mut conn = self.pool.get()?;
        order_items::table
            .inner_join(products::table)
            .filter(order_items::user_id.eq(user_id))
            .filter(order_items::is_ordered.eq(false))
            .order(order_items::created_at.asc())
            .select((CartLineRow::as_select(), ProductRow::as_select()))
            .load::<(CartLineRow, ProductRow)>(&mut conn)?
            .into_iter()
            .map(into_entry)
            .collect()
    }
}
