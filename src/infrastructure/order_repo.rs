use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::address::Address;
use crate::domain::errors::DomainError;
use crate::domain::order::{draft_order, generate_order_code, CheckoutRequest, Order, OrderDetail, OrderDraft};
use crate::domain::ports::OrderRepository;
use crate::schema::{addresses, order_items, orders, products};

use super::cart_repo::into_entry;
use super::models::{AddressRow, CartLineRow, NewOrderRow, OrderRow, ProductRow};

const MAX_CODE_ATTEMPTS: usize = 5;

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn new_order_row(draft: &OrderDraft, order_code: String) -> NewOrderRow {
    let ship = &draft.shipping;
    NewOrderRow {
        id: Uuid::new_v4(),
        user_id: draft.user_id,
        order_code,
        total_amount: draft.totals.total_amount.clone(),
        total_items: draft.totals.total_items,
        coupon: draft.coupon.clone(),
        coupon_amount: draft.totals.coupon_amount.clone(),
        order_amount: draft.totals.order_amount.clone(),
        savings: draft.totals.savings.clone(),
        address_id: Some(draft.address_id),
        ship_first_name: ship.first_name.clone(),
        ship_last_name: ship.last_name.clone(),
        ship_line1: ship.line1.clone(),
        ship_line2: ship.line2.clone(),
        ship_landmark: ship.landmark.clone(),
        ship_zip_code: ship.zip_code,
        ship_state: ship.state.clone(),
        ship_country: ship.country.clone(),
        ship_mobile: ship.mobile.clone(),
    }
}

/// Inserts the order, drawing a fresh code whenever the previous one is taken.
/// Each attempt runs in a savepoint so a conflict does not poison the outer transaction.
fn insert_order(conn: &mut PgConnection, draft: &OrderDraft) -> Result<OrderRow, DomainError> {
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let row = new_order_row(draft, generate_order_code());
        let inserted = conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(&row)
                .returning(OrderRow::as_returning())
                .get_result(conn)
        });
        match inserted {
            Ok(order) => return Ok(order),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                log::warn!("Order code {} already in use (attempt {})", row.order_code, attempt);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(DomainError::Internal(
        "could not allocate a unique order code".to_string(),
    ))
}

impl OrderRepository for DieselOrderRepository {
    fn checkout(&self, user_id: Uuid, request: CheckoutRequest) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the open lines. A concurrent checkout for the same user
            //    blocks here and then finds nothing left to order.
            let locked: Vec<Uuid> = order_items::table
                .filter(order_items::user_id.eq(user_id))
                .filter(order_items::is_ordered.eq(false))
                .select(order_items::id)
                .for_update()
                .load(conn)?;

            let entries = order_items::table
                .inner_join(products::table)
                .filter(order_items::id.eq_any(&locked))
                .order(order_items::created_at.asc())
                .select((CartLineRow::as_select(), ProductRow::as_select()))
                .load::<(CartLineRow, ProductRow)>(conn)?
                .into_iter()
                .map(into_entry)
                .collect::<Result<Vec<_>, _>>()?;

            // 2. Resolve the address; ownership is checked while drafting.
            let address = addresses::table
                .find(request.address_id)
                .select(AddressRow::as_select())
                .first(conn)
                .optional()?
                .map(Address::from);

            let draft = draft_order(user_id, &entries, address.as_ref(), &request)?;

            // 3. Persist the order with its frozen totals and address snapshot.
            let order = insert_order(conn, &draft)?;

            // 4. Move the locked lines out of the cart and onto the order.
            let stamped = diesel::update(order_items::table.filter(order_items::id.eq_any(&draft.line_ids)))
                .set((
                    order_items::is_ordered.eq(true),
                    order_items::order_id.eq(Some(order.id)),
                ))
                .execute(conn)?;
            if stamped != draft.line_ids.len() {
                return Err(DomainError::Internal(format!(
                    "expected to order {} lines, updated {}",
                    draft.line_ids.len(),
                    stamped
                )));
            }

            Ok(order.into())
        })
    }

    fn find_by_code(&self, user_id: Uuid, order_code: &str) -> Result<Option<OrderDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::user_id.eq(user_id))
            .filter(orders::order_code.eq(order_code))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = order_items::table
            .inner_join(products::table)
            .filter(order_items::order_id.eq(Some(order.id)))
            .order(order_items::created_at.asc())
            .select((CartLineRow::as_select(), ProductRow::as_select()))
            .load::<(CartLineRow, ProductRow)>(&mut conn)?
            .into_iter()
            .map(into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(OrderDetail {
            order: order.into(),
            lines,
        }))
    }

    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = orders::table
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Order::from).collect())
    }
}
