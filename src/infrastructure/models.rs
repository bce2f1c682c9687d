use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::address::{Address, AddressFields};
use crate::domain::cart::CartLine;
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderTotals};
use crate::domain::wishlist::WishlistEntry;
use crate::schema::{addresses, order_items, orders, products, wishlist_items};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub short_desc: String,
    pub description: String,
    pub category: String,
    pub price: BigDecimal,
    pub discount: BigDecimal,
    pub available_quantity: i32,
    pub image1: String,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub short_desc: String,
    pub description: String,
    pub category: String,
    pub price: BigDecimal,
    pub discount: BigDecimal,
    pub available_quantity: i32,
    pub image1: String,
    pub image2: Option<String>,
    pub image3: Option<String>,
    pub image4: Option<String>,
    pub tags: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row.category.parse().map_err(|_| {
            DomainError::Internal(format!("product {} has unknown category '{}'", row.id, row.category))
        })?;
        Ok(Product {
            id: row.id,
            name: row.name,
            slug: row.slug,
            short_desc: row.short_desc,
            description: row.description,
            category,
            price: row.price,
            discount: row.discount,
            available_quantity: row.available_quantity,
            image1: row.image1,
            image2: row.image2,
            image3: row.image3,
            image4: row.image4,
            tags: row.tags,
            created_at: row.created_at,
        })
    }
}

// ── Cart / ordered lines ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLineRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub order_id: Option<Uuid>,
    pub quantity: i32,
    pub is_ordered: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewCartLineRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            quantity: row.quantity,
            is_ordered: row.is_ordered,
            order_id: row.order_id,
            created_at: row.created_at,
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_code: String,
    pub total_amount: BigDecimal,
    pub total_items: i32,
    pub coupon: Option<String>,
    pub coupon_amount: BigDecimal,
    pub order_amount: BigDecimal,
    pub savings: BigDecimal,
    pub address_id: Option<Uuid>,
    pub ship_first_name: String,
    pub ship_last_name: String,
    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_landmark: String,
    pub ship_zip_code: i32,
    pub ship_state: String,
    pub ship_country: String,
    pub ship_mobile: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_code: String,
    pub total_amount: BigDecimal,
    pub total_items: i32,
    pub coupon: Option<String>,
    pub coupon_amount: BigDecimal,
    pub order_amount: BigDecimal,
    pub savings: BigDecimal,
    pub address_id: Option<Uuid>,
    pub ship_first_name: String,
    pub ship_last_name: String,
    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_landmark: String,
    pub ship_zip_code: i32,
    pub ship_state: String,
    pub ship_country: String,
    pub ship_mobile: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            user_id: row.user_id,
            order_code: row.order_code,
            coupon: row.coupon,
            totals: OrderTotals {
                total_amount: row.total_amount,
                total_items: row.total_items,
                coupon_amount: row.coupon_amount,
                order_amount: row.order_amount,
                savings: row.savings,
            },
            address_id: row.address_id,
            shipping: AddressFields {
                first_name: row.ship_first_name,
                last_name: row.ship_last_name,
                line1: row.ship_line1,
                line2: row.ship_line2,
                landmark: row.ship_landmark,
                zip_code: row.ship_zip_code,
                state: row.ship_state,
                country: row.ship_country,
                mobile: row.ship_mobile,
            },
            created_at: row.created_at,
        }
    }
}

// ── Address book ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: String,
    pub zip_code: i32,
    pub state: String,
    pub country: String,
    pub mobile: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub struct NewAddressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: String,
    pub zip_code: i32,
    pub state: String,
    pub country: String,
    pub mobile: String,
}

/// Full replacement of the editable columns; a `None` line2 is written as NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = addresses)]
#[diesel(treat_none_as_null = true)]
pub struct AddressChangeset {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: String,
    pub zip_code: i32,
    pub state: String,
    pub country: String,
    pub mobile: String,
}

impl From<AddressFields> for AddressChangeset {
    fn from(f: AddressFields) -> Self {
        AddressChangeset {
            first_name: f.first_name,
            last_name: f.last_name,
            line1: f.line1,
            line2: f.line2,
            landmark: f.landmark,
            zip_code: f.zip_code,
            state: f.state,
            country: f.country,
            mobile: f.mobile,
        }
    }
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: row.id,
            user_id: row.user_id,
            fields: AddressFields {
                first_name: row.first_name,
                last_name: row.last_name,
                line1: row.line1,
                line2: row.line2,
                landmark: row.landmark,
                zip_code: row.zip_code,
                state: row.state,
                country: row.country,
                mobile: row.mobile,
            },
            created_at: row.created_at,
        }
    }
}

// ── Wishlist ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = wishlist_items)]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wishlist_items)]
pub struct NewWishlistRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
}

impl From<WishlistRow> for WishlistEntry {
    fn from(row: WishlistRow) -> Self {
        WishlistEntry {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            created_at: row.created_at,
        }
    }
}
