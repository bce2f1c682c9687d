use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::cart::CartEntry;
use crate::domain::order::{CheckoutRequest, Order};
use crate::domain::pricing::line_total;
use crate::errors::AppError;
use crate::state::{AppState, MediaUrls};

use super::addresses::AddressBody;
use super::{blocking, money};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequestBody {
    pub address_id: Uuid,
    /// `INSTANT10` takes 10% off; any other code is stored but worth nothing
    #[serde(default)]
    pub coupon: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    /// Public order code, e.g. "ODR482913"
    pub order_id: String,
    pub user: Uuid,
    pub coupon: Option<String>,
    /// Order value before product discounts
    pub total_amount: String,
    pub total_items: i32,
    pub coupon_amount: String,
    pub order_amount: String,
    pub savings: String,
    pub address: Option<Uuid>,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            order_id: o.order_code,
            user: o.user_id,
            coupon: o.coupon,
            total_amount: money(&o.totals.total_amount),
            total_items: o.totals.total_items,
            coupon_amount: money(&o.totals.coupon_amount),
            order_amount: money(&o.totals.order_amount),
            savings: money(&o.totals.savings),
            address: o.address_id,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_name: String,
    pub slug: String,
    pub price: String,
    pub discount: String,
    pub quantity: i32,
    pub image: String,
    pub total_price: String,
}

impl OrderLineResponse {
    fn new(entry: &CartEntry, media: &MediaUrls) -> Self {
        let CartEntry { line, product } = entry;
        Self {
            id: line.id,
            product_name: product.name.clone(),
            slug: product.slug.clone(),
            price: money(&product.price),
            discount: money(&product.discount),
            quantity: line.quantity,
            image: media.url(&product.image1),
            total_price: money(&line_total(product, line.quantity)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub order: OrderResponse,
    pub order_items: Vec<OrderLineResponse>,
    /// Shipping address as it was at checkout
    pub address: AddressBody,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/order/
///
/// Turns every open cart line of the caller into an order. Totals are frozen
/// and the address is copied onto the order in the same transaction that marks
/// the lines as ordered.
#[utoipa::path(
    post,
    path = "/api/order/",
    request_body = CheckoutRequestBody,
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Missing caller id"),
        (status = 404, description = "Address not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CheckoutRequestBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let request = CheckoutRequest {
        address_id: body.address_id,
        coupon: body.coupon,
    };

    let order = blocking(move || state.orders.checkout(user.id, request)).await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/order/{order_code}/
#[utoipa::path(
    get,
    path = "/api/order/{order_code}/",
    params(
        ("order_code" = String, Path, description = "Order code, e.g. ODR482913"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Order with its lines and shipping address", body = OrderDetailResponse),
        (status = 404, description = "No matching order for this caller"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_code = path.into_inner();

    let st = state.clone();
    let detail = blocking(move || st.orders.get_order(user.id, &order_code)).await?;

    let order_items = detail
        .lines
        .iter()
        .map(|e| OrderLineResponse::new(e, &state.media))
        .collect();
    let address = AddressBody::from(detail.order.shipping.clone());
    Ok(HttpResponse::Ok().json(OrderDetailResponse {
        order: detail.order.into(),
        order_items,
        address,
    }))
}

/// GET /api/all-orders/
///
/// Newest first, unpaginated.
#[utoipa::path(
    get,
    path = "/api/all-orders/",
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 200, description = "Caller's orders", body = [OrderResponse]),
        (status = 401, description = "Missing caller id"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = blocking(move || state.orders.list_orders(user.id)).await?;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
