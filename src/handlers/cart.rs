use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::cart_service::LineUpdate;
use crate::auth::AuthenticatedUser;
use crate::domain::cart::{CartEntry, CartLine};
use crate::domain::pricing::line_total;
use crate::errors::AppError;
use crate::state::{AppState, MediaUrls};

use super::{blocking, money};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub slug: String,
    /// Between 1 and 5, including what is already in the cart
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeQuantityRequest {
    /// 0 removes the line
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: Uuid,
    pub product: Uuid,
    pub quantity: i32,
    pub is_ordered: bool,
    pub created_at: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            product: line.product_id,
            quantity: line.quantity,
            is_ordered: line.is_ordered,
            created_at: line.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub slug: String,
    pub price: String,
    pub discount: String,
    pub quantity: i32,
    pub image: String,
    pub total_price: String,
}

impl CartItemResponse {
    fn new(entry: &CartEntry, media: &MediaUrls) -> Self {
        let CartEntry { line, product } = entry;
        Self {
            id: line.id,
            product_id: product.id,
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
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_items: Vec<CartItemResponse>,
    pub cart_total: String,
    pub cart_savings: String,
    pub cart_count: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/add-to-cart/
///
/// Adds a product to the caller's cart, merging with an existing open line for
/// the same product.
#[utoipa::path(
    post,
    path = "/api/add-to-cart/",
    request_body = AddToCartRequest,
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 201, description = "Line created or merged", body = CartLineResponse),
        (status = 400, description = "Quantity outside 1..=5"),
        (status = 401, description = "Missing caller id"),
        (status = 404, description = "Product not found"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let AddToCartRequest { slug, quantity } = body.into_inner();

    let line = blocking(move || state.cart.add_item(user.id, &slug, quantity)).await?;

    Ok(HttpResponse::Created().json(CartLineResponse::from(line)))
}

/// PATCH /api/order-item/change-quantity/{id}/
#[utoipa::path(
    patch,
    path = "/api/order-item/change-quantity/{id}/",
    request_body = ChangeQuantityRequest,
    params(
        ("id" = Uuid, Path, description = "Cart line id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Quantity updated", body = CartLineResponse),
        (status = 204, description = "Line removed"),
        (status = 400, description = "Quantity outside 0..=5"),
        (status = 403, description = "Line belongs to another user"),
        (status = 404, description = "Line not in cart"),
    ),
    tag = "cart"
)]
pub async fn change_quantity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<ChangeQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();
    let quantity = body.quantity;

    let update = blocking(move || state.cart.update_quantity(user.id, line_id, quantity)).await?;

    Ok(match update {
        LineUpdate::Updated(line) => HttpResponse::Ok().json(CartLineResponse::from(line)),
        LineUpdate::Removed => HttpResponse::NoContent().finish(),
    })
}

/// DELETE /api/remove-from-cart/{id}/
#[utoipa::path(
    delete,
    path = "/api/remove-from-cart/{id}/",
    params(
        ("id" = Uuid, Path, description = "Cart line id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 204, description = "Line removed"),
        (status = 403, description = "Line belongs to another user"),
        (status = 404, description = "Line not in cart"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();

    blocking(move || state.cart.remove_item(user.id, line_id)).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/cart-items/
#[utoipa::path(
    get,
    path = "/api/cart-items/",
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 200, description = "Open cart lines with totals", body = CartResponse),
        (status = 401, description = "Missing caller id"),
    ),
    tag = "cart"
)]
pub async fn cart_items(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let st = state.clone();
    let view = blocking(move || st.cart.view_cart(user.id)).await?;

    Ok(HttpResponse::Ok().json(CartResponse {
        cart_items: view
            .entries
            .iter()
            .map(|e| CartItemResponse::new(e, &state.media))
            .collect(),
        cart_total: money(&view.summary.total),
        cart_savings: money(&view.summary.savings),
        cart_count: view.summary.count,
    }))
}
