use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::wishlist::WishlistItem;
use crate::errors::AppError;
use crate::state::{AppState, MediaUrls};

use super::blocking;
use super::products::ProductResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct WishlistRequest {
    /// Product id
    pub product: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistResponse {
    pub id: Uuid,
    pub product: Uuid,
    pub product_image: String,
    pub product_detail: ProductResponse,
}

impl WishlistResponse {
    fn new(item: &WishlistItem, media: &MediaUrls) -> Self {
        Self {
            id: item.entry.id,
            product: item.product.id,
            product_image: media.url(&item.product.image1),
            product_detail: ProductResponse::new(&item.product, media),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/wishlist/",
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 200, description = "Caller's wishlist", body = [WishlistResponse]),
        (status = 401, description = "Missing caller id"),
    ),
    tag = "wishlist"
)]
pub async fn list_wishlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let st = state.clone();
    let items = blocking(move || st.wishlist.list(user.id)).await?;

    let body: Vec<WishlistResponse> = items
        .iter()
        .map(|i| WishlistResponse::new(i, &state.media))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/",
    request_body = WishlistRequest,
    params(("X-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 201, description = "Added to wishlist", body = WishlistResponse),
        (status = 400, description = "Already in wishlist"),
        (status = 404, description = "Product not found"),
    ),
    tag = "wishlist"
)]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<WishlistRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = body.product;

    let st = state.clone();
    let item = blocking(move || st.wishlist.add(user.id, product_id)).await?;

    Ok(HttpResponse::Created().json(WishlistResponse::new(&item, &state.media)))
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}/",
    params(
        ("id" = Uuid, Path, description = "Wishlist entry id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Wishlist entry", body = WishlistResponse),
        (status = 404, description = "No such entry for this caller"),
    ),
    tag = "wishlist"
)]
pub async fn get_wishlist_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let st = state.clone();
    let item = blocking(move || st.wishlist.get(user.id, id)).await?;

    Ok(HttpResponse::Ok().json(WishlistResponse::new(&item, &state.media)))
}

/// PUT /api/wishlist/{id}/
///
/// Points the entry at another product.
#[utoipa::path(
    put,
    path = "/api/wishlist/{id}/",
    request_body = WishlistRequest,
    params(
        ("id" = Uuid, Path, description = "Wishlist entry id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 200, description = "Entry updated", body = WishlistResponse),
        (status = 400, description = "Product already in wishlist"),
        (status = 404, description = "No such entry or product"),
    ),
    tag = "wishlist"
)]
pub async fn update_wishlist_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<WishlistRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product_id = body.product;

    let st = state.clone();
    let item = blocking(move || st.wishlist.change_product(user.id, id, product_id)).await?;

    Ok(HttpResponse::Ok().json(WishlistResponse::new(&item, &state.media)))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}/",
    params(
        ("id" = Uuid, Path, description = "Wishlist entry id"),
        ("X-User-Id" = Uuid, Header, description = "Caller id"),
    ),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "No such entry"),
    ),
    tag = "wishlist"
)]
pub async fn remove_from_wishlist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.wishlist.remove(user.id, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::handlers::test_support::{as_user, test_app};
    use crate::infrastructure::memory::MemoryStore;

    #[actix_web::test]
    async fn add_list_and_reject_duplicate() {
        let store = Arc::new(MemoryStore::default());
        let phone = store.seed_product("Pixel 8", "100.00", "10.00");
        let app = test_app!(store);
        let user = Uuid::new_v4();

        let add = || {
            as_user(test::TestRequest::post().uri("/api/wishlist/"), user)
                .set_json(json!({ "product": phone.id }))
                .to_request()
        };
        let resp = test::call_service(&app, add()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["product"], phone.id.to_string());
        assert_eq!(created["product_image"], "http://testserver/media/default.jpg");
        assert_eq!(created["product_detail"]["slug"], "pixel-8");

        assert_eq!(test::call_service(&app, add()).await.status(), StatusCode::BAD_REQUEST);

        let req = as_user(test::TestRequest::get().uri("/api/wishlist/"), user).to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn update_points_at_another_product() {
        let store = Arc::new(MemoryStore::default());
        let phone = store.seed_product("Pixel 8", "100.00", "10.00");
        let buds = store.seed_product("Noise Buds", "50.00", "0");
        let app = test_app!(store);
        let user = Uuid::new_v4();

        let req = as_user(test::TestRequest::post().uri("/api/wishlist/"), user)
            .set_json(json!({ "product": phone.id }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/wishlist/{}/", created["id"].as_str().unwrap_or_default());

        let req = as_user(test::TestRequest::put().uri(&uri), user)
            .set_json(json!({ "product": buds.id }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["product"], buds.id.to_string());

        let req = as_user(test::TestRequest::get().uri(&uri), user).to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["product_detail"]["product_name"], "Noise Buds");
    }

    #[actix_web::test]
    async fn delete_tells_forbidden_from_missing() {
        let store = Arc::new(MemoryStore::default());
        let phone = store.seed_product("Pixel 8", "100.00", "10.00");
        let app = test_app!(store);
        let owner = Uuid::new_v4();

        let req = as_user(test::TestRequest::post().uri("/api/wishlist/"), owner)
            .set_json(json!({ "product": phone.id }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/wishlist/{}/", created["id"].as_str().unwrap_or_default());

        let req = as_user(test::TestRequest::delete().uri(&uri), Uuid::new_v4()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = as_user(test::TestRequest::delete().uri(&uri), owner).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = as_user(test::TestRequest::delete().uri(&uri), owner).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_product_is_404() {
        let app = test_app!(Arc::new(MemoryStore::default()));
        let req = as_user(test::TestRequest::post().uri("/api/wishlist/"), Uuid::new_v4())
            .set_json(json!({ "product": Uuid::new_v4() }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
