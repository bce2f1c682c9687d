pub mod addresses;
pub mod cart;
pub mod orders;
pub mod products;
pub mod wishlist;

use actix_web::middleware::NormalizePath;
use actix_web::web;
use bigdecimal::BigDecimal;
use utoipa::OpenApi;

use crate::domain::errors::DomainError;
use crate::domain::pricing::round_money;
use crate::errors::AppError;

/// Runs a blocking service call (diesel is synchronous) off the async workers.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

/// Money as a two-decimal string, e.g. "230.00".
///
/// A rounded zero loses its scale in `BigDecimal`, so the digits are padded
/// here rather than trusted to `Display`.
pub(crate) fn money(value: &BigDecimal) -> String {
    let rounded = round_money(value).to_string();
    match rounded.split_once('.') {
        Some((whole, frac)) => format!("{}.{:0<2}", whole, frac),
        None => format!("{}.00", rounded),
    }
}

/// Mounts the `/api` scope. A trailing slash is optional on every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(NormalizePath::trim())
            .route("/products", web::get().to(products::list_products))
            .route("/products-filter", web::get().to(products::filter_products))
            .route("/products/{slug}", web::get().to(products::get_product))
            .route("/add-to-cart", web::post().to(cart::add_to_cart))
            .route(
                "/order-item/change-quantity/{id}",
                web::patch().to(cart::change_quantity),
            )
            .route("/remove-from-cart/{id}", web::delete().to(cart::remove_from_cart))
            .route("/cart-items", web::get().to(cart::cart_items))
            .service(
                web::resource("/address")
                    .route(web::get().to(addresses::list_addresses))
                    .route(web::post().to(addresses::create_address)),
            )
            .service(
                web::resource("/address/{id}")
                    .route(web::get().to(addresses::get_address))
                    .route(web::put().to(addresses::replace_address))
                    .route(web::patch().to(addresses::patch_address))
                    .route(web::delete().to(addresses::delete_address)),
            )
            .service(
                web::resource("/wishlist")
                    .route(web::get().to(wishlist::list_wishlist))
                    .route(web::post().to(wishlist::add_to_wishlist)),
            )
            .service(
                web::resource("/wishlist/{id}")
                    .route(web::get().to(wishlist::get_wishlist_item))
                    .route(web::put().to(wishlist::update_wishlist_item))
                    .route(web::delete().to(wishlist::remove_from_wishlist)),
            )
            .route("/order", web::post().to(orders::checkout))
            .route("/order/{order_code}", web::get().to(orders::get_order))
            .route("/all-orders", web::get().to(orders::list_orders)),
    );
}

#[derive(OpenApi)]
#[openapi(
    paths(
        products::list_products,
        products::filter_products,
        products::get_product,
        cart::add_to_cart,
        cart::change_quantity,
        cart::remove_from_cart,
        cart::cart_items,
        addresses::list_addresses,
        addresses::create_address,
        addresses::get_address,
        addresses::replace_address,
        addresses::patch_address,
        addresses::delete_address,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::get_wishlist_item,
        wishlist::update_wishlist_item,
        wishlist::remove_from_wishlist,
        orders::checkout,
        orders::get_order,
        orders::list_orders,
    ),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "cart", description = "Shopping cart"),
        (name = "addresses", description = "Address book"),
        (name = "wishlist", description = "Wishlist"),
        (name = "orders", description = "Checkout and order history"),
    )
)]
pub struct ApiDoc;
