use std::sync::Arc;

use crate::application::address_service::AddressService;
use crate::application::cart_service::CartService;
use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::application::wishlist_service::WishlistService;
use crate::db::DbPool;
use crate::domain::ports::{
    AddressRepository, CartRepository, CatalogRepository, OrderRepository, WishlistRepository,
};
use crate::infrastructure::address_repo::DieselAddressRepository;
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::wishlist_repo::DieselWishlistRepository;

/// Builds absolute URLs for stored product images.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    base_url: String,
}

impl MediaUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/media/{}", self.base_url, path.trim_start_matches('/'))
    }
}

pub struct AppState {
    pub catalog: CatalogService,
    pub cart: CartService,
    pub orders: OrderService,
    pub addresses: AddressService,
    pub wishlist: WishlistService,
    pub media: MediaUrls,
}

impl AppState {
    pub fn from_repositories(
        catalog: Arc<dyn CatalogRepository>,
        carts: Arc<dyn CartRepository>,
        orders: Arc<dyn OrderRepository>,
        addresses: Arc<dyn AddressRepository>,
        wishlist: Arc<dyn WishlistRepository>,
        media: MediaUrls,
    ) -> Self {
        Self {
            catalog: CatalogService::new(catalog.clone()),
            cart: CartService::new(catalog.clone(), carts),
            orders: OrderService::new(orders),
            addresses: AddressService::new(addresses),
            wishlist: WishlistService::new(catalog, wishlist),
            media,
        }
    }

    pub fn with_pool(pool: DbPool, media: MediaUrls) -> Self {
        Self::from_repositories(
            Arc::new(DieselCatalogRepository::new(pool.clone())),
            Arc::new(DieselCartRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool.clone())),
            Arc::new(DieselAddressRepository::new(pool.clone())),
            Arc::new(DieselWishlistRepository::new(pool)),
            media,
        )
    }

    #[cfg(test)]
    pub(crate) fn in_memory(store: Arc<crate::infrastructure::memory::MemoryStore>) -> Self {
        Self::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            MediaUrls::new("http://testserver"),
        )
    }
}
