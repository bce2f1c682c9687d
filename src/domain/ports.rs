use uuid::Uuid;

use super::address::{Address, AddressFields};
use super::cart::{CartEntry, CartLine};
use super::catalog::{NewProduct, Page, Product, ProductQuery};
use super::errors::DomainError;
use super::order::{CheckoutRequest, Order, OrderDetail};
use super::wishlist::WishlistItem;

pub trait CatalogRepository: Send + Sync + 'static {
    /// Inserts with an already de-duplicated slug.
    fn create(&self, product: NewProduct, slug: String) -> Result<Product, DomainError>;
    fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn search(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn find_line(&self, line_id: Uuid) -> Result<Option<CartLine>, DomainError>;
    /// Adds `quantity` to the user's open line for the product, creating the
    /// line when there is none. The capped merge is checked and written as one
    /// step, so concurrent adds cannot push a line past the cap.
    fn add_to_line(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartLine, DomainError>;
    fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<CartLine, DomainError>;
    /// Deletes an open line; `NotFound` when no open line has that id.
    fn delete_line(&self, line_id: Uuid) -> Result<(), DomainError>;
    fn open_entries(&self, user_id: Uuid) -> Result<Vec<CartEntry>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Turns the user's open cart into an order atomically.
    fn checkout(&self, user_id: Uuid, request: CheckoutRequest) -> Result<Order, DomainError>;
    fn find_by_code(&self, user_id: Uuid, order_code: &str) -> Result<Option<OrderDetail>, DomainError>;
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, DomainError>;
}

pub trait AddressRepository: Send + Sync + 'static {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Address>, DomainError>;
    fn create(&self, user_id: Uuid, fields: AddressFields) -> Result<Address, DomainError>;
    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError>;
    fn update(&self, id: Uuid, fields: AddressFields) -> Result<Address, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait WishlistRepository: Send + Sync + 'static {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, DomainError>;
    fn exists(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, DomainError>;
    fn create(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<WishlistItem>, DomainError>;
    fn update_product(&self, id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
