//! In-memory implementation of every port, used by service and handler tests.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::address::{Address, AddressFields};
use crate::domain::cart::{merged_quantity, validate_quantity, CartEntry, CartLine};
use crate::domain::catalog::{
    slugify, Category, NewProduct, Page, PriceOrdering, Product, ProductQuery, DEFAULT_IMAGE,
};
use crate::domain::errors::DomainError;
use crate::domain::order::{draft_order, generate_order_code, CheckoutRequest, Order, OrderDetail};
use crate::domain::ports::{
    AddressRepository, CartRepository, CatalogRepository, OrderRepository, WishlistRepository,
};
use crate::domain::wishlist::{WishlistEntry, WishlistItem};

#[derive(Default)]
struct State {
    products: Vec<Product>,
    lines: Vec<CartLine>,
    orders: Vec<Order>,
    addresses: Vec<Address>,
    wishlist: Vec<WishlistEntry>,
}

impl State {
    fn product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DomainError::Internal(format!("dangling product {}", id)))
    }

    fn entry(&self, line: &CartLine) -> Result<CartEntry, DomainError> {
        Ok(CartEntry {
            line: line.clone(),
            product: self.product(line.product_id)?,
        })
    }

    fn wishlist_item(&self, entry: &WishlistEntry) -> Result<WishlistItem, DomainError> {
        Ok(WishlistItem {
            entry: entry.clone(),
            product: self.product(entry.product_id)?,
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

pub fn new_product(name: &str, price: &str, discount: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        short_desc: format!("{} short", name),
        description: format!("{} description", name),
        category: Category::Laptops,
        price: BigDecimal::from_str(price).expect("valid price"),
        discount: BigDecimal::from_str(discount).expect("valid discount"),
        available_quantity: 10,
        image1: None,
        image2: None,
        image3: None,
        image4: None,
        tags: None,
    }
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store poisoned")
    }

    /// Inserts a product whose slug is the plain slugified name.
    pub fn seed_product(&self, name: &str, price: &str, discount: &str) -> Product {
        let slug = slugify(name);
        CatalogRepository::create(self, new_product(name, price, discount), slug).expect("seed product")
    }
}

impl CatalogRepository for MemoryStore {
    fn create(&self, product: NewProduct, slug: String) -> Result<Product, DomainError> {
        let mut state = self.lock();
        if state.products.iter().any(|p| p.slug == slug) {
            return Err(DomainError::invalid("duplicate entry"));
        }
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name,
            slug,
            short_desc: product.short_desc,
            description: product.description,
            category: product.category,
            price: product.price,
            discount: product.discount,
            available_quantity: product.available_quantity,
            image1: product.image1.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            image2: product.image2,
            image3: product.image3,
            image4: product.image4,
            tags: product.tags,
            created_at: Utc::now(),
        };
        state.products.push(created.clone());
        Ok(created)
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.lock().products.iter().any(|p| p.slug == slug))
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock().products.iter().rev().cloned().collect())
    }

    fn search(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError> {
        let state = self.lock();
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let mut matched: Vec<Product> = state
            .products
            .iter()
            .rev()
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .filter(|p| {
                needle
                    .as_ref()
                    .map_or(true, |n| p.name.to_lowercase().contains(n.as_str()))
            })
            .cloned()
            .collect();
        match query.ordering {
            Some(PriceOrdering::Ascending) => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(PriceOrdering::Descending) => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            None => {}
        }
        let total = matched.len() as i64;
        let items = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .collect();
        Ok(Page {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        Ok(self.lock().products.iter().find(|p| p.slug == slug).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }
}

impl CartRepository for MemoryStore {
    fn find_line(&self, line_id: Uuid) -> Result<Option<CartLine>, DomainError> {
        Ok(self.lock().lines.iter().find(|l| l.id == line_id).cloned())
    }

    fn add_to_line(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartLine, DomainError> {
        validate_quantity(quantity)?;
        let mut state = self.lock();
        let open = state
            .lines
            .iter_mut()
            .find(|l| l.user_id == user_id && l.product_id == product_id && !l.is_ordered);
        if let Some(line) = open {
            line.quantity = merged_quantity(line.quantity, quantity)?;
            return Ok(line.clone());
        }
        let line = CartLine {
            id: Uuid::new_v4(),
            user_id,
            product_id,
            quantity,
            is_ordered: false,
            order_id: None,
            created_at: Utc::now(),
        };
        state.lines.push(line.clone());
        Ok(line)
    }

    fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<CartLine, DomainError> {
        let mut state = self.lock();
        let line = state
            .lines
            .iter_mut()
            .find(|l| l.id == line_id && !l.is_ordered)
            .ok_or_else(|| DomainError::not_found("Item is not present in Cart"))?;
        line.quantity = quantity;
        Ok(line.clone())
    }

    fn delete_line(&self, line_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        let index = state
            .lines
            .iter()
            .position(|l| l.id == line_id && !l.is_ordered)
            .ok_or_else(|| DomainError::not_found("Item is not present in Cart"))?;
        state.lines.remove(index);
        Ok(())
    }

    fn open_entries(&self, user_id: Uuid) -> Result<Vec<CartEntry>, DomainError> {
        let state = self.lock();
        state
            .lines
            .iter()
            .filter(|l| l.user_id == user_id && !l.is_ordered)
            .map(|l| state.entry(l))
            .collect()
    }
}

impl OrderRepository for MemoryStore {
    fn checkout(&self, user_id: Uuid, request: CheckoutRequest) -> Result<Order, DomainError> {
        let mut state = self.lock();
        let entries = state
            .lines
            .iter()
            .filter(|l| l.user_id == user_id && !l.is_ordered)
            .map(|l| state.entry(l))
            .collect::<Result<Vec<_>, _>>()?;
        let address = state
            .addresses
            .iter()
            .find(|a| a.id == request.address_id)
            .cloned();
        let draft = draft_order(user_id, &entries, address.as_ref(), &request)?;

        let mut order_code = generate_order_code();
        while state.orders.iter().any(|o| o.order_code == order_code) {
            order_code = generate_order_code();
        }
        let order = Order {
            id: Uuid::new_v4(),
            user_id,
            order_code,
            coupon: draft.coupon,
            totals: draft.totals,
            address_id: Some(draft.address_id),
            shipping: draft.shipping,
            created_at: Utc::now(),
        };
        for line in state.lines.iter_mut().filter(|l| draft.line_ids.contains(&l.id)) {
            line.is_ordered = true;
            line.order_id = Some(order.id);
        }
        state.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_code(&self, user_id: Uuid, order_code: &str) -> Result<Option<OrderDetail>, DomainError> {
        let state = self.lock();
        let Some(order) = state
            .orders
            .iter()
            .find(|o| o.user_id == user_id && o.order_code == order_code)
            .cloned()
        else {
            return Ok(None);
        };
        let lines = state
            .lines
            .iter()
            .filter(|l| l.order_id == Some(order.id))
            .map(|l| state.entry(l))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(OrderDetail { order, lines }))
    }

    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .lock()
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl AddressRepository for MemoryStore {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Address>, DomainError> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn create(&self, user_id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        let address = Address {
            id: Uuid::new_v4(),
            user_id,
            fields,
            created_at: Utc::now(),
        };
        self.lock().addresses.push(address.clone());
        Ok(address)
    }

    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    fn update(&self, id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        let mut state = self.lock();
        let address = state
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::not_found("Address not found"))?;
        address.fields = fields;
        Ok(address.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        state.addresses.retain(|a| a.id != id);
        for order in state.orders.iter_mut().filter(|o| o.address_id == Some(id)) {
            order.address_id = None;
        }
        Ok(())
    }
}

impl WishlistRepository for MemoryStore {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, DomainError> {
        let state = self.lock();
        state
            .wishlist
            .iter()
            .filter(|w| w.user_id == user_id)
            .map(|w| state.wishlist_item(w))
            .collect()
    }

    fn exists(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .lock()
            .wishlist
            .iter()
            .any(|w| w.user_id == user_id && w.product_id == product_id))
    }

    fn create(&self, user_id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError> {
        let mut state = self.lock();
        let entry = WishlistEntry {
            id: Uuid::new_v4(),
            user_id,
            product_id,
            created_at: Utc::now(),
        };
        state.wishlist.push(entry.clone());
        state.wishlist_item(&entry)
    }

    fn find(&self, id: Uuid) -> Result<Option<WishlistItem>, DomainError> {
        let state = self.lock();
        state
            .wishlist
            .iter()
            .find(|w| w.id == id)
            .map(|w| state.wishlist_item(w))
            .transpose()
    }

    fn update_product(&self, id: Uuid, product_id: Uuid) -> Result<WishlistItem, DomainError> {
        let mut state = self.lock();
        let entry = state
            .wishlist
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DomainError::not_found("Item is not present in wishlist"))?;
        entry.product_id = product_id;
        let entry = entry.clone();
        state.wishlist_item(&entry)
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.lock().wishlist.retain(|w| w.id != id);
        Ok(())
    }
}
