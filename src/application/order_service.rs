use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutRequest, Order, OrderDetail};
use crate::domain::ports::OrderRepository;

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn checkout(&self, user_id: Uuid, request: CheckoutRequest) -> Result<Order, DomainError> {
        let order = self.repo.checkout(user_id, request)?;
        log::info!(
            "Order {} placed by {}: {} items, amount {}",
            order.order_code,
            user_id,
            order.totals.total_items,
            order.totals.order_amount
        );
        Ok(order)
    }

    pub fn get_order(&self, user_id: Uuid, order_code: &str) -> Result<OrderDetail, DomainError> {
        self.repo
            .find_by_code(user_id, order_code)?
            .ok_or_else(|| DomainError::not_found("No matching orders found"))
    }

    pub fn list_orders(&self, user_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.repo.list_for_user(user_id)
    }
}
