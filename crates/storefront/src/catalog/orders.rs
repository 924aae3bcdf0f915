//! Order repository.

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use greenbasket_core::{OrderId, OrderStatus, StoreId, UserId};

use crate::models::{Address, Order, OrderItem};

/// Repository for orders.
///
/// Holds the seeded order history plus orders recorded at checkout. Orders
/// are never mutated after creation.
pub struct OrderRepository {
    orders: RwLock<Vec<Order>>,
    next_id: AtomicI32,
}

impl OrderRepository {
    /// Create a repository from seed orders.
    #[must_use]
    pub fn new(seed: Vec<Order>) -> Self {
        let next_id = seed.iter().map(|o| o.id.as_i32()).max().unwrap_or(0) + 1;
        Self {
            orders: RwLock::new(seed),
            next_id: AtomicI32::new(next_id),
        }
    }

    /// All orders, in insertion order.
    pub async fn list(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Look up an order by ID.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned()
    }

    /// Orders placed by one user, newest first.
    pub async fn list_by_user(&self, user_id: UserId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        orders
    }

    /// Orders containing at least one item from the given store, newest first.
    pub async fn list_by_store(&self, store_id: StoreId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.items.iter().any(|i| i.product.store_id == store_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        orders
    }

    /// Record a new order with status `Processing` and the current time.
    pub async fn create(
        &self,
        user_id: UserId,
        items: Vec<OrderItem>,
        total: Decimal,
        shipping_address: Address,
    ) -> Order {
        let order = Order {
            id: OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id,
            items,
            total,
            status: OrderStatus::Processing,
            date: Utc::now(),
            shipping_address,
        };
        self.orders.write().await.push(order.clone());
        order
    }
}
