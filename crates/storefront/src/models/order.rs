//! Order models.
//!
//! Orders are seeded mock data plus whatever checkout records during the
//! session. Nothing mutates an order after creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::{OrderId, OrderStatus, UserId};

use super::product::Product;

/// A shipping address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: Option<String>,
}

/// One line of an order: a product snapshot with its price at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
    /// Price at time of order, independent of the product's current price.
    pub price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    pub shipping_address: Address,
}
