//! Product and category models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::{CategoryId, ProductId, StoreId};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Current list price in USD.
    pub price: Decimal,
    pub category_id: CategoryId,
    pub store_id: StoreId,
    pub inventory: u32,
    pub image_url: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Input for creating a product (admin form or CSV import row).
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    /// Defaults to the primary store when omitted.
    pub store_id: Option<StoreId>,
    pub inventory: u32,
    pub image_url: Option<String>,
}

/// Partial update for an existing product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub inventory: Option<u32>,
    pub image_url: Option<String>,
}
