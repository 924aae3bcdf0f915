//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use greenbasket_core::{CategoryId, ProductId};

use crate::error::{AppError, Result};
use crate::models::{Category, Product};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Restrict to a single category.
    pub category: Option<i32>,
    /// Case-insensitive substring match on the product name.
    pub q: Option<String>,
}

/// GET /products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let mut products = state.catalog().products().list().await;

    if let Some(category) = query.category {
        let category = CategoryId::new(category);
        products.retain(|p| p.category_id == category);
    }
    if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let needle = q.to_lowercase();
        products.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    Json(products)
}

/// GET /products/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .products()
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;
    Ok(Json(product))
}

/// GET /categories
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().list().await)
}
