//! Admin dashboard route handlers. All require the admin role.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use greenbasket_core::{DiscountId, ProductId, StoreId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Discount, NewDiscount, NewProduct, Product, ProductUpdate, User};
use crate::services::import::{self, ImportReport};
use crate::state::AppState;

// =============================================================================
// Products
// =============================================================================

/// GET /admin/products
#[instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Json<Vec<Product>> {
    Json(state.catalog().products().list().await)
}

/// POST /admin/products
#[instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog().create_product(new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id}
#[instrument(skip_all, fields(product_id = id))]
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .products()
        .update(ProductId::new(id), update)
        .await?;
    Ok(Json(product))
}

/// DELETE /admin/products/{id}
#[instrument(skip_all, fields(product_id = id))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if state.catalog().products().delete(ProductId::new(id)).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id} not found")))
    }
}

/// POST /admin/products/import
///
/// Takes the raw CSV as the request body. A bad header fails the request;
/// bad rows are reported in the response and the rest of the batch lands.
#[instrument(skip_all)]
pub async fn import_products(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    body: String,
) -> Result<Json<ImportReport>> {
    let report = import::import_products(state.catalog(), &body)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(report))
}

/// Request body for POST /admin/products/price-adjust.
#[derive(Debug, Deserialize)]
pub struct PriceAdjustForm {
    /// Signed percentage, e.g. `10` raises prices by 10%, `-25` cuts a quarter.
    pub percent: Decimal,
    /// Restrict the adjustment to one store.
    pub store_id: Option<StoreId>,
}

/// Response for POST /admin/products/price-adjust.
#[derive(Debug, Serialize)]
pub struct PriceAdjustResponse {
    pub updated: u32,
}

/// POST /admin/products/price-adjust
#[instrument(skip_all, fields(percent = %form.percent))]
pub async fn adjust_prices(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(form): Json<PriceAdjustForm>,
) -> Result<Json<PriceAdjustResponse>> {
    let updated = state
        .catalog()
        .products()
        .adjust_prices(form.percent, form.store_id)
        .await?;
    tracing::info!(updated, "bulk price adjustment applied");
    Ok(Json(PriceAdjustResponse { updated }))
}

// =============================================================================
// Users
// =============================================================================

/// GET /admin/users
#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Json<Vec<User>> {
    Json(state.catalog().users().list().await)
}

// =============================================================================
// Discounts
// =============================================================================

/// GET /admin/discounts
#[instrument(skip_all)]
pub async fn list_discounts(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Json<Vec<Discount>> {
    Json(state.catalog().discounts().list().await)
}

/// POST /admin/discounts
#[instrument(skip_all)]
pub async fn create_discount(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(new): Json<NewDiscount>,
) -> Result<(StatusCode, Json<Discount>)> {
    let discount = state.catalog().discounts().create(new).await?;
    Ok((StatusCode::CREATED, Json(discount)))
}

/// Request body for PUT /admin/discounts/{id}.
#[derive(Debug, Deserialize)]
pub struct SetActiveForm {
    pub is_active: bool,
}

/// PUT /admin/discounts/{id}
#[instrument(skip_all, fields(discount_id = id))]
pub async fn set_discount_active(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
    Json(form): Json<SetActiveForm>,
) -> Result<Json<Discount>> {
    let discount = state
        .catalog()
        .discounts()
        .set_active(DiscountId::new(id), form.is_active)
        .await?;
    Ok(Json(discount))
}

/// DELETE /admin/discounts/{id}
#[instrument(skip_all, fields(discount_id = id))]
pub async fn delete_discount(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if state
        .catalog()
        .discounts()
        .delete(DiscountId::new(id))
        .await
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("discount {id} not found")))
    }
}
