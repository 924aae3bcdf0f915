//! Store dashboard route handlers. All require the store role.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireStore;
use crate::models::{Order, Product};
use crate::state::AppState;

use greenbasket_core::StoreId;

/// A store owner whose account has no store attached cannot see anything.
fn store_id_of(user: &crate::models::CurrentUser) -> Result<StoreId> {
    user.store_id
        .ok_or_else(|| AppError::BadRequest("no store is attached to this account".to_owned()))
}

/// GET /store/products
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn products(
    State(state): State<AppState>,
    RequireStore(user): RequireStore,
) -> Result<Json<Vec<Product>>> {
    let store_id = store_id_of(&user)?;
    Ok(Json(
        state.catalog().products().list_by_store(store_id).await,
    ))
}

/// GET /store/orders
///
/// Orders that contain at least one of this store's products.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn orders(
    State(state): State<AppState>,
    RequireStore(user): RequireStore,
) -> Result<Json<Vec<Order>>> {
    let store_id = store_id_of(&user)?;
    Ok(Json(state.catalog().orders().list_by_store(store_id).await))
}
