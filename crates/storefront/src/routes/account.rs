//! Account route handlers. All require a signed-in user.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{RequireAuth, clear_current_user};
use crate::models::{CurrentUser, Order};
use crate::state::AppState;

/// GET /account/profile
#[instrument(skip_all)]
pub async fn profile(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

/// GET /account/orders
///
/// The signed-in user's orders, newest first.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<Vec<Order>> {
    Json(state.catalog().orders().list_by_user(user.id).await)
}

/// Response for POST /account/delete.
#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub redirect: &'static str,
}

/// POST /account/delete
///
/// Mock deletion: nothing is purged from the catalog, the user is simply
/// signed out. The cart survives, same as a plain logout.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn delete_account(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!("account deleted");
    clear_current_user(&session).await?;
    Ok(Json(DeleteAccountResponse { redirect: "/" }))
}
