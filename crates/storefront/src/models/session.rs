//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use greenbasket_core::{Email, Role, StoreId, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// Created by login, destroyed by logout; exactly one role at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's catalog ID.
    pub id: UserId,
    /// Display name shown in the navigation.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Active role, gating dashboard routes.
    pub role: Role,
    /// Store scope, for store operators only.
    pub store_id: Option<StoreId>,
}

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
