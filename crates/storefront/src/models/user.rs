//! User model.

use serde::{Deserialize, Serialize};

use greenbasket_core::{Email, Role, StoreId, UserId};

/// A user account.
///
/// There is no credential material here: login is mocked and no password is
/// ever verified or stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    /// Set only for users with [`Role::Store`]; scopes their dashboard.
    pub store_id: Option<StoreId>,
}
