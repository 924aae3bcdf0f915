//! User roles and the capability sets they unlock.

use serde::{Deserialize, Serialize};

/// The role attached to a session.
///
/// Exactly one role is active at a time. The role decides which dashboard
/// routes render; it is advisory UI routing, not a server-enforced security
/// boundary (there is no real authentication in this system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Cart, order history, and profile.
    #[default]
    Customer,
    /// Store dashboard: products and orders scoped to one store.
    Store,
    /// Global products, users, and discounts.
    Admin,
}

impl Role {
    /// The landing path a user with this role is sent to after login.
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Customer => "/",
            Self::Store => "/store",
            Self::Admin => "/admin",
        }
    }

    /// Whether this role may access routes guarded by `required`.
    ///
    /// Capability sets are mutually exclusive: an admin is not implicitly a
    /// store operator and vice versa, matching the route surface
    /// (`/store/*` is store-only, `/admin/*` is admin-only).
    #[must_use]
    pub const fn can_access(self, required: Self) -> bool {
        matches!(
            (self, required),
            (Self::Customer, Self::Customer)
                | (Self::Store, Self::Store)
                | (Self::Admin, Self::Admin)
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Store => write!(f, "store"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "store" => Ok(Self::Store),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
