//! HTTP middleware for the storefront.

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, RequireStore, clear_current_user, set_current_user,
};
pub use session::create_session_layer;
