//! Session middleware configuration.
//!
//! Sessions are held in memory and carry both the signed-in user and the
//! cart, so everything a visitor accumulates lives and dies with the
//! session cookie.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gb_session";

/// Session expiry time in seconds (7 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
