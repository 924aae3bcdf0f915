//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// in-memory catalog and configuration. The catalog is built once at process
/// start (from seed data) and injected here; nothing reaches for globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    login_attempts: AtomicU64,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                login_attempts: AtomicU64::new(0),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the in-memory catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Login attempt generation counter.
    ///
    /// Bumped on every login attempt so that a newer attempt supersedes a
    /// stale in-flight one (see `services::auth`).
    #[must_use]
    pub fn login_attempts(&self) -> &AtomicU64 {
        &self.inner.login_attempts
    }
}
