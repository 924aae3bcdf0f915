//! Greenbasket Storefront - grocery shop with store and admin dashboards.
//!
//! This binary serves the whole application on one port:
//!
//! - Public catalog and session-scoped cart
//! - Mocked email/password authentication with role-based redirects
//! - `/store` dashboard for store owners
//! - `/admin` dashboard with product CRUD, CSV import, and bulk pricing
//!
//! All data is held in memory and reseeded on restart; nothing persists.

#![cfg_attr(not(test), forbid(unsafe_code))]

use greenbasket_storefront::{app, catalog::Catalog, config::StorefrontConfig, seed, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "greenbasket_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let addr = config.socket_addr();
    let state = AppState::new(config, Catalog::new(seed::seed_data()));
    let app = app(state);

    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
