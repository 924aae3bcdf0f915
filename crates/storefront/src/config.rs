//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults produce a working demo instance.
//!
//! - `GREENBASKET_HOST` - Bind address (default: 127.0.0.1)
//! - `GREENBASKET_PORT` - Listen port (default: 3000)
//! - `GREENBASKET_SENTINEL_DOMAIN` - Email domain whose `admin@` / `store@`
//!   addresses log in with elevated roles (default: greenbasket.test)
//! - `GREENBASKET_LOGIN_DELAY_MS` - Artificial delay of the mocked login call
//!   (default: 1000)
//! - `GREENBASKET_TAX_RATE` - Sales tax rate applied to the cart subtotal
//!   (default: 0.08)
//! - `GREENBASKET_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is
//!   free, exclusive (default: 50)
//! - `GREENBASKET_SHIPPING_FEE` - Flat shipping fee below the threshold
//!   (default: 5.00)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Email domain granting sentinel roles on login
    pub sentinel_domain: String,
    /// Artificial delay of the mocked login call
    pub login_delay: Duration,
    /// Cart pricing knobs
    pub pricing: PricingConfig,
}

/// Pricing parameters for cart total computation.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Sales tax rate applied to the subtotal (e.g. 0.08 for 8%)
    pub tax_rate: Decimal,
    /// Subtotal strictly above which shipping is free
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged at or below the threshold
    pub shipping_fee: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::new(50, 0),
            shipping_fee: Decimal::new(500, 2),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or("GREENBASKET_HOST", "127.0.0.1")?;
        let port = parse_env_or("GREENBASKET_PORT", "3000")?;
        let sentinel_domain =
            get_env_or_default("GREENBASKET_SENTINEL_DOMAIN", "greenbasket.test");
        let delay_ms: u64 = parse_env_or("GREENBASKET_LOGIN_DELAY_MS", "1000")?;

        let pricing = PricingConfig {
            tax_rate: parse_env_or("GREENBASKET_TAX_RATE", "0.08")?,
            free_shipping_threshold: parse_env_or("GREENBASKET_FREE_SHIPPING_THRESHOLD", "50")?,
            shipping_fee: parse_env_or("GREENBASKET_SHIPPING_FEE", "5.00")?,
        };

        Ok(Self {
            host,
            port,
            sentinel_domain,
            login_delay: Duration::from_millis(delay_ms),
            pricing,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            sentinel_domain: "greenbasket.test".to_owned(),
            login_delay: Duration::from_millis(1000),
            pricing: PricingConfig::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default, parsed into `T`.
fn parse_env_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pricing() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.tax_rate, Decimal::new(8, 2));
        assert_eq!(pricing.free_shipping_threshold, Decimal::new(50, 0));
        assert_eq!(pricing.shipping_fee, Decimal::new(5, 0));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_parse_env_or_uses_default() {
        let port: u16 = parse_env_or("GREENBASKET_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_or_reports_unparseable_value() {
        let err = parse_env_or::<u16>("GREENBASKET_TEST_BAD_PORT", "not-a-port").unwrap_err();
        let ConfigError::InvalidEnvVar(key, _) = err;
        assert_eq!(key, "GREENBASKET_TEST_BAD_PORT");
    }
}
