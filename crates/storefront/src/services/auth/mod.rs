//! Authentication service.
//!
//! Login is mocked: no password is ever verified. A fixed artificial delay
//! stands in for the backend round-trip, and a generation counter makes the
//! async boundary explicit - if a second attempt starts while the first is
//! still sleeping, the first is superseded and must not touch the session.
//!
//! Role assignment is deterministic: `admin@<sentinel-domain>` and
//! `store@<sentinel-domain>` get their elevated roles; every other
//! syntactically valid email is a customer.

mod error;

pub use error::AuthError;

use std::sync::atomic::Ordering;

use greenbasket_core::{Email, Role};

use crate::catalog::{RepositoryError, products::DEFAULT_STORE};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Minimum password length for registration.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum display name length for registration.
const MIN_NAME_LENGTH: usize = 2;

/// Authentication service.
///
/// Constructed per request from the shared state, mirroring how handlers use
/// the repositories.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Mocked login.
    ///
    /// Validates the email shape, waits out the configured mock delay, then
    /// maps the address to a role and upserts the account so orders can be
    /// keyed by user ID. The password is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed, or
    /// `AuthError::Superseded` if a newer login attempt started while this
    /// one was waiting. A superseded attempt has no side effects.
    pub async fn login(&self, email: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;

        let attempts = self.state.login_attempts();
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;

        let delay = self.state.config().login_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        // Latest attempt wins; a stale one bails out before any write.
        if attempts.load(Ordering::SeqCst) != attempt {
            tracing::debug!(attempt, "login attempt superseded");
            return Err(AuthError::Superseded);
        }

        let (name, role) = self.classify(&email);
        let store_id = (role == Role::Store).then_some(DEFAULT_STORE);
        let user = self
            .state
            .catalog()
            .users()
            .upsert_by_email(email, name, role, store_id)
            .await;

        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            store_id: user.store_id,
        })
    }

    /// Register a new customer account and log it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the name or password is too short,
    /// `AuthError::InvalidEmail` for a malformed email, or
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;

        let name = name.trim();
        if name.len() < MIN_NAME_LENGTH {
            return Err(AuthError::Validation(
                "name must be at least 2 characters".to_owned(),
            ));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let user = self
            .state
            .catalog()
            .users()
            .create(name.to_owned(), email, Role::Customer, None)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            store_id: user.store_id,
        })
    }

    /// Map an email address to a display name and role.
    fn classify(&self, email: &Email) -> (&'static str, Role) {
        if email.domain() == self.state.config().sentinel_domain {
            match email.local_part() {
                "admin" => return ("Admin User", Role::Admin),
                "store" => return ("Store Owner", Role::Store),
                _ => {}
            }
        }
        ("Demo User", Role::Customer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;
    use crate::seed;

    fn test_state(delay: Duration) -> AppState {
        let config = StorefrontConfig {
            login_delay: delay,
            ..StorefrontConfig::default()
        };
        AppState::new(config, Catalog::new(seed::seed_data()))
    }

    #[tokio::test]
    async fn test_sentinel_emails_map_to_roles() {
        let state = test_state(Duration::ZERO);
        let auth = AuthService::new(&state);

        let admin = auth.login("admin@greenbasket.test").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "Admin User");

        let store = auth.login("store@greenbasket.test").await.unwrap();
        assert_eq!(store.role, Role::Store);
        assert!(store.store_id.is_some());
    }

    #[tokio::test]
    async fn test_other_valid_emails_are_customers() {
        let state = test_state(Duration::ZERO);
        let auth = AuthService::new(&state);

        let user = auth.login("somebody@example.com").await.unwrap();
        assert_eq!(user.role, Role::Customer);

        // admin local part only counts on the sentinel domain
        let user = auth.login("admin@example.com").await.unwrap();
        assert_eq!(user.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_malformed_email_fails_validation() {
        let state = test_state(Duration::ZERO);
        let auth = AuthService::new(&state);

        assert!(matches!(
            auth.login("not-an-email").await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_seeded_customer_keeps_identity() {
        let state = test_state(Duration::ZERO);
        let auth = AuthService::new(&state);

        let alice = auth.login("alice@example.com").await.unwrap();
        assert_eq!(alice.name, "Alice Johnson");
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_login_supersedes_first() {
        let state = test_state(Duration::from_millis(1000));

        let first = {
            let state = state.clone();
            tokio::spawn(async move {
                AuthService::new(&state).login("first@example.com").await
            })
        };
        // Let the first attempt register itself and start sleeping.
        tokio::task::yield_now().await;

        let second = {
            let state = state.clone();
            tokio::spawn(async move {
                AuthService::new(&state).login("second@example.com").await
            })
        };

        let (first, second) = tokio::join!(first, second);
        assert!(matches!(first.unwrap(), Err(AuthError::Superseded)));
        assert_eq!(second.unwrap().unwrap().email.as_str(), "second@example.com");
    }

    #[tokio::test]
    async fn test_register_validates_and_conflicts() {
        let state = test_state(Duration::ZERO);
        let auth = AuthService::new(&state);

        assert!(matches!(
            auth.register("A", "a@example.com", "longenough").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.register("Ada", "a@example.com", "short").await,
            Err(AuthError::Validation(_))
        ));

        let user = auth.register("Ada", "ada@example.com", "longenough").await.unwrap();
        assert_eq!(user.role, Role::Customer);

        assert!(matches!(
            auth.register("Ada", "ada@example.com", "longenough").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
