//! User repository.

use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::RwLock;

use greenbasket_core::{Email, Role, StoreId, UserId};

use super::RepositoryError;
use crate::models::User;

/// Repository for user accounts.
pub struct UserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI32,
}

impl UserRepository {
    /// Create a repository from seed users.
    #[must_use]
    pub fn new(seed: Vec<User>) -> Self {
        let next_id = seed.iter().map(|u| u.id.as_i32()).max().unwrap_or(0) + 1;
        Self {
            users: RwLock::new(seed),
            next_id: AtomicI32::new(next_id),
        }
    }

    /// All users, in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Look up a user by ID.
    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Look up a user by email address.
    pub async fn find_by_email(&self, email: &Email) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == *email)
            .cloned()
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    pub async fn create(
        &self,
        name: String,
        email: Email,
        role: Role,
        store_id: Option<StoreId>,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let user = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name,
            email,
            role,
            store_id,
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Return the user with this email, creating one if none exists.
    ///
    /// An existing account wins: its stored name, role, and store scope are
    /// kept, so a seeded user logging in keeps their identity.
    pub async fn upsert_by_email(
        &self,
        email: Email,
        name: &str,
        role: Role,
        store_id: Option<StoreId>,
    ) -> User {
        let mut users = self.users.write().await;
        if let Some(existing) = users.iter().find(|u| u.email == email) {
            return existing.clone();
        }

        let user = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: name.to_owned(),
            email,
            role,
            store_id,
        };
        users.push(user.clone());
        user
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_conflicts_on_duplicate_email() {
        let repo = UserRepository::new(Vec::new());
        repo.create("A".to_owned(), email("a@example.com"), Role::Customer, None)
            .await
            .unwrap();

        let dup = repo
            .create("B".to_owned(), email("a@example.com"), Role::Customer, None)
            .await;
        assert!(matches!(dup, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_upsert_keeps_existing_identity() {
        let repo = UserRepository::new(vec![User {
            id: UserId::new(1),
            name: "Alice Johnson".to_owned(),
            email: email("alice@example.com"),
            role: Role::Customer,
            store_id: None,
        }]);

        let user = repo
            .upsert_by_email(email("alice@example.com"), "Demo User", Role::Customer, None)
            .await;
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Alice Johnson");

        let fresh = repo
            .upsert_by_email(email("new@example.com"), "Demo User", Role::Customer, None)
            .await;
        assert_eq!(fresh.id, UserId::new(2));
        assert_eq!(fresh.name, "Demo User");
    }
}
