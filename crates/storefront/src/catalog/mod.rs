//! In-memory catalog repositories.
//!
//! The mock dataset lives here: one repository per entity, each guarding its
//! collection behind an async `RwLock`. The whole catalog is constructed once
//! at process start from seed data and handed to `AppState`; there are no
//! module-level mutable bindings. Nothing is persisted - restarting the
//! process resets the data, which is the intended lifecycle for a demo
//! instance.

pub mod categories;
pub mod discounts;
pub mod orders;
pub mod products;
pub mod users;

use thiserror::Error;

pub use categories::CategoryRepository;
pub use discounts::DiscountRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

use crate::models::{NewProduct, Product};
use crate::seed::SeedData;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email or discount code).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input failed validation.
    #[error("{0}")]
    Validation(String),
}

/// The full in-memory catalog, bundling all repositories.
pub struct Catalog {
    products: ProductRepository,
    categories: CategoryRepository,
    users: UserRepository,
    orders: OrderRepository,
    discounts: DiscountRepository,
}

impl Catalog {
    /// Build a catalog from seed data.
    #[must_use]
    pub fn new(seed: SeedData) -> Self {
        Self {
            products: ProductRepository::new(seed.products),
            categories: CategoryRepository::new(seed.categories),
            users: UserRepository::new(seed.users),
            orders: OrderRepository::new(seed.orders),
            discounts: DiscountRepository::new(seed.discounts),
        }
    }

    /// An empty catalog, for tests.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(SeedData::default())
    }

    #[must_use]
    pub const fn products(&self) -> &ProductRepository {
        &self.products
    }

    #[must_use]
    pub const fn categories(&self) -> &CategoryRepository {
        &self.categories
    }

    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    #[must_use]
    pub const fn discounts(&self) -> &DiscountRepository {
        &self.discounts
    }

    /// Create a product after cross-entity validation.
    ///
    /// The category must exist; name, description, and price are validated by
    /// the product repository.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a field is invalid or the
    /// category does not exist.
    pub async fn create_product(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        if !self.categories.exists(new.category_id).await {
            return Err(RepositoryError::Validation(format!(
                "unknown category: {}",
                new.category_id
            )));
        }
        self.products.create(new).await
    }
}
