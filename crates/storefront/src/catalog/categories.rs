//! Category repository.
//!
//! Categories are fixed seed data; nothing in the UI creates or deletes them,
//! so this repository is read-only.

use tokio::sync::RwLock;

use greenbasket_core::CategoryId;

use crate::models::Category;

/// Repository for product categories.
pub struct CategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a repository from seed categories.
    #[must_use]
    pub fn new(seed: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(seed),
        }
    }

    /// All categories, in seed order.
    pub async fn list(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    /// Look up a category by ID.
    pub async fn get(&self, id: CategoryId) -> Option<Category> {
        self.categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Whether a category with this ID exists.
    pub async fn exists(&self, id: CategoryId) -> bool {
        self.categories.read().await.iter().any(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_and_get() {
        let repo = CategoryRepository::new(vec![Category {
            id: CategoryId::new(1),
            name: "Bakery".to_owned(),
        }]);

        assert!(repo.exists(CategoryId::new(1)).await);
        assert!(!repo.exists(CategoryId::new(2)).await);
        assert!(repo.get(CategoryId::new(1)).await.is_some());
        assert!(repo.get(CategoryId::new(2)).await.is_none());
    }
}
