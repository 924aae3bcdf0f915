//! Discount repository.

use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::RwLock;

use greenbasket_core::DiscountId;

use super::RepositoryError;
use crate::models::{Discount, NewDiscount};

/// Minimum and maximum discount code length.
const CODE_LEN: std::ops::RangeInclusive<usize> = 3..=20;

/// Repository for promotional discount codes.
pub struct DiscountRepository {
    discounts: RwLock<Vec<Discount>>,
    next_id: AtomicI32,
}

impl DiscountRepository {
    /// Create a repository from seed discounts.
    #[must_use]
    pub fn new(seed: Vec<Discount>) -> Self {
        let next_id = seed.iter().map(|d| d.id.as_i32()).max().unwrap_or(0) + 1;
        Self {
            discounts: RwLock::new(seed),
            next_id: AtomicI32::new(next_id),
        }
    }

    /// All discounts, newest first.
    pub async fn list(&self) -> Vec<Discount> {
        let mut discounts = self.discounts.read().await.clone();
        discounts.sort_by(|a, b| b.id.cmp(&a.id));
        discounts
    }

    /// Create a discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the code length or percentage
    /// is out of range, or `RepositoryError::Conflict` if the code is taken.
    pub async fn create(&self, new: NewDiscount) -> Result<Discount, RepositoryError> {
        if !CODE_LEN.contains(&new.code.len()) {
            return Err(RepositoryError::Validation(
                "code must be between 3 and 20 characters".to_owned(),
            ));
        }
        if new.percentage == 0 || new.percentage > 100 {
            return Err(RepositoryError::Validation(
                "percentage must be between 1 and 100".to_owned(),
            ));
        }

        let mut discounts = self.discounts.write().await;
        if discounts
            .iter()
            .any(|d| d.code.eq_ignore_ascii_case(&new.code))
        {
            return Err(RepositoryError::Conflict(format!(
                "discount code {} already exists",
                new.code
            )));
        }

        let discount = Discount {
            id: DiscountId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            code: new.code,
            percentage: new.percentage,
            is_active: new.is_active,
        };
        discounts.push(discount.clone());
        Ok(discount)
    }

    /// Activate or deactivate a discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no discount has this ID.
    pub async fn set_active(
        &self,
        id: DiscountId,
        is_active: bool,
    ) -> Result<Discount, RepositoryError> {
        let mut discounts = self.discounts.write().await;
        let discount = discounts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(RepositoryError::NotFound)?;
        discount.is_active = is_active;
        Ok(discount.clone())
    }

    /// Delete a discount.
    ///
    /// Returns `true` if the discount was deleted, `false` if it didn't exist.
    pub async fn delete(&self, id: DiscountId) -> bool {
        let mut discounts = self.discounts.write().await;
        let before = discounts.len();
        discounts.retain(|d| d.id != id);
        discounts.len() < before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_discount(code: &str, percentage: u8) -> NewDiscount {
        NewDiscount {
            code: code.to_owned(),
            percentage,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_validates_code_and_percentage() {
        let repo = DiscountRepository::new(Vec::new());
        assert!(matches!(
            repo.create(new_discount("AB", 10)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.create(new_discount("SUMMER20", 0)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.create(new_discount("SUMMER20", 101)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(repo.create(new_discount("SUMMER20", 20)).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts_case_insensitively() {
        let repo = DiscountRepository::new(Vec::new());
        repo.create(new_discount("SUMMER20", 20)).await.unwrap();
        assert!(matches!(
            repo.create(new_discount("summer20", 10)).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_set_active_and_delete() {
        let repo = DiscountRepository::new(Vec::new());
        let d = repo.create(new_discount("SUMMER20", 20)).await.unwrap();

        let toggled = repo.set_active(d.id, false).await.unwrap();
        assert!(!toggled.is_active);

        assert!(repo.delete(d.id).await);
        assert!(matches!(
            repo.set_active(d.id, true).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
