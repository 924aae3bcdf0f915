//! Product repository.

use std::sync::atomic::{AtomicI32, Ordering};

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use greenbasket_core::{ProductId, StoreId, round_to_cents};

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductUpdate};

/// The store products fall back to when none is given (admin form, CSV rows).
pub const DEFAULT_STORE: StoreId = StoreId::new(1);

/// Smallest price a bulk adjustment may produce.
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // $0.01

/// Bounds for bulk percentage adjustments.
const MIN_ADJUST_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, true, 0);
const MAX_ADJUST_PERCENT: Decimal = Decimal::from_parts(900, 0, 0, false, 0);

/// Repository for products.
pub struct ProductRepository {
    products: RwLock<Vec<Product>>,
    next_id: AtomicI32,
}

impl ProductRepository {
    /// Create a repository from seed products.
    #[must_use]
    pub fn new(seed: Vec<Product>) -> Self {
        let next_id = seed.iter().map(|p| p.id.as_i32()).max().unwrap_or(0) + 1;
        Self {
            products: RwLock::new(seed),
            next_id: AtomicI32::new(next_id),
        }
    }

    /// All products, in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Products belonging to one store.
    pub async fn list_by_store(&self, store_id: StoreId) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|p| p.store_id == store_id)
            .cloned()
            .collect()
    }

    /// Look up a product by ID.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name or description is
    /// empty or the price is not positive. Category existence is checked one
    /// level up, in [`super::Catalog::create_product`].
    pub async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        validate_name(&new.name)?;
        validate_description(&new.description)?;
        validate_price(new.price)?;

        let product = Product {
            id: ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: new.name,
            description: new.description,
            price: round_to_cents(new.price),
            category_id: new.category_id,
            store_id: new.store_id.unwrap_or(DEFAULT_STORE),
            inventory: new.inventory,
            image_url: new.image_url,
        };

        self.products.write().await.push(product.clone());
        Ok(product)
    }

    /// Apply a partial update to an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID, or
    /// `RepositoryError::Validation` if a provided field is invalid.
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = round_to_cents(price);
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(inventory) = update.inventory {
            product.inventory = inventory;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = Some(image_url);
        }

        Ok(product.clone())
    }

    /// Delete a product.
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    pub async fn delete(&self, id: ProductId) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        products.len() < before
    }

    /// Bulk percentage price adjustment.
    ///
    /// Multiplies every matching product's price by `1 + percent/100`,
    /// rounded to cents and floored at $0.01. When `store_id` is given only
    /// that store's products are adjusted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if `percent` is outside
    /// -90..=900.
    pub async fn adjust_prices(
        &self,
        percent: Decimal,
        store_id: Option<StoreId>,
    ) -> Result<u32, RepositoryError> {
        if percent < MIN_ADJUST_PERCENT || percent > MAX_ADJUST_PERCENT {
            return Err(RepositoryError::Validation(format!(
                "adjustment percentage must be between {MIN_ADJUST_PERCENT} and {MAX_ADJUST_PERCENT}"
            )));
        }

        let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;
        let mut count = 0_u32;

        let mut products = self.products.write().await;
        for product in products
            .iter_mut()
            .filter(|p| store_id.is_none_or(|s| p.store_id == s))
        {
            product.price = round_to_cents(product.price * factor).max(MIN_PRICE);
            count = count.saturating_add(1);
        }

        Ok(count)
    }
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if name.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "product name cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), RepositoryError> {
    if description.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "product description cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), RepositoryError> {
    if price <= Decimal::ZERO {
        return Err(RepositoryError::Validation(
            "product price must be positive".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenbasket_core::CategoryId;

    use super::*;

    fn new_product(name: &str, price_cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            description: "desc".to_owned(),
            price: Decimal::new(price_cents, 2),
            category_id: CategoryId::new(1),
            store_id: None,
            inventory: 5,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = ProductRepository::new(Vec::new());
        let a = repo.create(new_product("Apples", 3_99)).await.unwrap();
        let b = repo.create(new_product("Bread", 2_49)).await.unwrap();
        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
        assert_eq!(a.store_id, DEFAULT_STORE);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let repo = ProductRepository::new(Vec::new());
        assert!(matches!(
            repo.create(new_product("", 3_99)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.create(new_product("Apples", 0)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.create(new_product("Apples", -100)).await,
            Err(RepositoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = ProductRepository::new(Vec::new());
        let result = repo
            .update(ProductId::new(99), ProductUpdate::default())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_partial() {
        let repo = ProductRepository::new(Vec::new());
        let p = repo.create(new_product("Apples", 3_99)).await.unwrap();

        let updated = repo
            .update(
                p.id,
                ProductUpdate {
                    price: Some(Decimal::new(4_49, 2)),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, Decimal::new(4_49, 2));
        assert_eq!(updated.name, "Apples");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = ProductRepository::new(Vec::new());
        let p = repo.create(new_product("Apples", 3_99)).await.unwrap();
        assert!(repo.delete(p.id).await);
        assert!(!repo.delete(p.id).await);
        assert!(repo.get(p.id).await.is_none());
    }

    #[tokio::test]
    async fn test_adjust_prices_ten_percent() {
        let repo = ProductRepository::new(Vec::new());
        repo.create(new_product("Apples", 10_00)).await.unwrap();
        repo.create(new_product("Bread", 2_50)).await.unwrap();

        let count = repo.adjust_prices(Decimal::new(10, 0), None).await.unwrap();
        assert_eq!(count, 2);

        let products = repo.list().await;
        assert_eq!(products[0].price, Decimal::new(11_00, 2));
        assert_eq!(products[1].price, Decimal::new(2_75, 2));
    }

    #[tokio::test]
    async fn test_adjust_prices_floors_at_one_cent() {
        let repo = ProductRepository::new(Vec::new());
        repo.create(new_product("Penny candy", 1)).await.unwrap();

        repo.adjust_prices(Decimal::new(-90, 0), None).await.unwrap();
        let products = repo.list().await;
        assert_eq!(products[0].price, Decimal::new(1, 2));
    }

    #[tokio::test]
    async fn test_adjust_prices_rejects_out_of_range() {
        let repo = ProductRepository::new(Vec::new());
        assert!(matches!(
            repo.adjust_prices(Decimal::new(-95, 0), None).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.adjust_prices(Decimal::new(1000, 0), None).await,
            Err(RepositoryError::Validation(_))
        ));
    }
}
