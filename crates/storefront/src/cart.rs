//! The shopping cart and its total computation.
//!
//! The cart lives in the browser session (serialized via serde into the
//! tower-sessions store) and is the sole input to order-total computation.
//! All mutation happens through the methods here; lines never persist with a
//! quantity of zero or less - removal deletes the line instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::{ProductId, round_to_cents};

use crate::config::PricingConfig;
use crate::models::Product;

/// One product-and-quantity entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Unit price snapshotted when the product was added; later catalog price
    /// changes do not affect lines already in the cart.
    pub unit_price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered sequence of cart lines, unique by product ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add a product to the cart.
    ///
    /// If the product is already present its quantity is incremented;
    /// otherwise a new line is inserted with the product's current price
    /// snapshotted. A quantity of zero is treated as 1. No inventory check is
    /// performed.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product_id: product.id,
                unit_price: product.price,
                quantity,
            }),
        }
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line; there is no upper bound.
    /// No-op if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let new_quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = new_quantity;
        }
    }

    /// Remove a line. No-op (not an error) if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Compute order totals from the current cart state.
    ///
    /// Pure function: no side effects, deterministic, recomputed on every
    /// call rather than cached. Shipping is free only when the subtotal is
    /// strictly above the threshold.
    #[must_use]
    pub fn totals(&self, pricing: &PricingConfig) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(CartLine::line_total).sum();
        let tax = round_to_cents(subtotal * pricing.tax_rate);
        let shipping = if subtotal > pricing.free_shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.shipping_fee
        };
        let total = subtotal + tax + shipping;

        CartTotals {
            subtotal,
            tax,
            shipping,
            total,
        }
    }
}

/// Computed order totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenbasket_core::{CategoryId, StoreId};

    use super::*;

    fn product(id: i32, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "A test product".to_owned(),
            price: Decimal::new(price_cents, 2),
            category_id: CategoryId::new(1),
            store_id: StoreId::new(1),
            inventory: 10,
            image_url: None,
        }
    }

    fn usd(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_add_new_line_snapshots_price() {
        let mut cart = Cart::default();
        let mut p = product(1, 10_00);
        cart.add_item(&p, 2);

        // Catalog price changes after the add do not affect the line
        p.price = usd(99_99);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].unit_price, usd(10_00));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_re_add_increments_instead_of_duplicating() {
        let mut cart = Cart::default();
        let p = product(1, 10_00);
        cart.add_item(&p, 1);
        cart.add_item(&p, 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_add_zero_quantity_means_one() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 5_00), 0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 5_00), 1);
        cart.update_quantity(ProductId::new(1), 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes_line() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 5_00), 2);
        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());

        cart.add_item(&product(1, 5_00), 2);
        cart.update_quantity(ProductId::new(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_line_ever_has_nonpositive_quantity() {
        // Arbitrary interleaving of operations; the invariant must hold
        // after every step.
        let mut cart = Cart::default();
        let p1 = product(1, 3_49);
        let p2 = product(2, 12_00);

        let steps: Vec<Box<dyn Fn(&mut Cart)>> = vec![
            Box::new(move |c: &mut Cart| c.add_item(&p1, 2)),
            Box::new(move |c: &mut Cart| c.add_item(&p2, 0)),
            Box::new(|c: &mut Cart| c.update_quantity(ProductId::new(1), -1)),
            Box::new(|c: &mut Cart| c.update_quantity(ProductId::new(2), 5)),
            Box::new(|c: &mut Cart| c.remove_item(ProductId::new(99))),
            Box::new(|c: &mut Cart| c.update_quantity(ProductId::new(2), 0)),
        ];

        for step in steps {
            step(&mut cart);
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 5_00), 1);
        cart.remove_item(ProductId::new(42));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 5_00), 1);
        cart.add_item(&product(2, 6_00), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_totals_worked_example() {
        // One line {price: $10.00, qty: 2} => subtotal $20.00, tax $1.60,
        // shipping $5.00, total $26.60.
        let mut cart = Cart::default();
        cart.add_item(&product(1, 10_00), 2);

        let totals = cart.totals(&PricingConfig::default());
        assert_eq!(totals.subtotal, usd(20_00));
        assert_eq!(totals.tax, usd(1_60));
        assert_eq!(totals.shipping, usd(5_00));
        assert_eq!(totals.total, usd(26_60));
    }

    #[test]
    fn test_totals_is_pure_and_idempotent() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 17_77), 3);

        let pricing = PricingConfig::default();
        let first = cart.totals(&pricing);
        let second = cart.totals(&pricing);
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_shipping_boundary_is_strictly_greater() {
        let pricing = PricingConfig::default();

        // Subtotal exactly $50.00: still pays shipping
        let mut cart = Cart::default();
        cart.add_item(&product(1, 50_00), 1);
        assert_eq!(cart.totals(&pricing).shipping, usd(5_00));

        // Subtotal $50.01: free
        let mut cart = Cart::default();
        cart.add_item(&product(1, 50_01), 1);
        assert_eq!(cart.totals(&pricing).shipping, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::default();
        let totals = cart.totals(&PricingConfig::default());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        // An empty cart still quotes the flat fee; checkout rejects empty
        // carts before this matters.
        assert_eq!(totals.shipping, usd(5_00));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::default();
        cart.add_item(&product(1, 3_99), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.lines().len(), 1);
        assert_eq!(parsed.lines()[0].unit_price, usd(3_99));
    }
}
