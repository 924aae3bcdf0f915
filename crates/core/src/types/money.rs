//! Money helpers.
//!
//! Prices are plain [`rust_decimal::Decimal`] values in USD. The storefront
//! serves a single market, so there is no currency dimension; everything that
//! leaves the cart math is rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a dollar amount to whole cents.
///
/// Uses round-half-up, matching how the totals are displayed.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a dollar amount for display, e.g. `$19.99`.
#[must_use]
pub fn display_usd(amount: Decimal) -> String {
    format!("${:.2}", round_to_cents(amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        let v = Decimal::new(16049, 4); // 1.6049
        assert_eq!(round_to_cents(v), Decimal::new(160, 2));

        let v = Decimal::new(16050, 4); // 1.6050 rounds up
        assert_eq!(round_to_cents(v), Decimal::new(161, 2));
    }

    #[test]
    fn test_display_usd() {
        assert_eq!(display_usd(Decimal::new(5, 0)), "$5.00");
        assert_eq!(display_usd(Decimal::new(2660, 2)), "$26.60");
    }
}
