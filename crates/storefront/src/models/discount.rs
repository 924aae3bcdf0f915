//! Promotional discount codes.

use serde::{Deserialize, Serialize};

use greenbasket_core::DiscountId;

/// A promotional code managed from the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    /// Customer-facing code, e.g. `SUMMER20`.
    pub code: String,
    /// Whole-number percentage off, 1-100.
    pub percentage: u8,
    pub is_active: bool,
}

/// Input for creating a discount.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDiscount {
    pub code: String,
    pub percentage: u8,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}
