//! Cart and checkout route handlers.
//!
//! The cart itself lives in the session; handlers load it, apply one
//! mutation, and write it back. Prices shown and charged are the snapshots
//! taken when each line was added, not the current catalog prices.

use std::sync::LazyLock;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use greenbasket_core::{OrderId, ProductId, display_usd};
use rust_decimal::Decimal;

use crate::cart::{Cart, CartTotals};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{Address, OrderItem, session_keys};
use crate::state::AppState;

/// Exactly 16 digits.
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("Invalid regex"));

/// MM/YY.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("Invalid regex"));

/// 3 or 4 digits.
static CVC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("Invalid regex"));

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to empty.
async fn get_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Views
// =============================================================================

/// One cart line joined with its catalog product name.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Cart contents plus computed totals.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub display_total: String,
}

impl CartView {
    async fn build(state: &AppState, cart: &Cart) -> Self {
        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let name = state
                .catalog()
                .products()
                .get(line.product_id)
                .await
                .map_or_else(|| "(removed)".to_owned(), |p| p.name);
            lines.push(CartLineView {
                product_id: line.product_id,
                name,
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            });
        }

        let CartTotals {
            subtotal,
            tax,
            shipping,
            total,
        } = cart.totals(&state.config().pricing);

        Self {
            lines,
            item_count: cart.item_count(),
            subtotal,
            tax,
            shipping,
            total,
            display_total: display_usd(total),
        }
    }
}

// =============================================================================
// Cart Handlers
// =============================================================================

/// GET /cart
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CartView::build(&state, &cart).await))
}

/// Request body for POST /cart/add.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: ProductId,
    /// Defaults to 1; zero is bumped to 1.
    pub quantity: Option<u32>,
}

/// POST /cart/add
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddForm>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .products()
        .get(form.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {} not found", form.product_id)))?;

    let mut cart = get_cart(&session).await?;
    cart.add_item(&product, form.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&state, &cart).await))
}

/// Request body for POST /cart/update.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub product_id: ProductId,
    /// Zero or negative removes the line.
    pub quantity: i64,
}

/// POST /cart/update
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateForm>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.update_quantity(form.product_id, form.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&state, &cart).await))
}

/// Request body for POST /cart/remove.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: ProductId,
}

/// POST /cart/remove
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RemoveForm>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.remove_item(form.product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&state, &cart).await))
}

/// POST /cart/clear
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&state, &cart).await))
}

/// Response for GET /cart/count.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u32,
}

/// GET /cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CountResponse>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CountResponse {
        count: cart.item_count(),
    }))
}

// =============================================================================
// Checkout
// =============================================================================

/// Request body for POST /checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CheckoutForm {
    /// Field-shape validation. No payment is ever attempted; the card fields
    /// only need to look plausible.
    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().len() < 2 {
            return Err("Name is too short".to_owned());
        }
        if self.address.trim().len() < 5 {
            return Err("Address is too short".to_owned());
        }
        if self.city.trim().len() < 2 {
            return Err("City is too short".to_owned());
        }
        if self.zip.trim().len() < 5 {
            return Err("ZIP code is too short".to_owned());
        }
        if self.country.trim().len() < 2 {
            return Err("Country is too short".to_owned());
        }
        if !CARD_NUMBER_RE.is_match(self.card_number.trim()) {
            return Err("Invalid card number".to_owned());
        }
        if !EXPIRY_RE.is_match(self.expiry.trim()) {
            return Err("Invalid expiry date (MM/YY)".to_owned());
        }
        if !CVC_RE.is_match(self.cvc.trim()) {
            return Err("Invalid CVC".to_owned());
        }
        Ok(())
    }
}

/// Response for POST /checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Present when the buyer was signed in and the order was recorded.
    pub order_id: Option<OrderId>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// POST /checkout
///
/// Validates the form, prices the cart, records an order for signed-in
/// buyers, and empties the cart. Guests can check out too; their order is
/// simply not kept.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    form.validate().map_err(AppError::Validation)?;

    let cart = get_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::Validation("cart is empty".to_owned()));
    }

    let totals = cart.totals(&state.config().pricing);

    let order_id = if let Some(user) = user {
        let mut items = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let product = state
                .catalog()
                .products()
                .get(line.product_id)
                .await
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "product {} is no longer available",
                        line.product_id
                    ))
                })?;
            items.push(OrderItem {
                product,
                quantity: line.quantity,
                price: line.unit_price,
            });
        }

        let address = Address {
            street: form.address.trim().to_owned(),
            city: form.city.trim().to_owned(),
            zip: form.zip.trim().to_owned(),
            country: Some(form.country.trim().to_owned()),
        };

        let order = state
            .catalog()
            .orders()
            .create(user.id, items, totals.total, address)
            .await;
        tracing::info!(order_id = %order.id, total = %order.total, "order placed");
        Some(order.id)
    } else {
        tracing::info!(total = %totals.total, "guest checkout completed");
        None
    };

    let mut cart = cart;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id,
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
        }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Alice Johnson".to_owned(),
            address: "123 Main St".to_owned(),
            city: "Anytown".to_owned(),
            zip: "12345".to_owned(),
            country: "US".to_owned(),
            card_number: "4242424242424242".to_owned(),
            expiry: "12/28".to_owned(),
            cvc: "123".to_owned(),
        }
    }

    #[test]
    fn test_checkout_form_accepts_plausible_card() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_checkout_form_rejects_bad_fields() {
        let mut f = form();
        f.card_number = "1234".to_owned();
        assert!(f.validate().is_err());

        let mut f = form();
        f.card_number = "4242 4242 4242 4242".to_owned(); // spaces not allowed
        assert!(f.validate().is_err());

        let mut f = form();
        f.expiry = "13/28".to_owned();
        assert!(f.validate().is_err());

        let mut f = form();
        f.cvc = "12".to_owned();
        assert!(f.validate().is_err());

        let mut f = form();
        f.name = "A".to_owned();
        assert!(f.validate().is_err());

        let mut f = form();
        f.zip = "123".to_owned();
        assert!(f.validate().is_err());
    }
}
