//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Catalog (public)
//! GET  /products                   - Product listing (?category=, ?q=)
//! GET  /products/{id}              - Product detail
//! GET  /categories                 - Category listing
//!
//! # Cart (session-scoped)
//! GET    /cart                     - Cart contents with totals
//! POST   /cart/add                 - Add a product
//! POST   /cart/update              - Set a line's quantity
//! POST   /cart/remove              - Remove a line
//! POST   /cart/clear               - Empty the cart
//! GET    /cart/count               - Item count badge
//! POST   /checkout                 - Place an order
//!
//! # Auth
//! POST /auth/login                 - Mocked login
//! POST /auth/register              - Customer registration
//! POST /auth/logout                - Logout
//!
//! # Account (requires any signed-in user)
//! GET  /account/profile            - Current user profile
//! GET  /account/orders             - Order history
//! POST /account/delete             - Mock account deletion (signs out)
//!
//! # Store dashboard (requires store role)
//! GET  /store/products             - This store's products
//! GET  /store/orders               - Orders containing this store's products
//!
//! # Admin dashboard (requires admin role)
//! GET    /admin/products           - All products
//! POST   /admin/products           - Create a product
//! PUT    /admin/products/{id}      - Update a product
//! DELETE /admin/products/{id}      - Delete a product
//! POST   /admin/products/import    - Bulk CSV import
//! POST   /admin/products/price-adjust - Percentage price adjustment
//! GET    /admin/users              - All users
//! GET    /admin/discounts          - All discount codes
//! POST   /admin/discounts          - Create a discount code
//! PUT    /admin/discounts/{id}     - Activate or deactivate a code
//! DELETE /admin/discounts/{id}     - Delete a code
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod products;
pub mod store;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the public catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(products::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(account::profile))
        .route("/orders", get(account::orders))
        .route("/delete", post(account::delete_account))
}

/// Create the store dashboard router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(store::products))
        .route("/orders", get(store::orders))
}

/// Create the admin dashboard router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/products/import", post(admin::import_products))
        .route("/products/price-adjust", post(admin::adjust_prices))
        .route("/users", get(admin::list_users))
        .route(
            "/discounts",
            get(admin::list_discounts).post(admin::create_discount),
        )
        .route(
            "/discounts/{id}",
            put(admin::set_discount_active).delete(admin::delete_discount),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .nest("/store", store_routes())
        .nest("/admin", admin_routes())
}
