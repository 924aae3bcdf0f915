//! Domain models for the storefront.

pub mod discount;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use discount::{Discount, NewDiscount};
pub use order::{Address, Order, OrderItem};
pub use product::{Category, NewProduct, Product, ProductUpdate};
pub use session::{CurrentUser, session_keys};
pub use user::User;
