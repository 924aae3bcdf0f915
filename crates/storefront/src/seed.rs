//! Seed dataset.
//!
//! The catalog is rebuilt from this data on every process start. Three users
//! are seeded, one per role; the store and admin accounts sit on the sentinel
//! domain so the mocked login maps them back to their roles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use greenbasket_core::{
    CategoryId, DiscountId, OrderId, OrderStatus, ProductId, Role, StoreId, UserId,
};

use crate::models::{Address, Category, Discount, Order, OrderItem, Product, User};

/// Everything the catalog starts with.
#[derive(Default)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub discounts: Vec<Discount>,
}

/// Parse a fixed RFC 3339 timestamp, falling back to now.
fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |d| d.with_timezone(&Utc))
}

/// Dollars-and-cents literal.
const fn usd(cents: u32) -> Decimal {
    Decimal::from_parts(cents, 0, 0, false, 2)
}

fn product(
    id: i32,
    name: &str,
    description: &str,
    price_cents: u32,
    category_id: i32,
    inventory: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: usd(price_cents),
        category_id: CategoryId::new(category_id),
        store_id: StoreId::new(1),
        inventory,
        image_url: None,
    }
}

/// Build the full seed dataset.
#[must_use]
pub fn seed_data() -> SeedData {
    let categories = vec![
        Category {
            id: CategoryId::new(1),
            name: "Fruits & Vegetables".to_owned(),
        },
        Category {
            id: CategoryId::new(2),
            name: "Dairy & Eggs".to_owned(),
        },
        Category {
            id: CategoryId::new(3),
            name: "Bakery".to_owned(),
        },
        Category {
            id: CategoryId::new(4),
            name: "Meat & Fish".to_owned(),
        },
        Category {
            id: CategoryId::new(5),
            name: "Pantry".to_owned(),
        },
        Category {
            id: CategoryId::new(6),
            name: "Snacks".to_owned(),
        },
    ];

    let products = vec![
        product(1, "Gala Apples", "Crisp and sweet, sold per pound", 299, 1, 120),
        product(2, "Whole Milk", "One gallon, pasteurized", 349, 2, 60),
        product(3, "Sourdough Bread", "Naturally leavened, baked daily", 499, 3, 25),
        product(4, "Atlantic Salmon", "Fresh fillet, per pound", 1299, 4, 18),
        product(5, "Organic Bananas", "Bunch of five", 189, 1, 200),
        product(6, "Free-Range Eggs", "Dozen, large", 429, 2, 80),
        product(7, "Extra Virgin Olive Oil", "500 ml, cold pressed", 1099, 5, 40),
        product(8, "Sea Salt Potato Chips", "Kettle cooked, 150 g", 279, 6, 150),
    ];

    let users = vec![
        User {
            id: UserId::new(1),
            name: "Alice Johnson".to_owned(),
            email: parse_email("alice@example.com"),
            role: Role::Customer,
            store_id: None,
        },
        User {
            id: UserId::new(2),
            name: "Bob Smith".to_owned(),
            email: parse_email("store@greenbasket.test"),
            role: Role::Store,
            store_id: Some(StoreId::new(1)),
        },
        User {
            id: UserId::new(3),
            name: "Charlie Brown".to_owned(),
            email: parse_email("admin@greenbasket.test"),
            role: Role::Admin,
            store_id: None,
        },
    ];

    let alice_address = Address {
        street: "123 Main St".to_owned(),
        city: "Anytown".to_owned(),
        zip: "12345".to_owned(),
        country: None,
    };

    let orders = vec![
        Order {
            id: OrderId::new(1),
            user_id: UserId::new(1),
            items: vec![
                OrderItem {
                    product: products[0].clone(),
                    quantity: 2,
                    price: products[0].price,
                },
                OrderItem {
                    product: products[1].clone(),
                    quantity: 1,
                    price: products[1].price,
                },
            ],
            // 9.47 subtotal + 0.76 tax + 5.00 shipping
            total: usd(1523),
            status: OrderStatus::Delivered,
            date: ts("2023-10-26T10:00:00Z"),
            shipping_address: alice_address.clone(),
        },
        Order {
            id: OrderId::new(2),
            user_id: UserId::new(1),
            items: vec![OrderItem {
                product: products[4].clone(),
                quantity: 1,
                price: products[4].price,
            }],
            // 1.89 subtotal + 0.15 tax + 5.00 shipping
            total: usd(704),
            status: OrderStatus::Processing,
            date: ts("2023-10-27T14:30:00Z"),
            shipping_address: alice_address,
        },
    ];

    let discounts = vec![
        Discount {
            id: DiscountId::new(1),
            code: "SUMMER20".to_owned(),
            percentage: 20,
            is_active: true,
        },
        Discount {
            id: DiscountId::new(2),
            code: "WELCOME10".to_owned(),
            percentage: 10,
            is_active: false,
        },
    ];

    SeedData {
        categories,
        products,
        users,
        orders,
        discounts,
    }
}

/// Parse a known-good seed email.
fn parse_email(raw: &str) -> greenbasket_core::Email {
    greenbasket_core::Email::parse(raw).expect("seed emails are valid")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_are_consistent() {
        let seed = seed_data();

        let category_ids: Vec<CategoryId> = seed.categories.iter().map(|c| c.id).collect();
        for p in &seed.products {
            assert!(category_ids.contains(&p.category_id), "{}", p.name);
        }

        let user_ids: Vec<UserId> = seed.users.iter().map(|u| u.id).collect();
        for o in &seed.orders {
            assert!(user_ids.contains(&o.user_id));
            assert!(!o.items.is_empty());
        }
    }

    #[test]
    fn test_store_owner_has_a_store() {
        let seed = seed_data();
        let bob = seed.users.iter().find(|u| u.role == Role::Store).unwrap();
        assert_eq!(bob.store_id, Some(StoreId::new(1)));
    }
}
