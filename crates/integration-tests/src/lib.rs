//! Integration tests for Tillpoint.
//!
//! Every test gets its own in-memory `SQLite` database with the schema
//! applied and the default catalog seeded, so the suite runs with no
//! external services:
//!
//! ```bash
//! cargo test -p tillpoint-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `reserve` - Stock checks, snapshots, and cart assembly
//! - `finalize` - Payment, totals, and the one-shot transition
//! - `customers` - Registration and duplicate rejection
//! - `concurrency` - Racing reservations against the same product

#![cfg_attr(not(test), forbid(unsafe_code))]

use sqlx::SqlitePool;

use tillpoint_billing::models::{Customer, NewCustomer};
use tillpoint_billing::{Checkout, db};
use tillpoint_core::{BillId, Email, Mobile};

/// A fresh store plus the checkout core over it.
pub struct TestContext {
    /// The underlying pool, for direct assertions.
    pub pool: SqlitePool,
    /// The transaction core under test.
    pub checkout: Checkout,
}

impl TestContext {
    /// Create an in-memory database, apply migrations, and seed the catalog.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be prepared; tests cannot proceed
    /// without it.
    pub async fn new() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create in-memory database");
        let checkout = Checkout::new(pool.clone());
        checkout
            .catalog()
            .seed_defaults()
            .await
            .expect("Failed to seed catalog");
        Self { pool, checkout }
    }

    /// Register a throwaway customer owning the given bill number.
    ///
    /// Contact details are derived from the bill number so they stay unique
    /// within one test database.
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    pub async fn register(&self, bill: i64) -> Customer {
        let new_customer = NewCustomer {
            name: format!("Customer {bill}"),
            mobile: Mobile::parse(&format!("98000{bill:05}")).expect("valid test mobile"),
            email: Email::parse(&format!("bill{bill}@example.com")).expect("valid test email"),
            bill_id: BillId::new(bill),
        };
        self.checkout
            .register_customer(&new_customer)
            .await
            .expect("Failed to register test customer")
    }

    /// Current stock for a catalog product.
    ///
    /// # Panics
    ///
    /// Panics if the product does not exist.
    pub async fn stock_of(&self, product_name: &str) -> i64 {
        self.checkout
            .catalog()
            .lookup(product_name)
            .await
            .expect("Failed to look up product")
            .expect("Product missing from catalog")
            .available_quantity
    }
}
