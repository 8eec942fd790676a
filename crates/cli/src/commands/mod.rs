//! CLI command implementations.

pub mod bill;
pub mod cart;
pub mod catalog;
pub mod customer;
pub mod migrate;
pub mod seed;

use sqlx::SqlitePool;

use tillpoint_billing::{BillingConfig, Checkout, db};

/// Open the billing database using environment configuration.
pub(crate) async fn open_pool() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let config = BillingConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    Ok(pool)
}

/// Open the database and wrap it in the checkout core.
pub(crate) async fn open_checkout() -> Result<Checkout, Box<dyn std::error::Error>> {
    Ok(Checkout::new(open_pool().await?))
}
