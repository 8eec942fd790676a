//! Seed the default product catalog.

use tracing::info;

/// Insert the stock catalog if the products table is empty.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;

    let inserted = checkout.catalog().seed_defaults().await?;
    if inserted == 0 {
        info!("Products table already contains data; nothing to do");
    } else {
        info!(products = inserted, "Catalog seeded");
    }

    Ok(())
}
