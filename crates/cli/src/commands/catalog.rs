//! Browse the catalog taxonomy.

/// Print categories, sub-categories, or products depending on how much of
/// the taxonomy path was given.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a query fails.
pub async fn browse(
    category: Option<&str>,
    sub_category: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;
    let catalog = checkout.catalog();

    match (category, sub_category) {
        (None, _) => {
            for category in catalog.categories().await? {
                println!("{category}");
            }
        }
        (Some(category), None) => {
            for sub in catalog.sub_categories(category).await? {
                println!("{category} / {sub}");
            }
        }
        (Some(category), Some(sub)) => {
            for product in catalog.products_in(category, sub).await? {
                println!(
                    "{:<24} {:>12} {:>6} in stock",
                    product.name, product.unit_price, product.available_quantity
                );
            }
        }
    }

    Ok(())
}
