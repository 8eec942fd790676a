//! Cart operations: reserve items and display the running bill.

use tracing::info;

use tillpoint_core::BillId;

/// Reserve a quantity of a product into a bill's cart.
///
/// # Errors
///
/// Returns an error if the reservation is rejected or the store fails.
pub async fn add(bill: i64, product: &str, quantity: i64) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;

    let line = checkout.reserve(BillId::new(bill), product, quantity).await?;
    info!(line = %line.id, "Added to cart");
    println!(
        "{} x {} added to bill {} ({} each, {} for the line)",
        line.quantity,
        line.product_name,
        line.bill_id,
        line.unit_price,
        line.line_total()
    );

    Ok(())
}

/// Display a bill's cart lines and grand total.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn show(bill: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;
    let view = checkout.cart_view(BillId::new(bill)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.lines.is_empty() {
        println!("No items found for bill {}", view.bill_id);
        return Ok(());
    }

    println!("Bill details for bill no: {}", view.bill_id);
    for line in &view.lines {
        println!(
            "{:<12} {:<16} {:<24} {:>12} x{:<4} {:>12}",
            line.category,
            line.sub_category,
            line.product_name,
            line.unit_price,
            line.quantity,
            line.line_total()
        );
    }
    println!("Grand total: {}", view.grand_total);

    Ok(())
}
