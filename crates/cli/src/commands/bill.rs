//! Bill finalization and paid-bill search.

use tracing::info;

use tillpoint_core::BillId;

/// Finalize a bill: record the payment and clear the cart.
///
/// # Errors
///
/// Returns an error if finalization is rejected or the store fails.
pub async fn pay(bill: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;

    let receipt = checkout.finalize(BillId::new(bill)).await?;
    info!(total = %receipt.total, "Bill paid");

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        return Ok(());
    }

    println!("Bill no {} paid on {}", receipt.bill_id, receipt.paid_at.format("%Y-%m-%d %H:%M"));
    for line in &receipt.lines {
        println!(
            "{:<24} {:>12} x{:<4} {:>12}",
            line.product_name,
            line.unit_price,
            line.quantity,
            line.line_total()
        );
    }
    println!("Total amount: {}", receipt.total);
    println!("Thank you for shopping with us!");

    Ok(())
}

/// Look up a previously paid bill.
///
/// # Errors
///
/// Returns an error if no paid bill exists or the store fails.
pub async fn find(bill: i64) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = super::open_checkout().await?;

    let record = checkout.find_paid_bill(BillId::new(bill)).await?;
    println!(
        "{} | {} | {} | {} | paid {}",
        record.customer.name,
        record.customer.mobile,
        record.customer.email,
        record.total_amount,
        record.paid_on.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}
