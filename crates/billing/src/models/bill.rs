//! Cart and bill models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::{BillId, CartLineId, PaidBillId, Price};

use super::Customer;

/// One reserved line in a bill's cart.
///
/// Price and taxonomy are snapshots taken at reservation time; later catalog
/// changes never affect an existing line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique line ID (also the insertion order).
    pub id: CartLineId,
    /// Bill this line belongs to.
    pub bill_id: BillId,
    /// Category snapshot.
    pub category: String,
    /// Sub-category snapshot.
    pub sub_category: String,
    /// Product name at reservation time.
    pub product_name: String,
    /// Unit price at reservation time.
    pub unit_price: Price,
    /// Units reserved.
    pub quantity: i64,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A bill's cart as rendered: lines in insertion order plus the grand total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    /// Bill being displayed.
    pub bill_id: BillId,
    /// Cart lines in insertion order.
    pub lines: Vec<CartLine>,
    /// Sum of all line totals.
    pub grand_total: Price,
}

/// The immutable record of a finalized bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaidBill {
    /// Unique paid-bill ID.
    pub id: PaidBillId,
    /// Bill number this payment closed.
    pub bill_id: BillId,
    /// Total charged.
    pub total_amount: Price,
    /// When the bill was paid.
    pub paid_on: DateTime<Utc>,
}

/// What finalize hands back for receipt rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Bill that was paid.
    pub bill_id: BillId,
    /// The lines that were charged, in insertion order.
    pub lines: Vec<CartLine>,
    /// Sum of all line totals.
    pub total: Price,
    /// Payment timestamp.
    pub paid_at: DateTime<Utc>,
}

/// A historical bill lookup result: who paid, how much, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaidBillRecord {
    /// The customer that owned the bill.
    pub customer: Customer,
    /// Total charged.
    pub total_amount: Price,
    /// When the bill was paid.
    pub paid_on: DateTime<Utc>,
}
