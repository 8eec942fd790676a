//! Bill status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a bill.
///
/// The state is never stored as a column; it is derived from what the stores
/// contain for a bill number. Transitions only move forward:
/// `Open` → `CartBuilding` (first reservation) → `Paid` (finalize). There is
/// no path back out of `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// No cart lines and no paid bill yet.
    #[default]
    Open,
    /// At least one cart line, not yet paid.
    CartBuilding,
    /// A paid bill exists; the cart has been purged.
    Paid,
}

impl BillStatus {
    /// Whether any further mutation of the bill is allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }
}
