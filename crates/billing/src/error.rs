//! User-facing error taxonomy for checkout operations.

use thiserror::Error;

use tillpoint_core::BillId;

use crate::db::RepositoryError;

/// Everything a checkout operation can report back to the session layer.
///
/// All variants except [`CheckoutError::StoreUnavailable`] are recoverable
/// business-rule failures meant for display; only a store failure justifies
/// aborting a session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No product with this name exists in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// No customer owns this bill number.
    #[error("no bill {0} found")]
    BillNotFound(BillId),

    /// Not enough stock to cover the requested quantity.
    #[error("insufficient stock: only {available} available")]
    InsufficientStock {
        /// Units actually remaining for the product.
        available: i64,
    },

    /// The requested quantity was zero or negative.
    #[error("quantity must be positive (got {0})")]
    InvalidQuantity(i64),

    /// The bill has been paid; no further reservations are allowed.
    #[error("bill {0} is already paid and closed")]
    BillClosed(BillId),

    /// A customer with the same mobile or email is already registered.
    #[error("a customer with this mobile or email is already registered")]
    DuplicateCustomer,

    /// The candidate bill number already belongs to another customer.
    /// The session layer should regenerate and retry.
    #[error("bill number {0} is already in use")]
    BillNumberInUse(BillId),

    /// The bill has already been paid; finalize is one-shot.
    #[error("bill {0} has already been paid")]
    DuplicatePayment(BillId),

    /// Finalize was called with nothing in the cart.
    #[error("bill {0} has no items in its cart")]
    EmptyBill(BillId),

    /// The underlying store failed or is unreachable.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

impl CheckoutError {
    /// Whether this is a store failure rather than a business-rule rejection.
    ///
    /// Store failures are the only conditions that may abort a whole
    /// session; everything else is displayed and the session continues.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::StoreUnavailable(RepositoryError::Database(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_errors_are_fatal() {
        assert!(
            CheckoutError::StoreUnavailable(RepositoryError::NotFound).is_store_failure()
        );
        assert!(!CheckoutError::DuplicateCustomer.is_store_failure());
        assert!(!CheckoutError::InsufficientStock { available: 3 }.is_store_failure());
    }
}
