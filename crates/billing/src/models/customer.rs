//! Customer models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::{BillId, CustomerId, Email, Mobile};

/// A registered customer.
///
/// Created once per sign-up and never updated or deleted. The bill number
/// is the join key to cart lines and the eventual paid bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Mobile number (unique across customers).
    pub mobile: Mobile,
    /// Email address (unique across customers).
    pub email: Email,
    /// Bill number owned by this customer.
    pub bill_id: BillId,
    /// When the customer registered.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Mobile number.
    pub mobile: Mobile,
    /// Email address.
    pub email: Email,
    /// Candidate bill number generated by the session layer.
    pub bill_id: BillId,
}
