//! Product catalog model.

use serde::{Deserialize, Serialize};

use tillpoint_core::{Price, ProductId};

/// A catalog product with live stock.
///
/// `name` is catalog-unique and is the key every cart operation uses.
/// `available_quantity` only ever decreases; there is no restock path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Top-level category (e.g. "Clothes").
    pub category: String,
    /// Sub-category within the category (e.g. "Pants").
    pub sub_category: String,
    /// Catalog-unique product name.
    pub name: String,
    /// Current unit price.
    pub unit_price: Price,
    /// Units still in stock.
    pub available_quantity: i64,
}
