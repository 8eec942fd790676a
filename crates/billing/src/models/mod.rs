//! Domain models for the billing workflow.

pub mod bill;
pub mod customer;
pub mod product;

pub use bill::{CartLine, CartView, PaidBill, PaidBillRecord, Receipt};
pub use customer::{Customer, NewCustomer};
pub use product::Product;
