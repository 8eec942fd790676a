//! Tillpoint Billing - Stores and the checkout transaction core.
//!
//! This crate owns the persisted billing workflow:
//!
//! - [`db::CatalogStore`] - Product catalog with live stock counts
//! - [`db::LedgerStore`] - Customers, cart lines, and paid-bill history
//! - [`checkout::Checkout`] - The transaction core tying them together
//!
//! The session/presentation layer (the `cli` crate, or anything else) calls
//! into [`checkout::Checkout`]; it never touches tables directly. Every
//! operation returns a [`error::CheckoutError`] value on failure rather than
//! panicking, and only [`error::CheckoutError::StoreUnavailable`] indicates
//! the store itself is in trouble.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use checkout::Checkout;
pub use config::{BillingConfig, ConfigError};
pub use error::CheckoutError;
