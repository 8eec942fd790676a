//! Tillpoint Core - Shared domain types.
//!
//! This crate provides the common types used across all Tillpoint components:
//! - `billing` - Stores and the checkout transaction core
//! - `cli` - Command-line driver for migrations, seeding, and billing operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, contact details,
//!   and bill status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
