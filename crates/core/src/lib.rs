//! Procura Core - Domain types
//!
//! This crate contains the fundamental types used across Procura:
//! - `Amount`: Non-negative decimal wrapper for monetary values
//! - `Currency`: Type-safe ISO 4217 currency codes
//! - `format_currency`: Display formatting for budget messages and reports

pub mod currency;
pub mod money;

pub use currency::Currency;
pub use money::{format_currency, Amount};
