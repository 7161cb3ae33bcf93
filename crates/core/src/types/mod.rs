//! Core types for the Thambili storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod quantity;
pub mod slug;

pub use currency::{Currency, CurrencyError};
pub use quantity::{bounded_decrement, bounded_increment};
pub use slug::slugify;
