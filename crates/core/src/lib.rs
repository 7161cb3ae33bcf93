//! Thambili Core - Shared value types.
//!
//! This crate provides the small domain values shared across the Thambili
//! storefront client components:
//! - `storefront` - API client SDK (normalizers, cart, checkout)
//! - `cli` - Command-line shopping/diagnostic tool
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Currency codes and formatting, slug derivation, quantity guards

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
