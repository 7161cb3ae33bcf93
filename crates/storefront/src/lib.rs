//! Thambili storefront client library.
//!
//! Everything a storefront frontend needs to browse the catalog, manage a
//! cart, check out, and handle accounts, behind one [`StorefrontClient`].
//! Backend payloads are treated as untrusted: every response is passed
//! through total normalizers that always produce a usable value, so a
//! malformed field degrades to a placeholder instead of an error screen.
//!
//! # Example
//!
//! ```rust,ignore
//! use thambili_storefront::{ProductQuery, StorefrontClient, StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = StorefrontClient::new(&config);
//!
//! let products = client.get_products(&ProductQuery::default()).await?;
//! for product in products {
//!     println!("{}: {}", product.name, product.display_price());
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;
mod http;

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use checkout::{CheckoutError, CheckoutFlow, CheckoutStep, ContactForm};
pub use client::StorefrontClient;
pub use config::{ConfigError, StorefrontConfig};
pub use error::ApiError;
pub use session::SessionStore;
pub use types::{
    AuthSession, CartLine, CartState, Category, Collection, HeroImage, MergeOutcome,
    NewShippingAddress, OrderPlaced, OrderRequest, PaymentMethod, PriceDisplay, Product,
    ProductQuery, RegisterForm, ShippingAddress, SocialLoginSettings, UserProfile, Variant,
    WelcomePopup,
};
