//! Integration tests for the Thambili storefront client.
//!
//! All tests are `#[ignore]`d by default because they need a reachable
//! storefront API. Point `THAMBILI_API_BASE_URL` at a dev instance and run
//! them explicitly.
//!
//! # Running Tests
//!
//! ```bash
//! # Against a local API
//! THAMBILI_API_BASE_URL=http://localhost:8000 \
//!     cargo test -p thambili-integration-tests -- --ignored
//!
//! # Account tests additionally need seeded credentials
//! THAMBILI_TEST_EMAIL=shopper@example.com \
//! THAMBILI_TEST_PASSWORD=secret \
//!     cargo test -p thambili-integration-tests --test account -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product, collection, category, and settings reads
//! - `cart_flow` - Guest cart lifecycle against a fresh session
//! - `account` - Login, profile, and guest cart merge
//!
//! Each test opens its own temporary state directory, so runs never touch
//! the session state of a real CLI install and can execute in parallel.
