//! Integration tests for catalog browsing.
//!
//! These tests require a running storefront API. Point
//! `THAMBILI_API_BASE_URL` at it (default `http://localhost:8000`) and run
//! with `cargo test -- --ignored`.

use tempfile::TempDir;
use thambili_storefront::{ApiError, ProductQuery, StorefrontClient, StorefrontConfig};
use url::Url;

/// Base URL for the storefront API (configurable via environment).
fn api_base_url() -> String {
    std::env::var("THAMBILI_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Client with an isolated state directory.
fn test_client() -> (StorefrontClient, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp state dir");
    let config = StorefrontConfig {
        base_url: Url::parse(&api_base_url()).expect("Invalid THAMBILI_API_BASE_URL"),
        state_dir: dir.path().to_path_buf(),
    };
    (StorefrontClient::new(&config), dir)
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_product_listing_is_always_renderable() {
    let (client, _dir) = test_client();

    let products = client
        .get_products(&ProductQuery::default())
        .await
        .expect("Failed to list products");

    // Whatever the backend sends, every product must be displayable
    for product in &products {
        assert!(!product.name.is_empty());
        assert!(!product.slug.is_empty());
        assert!(!product.images.is_empty());
        assert!(!product.display_price().is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_product_detail_matches_listing() {
    let (client, _dir) = test_client();

    let products = client
        .get_products(&ProductQuery::default())
        .await
        .expect("Failed to list products");
    let listed = products.first().expect("Catalog has no products");

    let detail = client
        .get_product(&listed.slug)
        .await
        .expect("Failed to fetch product detail");

    assert_eq!(detail.slug, listed.slug);
    assert!(!detail.description.is_empty());
}

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_search_filters_products() {
    let (client, _dir) = test_client();

    let query = ProductQuery {
        search: Some("linen".to_string()),
        ..ProductQuery::default()
    };
    let results = client.get_products(&query).await.expect("Search failed");

    for product in &results {
        assert!(!product.name.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_unknown_product_is_not_found() {
    let (client, _dir) = test_client();

    let err = client
        .get_product("definitely-not-a-real-slug-29481")
        .await
        .expect_err("Unknown slug should not resolve");
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ============================================================================
// Collection & Category Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_collections_and_categories_are_named() {
    let (client, _dir) = test_client();

    let collections = client
        .get_collections()
        .await
        .expect("Failed to list collections");
    for collection in &collections {
        assert!(!collection.name.is_empty());
        assert!(!collection.slug.is_empty());
    }

    if let Some(first) = collections.first() {
        let detail = client
            .get_collection(&first.id)
            .await
            .expect("Failed to fetch collection detail");
        assert!(!detail.name.is_empty());
    }

    let categories = client
        .get_categories()
        .await
        .expect("Failed to list categories");
    for category in &categories {
        assert!(!category.name.is_empty());
        assert!(!category.slug.is_empty());
    }
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running storefront API"]
async fn test_settings_endpoints_never_fail_to_normalize() {
    let (client, _dir) = test_client();

    client
        .get_hero_image()
        .await
        .expect("Failed to fetch hero image settings");
    client
        .get_welcome_popup()
        .await
        .expect("Failed to fetch welcome popup settings");
    client
        .get_social_login_settings()
        .await
        .expect("Failed to fetch social login settings");

    let methods = client
        .get_payment_methods()
        .await
        .expect("Failed to fetch payment methods");
    for method in &methods {
        assert!(!method.name.is_empty());
    }
}
