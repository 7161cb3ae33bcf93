//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! tmb products list --search linen
//! tmb products show linen-wrap-trousers
//! tmb collections list
//! tmb categories
//! tmb settings
//! ```

use thambili_storefront::{ApiError, ProductQuery, StorefrontClient};
use tracing::info;

/// List products, optionally filtered by search, category, collection, page.
pub async fn list_products(
    client: &StorefrontClient,
    search: Option<String>,
    category: Option<String>,
    collection: Option<String>,
    page: Option<u32>,
) -> Result<(), ApiError> {
    let query = ProductQuery {
        search,
        category,
        collection,
        page,
    };
    let products = client.get_products(&query).await?;

    if products.is_empty() {
        info!("No products found");
        return Ok(());
    }
    for product in &products {
        info!("{:<32} {:>20}  {}", product.slug, product.display_price(), product.name);
    }
    info!("{} product(s)", products.len());
    Ok(())
}

/// Show one product in full.
pub async fn show_product(client: &StorefrontClient, slug: &str) -> Result<(), ApiError> {
    let product = client.get_product(slug).await?;

    info!("{} ({})", product.name, product.id);
    info!("Price: {}", product.display_price());
    info!("{}", product.description);
    if !product.colors.is_empty() {
        info!("Colors: {}", product.colors.join(", "));
    }
    for variant in &product.variants {
        match variant.stock {
            Some(stock) => info!("  size {:<8} {:>4} in stock", variant.name, stock),
            None => info!("  size {}", variant.name),
        }
    }
    for image in &product.images {
        info!("  image {image}");
    }
    Ok(())
}

/// List all collections.
pub async fn list_collections(client: &StorefrontClient) -> Result<(), ApiError> {
    let collections = client.get_collections().await?;

    if collections.is_empty() {
        info!("No collections found");
        return Ok(());
    }
    for collection in &collections {
        info!("{:<32} {}", collection.slug, collection.name);
    }
    Ok(())
}

/// Show one collection.
pub async fn show_collection(client: &StorefrontClient, id: &str) -> Result<(), ApiError> {
    let collection = client.get_collection(id).await?;

    info!("{} ({})", collection.name, collection.id);
    if let Some(description) = &collection.description {
        info!("{description}");
    }
    if let Some(image) = &collection.image {
        info!("  image {image}");
    }
    Ok(())
}

/// List all product categories.
pub async fn list_categories(client: &StorefrontClient) -> Result<(), ApiError> {
    let categories = client.get_categories().await?;

    if categories.is_empty() {
        info!("No categories found");
        return Ok(());
    }
    for category in &categories {
        info!("{:<32} {}", category.slug, category.name);
    }
    Ok(())
}

/// Show the storefront settings endpoints in one go.
pub async fn show_settings(client: &StorefrontClient) -> Result<(), ApiError> {
    let hero = client.get_hero_image().await?;
    match &hero.image {
        Some(image) => info!("Hero image: {image}"),
        None => info!("Hero image: (not configured)"),
    }
    if let Some(title) = &hero.title {
        info!("Hero title: {title}");
    }

    let popup = client.get_welcome_popup().await?;
    if popup.enabled {
        info!(
            "Welcome popup: enabled ({})",
            popup.title.as_deref().unwrap_or("untitled")
        );
    } else {
        info!("Welcome popup: disabled");
    }

    let social = client.get_social_login_settings().await?;
    info!(
        "Social login: google={} facebook={}",
        social.google, social.facebook
    );
    Ok(())
}
