//! Cart commands.
//!
//! Work signed out as well: cart calls fall back to a guest session id that
//! is minted on first use and merged into the account on login.
//!
//! # Usage
//!
//! ```bash
//! tmb cart add prod-102 --variant size-m --quantity 2
//! tmb cart update item-7 --quantity 3
//! tmb cart remove item-7
//! tmb cart show
//! ```

use thambili_storefront::{ApiError, CartState, StorefrontClient};
use tracing::info;

fn render(cart: &CartState) {
    if cart.is_empty() {
        info!("Your bag is empty");
        return;
    }
    for line in &cart.lines {
        let variant = line
            .variant_label
            .as_ref()
            .map_or_else(String::new, |label| format!(" ({label})"));
        info!(
            "{:<12} {:>3} x {:<32} {}",
            line.id,
            line.quantity,
            format!("{}{variant}", line.name),
            cart.currency.format(line.line_total)
        );
    }
    info!(
        "{} item(s), subtotal {}",
        cart.item_count,
        cart.currency.format(cart.subtotal)
    );
    info!("Total: {}", cart.formatted_total());
}

/// Show the current cart.
pub async fn show(client: &StorefrontClient) -> Result<(), ApiError> {
    let cart = client.get_cart().await?;
    render(&cart);
    Ok(())
}

/// Add a product, then show the refreshed cart.
pub async fn add(
    client: &StorefrontClient,
    product_id: &str,
    variant: Option<&str>,
    quantity: u32,
) -> Result<(), ApiError> {
    client.add_to_cart(product_id, variant, quantity).await?;
    info!("Added {quantity} x {product_id}");
    render(&client.get_cart().await?);
    Ok(())
}

/// Set a line's quantity, then show the refreshed cart.
pub async fn update(
    client: &StorefrontClient,
    item_id: &str,
    quantity: u32,
) -> Result<(), ApiError> {
    client.update_cart_item(item_id, quantity).await?;
    render(&client.get_cart().await?);
    Ok(())
}

/// Remove a line, then show the refreshed cart.
pub async fn remove(client: &StorefrontClient, item_id: &str) -> Result<(), ApiError> {
    client.remove_cart_item(item_id).await?;
    render(&client.get_cart().await?);
    Ok(())
}

/// Empty the cart.
pub async fn clear(client: &StorefrontClient) -> Result<(), ApiError> {
    client.clear_cart().await?;
    info!("Cart cleared");
    Ok(())
}
