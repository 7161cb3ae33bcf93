//! Checkout commands.
//!
//! # Usage
//!
//! ```bash
//! tmb checkout methods
//! tmb checkout place --method card --first-name Nimali --line1 "12 Galle Road" \
//!     --city Colombo --phone "+94 77 123 4567"
//! ```
//!
//! `place` runs the full two-step flow in one shot: contact details from
//! flags (or the saved default address when signed in and no flags are
//! given), then payment initiation and order placement.

use thambili_storefront::{
    ApiError, CheckoutError, CheckoutFlow, ContactForm, StorefrontClient,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while placing an order from the CLI.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// No enabled payment method matches the given code.
    #[error("Unknown payment method: {0}. Run `tmb checkout methods` to list codes")]
    UnknownMethod(String),

    /// The checkout flow rejected or failed the attempt.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The cart or payment methods could not be loaded.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// List available payment methods.
pub async fn list_methods(client: &StorefrontClient) -> Result<(), ApiError> {
    let methods = client.get_payment_methods().await?;

    if methods.is_empty() {
        info!("No payment methods available");
        return Ok(());
    }
    for method in &methods {
        if method.enabled {
            info!("{:<16} {}", method.code, method.name);
        } else {
            info!("{:<16} {} (unavailable)", method.code, method.name);
        }
    }
    Ok(())
}

/// Place an order for the current cart.
pub async fn place_order(
    client: &StorefrontClient,
    method_code: &str,
    contact: ContactForm,
) -> Result<(), PlaceOrderError> {
    let methods = client.get_payment_methods().await?;
    let method = methods
        .iter()
        .find(|m| m.enabled && m.code == method_code)
        .ok_or_else(|| PlaceOrderError::UnknownMethod(method_code.to_owned()))?;

    let mut flow = CheckoutFlow::new(client.clone());
    flow.begin().await;
    // Flags replace the seeded saved address wholesale; no flags means
    // checkout with the saved default
    if contact != ContactForm::default() {
        flow.contact = contact;
    }
    flow.proceed_to_payment()?;

    let cart = client.get_cart().await?;
    let placed = flow.select_payment_method(&cart, method).await?;

    info!("Order placed: {}", placed.order_id);
    if let Some(url) = &placed.redirect_url {
        info!("Complete payment at: {url}");
    }
    Ok(())
}
