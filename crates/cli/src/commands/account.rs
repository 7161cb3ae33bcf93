//! Account and address commands.
//!
//! # Usage
//!
//! ```bash
//! tmb auth login -e you@example.com -p secret --remember
//! tmb auth me
//! tmb addresses add --first-name Nimali --line1 "12 Galle Road" \
//!     --city Colombo --phone "+94 77 123 4567"
//! tmb addresses set-default addr-1
//! ```

use thambili_storefront::{ApiError, NewShippingAddress, StorefrontClient};
use tracing::info;

/// Sign in and persist the session per `remember`.
pub async fn login(
    client: &StorefrontClient,
    email: &str,
    password: &str,
    remember: bool,
) -> Result<(), ApiError> {
    let user = client.login(email, password, remember).await?;

    let who = user
        .name
        .or(user.email)
        .unwrap_or_else(|| "account".to_string());
    info!("Signed in as {who}");
    if remember {
        info!("Session will persist across restarts");
    }
    Ok(())
}

/// Sign out, clearing the stored session regardless of the API outcome.
pub async fn logout(client: &StorefrontClient) {
    client.logout().await;
    info!("Signed out");
}

/// Show the signed-in user's profile.
pub async fn me(client: &StorefrontClient) -> Result<(), ApiError> {
    let user = client.current_user().await?;

    info!("Name:  {}", user.name.as_deref().unwrap_or("(none)"));
    info!("Email: {}", user.email.as_deref().unwrap_or("(none)"));
    if let Some(id) = &user.id {
        info!("Id:    {id}");
    }
    Ok(())
}

/// List saved shipping addresses.
pub async fn list_addresses(client: &StorefrontClient) -> Result<(), ApiError> {
    let addresses = client.shipping_addresses().await?;

    if addresses.is_empty() {
        info!("No saved addresses");
        return Ok(());
    }
    for address in &addresses {
        let marker = if address.is_default { " (default)" } else { "" };
        info!(
            "{}: {} {}, {}, {}{}",
            address.id, address.first_name, address.last_name, address.line1, address.city, marker
        );
    }
    Ok(())
}

/// Save a new shipping address.
pub async fn add_address(
    client: &StorefrontClient,
    address: NewShippingAddress,
) -> Result<(), ApiError> {
    let created = client.create_shipping_address(&address).await?;
    info!("Saved address {}", created.id);
    Ok(())
}

/// Delete a saved shipping address.
pub async fn remove_address(client: &StorefrontClient, id: &str) -> Result<(), ApiError> {
    client.delete_shipping_address(id).await?;
    info!("Removed address {id}");
    Ok(())
}

/// Mark an address as the default; the server demotes the others.
pub async fn set_default_address(client: &StorefrontClient, id: &str) -> Result<(), ApiError> {
    client.set_default_address(id).await?;
    info!("Default address is now {id}");
    Ok(())
}
