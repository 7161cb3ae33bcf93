//! Normalized view models for the storefront API.
//!
//! Every type here is produced by the [`crate::normalize`] functions from
//! loosely-shaped API payloads. Fields are already defaulted and validated;
//! consumers never see missing names, empty galleries, or invalid currency
//! codes.

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use thambili_core::Currency;

// =============================================================================
// Catalog
// =============================================================================

/// A normalized product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Server identifier, falling back to the slug.
    pub id: String,
    /// URL slug, derived from the name when the server omits it.
    pub slug: String,
    /// Display name (`"Item"` when the payload has none).
    pub name: String,
    /// Long description (`"Details coming soon."` when absent).
    pub description: String,
    /// Resolved selling price, if the product is priced at all.
    pub price: Option<Decimal>,
    /// Formatted price, or `"Price on request"` for unpriced products.
    pub price_label: String,
    /// How the price is presented, fixed at normalization time.
    pub display: PriceDisplay,
    /// Image gallery; never empty (a deterministic placeholder set fills in).
    pub images: Vec<String>,
    /// Available colour options.
    pub colors: Vec<String>,
    /// Purchasable variants.
    pub variants: Vec<Variant>,
    /// Owning category, when the server provides one.
    pub category_id: Option<String>,
}

/// Price presentation policy for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDisplay {
    /// The price label is always shown.
    Priced,
    /// Inquiry-only product; `show_price` controls whether the label is
    /// still displayed alongside the inquiry flow.
    InquiryOnly {
        /// Whether the price label remains visible.
        show_price: bool,
    },
}

impl Product {
    /// The string a storefront should render in the price slot.
    ///
    /// Inquiry-only products hide their price unless the backend explicitly
    /// allows showing it.
    #[must_use]
    pub fn display_price(&self) -> &str {
        match self.display {
            PriceDisplay::Priced | PriceDisplay::InquiryOnly { show_price: true } => {
                &self.price_label
            }
            PriceDisplay::InquiryOnly { show_price: false } => "Enquire for price",
        }
    }
}

/// A product variant (size, fit, and so on).
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Server identifier, empty when the payload has none.
    pub id: String,
    /// Display label.
    pub name: String,
    /// List price.
    pub price: Option<Decimal>,
    /// Selling price actually charged.
    pub selling_price: Option<Decimal>,
    /// Available stock, when the server reports it.
    pub stock: Option<u32>,
    /// Stock-keeping unit.
    pub sku: Option<String>,
}

/// A curated product collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Filters for the product listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Free-text search; non-empty searches bypass the cache.
    pub search: Option<String>,
    /// Category id or slug filter.
    pub category: Option<String>,
    /// Collection id or slug filter.
    pub collection: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
}

impl ProductQuery {
    /// Whether the query carries a non-empty search term.
    #[must_use]
    pub fn is_search(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref() {
            let trimmed = search.trim();
            if !trimmed.is_empty() {
                params.push(("search", trimmed.to_owned()));
            }
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(collection) = &self.collection {
            params.push(("collection", collection.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A normalized cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Cart item identifier used for update and remove calls.
    pub id: String,
    /// The product this line refers to.
    pub product_id: Option<String>,
    /// Display name (`"Item"` when the payload has none).
    pub name: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Server-supplied line total, or `unit_price * quantity` rounded to two
    /// decimal places.
    pub line_total: Decimal,
    /// Line item image.
    pub image: Option<String>,
    /// Selected variant label.
    pub variant_label: Option<String>,
}

/// A normalized cart snapshot.
///
/// Rebuilt wholesale on every fetch; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    /// Server aggregate, or the sum of line quantities.
    pub item_count: u32,
    pub subtotal: Decimal,
    pub total: Decimal,
    /// Validated currency; invalid or missing codes fall back to `LKR`.
    pub currency: Currency,
}

impl CartState {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart total formatted in the cart's currency.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.currency.format(self.total)
    }
}

/// Result of attempting to merge a guest cart into an account cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The guest cart was merged and the guest session id discarded.
    Merged,
    /// No guest session id or no auth token; nothing was sent.
    NothingToMerge,
}

// =============================================================================
// Checkout
// =============================================================================

/// A payment method offered at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: String,
    /// Stable code sent to the payment initiation endpoint.
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    /// Disabled methods are returned but should not be offered.
    pub enabled: bool,
}

/// Payload for creating or updating a shipping address.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub phone: String,
}

/// A saved shipping address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingAddress {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub phone: String,
    /// The server enforces at most one default per account.
    pub is_default: bool,
}

/// Payload for placing an order against an initiated payment.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Id returned by the payment initiation endpoint.
    pub payment_id: String,
    pub shipping_address: NewShippingAddress,
    pub billing_address: NewShippingAddress,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order_id: String,
    /// Where to send the customer next (payment gateway or confirmation).
    pub redirect_url: Option<String>,
}

// =============================================================================
// Account
// =============================================================================

/// An authenticated session as returned by login, register, or social login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token for authenticated requests.
    pub token: SecretString,
    pub user: UserProfile,
}

/// The logged-in user's profile.
///
/// Unrecognized payload fields are preserved in `extra` so nothing the
/// backend sends is lost across a store round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Registration form submitted to `/api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Settings
// =============================================================================

/// Homepage hero configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroImage {
    pub image: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub link: Option<String>,
}

/// First-visit welcome popup configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WelcomePopup {
    pub enabled: bool,
    pub title: Option<String>,
    pub message: Option<String>,
    pub image: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
}

/// Which social login providers the backend has enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocialLoginSettings {
    pub google: bool,
    pub facebook: bool,
}
