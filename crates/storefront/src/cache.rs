//! Cache types for storefront API responses.

use crate::types::{
    CartState, Category, Collection, HeroImage, PaymentMethod, Product, ProductQuery,
    SocialLoginSettings, WelcomePopup,
};

/// Cache key for catalog, settings, and cart reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) enum CacheKey {
    Product(String),
    Products {
        category: Option<String>,
        collection: Option<String>,
        page: u32,
    },
    Collection(String),
    Collections,
    Categories,
    PaymentMethods,
    HeroImage,
    WelcomePopup,
    SocialLogin,
    Cart,
}

impl CacheKey {
    /// Key for a product listing (searches are never cached).
    pub(crate) fn products(query: &ProductQuery) -> Self {
        Self::Products {
            category: query.category.clone(),
            collection: query.collection.clone(),
            page: query.page.unwrap_or(1),
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub(crate) enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collection(Box<Collection>),
    Collections(Vec<Collection>),
    Categories(Vec<Category>),
    PaymentMethods(Vec<PaymentMethod>),
    HeroImage(HeroImage),
    WelcomePopup(WelcomePopup),
    SocialLogin(SocialLoginSettings),
    Cart(Box<CartState>),
}
