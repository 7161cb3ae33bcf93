//! High-level storefront client.
//!
//! One `StorefrontClient` covers catalog browsing, cart, checkout
//! primitives, account auth, and shop settings. Catalog and settings reads
//! are cached for 5 minutes, the cart snapshot for 30 seconds. Cart
//! mutations discard the response body and drop the cached snapshot so the
//! next read refetches.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::cache::{CacheKey, CacheValue};
use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::http::{ApiClient, AuthMode, with_retry};
use crate::normalize;
use crate::session::SessionStore;
use crate::types::{
    AuthSession, CartState, Category, Collection, HeroImage, MergeOutcome, NewShippingAddress,
    OrderPlaced, OrderRequest, PaymentMethod, Product, ProductQuery, RegisterForm,
    ShippingAddress, SocialLoginSettings, UserProfile, WelcomePopup,
};

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Thambili storefront API.
///
/// Cloning is cheap; all clones share the same caches and session store.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    api: ApiClient,
    session: Arc<SessionStore>,
    catalog_cache: Cache<CacheKey, CacheValue>,
    cart_cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new storefront client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let session = Arc::new(SessionStore::open(&config.state_dir));

        let catalog_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();
        let cart_cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(30))
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                api: ApiClient::new(&config.base_url, Arc::clone(&session)),
                session,
                catalog_cache,
                cart_cache,
            }),
        }
    }

    /// Access the underlying session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Whether a token is stored in either session tier.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.token().is_some()
    }

    async fn invalidate_cart(&self) {
        self.inner.cart_cache.invalidate(&CacheKey::Cart).await;
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get a filtered, paginated product listing.
    ///
    /// Search queries always hit the network; other listings are cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let cache_key = CacheKey::products(query);

        // Check cache (searches bypass it)
        if !query.is_search()
            && let Some(CacheValue::Products(products)) =
                self.inner.catalog_cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let params = query.to_params();
        let payload = with_retry(|| {
            self.inner
                .api
                .request(Method::GET, "/api/products", &params, None, AuthMode::Public)
        })
        .await?;
        let products = normalize::normalize_product_list(&payload);

        if !query.is_search() {
            self.inner
                .catalog_cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get a product by its slug or id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %id_or_slug))]
    pub async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(id_or_slug.to_owned());

        // Check cache
        if let Some(CacheValue::Product(product)) =
            self.inner.catalog_cache.get(&cache_key).await
        {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("/api/products/{id_or_slug}");
        let payload = with_retry(|| {
            self.inner
                .api
                .request(Method::GET, &path, &[], None, AuthMode::Public)
        })
        .await?;
        let product = normalize::normalize_product_detail(&payload);

        self.inner
            .catalog_cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get all collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, ApiError> {
        if let Some(CacheValue::Collections(collections)) =
            self.inner.catalog_cache.get(&CacheKey::Collections).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/collections",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let collections = normalize::normalize_collection_list(&payload);

        self.inner
            .catalog_cache
            .insert(
                CacheKey::Collections,
                CacheValue::Collections(collections.clone()),
            )
            .await;

        Ok(collections)
    }

    /// Get a collection by its id or slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not found or the API request
    /// fails.
    #[instrument(skip(self), fields(id = %id_or_slug))]
    pub async fn get_collection(&self, id_or_slug: &str) -> Result<Collection, ApiError> {
        let cache_key = CacheKey::Collection(id_or_slug.to_owned());

        if let Some(CacheValue::Collection(collection)) =
            self.inner.catalog_cache.get(&cache_key).await
        {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let path = format!("/api/collections/{id_or_slug}");
        let payload = with_retry(|| {
            self.inner
                .api
                .request(Method::GET, &path, &[], None, AuthMode::Public)
        })
        .await?;
        let collection = normalize::normalize_collection_detail(&payload);

        self.inner
            .catalog_cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }

    /// Get all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.catalog_cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/categories",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let categories = normalize::normalize_category_list(&payload);

        self.inner
            .catalog_cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Settings Methods
    // =========================================================================

    /// Get the homepage hero image.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_hero_image(&self) -> Result<HeroImage, ApiError> {
        if let Some(CacheValue::HeroImage(hero)) =
            self.inner.catalog_cache.get(&CacheKey::HeroImage).await
        {
            debug!("Cache hit for hero image");
            return Ok(hero);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/settings/hero-image",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let hero = normalize::normalize_hero_image(&payload);

        self.inner
            .catalog_cache
            .insert(CacheKey::HeroImage, CacheValue::HeroImage(hero.clone()))
            .await;

        Ok(hero)
    }

    /// Get the welcome popup configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_welcome_popup(&self) -> Result<WelcomePopup, ApiError> {
        if let Some(CacheValue::WelcomePopup(popup)) =
            self.inner.catalog_cache.get(&CacheKey::WelcomePopup).await
        {
            debug!("Cache hit for welcome popup");
            return Ok(popup);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/settings/welcome-popup",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let popup = normalize::normalize_welcome_popup(&payload);

        self.inner
            .catalog_cache
            .insert(CacheKey::WelcomePopup, CacheValue::WelcomePopup(popup.clone()))
            .await;

        Ok(popup)
    }

    /// Get which social login providers are enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_social_login_settings(&self) -> Result<SocialLoginSettings, ApiError> {
        if let Some(CacheValue::SocialLogin(settings)) =
            self.inner.catalog_cache.get(&CacheKey::SocialLogin).await
        {
            debug!("Cache hit for social login settings");
            return Ok(settings);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/settings/social-login",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let settings = normalize::normalize_social_login(&payload);

        self.inner
            .catalog_cache
            .insert(CacheKey::SocialLogin, CacheValue::SocialLogin(settings))
            .await;

        Ok(settings)
    }

    /// Get the enabled payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        if let Some(CacheValue::PaymentMethods(methods)) =
            self.inner.catalog_cache.get(&CacheKey::PaymentMethods).await
        {
            debug!("Cache hit for payment methods");
            return Ok(methods);
        }

        let payload = with_retry(|| {
            self.inner.api.request(
                Method::GET,
                "/api/payment-methods",
                &[],
                None,
                AuthMode::Public,
            )
        })
        .await?;
        let methods = normalize::normalize_payment_method_list(&payload);

        self.inner
            .catalog_cache
            .insert(
                CacheKey::PaymentMethods,
                CacheValue::PaymentMethods(methods.clone()),
            )
            .await;

        Ok(methods)
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Get the current cart snapshot.
    ///
    /// Scoped to the bearer token when signed in, otherwise to the guest
    /// cart session id (created on first use).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<CartState, ApiError> {
        if let Some(CacheValue::Cart(cart)) = self.inner.cart_cache.get(&CacheKey::Cart).await {
            debug!("Cache hit for cart");
            return Ok(*cart);
        }

        let payload = with_retry(|| {
            self.inner
                .api
                .request(Method::GET, "/api/cart", &[], None, AuthMode::CartScoped)
        })
        .await?;
        let cart = normalize::normalize_cart(&payload);

        self.inner
            .cart_cache
            .insert(CacheKey::Cart, CacheValue::Cart(Box::new(cart.clone())))
            .await;

        Ok(cart)
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: &str,
        variant_id: Option<&str>,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "product_id": product_id, "quantity": quantity });
        if let Some(variant_id) = variant_id
            && let Some(object) = body.as_object_mut()
        {
            object.insert("variant_id".to_owned(), Value::String(variant_id.to_owned()));
        }

        self.inner
            .api
            .request(
                Method::POST,
                "/api/cart/items",
                &[],
                Some(body),
                AuthMode::CartScoped,
            )
            .await?;
        self.invalidate_cart().await;
        Ok(())
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<(), ApiError> {
        let path = format!("/api/cart/items/{item_id}");
        self.inner
            .api
            .request(
                Method::PUT,
                &path,
                &[],
                Some(json!({ "quantity": quantity })),
                AuthMode::CartScoped,
            )
            .await?;
        self.invalidate_cart().await;
        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/cart/items/{item_id}");
        self.inner
            .api
            .request(Method::DELETE, &path, &[], None, AuthMode::CartScoped)
            .await?;
        self.invalidate_cart().await;
        Ok(())
    }

    /// Remove every line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.inner
            .api
            .request(Method::DELETE, "/api/cart", &[], None, AuthMode::CartScoped)
            .await?;
        self.invalidate_cart().await;
        Ok(())
    }

    /// Merge the guest cart into the signed-in account cart.
    ///
    /// A no-op unless both a guest cart session id and a token exist. On
    /// success the guest id is cleared and never reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge request fails; the guest id is kept so
    /// a later attempt can retry.
    #[instrument(skip(self))]
    pub async fn merge_guest_cart(&self) -> Result<MergeOutcome, ApiError> {
        let Some(session_id) = self.inner.session.cart_session_id() else {
            return Ok(MergeOutcome::NothingToMerge);
        };
        if self.inner.session.token().is_none() {
            return Ok(MergeOutcome::NothingToMerge);
        }

        self.inner
            .api
            .request(
                Method::POST,
                "/api/cart/merge",
                &[],
                Some(json!({ "session_id": session_id })),
                AuthMode::Bearer,
            )
            .await?;

        self.inner.session.clear_cart_session_id();
        self.invalidate_cart().await;
        Ok(MergeOutcome::Merged)
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Log in with email and password.
    ///
    /// `remember` picks the durable tier (survives restarts) over the
    /// ephemeral one. Any pending guest cart is merged best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the API request
    /// fails, or the response carries no token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<UserProfile, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                "/api/auth/login",
                &[],
                Some(json!({ "email": email, "password": password })),
                AuthMode::Public,
            )
            .await?;

        let session = normalize::normalize_auth_session(&payload)
            .ok_or(ApiError::MissingField("token"))?;
        Ok(self.finish_login(session, remember).await)
    }

    /// Register a new account and sign in.
    ///
    /// Fresh registrations always persist durably.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected, the API request fails,
    /// or the response carries no token.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: &RegisterForm) -> Result<UserProfile, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                "/api/auth/register",
                &[],
                Some(serde_json::to_value(form)?),
                AuthMode::Public,
            )
            .await?;

        let session = normalize::normalize_auth_session(&payload)
            .ok_or(ApiError::MissingField("token"))?;
        Ok(self.finish_login(session, true).await)
    }

    /// Log in with a social provider token (`google` or `facebook`).
    ///
    /// # Errors
    ///
    /// Returns an error if the provider token is rejected, the API request
    /// fails, or the response carries no token.
    #[instrument(skip(self, provider_token), fields(provider = %provider))]
    pub async fn social_login(
        &self,
        provider: &str,
        provider_token: &str,
        remember: bool,
    ) -> Result<UserProfile, ApiError> {
        let path = format!("/api/auth/social/{provider}");
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                &path,
                &[],
                Some(json!({ "token": provider_token })),
                AuthMode::Public,
            )
            .await?;

        let session = normalize::normalize_auth_session(&payload)
            .ok_or(ApiError::MissingField("token"))?;
        Ok(self.finish_login(session, remember).await)
    }

    async fn finish_login(&self, session: AuthSession, remember: bool) -> UserProfile {
        self.inner.session.persist_auth(&session, remember);

        // Carry any guest cart over to the account; a failed merge keeps the
        // guest id for a later retry and never blocks the login
        if let Err(err) = self.merge_guest_cart().await {
            warn!(error = %err, "guest cart merge after login failed");
        }
        self.invalidate_cart().await;

        session.user
    }

    /// Log out, clearing both session tiers regardless of the API outcome.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if self.inner.session.token().is_some()
            && let Err(err) = self
                .inner
                .api
                .request(Method::POST, "/api/auth/logout", &[], None, AuthMode::Bearer)
                .await
        {
            warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.inner.session.clear_auth();
        self.invalidate_cart().await;
    }

    /// Get the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let payload = self
            .inner
            .api
            .request(Method::GET, "/api/auth/me", &[], None, AuthMode::Bearer)
            .await?;
        Ok(normalize::normalize_current_user(&payload))
    }

    // =========================================================================
    // Shipping Address Methods
    // =========================================================================

    /// Get the signed-in user's saved shipping addresses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self))]
    pub async fn shipping_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::GET,
                "/api/shipping-addresses",
                &[],
                None,
                AuthMode::Bearer,
            )
            .await?;
        Ok(normalize::normalize_address_list(&payload))
    }

    /// Save a new shipping address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self, address))]
    pub async fn create_shipping_address(
        &self,
        address: &NewShippingAddress,
    ) -> Result<ShippingAddress, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                "/api/shipping-addresses",
                &[],
                Some(serde_json::to_value(address)?),
                AuthMode::Bearer,
            )
            .await?;
        Ok(normalize::normalize_address_detail(&payload))
    }

    /// Update a saved shipping address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self, address), fields(id = %id))]
    pub async fn update_shipping_address(
        &self,
        id: &str,
        address: &NewShippingAddress,
    ) -> Result<ShippingAddress, ApiError> {
        let path = format!("/api/shipping-addresses/{id}");
        let payload = self
            .inner
            .api
            .request(
                Method::PUT,
                &path,
                &[],
                Some(serde_json::to_value(address)?),
                AuthMode::Bearer,
            )
            .await?;
        Ok(normalize::normalize_address_detail(&payload))
    }

    /// Delete a saved shipping address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_shipping_address(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/shipping-addresses/{id}");
        self.inner
            .api
            .request(Method::DELETE, &path, &[], None, AuthMode::Bearer)
            .await?;
        Ok(())
    }

    /// Mark a saved address as the default; the server demotes the rest.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a stored token, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn set_default_address(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/shipping-addresses/{id}/default");
        self.inner
            .api
            .request(Method::POST, &path, &[], None, AuthMode::Bearer)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Checkout Primitives
    // =========================================================================

    /// Initiate a payment with the given method, returning the payment id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response carries no
    /// payment id.
    #[instrument(skip(self), fields(method = %method.code))]
    pub async fn initiate_payment(&self, method: &PaymentMethod) -> Result<String, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                "/api/checkout/payments",
                &[],
                Some(json!({ "payment_method": method.code })),
                AuthMode::CartScoped,
            )
            .await?;
        normalize::payment_id(&payload).ok_or(ApiError::MissingField("payment_id"))
    }

    /// Place the order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, order))]
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderPlaced, ApiError> {
        let payload = self
            .inner
            .api
            .request(
                Method::POST,
                "/api/checkout/orders",
                &[],
                Some(serde_json::to_value(order)?),
                AuthMode::CartScoped,
            )
            .await?;
        self.invalidate_cart().await;
        Ok(normalize::normalize_order_placed(&payload))
    }
}
