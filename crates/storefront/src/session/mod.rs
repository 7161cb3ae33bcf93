//! Client-side session state: auth token, guest cart id, and small flags.
//!
//! # Architecture
//!
//! Two storage tiers sit behind one [`SessionStore`]:
//!
//! - [`DurableStore`] - a JSON file under the state directory, surviving
//!   restarts ("remember me" sessions, the guest cart id, sticky flags)
//! - [`EphemeralStore`] - process memory, dropped on exit (sessions without
//!   "remember me")
//!
//! Auth state lives in exactly one tier at a time: persisting to one tier
//! actively clears the other, so a stale token can never shadow a fresh one.
//! Consumers re-read on demand; there is no change notification.

pub mod storage;

use std::path::Path;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use uuid::Uuid;

use crate::types::{AuthSession, UserProfile};

pub use storage::{DurableStore, EphemeralStore, StorageTier};

/// Keys under which session state is persisted.
pub mod keys {
    /// Key for the bearer token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the logged-in user's profile JSON.
    pub const AUTH_USER: &str = "auth_user";

    /// Key for the guest cart session id.
    pub const CART_SESSION_ID: &str = "cart_session_id";

    /// Key for the welcome-popup-seen timestamp.
    pub const WELCOME_POPUP_SEEN: &str = "welcome_popup_seen";

    /// Key for the unsubmitted profile edit draft.
    pub const PROFILE_DRAFT: &str = "profile_draft";
}

/// Two-tier session store for auth and cart identity.
pub struct SessionStore {
    durable: DurableStore,
    ephemeral: EphemeralStore,
}

impl SessionStore {
    /// Open the store with its durable tier rooted at `state_dir`.
    #[must_use]
    pub fn open(state_dir: &Path) -> Self {
        Self {
            durable: DurableStore::open(state_dir),
            ephemeral: EphemeralStore::default(),
        }
    }

    /// The stored bearer token, checking the durable tier first.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.get_either(keys::AUTH_TOKEN).map(SecretString::from)
    }

    /// The stored user profile, if a parseable one exists in either tier.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.get_either(keys::AUTH_USER)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Persist an authenticated session.
    ///
    /// `remember` selects the durable tier; the other tier is cleared so at
    /// most one token location exists at any time.
    pub fn persist_auth(&self, session: &AuthSession, remember: bool) {
        let (target, other) = self.tiers(remember);
        target.set(keys::AUTH_TOKEN, session.token.expose_secret());
        match serde_json::to_string(&session.user) {
            Ok(json) => target.set(keys::AUTH_USER, &json),
            Err(err) => warn!(error = %err, "could not serialize user profile for storage"),
        }
        other.remove(keys::AUTH_TOKEN);
        other.remove(keys::AUTH_USER);
    }

    /// Remove auth state from both tiers unconditionally.
    pub fn clear_auth(&self) {
        for tier in [&self.durable as &dyn StorageTier, &self.ephemeral] {
            tier.remove(keys::AUTH_TOKEN);
            tier.remove(keys::AUTH_USER);
        }
    }

    /// The guest cart session id, if one has been created.
    #[must_use]
    pub fn cart_session_id(&self) -> Option<String> {
        self.get_either(keys::CART_SESSION_ID)
    }

    /// Return the guest cart session id, creating and persisting one first
    /// if none exists. Consecutive calls return the identical id.
    pub fn ensure_cart_session_id(&self) -> String {
        if let Some(id) = self.cart_session_id() {
            return id;
        }
        let id = Uuid::new_v4().to_string();
        self.durable.set(keys::CART_SESSION_ID, &id);
        id
    }

    /// Discard the guest cart session id after a successful merge.
    pub fn clear_cart_session_id(&self) {
        self.durable.remove(keys::CART_SESSION_ID);
        self.ephemeral.remove(keys::CART_SESSION_ID);
    }

    /// Whether the welcome popup has been dismissed on this device.
    #[must_use]
    pub fn welcome_popup_seen(&self) -> bool {
        self.durable.get(keys::WELCOME_POPUP_SEEN).is_some()
    }

    /// Record the welcome popup as seen, with the dismissal time.
    pub fn mark_welcome_popup_seen(&self) {
        self.durable
            .set(keys::WELCOME_POPUP_SEEN, &Utc::now().to_rfc3339());
    }

    /// The unsubmitted profile edit draft, if one was saved.
    #[must_use]
    pub fn profile_draft(&self) -> Option<serde_json::Value> {
        self.durable
            .get(keys::PROFILE_DRAFT)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Save an unsubmitted profile edit so it survives a restart.
    pub fn save_profile_draft(&self, draft: &serde_json::Value) {
        match serde_json::to_string(draft) {
            Ok(json) => self.durable.set(keys::PROFILE_DRAFT, &json),
            Err(err) => warn!(error = %err, "could not serialize profile draft"),
        }
    }

    /// Drop the saved profile draft.
    pub fn clear_profile_draft(&self) {
        self.durable.remove(keys::PROFILE_DRAFT);
    }

    fn get_either(&self, key: &str) -> Option<String> {
        self.durable.get(key).or_else(|| self.ephemeral.get(key))
    }

    fn tiers(&self, durable_first: bool) -> (&dyn StorageTier, &dyn StorageTier) {
        if durable_first {
            (&self.durable, &self.ephemeral)
        } else {
            (&self.ephemeral, &self.durable)
        }
    }
}
