//! Auth response normalization.
//!
//! Login, register, and social login all funnel through
//! [`normalize_auth_session`]; a response without a usable token yields
//! `None` because nothing downstream can work without one.

use secrecy::SecretString;
use serde_json::Value;

use crate::types::{AuthSession, UserProfile};

use super::{lookup, pick_string};

const TOKEN_KEYS: &[&str] = &[
    "token",
    "access_token",
    "accessToken",
    "auth_token",
    "authToken",
    "data.token",
    "data.access_token",
    "jwt",
];
const USER_KEYS: &[&str] = &["user", "data.user", "customer", "data.customer", "profile", "account"];
const USER_ID_KEYS: &[&str] = &["id", "user_id", "userId", "_id"];
const USER_NAME_KEYS: &[&str] = &["name", "full_name", "fullName", "username", "first_name"];
const USER_EMAIL_KEYS: &[&str] = &["email", "email_address", "emailAddress"];

/// Every key consumed by the id/name/email picks; the rest of the user
/// object is preserved verbatim in `extra`.
const CLAIMED_USER_KEYS: &[&str] = &[
    "id",
    "user_id",
    "userId",
    "_id",
    "name",
    "full_name",
    "fullName",
    "username",
    "first_name",
    "email",
    "email_address",
    "emailAddress",
];

/// Normalize a login/register/social-login response.
///
/// Returns `None` when no token can be found anywhere in the payload.
#[must_use]
pub fn normalize_auth_session(value: &Value) -> Option<AuthSession> {
    let token = pick_string(value, TOKEN_KEYS)?;
    let user = USER_KEYS
        .iter()
        .find_map(|path| lookup(value, path).filter(|candidate| candidate.is_object()))
        .map_or_else(UserProfile::default, normalize_user_profile);
    Some(AuthSession {
        token: SecretString::from(token),
        user,
    })
}

/// Normalize a `GET /api/auth/me` response, which may be the user object
/// itself or a wrapped variant.
#[must_use]
pub fn normalize_current_user(value: &Value) -> UserProfile {
    let payload = USER_KEYS
        .iter()
        .find_map(|path| lookup(value, path).filter(|candidate| candidate.is_object()))
        .unwrap_or(value);
    normalize_user_profile(payload)
}

fn normalize_user_profile(value: &Value) -> UserProfile {
    let mut extra = serde_json::Map::new();
    if let Some(object) = value.as_object() {
        for (key, entry) in object {
            if !CLAIMED_USER_KEYS.contains(&key.as_str()) {
                extra.insert(key.clone(), entry.clone());
            }
        }
    }

    UserProfile {
        id: pick_string(value, USER_ID_KEYS),
        name: pick_string(value, USER_NAME_KEYS),
        email: pick_string(value, USER_EMAIL_KEYS),
        extra,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    #[test]
    fn test_normalize_flat_session() {
        let value = json!({
            "token": "tok-1",
            "user": { "id": 5, "name": "Nadeesha", "email": "n@example.com" }
        });
        let session = normalize_auth_session(&value).unwrap();
        assert_eq!(session.token.expose_secret(), "tok-1");
        assert_eq!(session.user.id.as_deref(), Some("5"));
        assert_eq!(session.user.email.as_deref(), Some("n@example.com"));
    }

    #[test]
    fn test_normalize_enveloped_session() {
        let value = json!({
            "data": {
                "access_token": "tok-2",
                "customer": { "userId": "u7", "fullName": "Kasun Silva" }
            }
        });
        let session = normalize_auth_session(&value).unwrap();
        assert_eq!(session.token.expose_secret(), "tok-2");
        assert_eq!(session.user.id.as_deref(), Some("u7"));
        assert_eq!(session.user.name.as_deref(), Some("Kasun Silva"));
    }

    #[test]
    fn test_missing_token_yields_none() {
        assert!(normalize_auth_session(&json!({ "user": { "id": 1 } })).is_none());
        assert!(normalize_auth_session(&json!({})).is_none());
        assert!(normalize_auth_session(&json!(null)).is_none());
    }

    #[test]
    fn test_token_without_user_still_authenticates() {
        let session = normalize_auth_session(&json!({ "token": "tok-3" })).unwrap();
        assert_eq!(session.user, UserProfile::default());
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let value = json!({
            "token": "tok-4",
            "user": { "id": 1, "email": "a@b.lk", "loyalty_tier": "gold", "phone": "077" }
        });
        let session = normalize_auth_session(&value).unwrap();
        assert_eq!(session.user.extra.get("loyalty_tier"), Some(&json!("gold")));
        assert_eq!(session.user.extra.get("phone"), Some(&json!("077")));
        // Claimed keys do not leak into extra
        assert!(!session.user.extra.contains_key("id"));
    }

    #[test]
    fn test_current_user_accepts_bare_and_wrapped() {
        let bare = normalize_current_user(&json!({ "id": 9, "email": "x@y.lk" }));
        assert_eq!(bare.id.as_deref(), Some("9"));

        let wrapped = normalize_current_user(&json!({ "user": { "id": 10 } }));
        assert_eq!(wrapped.id.as_deref(), Some("10"));
    }

    #[test]
    fn test_user_profile_storage_round_trip() {
        let value = json!({
            "token": "tok-5",
            "user": { "id": 1, "name": "A", "email": "a@b.lk", "loyalty_tier": "gold" }
        });
        let session = normalize_auth_session(&value).unwrap();
        let stored = serde_json::to_string(&session.user).unwrap();
        let restored: UserProfile = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, session.user);
    }
}
