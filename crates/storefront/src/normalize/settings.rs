//! Store settings payload normalization (hero image, welcome popup,
//! social login flags).

use serde_json::Value;

use crate::types::{HeroImage, SocialLoginSettings, WelcomePopup};

use super::{pick_bool, pick_string};

const HERO_IMAGE_KEYS: &[&str] = &[
    "image",
    "image_url",
    "imageUrl",
    "hero_image",
    "heroImage",
    "banner",
    "url",
    "data.image",
    "data.image_url",
];
const HERO_TITLE_KEYS: &[&str] = &["title", "heading", "data.title"];
const HERO_SUBTITLE_KEYS: &[&str] = &["subtitle", "sub_title", "subheading", "tagline", "data.subtitle"];
const HERO_LINK_KEYS: &[&str] = &["link", "cta_link", "ctaLink", "button_link", "data.link"];

const POPUP_ENABLED_KEYS: &[&str] = &["enabled", "is_enabled", "active", "show", "data.enabled"];
const POPUP_TITLE_KEYS: &[&str] = &["title", "heading", "data.title"];
const POPUP_MESSAGE_KEYS: &[&str] = &[
    "message",
    "body",
    "text",
    "content",
    "description",
    "data.message",
];
const POPUP_IMAGE_KEYS: &[&str] = &["image", "image_url", "imageUrl", "data.image"];
const POPUP_BUTTON_TEXT_KEYS: &[&str] = &["button_text", "buttonText", "cta_text", "ctaText"];
const POPUP_BUTTON_LINK_KEYS: &[&str] = &["button_link", "buttonLink", "cta_link", "ctaLink"];

const GOOGLE_KEYS: &[&str] = &[
    "google",
    "google_enabled",
    "googleEnabled",
    "google_login_enabled",
    "providers.google",
    "data.google",
];
const FACEBOOK_KEYS: &[&str] = &[
    "facebook",
    "facebook_enabled",
    "facebookEnabled",
    "facebook_login_enabled",
    "providers.facebook",
    "data.facebook",
];

/// Normalize the homepage hero settings.
#[must_use]
pub fn normalize_hero_image(value: &Value) -> HeroImage {
    HeroImage {
        image: pick_string(value, HERO_IMAGE_KEYS),
        title: pick_string(value, HERO_TITLE_KEYS),
        subtitle: pick_string(value, HERO_SUBTITLE_KEYS),
        link: pick_string(value, HERO_LINK_KEYS),
    }
}

/// Normalize the welcome popup settings. An absent flag means disabled.
#[must_use]
pub fn normalize_welcome_popup(value: &Value) -> WelcomePopup {
    WelcomePopup {
        enabled: pick_bool(value, POPUP_ENABLED_KEYS).unwrap_or(false),
        title: pick_string(value, POPUP_TITLE_KEYS),
        message: pick_string(value, POPUP_MESSAGE_KEYS),
        image: pick_string(value, POPUP_IMAGE_KEYS),
        button_text: pick_string(value, POPUP_BUTTON_TEXT_KEYS),
        button_link: pick_string(value, POPUP_BUTTON_LINK_KEYS),
    }
}

/// Normalize the social login provider flags. Absent providers are off.
#[must_use]
pub fn normalize_social_login(value: &Value) -> SocialLoginSettings {
    SocialLoginSettings {
        google: pick_bool(value, GOOGLE_KEYS).unwrap_or(false),
        facebook: pick_bool(value, FACEBOOK_KEYS).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hero_image_variants() {
        let flat = normalize_hero_image(&json!({
            "image_url": "/img/hero.jpg",
            "title": "New season",
            "tagline": "Linen for the heat"
        }));
        assert_eq!(flat.image.as_deref(), Some("/img/hero.jpg"));
        assert_eq!(flat.subtitle.as_deref(), Some("Linen for the heat"));

        let wrapped = normalize_hero_image(&json!({ "data": { "image": "/img/h.jpg" } }));
        assert_eq!(wrapped.image.as_deref(), Some("/img/h.jpg"));

        assert_eq!(normalize_hero_image(&json!(null)), HeroImage::default());
    }

    #[test]
    fn test_welcome_popup_disabled_by_default() {
        assert!(!normalize_welcome_popup(&json!({})).enabled);
        assert!(!normalize_welcome_popup(&json!(null)).enabled);
    }

    #[test]
    fn test_welcome_popup_full() {
        let popup = normalize_welcome_popup(&json!({
            "enabled": 1,
            "title": "Ayubowan!",
            "message": "Take 10% off your first order.",
            "buttonText": "Shop now",
            "button_link": "/collections/new"
        }));
        assert!(popup.enabled);
        assert_eq!(popup.title.as_deref(), Some("Ayubowan!"));
        assert_eq!(popup.button_text.as_deref(), Some("Shop now"));
    }

    #[test]
    fn test_social_login_flag_shapes() {
        let flat = normalize_social_login(&json!({ "google": true, "facebook": false }));
        assert!(flat.google);
        assert!(!flat.facebook);

        let nested = normalize_social_login(&json!({
            "providers": { "google": "1", "facebook": "true" }
        }));
        assert!(nested.google);
        assert!(nested.facebook);

        let empty = normalize_social_login(&json!({}));
        assert!(!empty.google && !empty.facebook);
    }
}
