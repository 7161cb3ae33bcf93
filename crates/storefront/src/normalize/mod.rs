//! Payload normalization for loosely-shaped API responses.
//!
//! # Architecture
//!
//! The backend returns JSON whose field names and nesting vary by endpoint
//! and version (snake_case/camelCase, `product`/`item`/`data` wrappers,
//! scalars where arrays are expected). Every normalizer here is total: it
//! maps any [`serde_json::Value`], including `null` and garbage, to a valid
//! view model using documented fallback defaults, and never errors.
//!
//! Field resolution is table-driven. Each target field declares an ordered
//! candidate list of dot-separated source paths; the first candidate holding
//! a non-empty string, a number, or a boolean wins. The priority order is
//! part of each normalizer's contract.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod product;
pub mod settings;

pub use auth::{normalize_auth_session, normalize_current_user};
pub use cart::normalize_cart;
pub use catalog::{
    normalize_category, normalize_category_list, normalize_collection, normalize_collection_detail,
    normalize_collection_list,
};
pub use checkout::{
    normalize_address, normalize_address_detail, normalize_address_list, normalize_order_placed,
    normalize_payment_method, normalize_payment_method_list, payment_id,
};
pub use product::{normalize_product, normalize_product_detail, normalize_product_list};
pub use settings::{normalize_hero_image, normalize_social_login, normalize_welcome_popup};

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde_json::Value;
use thambili_core::slugify;

/// Keys tried when a list entry is an object rather than a scalar.
const ENTRY_KEYS: &[&str] = &["url", "src", "image", "image_url", "path", "name", "value"];

/// Walk a dot-separated path. Any non-object along the way misses.
pub(crate) fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// First candidate path holding a non-empty string, a number, or a boolean.
pub(crate) fn pick<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).filter(|candidate| is_present(candidate)))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(_) | Value::Bool(_) => true,
        _ => false,
    }
}

/// Resolve a string field. Numbers and booleans are stringified.
pub(crate) fn pick_string(value: &Value, paths: &[&str]) -> Option<String> {
    pick(value, paths).map(scalar_to_string)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        other => other.to_string(),
    }
}

/// Resolve a numeric field.
///
/// Strings are cleaned of everything but digits, `.` and `-` before parsing.
/// A winning candidate that still fails to parse yields `None`, never a
/// panic or a NaN-like stand-in.
pub(crate) fn pick_decimal(value: &Value, paths: &[&str]) -> Option<Decimal> {
    pick(value, paths).and_then(coerce_decimal)
}

pub(crate) fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            n.as_f64().and_then(Decimal::from_f64)
        }
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse().ok()
        }
        _ => None,
    }
}

/// Resolve a non-negative integer field, truncating fractional values.
pub(crate) fn pick_u32(value: &Value, paths: &[&str]) -> Option<u32> {
    pick_decimal(value, paths).and_then(|d| d.trunc().to_u32())
}

/// Resolve a boolean field. Accepts numbers (zero is false) and common
/// string spellings.
pub(crate) fn pick_bool(value: &Value, paths: &[&str]) -> Option<bool> {
    pick(value, paths).and_then(coerce_bool)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Resolve an array-valued field.
///
/// Tolerates a JSON array, an array nested under a `data` key, a comma- or
/// pipe-delimited string, or a single scalar.
pub(crate) fn pick_list(value: &Value, paths: &[&str]) -> Vec<Value> {
    for path in paths {
        let Some(candidate) = lookup(value, path) else {
            continue;
        };
        let items = coerce_list(candidate);
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

fn coerce_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        Value::String(s) => {
            let separator = if s.contains('|') { '|' } else { ',' };
            s.split(separator)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_owned()))
                .collect()
        }
        Value::Number(_) | Value::Bool(_) => vec![value.clone()],
        Value::Null => Vec::new(),
    }
}

/// Resolve an array field down to display strings, dropping entries that
/// carry nothing usable.
pub(crate) fn pick_string_list(value: &Value, paths: &[&str]) -> Vec<String> {
    pick_list(value, paths)
        .iter()
        .filter_map(list_entry_to_string)
        .collect()
}

fn list_entry_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) => pick_string(value, ENTRY_KEYS),
        _ => None,
    }
}

/// Peel up to two levels of `{ "data": ... }` envelope.
pub(crate) fn unwrap_envelope(value: &Value) -> &Value {
    let mut current = value;
    for _ in 0..2 {
        match current.get("data") {
            Some(inner) if inner.is_object() || inner.is_array() => current = inner,
            _ => break,
        }
    }
    current
}

/// Resolve the item array of a listing endpoint. A bare JSON array is
/// accepted as-is.
pub(crate) fn list_payload(value: &Value, paths: &[&str]) -> Vec<Value> {
    if let Value::Array(items) = value {
        return items.clone();
    }
    for path in paths {
        if let Some(Value::Array(items)) = lookup(value, path) {
            return items.clone();
        }
    }
    Vec::new()
}

/// Resolve the object payload of a detail endpoint, falling back to the
/// value itself.
pub(crate) fn detail_payload<'a>(value: &'a Value, paths: &[&str]) -> &'a Value {
    paths
        .iter()
        .find_map(|path| lookup(value, path).filter(|candidate| candidate.is_object()))
        .unwrap_or(value)
}

/// Slug derived from a name, with a positional fallback when the name has
/// no usable characters.
pub(crate) fn derived_slug(name: &str, prefix: &str, position: usize) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("{prefix}-{}", position + 1)
    } else {
        slug
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_walks_nested_paths() {
        let value = json!({ "product": { "price": { "amount": 42 } } });
        assert_eq!(
            lookup(&value, "product.price.amount"),
            Some(&json!(42))
        );
        assert_eq!(lookup(&value, "product.missing"), None);
    }

    #[test]
    fn test_lookup_misses_on_non_object_input() {
        assert_eq!(lookup(&json!(null), "name"), None);
        assert_eq!(lookup(&json!("plain"), "name"), None);
        assert_eq!(lookup(&json!([1, 2]), "name"), None);
    }

    #[test]
    fn test_pick_respects_priority_order() {
        let value = json!({ "title": "Fallback", "name": "Primary" });
        assert_eq!(
            pick_string(&value, &["name", "title"]),
            Some("Primary".to_string())
        );
        assert_eq!(
            pick_string(&value, &["title", "name"]),
            Some("Fallback".to_string())
        );
    }

    #[test]
    fn test_pick_skips_blank_strings() {
        let value = json!({ "name": "   ", "title": "Real Title" });
        assert_eq!(
            pick_string(&value, &["name", "title"]),
            Some("Real Title".to_string())
        );
    }

    #[test]
    fn test_pick_skips_null_and_missing() {
        let value = json!({ "name": null });
        assert_eq!(pick_string(&value, &["name", "title"]), None);
    }

    #[test]
    fn test_pick_string_stringifies_numbers() {
        let value = json!({ "id": 981 });
        assert_eq!(pick_string(&value, &["id"]), Some("981".to_string()));
    }

    #[test]
    fn test_coerce_decimal_strips_formatting() {
        assert_eq!(
            coerce_decimal(&json!("4,500.00")),
            Some(Decimal::new(450_000, 2))
        );
        assert_eq!(coerce_decimal(&json!("1200")), Some(Decimal::from(1200)));
        assert_eq!(coerce_decimal(&json!(25)), Some(Decimal::from(25)));
        assert_eq!(
            coerce_decimal(&json!(-19.5)),
            Some(Decimal::new(-195, 1))
        );
    }

    #[test]
    fn test_coerce_decimal_rejects_garbage() {
        assert_eq!(coerce_decimal(&json!("N/A")), None);
        assert_eq!(coerce_decimal(&json!("")), None);
        assert_eq!(coerce_decimal(&json!(true)), None);
        // Multiple dots survive the strip but fail the parse
        assert_eq!(coerce_decimal(&json!("1.2.3")), None);
    }

    #[test]
    fn test_pick_u32_truncates_and_rejects_negatives() {
        let value = json!({ "quantity": 2.9, "bad": -3 });
        assert_eq!(pick_u32(&value, &["quantity"]), Some(2));
        assert_eq!(pick_u32(&value, &["bad"]), None);
        assert_eq!(pick_u32(&json!({ "quantity": "4" }), &["quantity"]), Some(4));
    }

    #[test]
    fn test_pick_bool_accepts_common_spellings() {
        assert_eq!(pick_bool(&json!({ "on": true }), &["on"]), Some(true));
        assert_eq!(pick_bool(&json!({ "on": 1 }), &["on"]), Some(true));
        assert_eq!(pick_bool(&json!({ "on": 0 }), &["on"]), Some(false));
        assert_eq!(pick_bool(&json!({ "on": "yes" }), &["on"]), Some(true));
        assert_eq!(pick_bool(&json!({ "on": "false" }), &["on"]), Some(false));
        assert_eq!(pick_bool(&json!({ "on": "maybe" }), &["on"]), None);
    }

    #[test]
    fn test_pick_list_accepts_plain_arrays() {
        let value = json!({ "images": ["a.jpg", "b.jpg"] });
        assert_eq!(pick_list(&value, &["images"]).len(), 2);
    }

    #[test]
    fn test_pick_list_accepts_data_nesting() {
        let value = json!({ "images": { "data": ["a.jpg"] } });
        assert_eq!(pick_list(&value, &["images"]).len(), 1);
    }

    #[test]
    fn test_pick_list_splits_delimited_strings() {
        let comma = json!({ "colors": "Red, Blue, Green" });
        assert_eq!(
            pick_string_list(&comma, &["colors"]),
            vec!["Red", "Blue", "Green"]
        );

        let pipe = json!({ "colors": "Red|Blue" });
        assert_eq!(pick_string_list(&pipe, &["colors"]), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_pick_list_wraps_single_scalars() {
        let value = json!({ "colors": "Red" });
        assert_eq!(pick_string_list(&value, &["colors"]), vec!["Red"]);
    }

    #[test]
    fn test_pick_string_list_reads_object_entries() {
        let value = json!({ "images": [{ "url": "a.jpg" }, { "src": "b.jpg" }, {}] });
        assert_eq!(
            pick_string_list(&value, &["images"]),
            vec!["a.jpg", "b.jpg"]
        );
    }

    #[test]
    fn test_unwrap_envelope_peels_at_most_two_levels() {
        let single = json!({ "data": { "items": [] } });
        assert_eq!(unwrap_envelope(&single), &json!({ "items": [] }));

        let double = json!({ "data": { "data": { "items": [] } } });
        assert_eq!(unwrap_envelope(&double), &json!({ "items": [] }));

        let triple = json!({ "data": { "data": { "data": { "items": [] } } } });
        assert_eq!(
            unwrap_envelope(&triple),
            &json!({ "data": { "items": [] } })
        );
    }

    #[test]
    fn test_unwrap_envelope_ignores_scalar_data() {
        let value = json!({ "data": "2026-08-25", "items": [] });
        assert_eq!(unwrap_envelope(&value), &value);
    }

    #[test]
    fn test_list_payload_accepts_bare_arrays() {
        let value = json!([{ "id": 1 }, { "id": 2 }]);
        assert_eq!(list_payload(&value, &["products"]).len(), 2);
    }

    #[test]
    fn test_detail_payload_prefers_wrapped_objects() {
        let wrapped = json!({ "product": { "name": "Shirt" } });
        assert_eq!(
            detail_payload(&wrapped, &["product", "data"]),
            &json!({ "name": "Shirt" })
        );

        let bare = json!({ "name": "Shirt" });
        assert_eq!(detail_payload(&bare, &["product", "data"]), &bare);
    }

    #[test]
    fn test_derived_slug_falls_back_to_position() {
        assert_eq!(derived_slug("Linen Shirt", "item", 0), "linen-shirt");
        assert_eq!(derived_slug("???", "item", 4), "item-5");
    }
}
