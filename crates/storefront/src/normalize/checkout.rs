//! Payment method, shipping address, and order payload normalization.

use serde_json::Value;

use crate::types::{OrderPlaced, PaymentMethod, ShippingAddress};

use super::{detail_payload, list_payload, pick_bool, pick_string};

const METHOD_ID_KEYS: &[&str] = &["id", "payment_method_id", "paymentMethodId"];
const METHOD_CODE_KEYS: &[&str] = &["code", "slug", "key", "id"];
const METHOD_NAME_KEYS: &[&str] = &["name", "title", "label", "display_name", "displayName"];
const METHOD_DESCRIPTION_KEYS: &[&str] = &["description", "details", "subtitle"];
const METHOD_LOGO_KEYS: &[&str] = &["logo", "logo_url", "logoUrl", "image", "icon"];
const METHOD_ENABLED_KEYS: &[&str] = &["enabled", "is_enabled", "isEnabled", "active", "is_active"];
const METHOD_LIST_KEYS: &[&str] = &[
    "payment_methods",
    "paymentMethods",
    "data.payment_methods",
    "methods",
    "items",
    "data",
];

const ADDRESS_ID_KEYS: &[&str] = &["id", "address_id", "addressId"];
const FIRST_NAME_KEYS: &[&str] = &["first_name", "firstName"];
const LAST_NAME_KEYS: &[&str] = &["last_name", "lastName"];
const LINE1_KEYS: &[&str] = &[
    "line1",
    "address_line1",
    "addressLine1",
    "address1",
    "street",
    "address",
];
const LINE2_KEYS: &[&str] = &["line2", "address_line2", "addressLine2", "address2", "apartment"];
const CITY_KEYS: &[&str] = &["city", "town"];
const POSTAL_KEYS: &[&str] = &["postal_code", "postalCode", "zip", "zip_code", "zipCode"];
const PHONE_KEYS: &[&str] = &["phone", "phone_number", "phoneNumber", "mobile", "telephone"];
const DEFAULT_KEYS: &[&str] = &["is_default", "isDefault", "default"];
const ADDRESS_LIST_KEYS: &[&str] = &[
    "addresses",
    "shipping_addresses",
    "shippingAddresses",
    "data.addresses",
    "items",
    "data",
];
const ADDRESS_DETAIL_KEYS: &[&str] = &["address", "data.address", "data"];

const PAYMENT_ID_KEYS: &[&str] = &[
    "payment_id",
    "paymentId",
    "id",
    "data.payment_id",
    "data.id",
    "payment.id",
];
const ORDER_ID_KEYS: &[&str] = &[
    "order_id",
    "orderId",
    "id",
    "data.order_id",
    "data.id",
    "order.id",
    "number",
];
const REDIRECT_KEYS: &[&str] = &[
    "redirect_url",
    "redirectUrl",
    "payment_url",
    "paymentUrl",
    "url",
    "data.redirect_url",
];

/// Normalize one payment method record. Methods default to enabled.
#[must_use]
pub fn normalize_payment_method(value: &Value) -> PaymentMethod {
    let code = pick_string(value, METHOD_CODE_KEYS).unwrap_or_default();
    let name = pick_string(value, METHOD_NAME_KEYS).unwrap_or_else(|| {
        if code.is_empty() {
            "Payment".to_owned()
        } else {
            code.clone()
        }
    });
    PaymentMethod {
        id: pick_string(value, METHOD_ID_KEYS).unwrap_or_else(|| code.clone()),
        code,
        name,
        description: pick_string(value, METHOD_DESCRIPTION_KEYS),
        logo: pick_string(value, METHOD_LOGO_KEYS),
        enabled: pick_bool(value, METHOD_ENABLED_KEYS).unwrap_or(true),
    }
}

/// Normalize a payment method listing response.
#[must_use]
pub fn normalize_payment_method_list(value: &Value) -> Vec<PaymentMethod> {
    list_payload(value, METHOD_LIST_KEYS)
        .iter()
        .map(normalize_payment_method)
        .collect()
}

/// Normalize one saved shipping address.
#[must_use]
pub fn normalize_address(value: &Value) -> ShippingAddress {
    ShippingAddress {
        id: pick_string(value, ADDRESS_ID_KEYS).unwrap_or_default(),
        first_name: pick_string(value, FIRST_NAME_KEYS).unwrap_or_default(),
        last_name: pick_string(value, LAST_NAME_KEYS).unwrap_or_default(),
        line1: pick_string(value, LINE1_KEYS).unwrap_or_default(),
        line2: pick_string(value, LINE2_KEYS),
        city: pick_string(value, CITY_KEYS).unwrap_or_default(),
        postal_code: pick_string(value, POSTAL_KEYS),
        phone: pick_string(value, PHONE_KEYS).unwrap_or_default(),
        is_default: pick_bool(value, DEFAULT_KEYS).unwrap_or(false),
    }
}

/// Normalize an address listing response.
#[must_use]
pub fn normalize_address_list(value: &Value) -> Vec<ShippingAddress> {
    list_payload(value, ADDRESS_LIST_KEYS)
        .iter()
        .map(normalize_address)
        .collect()
}

/// Normalize a single-address response (create and update replies).
#[must_use]
pub fn normalize_address_detail(value: &Value) -> ShippingAddress {
    normalize_address(detail_payload(value, ADDRESS_DETAIL_KEYS))
}

/// Extract the payment id from a payment initiation response.
#[must_use]
pub fn payment_id(value: &Value) -> Option<String> {
    pick_string(value, PAYMENT_ID_KEYS)
}

/// Normalize an order placement response.
#[must_use]
pub fn normalize_order_placed(value: &Value) -> OrderPlaced {
    OrderPlaced {
        order_id: pick_string(value, ORDER_ID_KEYS).unwrap_or_default(),
        redirect_url: pick_string(value, REDIRECT_KEYS),
    }
}
