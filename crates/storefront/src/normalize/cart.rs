//! Cart payload normalization and total reconciliation.
//!
//! Cart responses arrive wrapped in up to two levels of `data` envelope.
//! Server-supplied aggregates win; anything missing is derived from the
//! lines: line total = `unit_price * quantity` rounded to two places,
//! item count = sum of quantities, subtotal and total = sum of line totals.
//! Derived arithmetic saturates at the numeric bounds instead of
//! overflowing.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use thambili_core::Currency;

use crate::types::{CartLine, CartState};

use super::{pick_decimal, pick_list, pick_string, pick_u32, unwrap_envelope};

const ITEMS_KEYS: &[&str] = &[
    "items",
    "cart_items",
    "cartItems",
    "lines",
    "cart.items",
    "products",
];
const ITEM_ID_KEYS: &[&str] = &["id", "item_id", "itemId", "cart_item_id", "row_id"];
const ITEM_PRODUCT_ID_KEYS: &[&str] = &["product_id", "productId", "product.id"];
const ITEM_NAME_KEYS: &[&str] = &[
    "name",
    "product_name",
    "productName",
    "title",
    "product.name",
    "product.title",
    "item.name",
];
const ITEM_QUANTITY_KEYS: &[&str] = &["quantity", "qty", "count"];
const ITEM_UNIT_PRICE_KEYS: &[&str] = &[
    "price",
    "unit_price",
    "unitPrice",
    "selling_price",
    "product.price",
    "item.price",
];
const ITEM_TOTAL_KEYS: &[&str] = &["line_total", "lineTotal", "total", "subtotal", "row_total"];
const ITEM_IMAGE_KEYS: &[&str] = &[
    "image",
    "image_url",
    "imageUrl",
    "thumbnail",
    "product.image",
    "product.image_url",
];
const ITEM_VARIANT_KEYS: &[&str] = &[
    "variant",
    "variant_name",
    "variantName",
    "size",
    "option",
    "variant.name",
];
const COUNT_KEYS: &[&str] = &[
    "item_count",
    "itemCount",
    "total_items",
    "totalItems",
    "count",
    "total_quantity",
];
const SUBTOTAL_KEYS: &[&str] = &["subtotal", "sub_total", "subTotal", "totals.subtotal"];
const TOTAL_KEYS: &[&str] = &["total", "grand_total", "grandTotal", "totals.total", "total_amount"];
const CURRENCY_KEYS: &[&str] = &["currency", "currency_code", "currencyCode"];

/// Normalize a cart response into a [`CartState`].
#[must_use]
pub fn normalize_cart(value: &Value) -> CartState {
    let payload = unwrap_envelope(value);
    let raw_items = match payload {
        Value::Array(items) => items.clone(),
        _ => pick_list(payload, ITEMS_KEYS),
    };
    let lines: Vec<CartLine> = raw_items.iter().map(normalize_cart_line).collect();

    let item_count = pick_u32(payload, COUNT_KEYS).unwrap_or_else(|| {
        lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    });
    let derived_total = lines.iter().fold(Decimal::ZERO, |total, line| {
        total.saturating_add(line.line_total)
    });
    let subtotal = pick_decimal(payload, SUBTOTAL_KEYS).unwrap_or(derived_total);
    let total = pick_decimal(payload, TOTAL_KEYS).unwrap_or(derived_total);
    let currency = pick_string(payload, CURRENCY_KEYS)
        .map_or_else(Currency::default, |code| Currency::parse_or_default(&code));

    CartState {
        lines,
        item_count,
        subtotal,
        total,
        currency,
    }
}

fn normalize_cart_line(value: &Value) -> CartLine {
    let quantity = pick_u32(value, ITEM_QUANTITY_KEYS).unwrap_or(1).max(1);
    let unit_price = pick_decimal(value, ITEM_UNIT_PRICE_KEYS).unwrap_or(Decimal::ZERO);
    let line_total = pick_decimal(value, ITEM_TOTAL_KEYS).unwrap_or_else(|| {
        unit_price
            .saturating_mul(Decimal::from(quantity))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    });

    CartLine {
        id: pick_string(value, ITEM_ID_KEYS).unwrap_or_default(),
        product_id: pick_string(value, ITEM_PRODUCT_ID_KEYS),
        name: pick_string(value, ITEM_NAME_KEYS).unwrap_or_else(|| "Item".to_owned()),
        quantity,
        unit_price,
        line_total,
        image: pick_string(value, ITEM_IMAGE_KEYS),
        variant_label: pick_string(value, ITEM_VARIANT_KEYS),
    }
}
