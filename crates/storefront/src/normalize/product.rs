//! Product payload normalization.
//!
//! Candidate-path tables are ordered by priority; the first present value
//! wins. Fallbacks: name `"Item"`, description `"Details coming soon."`,
//! a deterministic placeholder gallery, and the store default currency.

use rust_decimal::Decimal;
use serde_json::Value;
use thambili_core::Currency;

use crate::types::{PriceDisplay, Product, Variant};

use super::{
    derived_slug, detail_payload, list_payload, pick_bool, pick_decimal, pick_list, pick_string,
    pick_string_list, pick_u32,
};

const ID_KEYS: &[&str] = &["id", "product_id", "productId", "product.id", "data.id"];
const SLUG_KEYS: &[&str] = &["slug", "handle", "product.slug", "product.handle", "seo_slug"];
const NAME_KEYS: &[&str] = &[
    "name",
    "title",
    "product_name",
    "productName",
    "product.name",
    "product.title",
];
const DESCRIPTION_KEYS: &[&str] = &[
    "description",
    "short_description",
    "shortDescription",
    "product.description",
    "details",
];
const SELLING_PRICE_KEYS: &[&str] = &[
    "selling_price",
    "sellingPrice",
    "price",
    "unit_price",
    "unitPrice",
    "product.price",
];
const CURRENCY_KEYS: &[&str] = &["currency", "currency_code", "currencyCode", "product.currency"];
const IMAGE_LIST_KEYS: &[&str] = &[
    "images",
    "gallery",
    "product_images",
    "productImages",
    "media",
    "photos",
];
const IMAGE_SINGLE_KEYS: &[&str] = &[
    "image",
    "image_url",
    "imageUrl",
    "thumbnail",
    "featured_image",
    "photo",
    "product.image",
];
const COLOR_KEYS: &[&str] = &[
    "colors",
    "colours",
    "color_options",
    "colorOptions",
    "available_colors",
];
const VARIANT_LIST_KEYS: &[&str] = &[
    "variants",
    "product_variants",
    "productVariants",
    "sizes",
    "options",
];
const INQUIRY_ONLY_KEYS: &[&str] = &[
    "inquiry_only",
    "inquiryOnly",
    "is_inquiry_only",
    "price_on_request",
];
const SHOW_PRICE_KEYS: &[&str] = &[
    "show_price_inquiry_mode",
    "showPriceInquiryMode",
    "show_price",
    "showPrice",
];
const CATEGORY_ID_KEYS: &[&str] = &["category_id", "categoryId", "category.id"];

const VARIANT_ID_KEYS: &[&str] = &["id", "variant_id", "variantId"];
const VARIANT_NAME_KEYS: &[&str] = &["name", "title", "label", "size", "option"];
const VARIANT_PRICE_KEYS: &[&str] = &["price", "unit_price", "unitPrice", "amount"];
const VARIANT_SELLING_KEYS: &[&str] = &[
    "selling_price",
    "sellingPrice",
    "sale_price",
    "salePrice",
];
const VARIANT_STOCK_KEYS: &[&str] = &[
    "stock",
    "stock_quantity",
    "stockQuantity",
    "quantity",
    "inventory",
    "available",
];
const VARIANT_SKU_KEYS: &[&str] = &["sku", "code"];

const PRODUCT_LIST_KEYS: &[&str] = &["products", "data.products", "items", "data.items", "data"];
const PRODUCT_DETAIL_KEYS: &[&str] = &["product", "data.product", "data"];

/// Fixed local gallery used when a product carries no images.
pub(crate) const PLACEHOLDER_GALLERY: &[&str] = &[
    "/images/placeholders/look-1.jpg",
    "/images/placeholders/look-2.jpg",
    "/images/placeholders/look-3.jpg",
    "/images/placeholders/look-4.jpg",
];

/// Normalize one product record.
///
/// `position` is the record's index in its listing; it keys the placeholder
/// gallery rotation and positional slug fallbacks, keeping output
/// deterministic for a given payload.
#[must_use]
pub fn normalize_product(value: &Value, position: usize) -> Product {
    let name = pick_string(value, NAME_KEYS).unwrap_or_else(|| "Item".to_owned());
    let slug =
        pick_string(value, SLUG_KEYS).unwrap_or_else(|| derived_slug(&name, "item", position));
    let id = pick_string(value, ID_KEYS).unwrap_or_else(|| slug.clone());
    let description = pick_string(value, DESCRIPTION_KEYS)
        .unwrap_or_else(|| "Details coming soon.".to_owned());

    let variants = normalize_variants(value);
    let price = resolve_price(value, &variants);
    let currency = pick_string(value, CURRENCY_KEYS)
        .map_or_else(Currency::default, |code| Currency::parse_or_default(&code));
    let price_label =
        price.map_or_else(|| "Price on request".to_owned(), |amount| currency.format(amount));

    Product {
        id,
        slug,
        name,
        description,
        price,
        price_label,
        display: price_display(value),
        images: resolve_images(value, position),
        colors: pick_string_list(value, COLOR_KEYS),
        variants,
        category_id: pick_string(value, CATEGORY_ID_KEYS),
    }
}

/// Normalize a product listing response.
#[must_use]
pub fn normalize_product_list(value: &Value) -> Vec<Product> {
    list_payload(value, PRODUCT_LIST_KEYS)
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_product(item, position))
        .collect()
}

/// Normalize a single-product detail response.
#[must_use]
pub fn normalize_product_detail(value: &Value) -> Product {
    normalize_product(detail_payload(value, PRODUCT_DETAIL_KEYS), 0)
}

/// Explicit selling price, else the first variant with a selling price.
fn resolve_price(value: &Value, variants: &[Variant]) -> Option<Decimal> {
    pick_decimal(value, SELLING_PRICE_KEYS)
        .or_else(|| variants.iter().find_map(|variant| variant.selling_price))
}

fn price_display(value: &Value) -> PriceDisplay {
    if pick_bool(value, INQUIRY_ONLY_KEYS).unwrap_or(false) {
        PriceDisplay::InquiryOnly {
            show_price: pick_bool(value, SHOW_PRICE_KEYS).unwrap_or(false),
        }
    } else {
        PriceDisplay::Priced
    }
}

fn resolve_images(value: &Value, position: usize) -> Vec<String> {
    let listed = pick_string_list(value, IMAGE_LIST_KEYS);
    if !listed.is_empty() {
        return listed;
    }
    if let Some(single) = pick_string(value, IMAGE_SINGLE_KEYS) {
        return vec![single];
    }
    fallback_gallery(position)
}

/// The placeholder set rotated so adjacent listing entries lead with
/// different images.
pub(crate) fn fallback_gallery(position: usize) -> Vec<String> {
    let len = PLACEHOLDER_GALLERY.len();
    (0..len)
        .filter_map(|offset| PLACEHOLDER_GALLERY.get((position + offset) % len))
        .map(|image| (*image).to_owned())
        .collect()
}

fn normalize_variants(value: &Value) -> Vec<Variant> {
    pick_list(value, VARIANT_LIST_KEYS)
        .iter()
        .map(normalize_variant)
        .collect()
}

fn normalize_variant(value: &Value) -> Variant {
    // A bare scalar in the variants array is a size label
    if let Value::String(label) = value {
        return Variant {
            id: String::new(),
            name: label.trim().to_owned(),
            price: None,
            selling_price: None,
            stock: None,
            sku: None,
        };
    }

    Variant {
        id: pick_string(value, VARIANT_ID_KEYS).unwrap_or_default(),
        name: pick_string(value, VARIANT_NAME_KEYS).unwrap_or_default(),
        price: pick_decimal(value, VARIANT_PRICE_KEYS),
        selling_price: pick_decimal(value, VARIANT_SELLING_KEYS),
        stock: pick_u32(value, VARIANT_STOCK_KEYS),
        sku: pick_string(value, VARIANT_SKU_KEYS),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_product() {
        let value = json!({
            "id": 42,
            "slug": "linen-shirt",
            "name": "Linen Shirt",
            "description": "A breezy shirt.",
            "selling_price": "4500.00",
            "currency": "LKR",
            "images": ["/img/shirt-front.jpg", "/img/shirt-back.jpg"],
            "colors": ["White", "Sand"],
            "variants": [
                { "id": 1, "name": "S", "price": 4900, "selling_price": 4500, "stock": 3, "sku": "LS-S" },
                { "id": 2, "name": "M", "stock": 0 }
            ],
            "category_id": 7
        });

        let product = normalize_product(&value, 0);
        assert_eq!(product.id, "42");
        assert_eq!(product.slug, "linen-shirt");
        assert_eq!(product.name, "Linen Shirt");
        assert_eq!(product.price, Some(Decimal::from(4500)));
        assert_eq!(product.price_label, "LKR 4,500.00");
        assert_eq!(product.display, PriceDisplay::Priced);
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.colors, vec!["White", "Sand"]);
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[0].sku.as_deref(), Some("LS-S"));
        assert_eq!(product.variants[1].stock, Some(0));
        assert_eq!(product.category_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_normalize_is_total_on_garbage() {
        for value in [json!(null), json!("nonsense"), json!([]), json!({})] {
            let product = normalize_product(&value, 3);
            assert_eq!(product.name, "Item");
            assert!(!product.slug.is_empty());
            assert!(!product.price_label.is_empty());
            assert!(!product.images.is_empty());
            assert_eq!(product.description, "Details coming soon.");
        }
    }

    #[test]
    fn test_unpriced_product_gets_request_label() {
        let product = normalize_product(&json!({ "name": "Sample" }), 0);
        assert_eq!(product.price, None);
        assert_eq!(product.price_label, "Price on request");
    }

    #[test]
    fn test_price_falls_back_to_variant_selling_price() {
        let value = json!({
            "name": "Tunic",
            "variants": [
                { "name": "S", "price": 5200 },
                { "name": "M", "price": 5200, "selling_price": 4800 }
            ]
        });
        let product = normalize_product(&value, 0);
        assert_eq!(product.price, Some(Decimal::from(4800)));
        assert_eq!(product.price_label, "LKR 4,800.00");
    }

    #[test]
    fn test_camel_case_and_nested_keys() {
        let value = json!({
            "product": { "id": "p9", "name": "Wrap Skirt", "title": "ignored" },
            "sellingPrice": "6,250.50",
            "imageUrl": "/img/skirt.jpg"
        });
        let product = normalize_product(&value, 0);
        assert_eq!(product.id, "p9");
        assert_eq!(product.name, "Wrap Skirt");
        assert_eq!(product.price, Some(Decimal::new(625_050, 2)));
        assert_eq!(product.images, vec!["/img/skirt.jpg"]);
    }

    #[test]
    fn test_invalid_currency_falls_back_to_lkr() {
        let value = json!({ "name": "Scarf", "price": 1500, "currency": "rupees" });
        let product = normalize_product(&value, 0);
        assert_eq!(product.price_label, "LKR 1,500.00");
    }

    #[test]
    fn test_normalize_is_total_on_extreme_prices() {
        // The largest representable price string must format, not panic
        let value = json!({ "name": "x", "price": "79228162514264337593543950335" });
        let product = normalize_product(&value, 0);
        assert_eq!(product.price, Some(Decimal::MAX));
        assert_eq!(
            product.price_label,
            "LKR 79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn test_inquiry_only_display_policy() {
        let hidden = normalize_product(
            &json!({ "name": "Custom Saree", "price": 30000, "inquiry_only": true }),
            0,
        );
        assert_eq!(
            hidden.display,
            PriceDisplay::InquiryOnly { show_price: false }
        );
        assert_eq!(hidden.display_price(), "Enquire for price");

        let shown = normalize_product(
            &json!({
                "name": "Custom Saree",
                "price": 30000,
                "inquiry_only": true,
                "show_price_inquiry_mode": true
            }),
            0,
        );
        assert_eq!(shown.display_price(), "LKR 30,000.00");
    }

    #[test]
    fn test_fallback_gallery_rotates_by_position() {
        let first = fallback_gallery(0);
        let second = fallback_gallery(1);
        assert_eq!(first.len(), PLACEHOLDER_GALLERY.len());
        assert_ne!(first[0], second[0]);
        // Position wraps around the fixed set
        assert_eq!(first, fallback_gallery(PLACEHOLDER_GALLERY.len()));
    }

    #[test]
    fn test_variants_from_delimited_size_string() {
        let product = normalize_product(&json!({ "name": "Tee", "sizes": "S, M, L" }), 0);
        let names: Vec<&str> = product.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_normalize_product_list_shapes() {
        let wrapped = json!({ "products": [{ "name": "A" }, { "name": "B" }] });
        assert_eq!(normalize_product_list(&wrapped).len(), 2);

        let enveloped = json!({ "data": { "items": [{ "name": "A" }] } });
        assert_eq!(normalize_product_list(&enveloped).len(), 1);

        let bare = json!([{ "name": "A" }]);
        assert_eq!(normalize_product_list(&bare).len(), 1);

        assert!(normalize_product_list(&json!({})).is_empty());
    }

    #[test]
    fn test_normalize_product_detail_unwraps() {
        let value = json!({ "product": { "name": "Kaftan", "slug": "kaftan" } });
        let product = normalize_product_detail(&value);
        assert_eq!(product.slug, "kaftan");
    }

    #[test]
    fn test_slug_derived_from_name() {
        let product = normalize_product(&json!({ "name": "Silk Blend Sarong!" }), 0);
        assert_eq!(product.slug, "silk-blend-sarong");
        // The id falls back to the slug
        assert_eq!(product.id, "silk-blend-sarong");
    }
}
