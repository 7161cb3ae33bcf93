//! Collection and category payload normalization.
//!
//! Fallback names are positional (`"Collection N"`, `"Category N"`); ids
//! fall back to the slug so every record stays addressable.

use serde_json::Value;

use crate::types::{Category, Collection};

use super::{derived_slug, detail_payload, list_payload, pick_string};

const ID_KEYS: &[&str] = &["id", "collection_id", "collectionId", "category_id", "categoryId"];
const NAME_KEYS: &[&str] = &["name", "title", "label"];
const SLUG_KEYS: &[&str] = &["slug", "handle", "seo_slug"];
const IMAGE_KEYS: &[&str] = &["image", "image_url", "imageUrl", "banner", "thumbnail", "cover"];
const DESCRIPTION_KEYS: &[&str] = &["description", "subtitle", "tagline"];

const COLLECTION_LIST_KEYS: &[&str] =
    &["collections", "data.collections", "items", "data.items", "data"];
const COLLECTION_DETAIL_KEYS: &[&str] = &["collection", "data.collection", "data"];
const CATEGORY_LIST_KEYS: &[&str] =
    &["categories", "data.categories", "items", "data.items", "data"];

/// Normalize one collection record.
#[must_use]
pub fn normalize_collection(value: &Value, position: usize) -> Collection {
    let name =
        pick_string(value, NAME_KEYS).unwrap_or_else(|| format!("Collection {}", position + 1));
    let slug = pick_string(value, SLUG_KEYS)
        .unwrap_or_else(|| derived_slug(&name, "collection", position));
    Collection {
        id: pick_string(value, ID_KEYS).unwrap_or_else(|| slug.clone()),
        name,
        slug,
        image: pick_string(value, IMAGE_KEYS),
        description: pick_string(value, DESCRIPTION_KEYS),
    }
}

/// Normalize a collection listing response.
#[must_use]
pub fn normalize_collection_list(value: &Value) -> Vec<Collection> {
    list_payload(value, COLLECTION_LIST_KEYS)
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_collection(item, position))
        .collect()
}

/// Normalize a single-collection detail response.
#[must_use]
pub fn normalize_collection_detail(value: &Value) -> Collection {
    normalize_collection(detail_payload(value, COLLECTION_DETAIL_KEYS), 0)
}

/// Normalize one category record.
#[must_use]
pub fn normalize_category(value: &Value, position: usize) -> Category {
    let name =
        pick_string(value, NAME_KEYS).unwrap_or_else(|| format!("Category {}", position + 1));
    let slug =
        pick_string(value, SLUG_KEYS).unwrap_or_else(|| derived_slug(&name, "category", position));
    Category {
        id: pick_string(value, ID_KEYS).unwrap_or_else(|| slug.clone()),
        name,
        slug,
        image: pick_string(value, IMAGE_KEYS),
        description: pick_string(value, DESCRIPTION_KEYS),
    }
}

/// Normalize a category listing response.
#[must_use]
pub fn normalize_category_list(value: &Value) -> Vec<Category> {
    list_payload(value, CATEGORY_LIST_KEYS)
        .iter()
        .enumerate()
        .map(|(position, item)| normalize_category(item, position))
        .collect()
}
