//! URL slug derivation.

/// Derive a URL-safe slug from arbitrary text.
///
/// Lowercases ASCII alphanumerics, collapses every other run of characters
/// into a single `-`, and trims separators from both ends. Used as the
/// fallback when the API omits an item's slug but provides a name.
///
/// ## Examples
///
/// ```
/// use thambili_core::slugify;
///
/// assert_eq!(slugify("King Coconut (Fresh!)"), "king-coconut-fresh");
/// assert_eq!(slugify("  Spice & Herb Mix  "), "spice-herb-mix");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("King Coconut"), "king-coconut");
    }

    #[test]
    fn test_collapses_separator_runs() {
        assert_eq!(slugify("a -- b__c"), "a-b-c");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("--hello--"), "hello");
    }

    #[test]
    fn test_drops_non_ascii() {
        assert_eq!(slugify("thé vert"), "th-vert");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_preserves_digits() {
        assert_eq!(slugify("Pack of 6"), "pack-of-6");
    }
}
