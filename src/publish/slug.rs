//! Slug derivation for published items.

/// Used when no page title was generated.
pub const FALLBACK_SLUG: &str = "generated-post";

/// Lowercases `title` and collapses whitespace runs into single hyphens.
///
/// Leading and trailing whitespace is dropped, not turned into hyphens, so
/// `" Title "` gives `title` rather than `-title-`.
///
/// ```
/// use seo_content_rs::publish::derive_slug;
///
/// assert_eq!(derive_slug(Some("Best  Garden Hoses")), "best-garden-hoses");
/// assert_eq!(derive_slug(Some(" Padded ")), "padded");
/// assert_eq!(derive_slug(None), "generated-post");
/// ```
pub fn derive_slug(title: Option<&str>) -> String {
    title
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}
