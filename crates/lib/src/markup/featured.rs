//! Featured-list parsing for the homepage carousel.
//!
//! Editors curate the carousel as a list whose items read
//! `slug : <a href="image-url">...</a>`.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static FEATURED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<li\b[^>]*>([^<]*?):\s*<a\b[^>]*?\bhref="([^"]*)""#)
        .expect("Failed to compile featured item regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedEntry {
    pub slug: String,
    pub image_url: String,
}

/// Parses featured entries in document order. Entries with a blank slug or URL
/// are skipped; duplicate slugs are kept.
pub fn parse_featured_list(html: &str) -> Vec<FeaturedEntry> {
    FEATURED_ITEM_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let slug = caps[1].trim();
            let image_url = caps[2].trim();
            if slug.is_empty() || image_url.is_empty() {
                return None;
            }
            Some(FeaturedEntry {
                slug: slug.to_string(),
                image_url: image_url.to_string(),
            })
        })
        .collect()
}
