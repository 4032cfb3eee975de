//! Plain-text helpers for CMS rendered HTML.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex"));

/// Removes every tag, decodes the handful of entities the block editor emits
/// in plain text and trims the result.
pub fn strip_tags(html: &str) -> String {
    decode_entities(&TAG_RE.replace_all(html, ""))
        .trim()
        .to_string()
}

/// Decodes `&#8217;`, `&lt;`, `&gt;` and `&amp;`. `&amp;` goes last so an
/// escaped entity such as `&amp;lt;` decodes once, to `&lt;`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&#8217;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
