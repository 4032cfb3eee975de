//! Marker-driven field extraction.
//!
//! Editors tag a payload by placing a paragraph holding a marker such as
//! `HERO_LEFT_IMAGE` right before the block that carries the payload. The first
//! block whose text contains a marker selects the block after it.

use super::blocks::{extract_blocks, Block};
use super::text::strip_tags;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const DEVELOPER_LOGO: &str = "DEVELOPER_LOGO";
pub const HERO_LEFT_IMAGE: &str = "HERO_LEFT_IMAGE";
pub const HERO_RIGHT_IMAGE: &str = "HERO_RIGHT_IMAGE";
pub const OVERVIEW: &str = "OVERVIEW:";
pub const OVERVIEW_LIST: &str = "OVERVIEW_LIST:";

static IMG_SRC_ALT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*?\ssrc="([^"]*)"[^>]*?\salt="([^"]*)""#)
        .expect("Failed to compile img src/alt regex")
});

static IMG_ALT_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*?\salt="([^"]*)"[^>]*?\ssrc="([^"]*)""#)
        .expect("Failed to compile img alt/src regex")
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<li\b[^>]*>(.*?)</li>").expect("Failed to compile list item regex")
});

/// Which page type the HTML belongs to. Only property pages treat their first
/// block as a subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentProfile {
    #[default]
    Property,
    Developer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMicroContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_left_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_right_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_list: Option<Vec<OverviewItem>>,
}

impl ParsedMicroContent {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewItem {
    pub heading: String,
    pub text: String,
}

/// Parses every known marker out of a content item's rendered HTML.
pub fn parse_micro_content(html: &str, profile: ContentProfile) -> ParsedMicroContent {
    let blocks = extract_blocks(html);

    let subtitle = match profile {
        ContentProfile::Property => blocks
            .first()
            .map(|block| block.text.clone())
            .filter(|text| !text.is_empty()),
        ContentProfile::Developer => None,
    };

    ParsedMicroContent {
        subtitle,
        logo_image: payload_after(&blocks, DEVELOPER_LOGO).and_then(|b| extract_image(&b.html)),
        hero_left_image: payload_after(&blocks, HERO_LEFT_IMAGE).and_then(|b| extract_image(&b.html)),
        hero_right_image: payload_after(&blocks, HERO_RIGHT_IMAGE)
            .and_then(|b| extract_image(&b.html)),
        overview_text: payload_after(&blocks, OVERVIEW)
            .map(|b| b.text.clone())
            .filter(|text| !text.is_empty()),
        overview_list: payload_after(&blocks, OVERVIEW_LIST).and_then(parse_overview_list),
    }
}

/// The block following the first block whose text contains `marker`.
pub fn payload_after<'a>(blocks: &'a [Block], marker: &str) -> Option<&'a Block> {
    let position = blocks.iter().position(|block| block.text.contains(marker))?;
    blocks.get(position + 1)
}

/// The `src` and `alt` of the first `<img>` in `html`, in either attribute order.
pub fn extract_image(html: &str) -> Option<ImageRef> {
    if let Some(caps) = IMG_SRC_ALT_RE.captures(html) {
        return Some(ImageRef {
            src: caps[1].to_string(),
            alt: caps[2].to_string(),
        });
    }
    IMG_ALT_SRC_RE.captures(html).map(|caps| ImageRef {
        src: caps[2].to_string(),
        alt: caps[1].to_string(),
    })
}

/// Splits each `<li>` of a list block on its first `:` into heading and text.
/// Items without a `:` are dropped; a non-list block yields nothing.
pub fn parse_overview_list(block: &Block) -> Option<Vec<OverviewItem>> {
    if !block.is_list() {
        return None;
    }
    let items: Vec<OverviewItem> = LIST_ITEM_RE
        .captures_iter(&block.html)
        .filter_map(|caps| {
            let text = strip_tags(&caps[1]);
            let (heading, rest) = text.split_once(':')?;
            Some(OverviewItem {
                heading: heading.trim().to_string(),
                text: rest.trim().to_string(),
            })
        })
        .collect();
    (!items.is_empty()).then_some(items)
}
