//! # Raw CMS Records
//!
//! The records returned by a content backend, as close to the wire shape as the
//! rest of the crate needs. All records are tolerant of extra and missing fields:
//! unknown keys are kept in `extra`, missing keys take their defaults.

use crate::seo::YoastSeo;
use crate::serde_util::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A rendered-HTML field (`{"rendered": "..."}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rendered {
    pub rendered: String,
}

impl From<&str> for Rendered {
    fn from(rendered: &str) -> Self {
        Self {
            rendered: rendered.to_string(),
        }
    }
}

/// One content item (post, page, property, developer or guide).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawContentItem {
    pub id: u64,
    pub slug: String,
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub content: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub excerpt: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub featured_media: u64,
    #[serde(deserialize_with = "lenient")]
    pub author: u64,
    #[serde(deserialize_with = "lenient")]
    pub categories: Vec<u64>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<u64>,
    #[serde(
        rename = "_embedded",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub embedded: Option<Embedded>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub yoast_head_json: Option<YoastSeo>,
    /// Everything else: custom taxonomy term lists, ACF fields, links.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawContentItem {
    /// The term ids this item carries for a taxonomy, or `None` when the item
    /// has no such term list at all.
    pub fn term_ids(&self, taxonomy: &str) -> Option<Vec<u64>> {
        match taxonomy {
            "categories" => Some(self.categories.clone()),
            "tags" => Some(self.tags.clone()),
            other => match self.extra.get(other)? {
                Value::Array(values) => Some(values.iter().filter_map(Value::as_u64).collect()),
                _ => None,
            },
        }
    }

    /// The embedded featured media entry, when the item was fetched with `_embed`.
    pub fn embedded_featured_media(&self) -> Option<&Media> {
        self.embedded
            .as_ref()?
            .featured_media
            .iter()
            .find(|media| !media.source_url.is_empty())
    }

    /// The embedded author entry, when the item was fetched with `_embed`.
    pub fn embedded_author(&self) -> Option<&Author> {
        self.embedded.as_ref()?.author.first()
    }
}

/// The `_embedded` expansion of a content item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Embedded {
    #[serde(deserialize_with = "lenient")]
    pub author: Vec<Author>,
    #[serde(rename = "wp:featuredmedia", deserialize_with = "lenient")]
    pub featured_media: Vec<Media>,
    #[serde(rename = "wp:term", deserialize_with = "lenient")]
    pub terms: Vec<Vec<Term>>,
}

/// A media library entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Media {
    pub id: u64,
    pub source_url: String,
    pub alt_text: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub media_details: Option<MediaDetails>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MediaDetails {
    pub width: u32,
    pub height: u32,
}

/// A user record as exposed by the CMS.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub avatar_urls: Map<String, Value>,
}

/// A taxonomy term (category, tag or custom taxonomy).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Term {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    pub description: String,
    pub count: u64,
    pub parent: u64,
}

/// The content collections served by both backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Pages,
    Properties,
    Developers,
    Guides,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Posts,
        Collection::Pages,
        Collection::Properties,
        Collection::Developers,
        Collection::Guides,
    ];

    /// The REST base of the collection, which is also its key in a snapshot document.
    pub fn rest_base(&self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::Pages => "pages",
            Collection::Properties => "properties",
            Collection::Developers => "developers",
            Collection::Guides => "guides",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rest_base())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.rest_base() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown collection: {s}"))
    }
}

/// Taxonomies whose terms can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Taxonomy {
    Categories,
    Tags,
}

impl Taxonomy {
    pub fn rest_base(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "categories",
            Taxonomy::Tags => "tags",
        }
    }
}
