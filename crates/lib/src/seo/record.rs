//! The canonical SEO record handed to renderers, and the partial record callers
//! pass in as a fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The unified SEO record. `title`, `canonical`, `open_graph.title`,
/// `open_graph.url` and `open_graph.site_name` are never empty. `description`
/// may be empty: when no source carries one it defaults to `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeoRecord {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: Twitter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<Robots>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_ld: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<OgImage>>,
    #[serde(rename = "type")]
    pub og_type: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<OgArticle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OgImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OgArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Twitter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Robots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noarchive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nosnippet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noimageindex: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_snippet: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_image_preview: Option<ImagePreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_video_preview: Option<i64>,
}

/// The `max-image-preview` robots directive. Unknown values are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImagePreview {
    None,
    Standard,
    Large,
    Other(String),
}

impl ImagePreview {
    pub fn as_str(&self) -> &str {
        match self {
            ImagePreview::None => "none",
            ImagePreview::Standard => "standard",
            ImagePreview::Large => "large",
            ImagePreview::Other(value) => value,
        }
    }
}

impl From<String> for ImagePreview {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => ImagePreview::None,
            "standard" => ImagePreview::Standard,
            "large" => ImagePreview::Large,
            _ => ImagePreview::Other(value),
        }
    }
}

impl From<ImagePreview> for String {
    fn from(value: ImagePreview) -> Self {
        value.as_str().to_string()
    }
}

/// A partial [`SeoRecord`] supplied by the caller, consulted after the payload's
/// own fields and before the hardcoded defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoFallback {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub open_graph: Option<OpenGraphFallback>,
    pub twitter: Option<Twitter>,
    pub robots: Option<Robots>,
    pub json_ld: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenGraphFallback {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub site_name: Option<String>,
    pub images: Option<Vec<OgImage>>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub locale: Option<String>,
    pub article: Option<OgArticle>,
}

impl SeoFallback {
    /// A fallback carrying only a title and a description, the common case for
    /// listing pages.
    pub fn titled(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub(crate) fn og_str(&self, field: impl Fn(&OpenGraphFallback) -> Option<&String>) -> Option<&str> {
        self.open_graph.as_ref().and_then(field).map(String::as_str)
    }

    pub(crate) fn og_images(&self) -> Option<Vec<OgImage>> {
        self.open_graph.as_ref()?.images.clone()
    }

    pub(crate) fn og_article(&self) -> Option<OgArticle> {
        self.open_graph.as_ref()?.article.clone()
    }

    pub(crate) fn twitter_str(&self, field: impl Fn(&Twitter) -> Option<&String>) -> Option<&str> {
        self.twitter.as_ref().and_then(field).map(String::as_str)
    }
}
