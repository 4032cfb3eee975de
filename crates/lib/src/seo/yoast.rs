use super::{
    directive_value, numeric_directive, pick, ImagePreview, OgArticle, OgImage, OpenGraph, Robots,
    SeoFallback, SeoNormalizer, SeoRecord, Twitter,
};
use crate::constants::{DEFAULT_OG_TYPE, DEFAULT_TWITTER_CARD};
use crate::serde_util::{lenient, lenient_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `yoast_head_json` payload embedded directly on a content item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct YoastSeo {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub robots: Option<YoastRobots>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient")]
    pub og_image: Vec<YoastImage>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub og_site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub article_published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub article_modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub twitter_card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub twitter_creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub twitter_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub schema: Option<Value>,
}

/// Yoast's keyed robots map. Each value repeats its key, e.g. `"max-snippet:25"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct YoastRobots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<String>,
    #[serde(rename = "max-snippet", skip_serializing_if = "Option::is_none")]
    pub max_snippet: Option<String>,
    #[serde(rename = "max-image-preview", skip_serializing_if = "Option::is_none")]
    pub max_image_preview: Option<String>,
    #[serde(rename = "max-video-preview", skip_serializing_if = "Option::is_none")]
    pub max_video_preview: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct YoastImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub height: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl YoastRobots {
    fn to_robots(&self) -> Robots {
        Robots {
            index: self.index.as_deref().map(|v| v.trim() == "index"),
            follow: self.follow.as_deref().map(|v| v.trim() == "follow"),
            max_snippet: Some(numeric_directive(
                self.max_snippet.as_deref(),
                "max-snippet:",
            )),
            max_image_preview: self
                .max_image_preview
                .as_deref()
                .map(|v| ImagePreview::from(directive_value(v, "max-image-preview:").to_string())),
            max_video_preview: Some(numeric_directive(
                self.max_video_preview.as_deref(),
                "max-video-preview:",
            )),
            ..Default::default()
        }
    }
}

impl YoastSeo {
    fn article(&self) -> Option<OgArticle> {
        let author = pick([self.author.as_deref()]).map(str::to_string);
        if self.article_published_time.is_none()
            && self.article_modified_time.is_none()
            && author.is_none()
        {
            return None;
        }
        Some(OgArticle {
            published_time: self.article_published_time.clone(),
            modified_time: self.article_modified_time.clone(),
            author,
        })
    }

    fn images(&self) -> Vec<OgImage> {
        let alt = pick([self.og_title.as_deref(), self.title.as_deref()]).map(str::to_string);
        self.og_image
            .iter()
            .filter(|image| !image.url.trim().is_empty())
            .map(|image| OgImage {
                url: image.url.clone(),
                width: image.width,
                height: image.height,
                alt: alt.clone(),
            })
            .collect()
    }
}

impl SeoNormalizer {
    /// Normalizes a Yoast payload. `None` builds the record from the fallback.
    pub fn from_yoast(&self, payload: Option<&YoastSeo>, fallback: Option<&SeoFallback>) -> SeoRecord {
        let Some(yoast) = payload else {
            return self.from_fallback(fallback);
        };
        let empty = SeoFallback::default();
        let fb = fallback.unwrap_or(&empty);
        let site = self.identity();

        let title = pick([yoast.title.as_deref(), fb.title()]).unwrap_or(&site.site_name);
        let description = pick([yoast.description.as_deref(), fb.description()]).unwrap_or_default();
        let canonical = pick([yoast.canonical.as_deref(), fb.canonical()]).unwrap_or(&site.site_url);

        let images = yoast.images();
        let first_image = images.first().map(|image| image.url.clone());

        let open_graph = OpenGraph {
            title: pick([
                yoast.og_title.as_deref(),
                yoast.title.as_deref(),
                fb.og_str(|og| og.title.as_ref()),
            ])
            .unwrap_or(&site.site_name)
            .to_string(),
            description: pick([
                yoast.og_description.as_deref(),
                yoast.description.as_deref(),
                fb.og_str(|og| og.description.as_ref()),
            ])
            .unwrap_or(description)
            .to_string(),
            url: pick([
                yoast.og_url.as_deref(),
                yoast.canonical.as_deref(),
                fb.og_str(|og| og.url.as_ref()),
            ])
            .unwrap_or(&site.site_url)
            .to_string(),
            site_name: pick([
                yoast.og_site_name.as_deref(),
                fb.og_str(|og| og.site_name.as_ref()),
            ])
            .unwrap_or(&site.site_name)
            .to_string(),
            images: if images.is_empty() {
                fb.og_images()
            } else {
                Some(images)
            },
            og_type: pick([yoast.og_type.as_deref(), fb.og_str(|og| og.og_type.as_ref())])
                .unwrap_or(DEFAULT_OG_TYPE)
                .to_string(),
            locale: pick([yoast.og_locale.as_deref(), fb.og_str(|og| og.locale.as_ref())])
                .unwrap_or(&site.locale)
                .to_string(),
            article: yoast.article().or_else(|| fb.og_article()),
        };

        // Yoast carries no dedicated twitter title/description/image fields.
        let twitter = Twitter {
            card_type: Some(
                pick([
                    yoast.twitter_card.as_deref(),
                    fb.twitter_str(|t| t.card_type.as_ref()),
                ])
                .unwrap_or(DEFAULT_TWITTER_CARD)
                .to_string(),
            ),
            title: pick([
                yoast.og_title.as_deref(),
                yoast.title.as_deref(),
                fb.twitter_str(|t| t.title.as_ref()),
            ])
            .map(str::to_string),
            description: pick([
                yoast.og_description.as_deref(),
                yoast.description.as_deref(),
                fb.twitter_str(|t| t.description.as_ref()),
            ])
            .map(str::to_string),
            image: pick([first_image.as_deref(), fb.twitter_str(|t| t.image.as_ref())])
                .map(str::to_string),
            creator: pick([
                yoast.twitter_creator.as_deref(),
                fb.twitter_str(|t| t.creator.as_ref()),
            ])
            .map(str::to_string),
            site: pick([
                yoast.twitter_site.as_deref(),
                fb.twitter_str(|t| t.site.as_ref()),
            ])
            .map(str::to_string),
        };

        SeoRecord {
            title: title.to_string(),
            description: description.to_string(),
            canonical: canonical.to_string(),
            open_graph,
            twitter,
            robots: yoast
                .robots
                .as_ref()
                .map(YoastRobots::to_robots)
                .or_else(|| fb.robots.clone()),
            json_ld: yoast
                .schema
                .clone()
                .filter(|schema| !schema.is_null())
                .or_else(|| fb.json_ld.clone()),
        }
    }
}
