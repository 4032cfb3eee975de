use super::{pick, OgArticle, OgImage, OpenGraph, Robots, SeoFallback, SeoNormalizer, SeoRecord, Twitter};
use crate::constants::{DEFAULT_OG_TYPE, DEFAULT_TWITTER_CARD};
use crate::serde_util::{lenient, lenient_string};
use serde::Deserialize;
use serde_json::Value;

/// The flat SEO payload served by the SEO enrichment endpoint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankMathSeo {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub canonical: Option<String>,
    /// Directive tokens such as `noindex` or `nofollow`.
    #[serde(deserialize_with = "lenient")]
    pub robots: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_image: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_locale: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub og_site_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_card: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_image: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_creator: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_site: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub article_published_time: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub article_modified_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub article_author: Option<ArticleAuthor>,
    #[serde(deserialize_with = "lenient")]
    pub schema: Option<Value>,
}

/// The nested author object of a RankMath article payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArticleAuthor {
    pub name: String,
    pub url: Option<String>,
}

impl RankMathSeo {
    fn robots(&self) -> Option<Robots> {
        let tokens: Vec<String> = self
            .robots
            .as_ref()?
            .iter()
            .map(|token| token.trim().to_lowercase())
            .collect();
        let has = |token: &str| tokens.iter().any(|t| t == token);

        Some(Robots {
            index: Some(!has("noindex")),
            follow: Some(!has("nofollow")),
            noarchive: Some(has("noarchive")),
            nosnippet: Some(has("nosnippet")),
            noimageindex: Some(has("noimageindex")),
            ..Default::default()
        })
    }

    fn article(&self) -> Option<OgArticle> {
        let author = self
            .article_author
            .as_ref()
            .map(|a| a.name.clone())
            .filter(|name| !name.trim().is_empty());
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
}

impl SeoNormalizer {
    /// Normalizes a RankMath payload. `None` builds the record from the fallback.
    pub fn from_rank_math(
        &self,
        payload: Option<&RankMathSeo>,
        fallback: Option<&SeoFallback>,
    ) -> SeoRecord {
        let Some(seo) = payload else {
            return self.from_fallback(fallback);
        };
        let empty = SeoFallback::default();
        let fb = fallback.unwrap_or(&empty);
        let site = self.identity();

        let title = pick([seo.title.as_deref(), fb.title()]).unwrap_or(&site.site_name);
        let description = pick([seo.description.as_deref(), fb.description()]).unwrap_or_default();
        let canonical = pick([seo.canonical.as_deref(), fb.canonical()]).unwrap_or(&site.site_url);

        let og_title = pick([
            seo.og_title.as_deref(),
            seo.title.as_deref(),
            fb.og_str(|og| og.title.as_ref()),
        ])
        .unwrap_or(&site.site_name);
        let og_description = pick([
            seo.og_description.as_deref(),
            seo.description.as_deref(),
            fb.og_str(|og| og.description.as_ref()),
        ])
        .unwrap_or(description);
        let og_url = pick([
            seo.og_url.as_deref(),
            seo.canonical.as_deref(),
            fb.og_str(|og| og.url.as_ref()),
        ])
        .unwrap_or(&site.site_url);

        let images = match pick([seo.og_image.as_deref()]) {
            Some(url) => Some(vec![OgImage {
                url: url.to_string(),
                width: None,
                height: None,
                alt: pick([seo.og_title.as_deref(), seo.title.as_deref()]).map(str::to_string),
            }]),
            None => fb.og_images(),
        };

        let open_graph = OpenGraph {
            title: og_title.to_string(),
            description: og_description.to_string(),
            url: og_url.to_string(),
            site_name: pick([
                seo.og_site_name.as_deref(),
                fb.og_str(|og| og.site_name.as_ref()),
            ])
            .unwrap_or(&site.site_name)
            .to_string(),
            images,
            og_type: pick([seo.og_type.as_deref(), fb.og_str(|og| og.og_type.as_ref())])
                .unwrap_or(DEFAULT_OG_TYPE)
                .to_string(),
            locale: pick([seo.og_locale.as_deref(), fb.og_str(|og| og.locale.as_ref())])
                .unwrap_or(&site.locale)
                .to_string(),
            article: seo.article().or_else(|| fb.og_article()),
        };

        let twitter = Twitter {
            card_type: Some(
                pick([
                    seo.twitter_card.as_deref(),
                    fb.twitter_str(|t| t.card_type.as_ref()),
                ])
                .unwrap_or(DEFAULT_TWITTER_CARD)
                .to_string(),
            ),
            title: pick([
                seo.twitter_title.as_deref(),
                seo.og_title.as_deref(),
                seo.title.as_deref(),
                fb.twitter_str(|t| t.title.as_ref()),
            ])
            .map(str::to_string),
            description: pick([
                seo.twitter_description.as_deref(),
                seo.og_description.as_deref(),
                seo.description.as_deref(),
                fb.twitter_str(|t| t.description.as_ref()),
            ])
            .map(str::to_string),
            image: pick([
                seo.twitter_image.as_deref(),
                seo.og_image.as_deref(),
                fb.twitter_str(|t| t.image.as_ref()),
            ])
            .map(str::to_string),
            creator: pick([
                seo.twitter_creator.as_deref(),
                fb.twitter_str(|t| t.creator.as_ref()),
            ])
            .map(str::to_string),
            site: pick([
                seo.twitter_site.as_deref(),
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
            robots: seo.robots().or_else(|| fb.robots.clone()),
            json_ld: seo
                .schema
                .clone()
                .filter(|schema| !schema.is_null())
                .or_else(|| fb.json_ld.clone()),
        }
    }
}
