//! # SEO Normalizer
//!
//! Maps the two SEO plugin payload shapes the CMS can attach to a content item
//! (the flat "RankMath" shape and the "Yoast" `yoast_head_json` shape), or no
//! payload at all, into one [`SeoRecord`].
//!
//! Every canonical field is resolved through a precedence chain, leftmost
//! non-empty value wins:
//!
//! | Field              | RankMath                                   | Yoast                                    |
//! |--------------------|--------------------------------------------|------------------------------------------|
//! | `title`            | title > fb.title > site name               | title > fb.title > site name             |
//! | `description`      | description > fb.description > ""          | description > fb.description > ""        |
//! | `canonical`        | canonical > fb.canonical > site URL        | canonical > fb.canonical > site URL      |
//! | `og.title`         | og_title > title > fb.og.title > site name | og_title > title > fb.og.title > site name |
//! | `og.url`           | og_url > canonical > fb.og.url > site URL  | og_url > canonical > fb.og.url > site URL |
//! | `og.images`        | og_image (single) > fb.og.images           | og_image[] > fb.og.images                |
//! | `twitter.cardType` | twitter_card > fb > `summary_large_image`  | twitter_card > fb > `summary_large_image` |
//! | `twitter.title`    | twitter_title > og_title > title > fb      | og_title > title > fb                    |
//! | `robots`           | token list                                 | keyed directive map                      |
//! | `jsonLd`           | schema > fb.jsonLd                         | schema > fb.jsonLd                       |
//!
//! The normalizer never fails: absent or malformed sub-fields fall through to the
//! next link of their chain.

mod rank_math;
mod record;
mod yoast;

pub use rank_math::{ArticleAuthor, RankMathSeo};
pub use record::{
    ImagePreview, OgArticle, OgImage, OpenGraph, OpenGraphFallback, Robots, SeoFallback,
    SeoRecord, Twitter,
};
pub use yoast::{YoastImage, YoastRobots, YoastSeo};

use crate::config::SiteIdentity;
use crate::constants::{DEFAULT_OG_TYPE, ROBOTS_NUMERIC_SENTINEL};

/// The SEO payload attached to one content item, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum SeoSource {
    RankMath(RankMathSeo),
    Yoast(YoastSeo),
    Absent,
}

/// Builds [`SeoRecord`]s against a fixed site identity.
#[derive(Debug, Clone, Default)]
pub struct SeoNormalizer {
    identity: SiteIdentity,
}

impl SeoNormalizer {
    pub fn new(identity: SiteIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    /// Dispatches to the mapping function of the payload's variant.
    pub fn normalize(&self, source: &SeoSource, fallback: Option<&SeoFallback>) -> SeoRecord {
        match source {
            SeoSource::RankMath(payload) => self.from_rank_math(Some(payload), fallback),
            SeoSource::Yoast(payload) => self.from_yoast(Some(payload), fallback),
            SeoSource::Absent => self.from_fallback(fallback),
        }
    }

    /// Builds a record from the caller's fallback and the site defaults only.
    pub fn from_fallback(&self, fallback: Option<&SeoFallback>) -> SeoRecord {
        let empty = SeoFallback::default();
        let fb = fallback.unwrap_or(&empty);
        let site = &self.identity;

        let title = pick([fb.title()]).unwrap_or(&site.site_name).to_string();
        let description = pick([fb.description()]).unwrap_or_default().to_string();
        let canonical = pick([fb.canonical()]).unwrap_or(&site.site_url).to_string();

        let open_graph = OpenGraph {
            title: pick([fb.og_str(|og| og.title.as_ref())])
                .unwrap_or(&title)
                .to_string(),
            description: pick([fb.og_str(|og| og.description.as_ref())])
                .unwrap_or(&description)
                .to_string(),
            url: pick([fb.og_str(|og| og.url.as_ref())])
                .unwrap_or(&canonical)
                .to_string(),
            site_name: pick([fb.og_str(|og| og.site_name.as_ref())])
                .unwrap_or(&site.site_name)
                .to_string(),
            images: fb.og_images(),
            og_type: pick([fb.og_str(|og| og.og_type.as_ref())])
                .unwrap_or(DEFAULT_OG_TYPE)
                .to_string(),
            locale: pick([fb.og_str(|og| og.locale.as_ref())])
                .unwrap_or(&site.locale)
                .to_string(),
            article: fb.og_article(),
        };

        SeoRecord {
            title,
            description,
            canonical,
            open_graph,
            twitter: fb.twitter.clone().unwrap_or_default(),
            robots: Some(fb.robots.clone().unwrap_or_default()),
            json_ld: fb.json_ld.clone(),
        }
    }
}

/// Returns the first candidate that is present and not blank.
pub(crate) fn pick<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Parses a `"key:value"` directive into its numeric value, using the sentinel
/// when the directive is absent or not an integer.
pub(crate) fn numeric_directive(value: Option<&str>, prefix: &str) -> i64 {
    value
        .map(|v| directive_value(v, prefix))
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(ROBOTS_NUMERIC_SENTINEL)
}

/// Strips a `"key:"` prefix from a directive, returning the value unchanged when
/// the prefix is missing.
pub(crate) fn directive_value<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_skips_blank_candidates() {
        assert_eq!(pick([None, Some("  "), Some("b"), Some("c")]), Some("b"));
        assert_eq!(pick::<2>([None, Some("")]), None);
    }

    #[test]
    fn test_numeric_directive() {
        assert_eq!(numeric_directive(Some("max-snippet:25"), "max-snippet:"), 25);
        assert_eq!(numeric_directive(Some("max-snippet:-1"), "max-snippet:"), -1);
        assert_eq!(numeric_directive(Some("max-snippet:lots"), "max-snippet:"), -1);
        assert_eq!(numeric_directive(None, "max-snippet:"), -1);
    }

    #[test]
    fn test_from_fallback_without_fallback_uses_site_defaults() {
        let normalizer = SeoNormalizer::default();
        let record = normalizer.from_fallback(None);

        assert_eq!(record.title, crate::constants::DEFAULT_SITE_NAME);
        assert_eq!(record.canonical, crate::constants::DEFAULT_SITE_URL);
        assert_eq!(record.description, "");
        assert_eq!(record.open_graph.og_type, "website");
        assert_eq!(record.open_graph.locale, "en_US");
        assert_eq!(record.open_graph.title, record.title);
        assert_eq!(record.open_graph.url, record.canonical);
        assert_eq!(record.twitter, Twitter::default());
        assert_eq!(record.robots, Some(Robots::default()));
    }
}
