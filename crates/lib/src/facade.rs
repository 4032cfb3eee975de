//! # Content Facade
//!
//! Glues a repository to the normalizers: fetches primary content, settles
//! enrichment lookups, and hands renderers finished records.

use crate::config::SiteIdentity;
use crate::errors::ContentError;
use crate::filter::ContentFilter;
use crate::markup::{
    parse_featured_list, parse_micro_content, strip_tags, ContentProfile, FeaturedEntry,
    ParsedMicroContent,
};
use crate::repository::{CollectionView, ContentRepository};
use crate::seo::{SeoFallback, SeoNormalizer, SeoRecord, SeoSource};
use crate::types::{Collection, Media, RawContentItem, Taxonomy, Term};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a renderer needs for one content page.
#[derive(Debug, Clone, Serialize)]
pub struct ContentEntry {
    pub item: RawContentItem,
    pub seo: SeoRecord,
    pub micro: ParsedMicroContent,
}

#[derive(Clone)]
pub struct ContentFacade {
    repo: Arc<dyn ContentRepository>,
    normalizer: SeoNormalizer,
}

impl ContentFacade {
    pub fn new(repo: Arc<dyn ContentRepository>, identity: SiteIdentity) -> Self {
        Self {
            repo,
            normalizer: SeoNormalizer::new(identity),
        }
    }

    pub fn repository(&self) -> &dyn ContentRepository {
        self.repo.as_ref()
    }

    pub fn normalizer(&self) -> &SeoNormalizer {
        &self.normalizer
    }

    pub fn collection(&self, collection: Collection) -> CollectionView<'_> {
        CollectionView::new(self.repo.as_ref(), collection)
    }

    pub fn posts(&self) -> CollectionView<'_> {
        self.collection(Collection::Posts)
    }

    pub fn pages(&self) -> CollectionView<'_> {
        self.collection(Collection::Pages)
    }

    pub fn properties(&self) -> CollectionView<'_> {
        self.collection(Collection::Properties)
    }

    pub fn developers(&self) -> CollectionView<'_> {
        self.collection(Collection::Developers)
    }

    pub fn guides(&self) -> CollectionView<'_> {
        self.collection(Collection::Guides)
    }

    pub async fn categories(&self) -> Result<Vec<Term>, ContentError> {
        self.repo
            .get_terms(Taxonomy::Categories, &ContentFilter::default())
            .await
    }

    /// Picks the SEO payload for an item: the enrichment endpoint first, then the
    /// Yoast payload embedded on the item.
    pub async fn seo_source(&self, item: &RawContentItem) -> SeoSource {
        if let Some(payload) = self.repo.seo_payload(item.id).await.settle("SEO", item.id) {
            return SeoSource::RankMath(payload);
        }
        match &item.yoast_head_json {
            Some(yoast) => SeoSource::Yoast(yoast.clone()),
            None => {
                debug!("No SEO payload for content {}, using fallback.", item.id);
                SeoSource::Absent
            }
        }
    }

    /// The normalized SEO record for an item. Without a caller fallback, one is
    /// derived from the item's own title and excerpt.
    pub async fn seo_for(&self, item: &RawContentItem, fallback: Option<&SeoFallback>) -> SeoRecord {
        let source = self.seo_source(item).await;
        match fallback {
            Some(fallback) => self.normalizer.normalize(&source, Some(fallback)),
            None => {
                let derived = item_fallback(item);
                self.normalizer.normalize(&source, Some(&derived))
            }
        }
    }

    /// The featured image of an item, from the embedded expansion when present,
    /// otherwise from a media lookup.
    pub async fn featured_image(&self, item: &RawContentItem) -> Option<Media> {
        if let Some(media) = item.embedded_featured_media() {
            return Some(media.clone());
        }
        if item.featured_media == 0 {
            return None;
        }
        self.repo
            .media(item.featured_media)
            .await
            .settle("Media", item.featured_media)
    }

    /// Loads one item by slug with its SEO record and parsed micro-content.
    /// `Ok(None)` means the item does not exist.
    pub async fn entry(
        &self,
        collection: Collection,
        slug: &str,
        fallback: Option<&SeoFallback>,
    ) -> Result<Option<ContentEntry>, ContentError> {
        let Some(item) = self.repo.get_by_slug(collection, slug).await? else {
            info!("No {collection} found with slug '{slug}'.");
            return Ok(None);
        };

        let profile = match collection {
            Collection::Developers => ContentProfile::Developer,
            _ => ContentProfile::Property,
        };
        let micro = parse_micro_content(&item.content.rendered, profile);
        let seo = self.seo_for(&item, fallback).await;

        Ok(Some(ContentEntry { item, seo, micro }))
    }

    /// The curated carousel entries of a page. `Ok(None)` means the page does not exist.
    pub async fn featured(&self, page_slug: &str) -> Result<Option<Vec<FeaturedEntry>>, ContentError> {
        let page = self.repo.get_by_slug(Collection::Pages, page_slug).await?;
        Ok(page.map(|page| parse_featured_list(&page.content.rendered)))
    }
}

/// A fallback built from an item's own rendered title and excerpt.
pub fn item_fallback(item: &RawContentItem) -> SeoFallback {
    let title = strip_tags(&item.title.rendered);
    let description = strip_tags(&item.excerpt.rendered);
    SeoFallback {
        title: (!title.is_empty()).then_some(title),
        description: (!description.is_empty()).then_some(description),
        ..Default::default()
    }
}
