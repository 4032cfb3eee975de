//! # Content Repository
//!
//! The read-only contract every content backend implements. Primary fetches
//! return `Result` and surface failures; enrichment lookups return an
//! [`Enrichment`] and never fail the caller.

use crate::errors::ContentError;
use crate::filter::ContentFilter;
use crate::seo::RankMathSeo;
use crate::types::{Collection, Media, RawContentItem, Taxonomy, Term};
use async_trait::async_trait;
use tracing::warn;

/// The outcome of a best-effort enrichment lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment<T> {
    Found(T),
    Absent,
    Failed(ContentError),
}

impl<T> Enrichment<T> {
    pub fn from_result(result: Result<Option<T>, ContentError>) -> Self {
        match result {
            Ok(Some(value)) => Enrichment::Found(value),
            Ok(None) => Enrichment::Absent,
            Err(e) => Enrichment::Failed(e),
        }
    }

    /// Resolves the lookup to an option, logging a failure instead of surfacing it.
    pub fn settle(self, what: &str, id: u64) -> Option<T> {
        match self {
            Enrichment::Found(value) => Some(value),
            Enrichment::Absent => None,
            Enrichment::Failed(e) => {
                warn!("{what} lookup for {id} failed, continuing without it: {e}");
                None
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Enrichment::Found(_))
    }
}

/// A generic trait that defines the read contract of a content backend.
///
/// The live REST backend and the static snapshot backend both implement it, so
/// callers can swap one for the other without touching parsing or rendering.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists a collection, passing the filter through to the backend.
    async fn get_all(
        &self,
        collection: Collection,
        filter: &ContentFilter,
    ) -> Result<Vec<RawContentItem>, ContentError>;

    async fn get_by_id(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<RawContentItem>, ContentError>;

    async fn get_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<RawContentItem>, ContentError>;

    async fn get_terms(
        &self,
        taxonomy: Taxonomy,
        filter: &ContentFilter,
    ) -> Result<Vec<Term>, ContentError>;

    /// Looks up the SEO payload attached to a content id.
    async fn seo_payload(&self, _id: u64) -> Enrichment<RankMathSeo> {
        Enrichment::Absent
    }

    /// Looks up a media library entry.
    async fn media(&self, _id: u64) -> Enrichment<Media> {
        Enrichment::Absent
    }
}

/// One collection of a repository, exposing the per-collection contract.
pub struct CollectionView<'a> {
    repo: &'a dyn ContentRepository,
    collection: Collection,
}

impl<'a> CollectionView<'a> {
    pub fn new(repo: &'a dyn ContentRepository, collection: Collection) -> Self {
        Self { repo, collection }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub async fn get_all(
        &self,
        filter: Option<&ContentFilter>,
    ) -> Result<Vec<RawContentItem>, ContentError> {
        let default_filter = ContentFilter::default();
        self.repo
            .get_all(self.collection, filter.unwrap_or(&default_filter))
            .await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<RawContentItem>, ContentError> {
        self.repo.get_by_id(self.collection, id).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<RawContentItem>, ContentError> {
        self.repo.get_by_slug(self.collection, slug).await
    }
}
