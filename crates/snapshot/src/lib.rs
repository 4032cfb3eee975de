//! # `propcontent-snapshot`: Static Snapshot Backend
//!
//! This crate serves content from a pre-fetched JSON document instead of the
//! live CMS. The document is loaded once at startup and treated as immutable,
//! so the backend is safe for any number of concurrent readers. It implements
//! the `ContentRepository` trait from the core `propcontent` library.

mod query;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use propcontent::{
    Collection, ContentError, ContentFilter, ContentRepository, RawContentItem, Taxonomy, Term,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Custom error types for reading and writing snapshot documents.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse snapshot document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The persisted snapshot document: one array per collection, the category
/// list, and the time the CMS was read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub posts: Vec<RawContentItem>,
    #[serde(default)]
    pub pages: Vec<RawContentItem>,
    #[serde(default)]
    pub categories: Vec<Term>,
    #[serde(default)]
    pub properties: Vec<RawContentItem>,
    #[serde(default)]
    pub developers: Vec<RawContentItem>,
    #[serde(default)]
    pub guides: Vec<RawContentItem>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// An empty snapshot stamped with `fetched_at`.
    pub fn empty(fetched_at: DateTime<Utc>) -> Self {
        Self {
            posts: Vec::new(),
            pages: Vec::new(),
            categories: Vec::new(),
            properties: Vec::new(),
            developers: Vec::new(),
            guides: Vec::new(),
            fetched_at,
        }
    }

    pub fn collection(&self, collection: Collection) -> &[RawContentItem] {
        match collection {
            Collection::Posts => &self.posts,
            Collection::Pages => &self.pages,
            Collection::Properties => &self.properties,
            Collection::Developers => &self.developers,
            Collection::Guides => &self.guides,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        info!(
            "Loaded snapshot from {} (fetched at {}).",
            path.display(),
            snapshot.fetched_at
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!(
            "Wrote snapshot with {} items to {}.",
            Collection::ALL
                .iter()
                .map(|c| self.collection(*c).len())
                .sum::<usize>(),
            path.display()
        );
        Ok(())
    }
}

/// The `ContentRepository` implementation over a loaded [`Snapshot`].
///
/// Reads never fail; the snapshot carries no SEO endpoint payloads or media
/// library, so enrichment lookups are always absent.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    snapshot: Arc<Snapshot>,
}

impl SnapshotRepository {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Loads the document at `path` and wraps it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(Self::new(Arc::new(Snapshot::load(path)?)))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl ContentRepository for SnapshotRepository {
    async fn get_all(
        &self,
        collection: Collection,
        filter: &ContentFilter,
    ) -> Result<Vec<RawContentItem>, ContentError> {
        Ok(query::filter_items(
            self.snapshot.collection(collection),
            filter,
        ))
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<RawContentItem>, ContentError> {
        Ok(self
            .snapshot
            .collection(collection)
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    async fn get_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<RawContentItem>, ContentError> {
        Ok(self
            .snapshot
            .collection(collection)
            .iter()
            .find(|item| item.slug == slug)
            .cloned())
    }

    async fn get_terms(
        &self,
        taxonomy: Taxonomy,
        filter: &ContentFilter,
    ) -> Result<Vec<Term>, ContentError> {
        match taxonomy {
            Taxonomy::Categories => Ok(query::filter_terms(&self.snapshot.categories, filter)),
            Taxonomy::Tags => Ok(Vec::new()),
        }
    }
}
