//! # Command Handlers
//!
//! Each handler returns the JSON document to print, or `None` when the
//! requested primary content does not exist.

use anyhow::Result;
use chrono::Utc;
use propcontent::{Collection, ContentFacade, SiteConfig, Taxonomy};
use propcontent_snapshot::Snapshot;
use propcontent_wordpress::WordPressRepository;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Reads every collection from the live CMS concurrently and writes the
/// snapshot document to `out`.
pub async fn build_snapshot(site: &SiteConfig, out: &Path) -> Result<Snapshot> {
    let repo = WordPressRepository::new(site)?;
    info!("Building snapshot from {}", site.api_base_url);

    let (posts, pages, categories, properties, developers, guides) = futures::try_join!(
        repo.fetch_all(Collection::Posts),
        repo.fetch_all(Collection::Pages),
        repo.fetch_all_terms(Taxonomy::Categories),
        repo.fetch_all(Collection::Properties),
        repo.fetch_all(Collection::Developers),
        repo.fetch_all(Collection::Guides),
    )?;

    let snapshot = Snapshot {
        posts,
        pages,
        categories,
        properties,
        developers,
        guides,
        fetched_at: Utc::now(),
    };
    snapshot.save(out)?;
    Ok(snapshot)
}

/// The normalized SEO record of one item.
pub async fn seo(facade: &ContentFacade, collection: Collection, slug: &str) -> Result<Option<Value>> {
    match facade.entry(collection, slug, None).await? {
        Some(entry) => Ok(Some(serde_json::to_value(&entry.seo)?)),
        None => Ok(None),
    }
}

/// The parsed micro-content of one item.
pub async fn micro(
    facade: &ContentFacade,
    collection: Collection,
    slug: &str,
) -> Result<Option<Value>> {
    match facade.entry(collection, slug, None).await? {
        Some(entry) => Ok(Some(serde_json::to_value(&entry.micro)?)),
        None => Ok(None),
    }
}

/// The featured entries listed on a page.
pub async fn featured(facade: &ContentFacade, page_slug: &str) -> Result<Option<Value>> {
    match facade.featured(page_slug).await? {
        Some(entries) => Ok(Some(serde_json::to_value(&entries)?)),
        None => Ok(None),
    }
}
