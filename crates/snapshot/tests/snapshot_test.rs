//! # Snapshot Backend Tests
//!
//! Loads snapshot documents from disk and reads them through the
//! `ContentRepository` contract, including the facade on top.

use anyhow::Result;
use propcontent::{
    Collection, ContentFacade, ContentFilter, ContentRepository, Enrichment, SiteConfig, Taxonomy,
};
use propcontent_snapshot::{Snapshot, SnapshotError, SnapshotRepository};
use propcontent_test_utils::{fixtures, setup_tracing};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_fixture() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(serde_json::to_string(&fixtures::snapshot_json())?.as_bytes())?;
    Ok(file)
}

#[tokio::test]
async fn test_load_and_read_collections() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let file = write_fixture()?;

    // --- 2. Act ---
    let repo = SnapshotRepository::load(file.path())?;
    let properties = repo
        .get_all(Collection::Properties, &ContentFilter::new())
        .await?;
    let guides = repo.get_all(Collection::Guides, &ContentFilter::new()).await?;
    let home = repo.get_by_slug(Collection::Pages, "home").await?;
    let developer = repo.get_by_id(Collection::Developers, 201).await?;
    let missing = repo.get_by_id(Collection::Developers, 999).await?;

    // --- 3. Assert ---
    assert_eq!(properties.len(), 2);
    assert!(guides.is_empty());
    assert_eq!(home.unwrap().id, 301);
    assert_eq!(developer.unwrap().slug, "emaar");
    assert!(missing.is_none());
    assert_eq!(repo.snapshot().fetched_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    Ok(())
}

#[tokio::test]
async fn test_filters_are_interpreted_in_memory() -> Result<()> {
    setup_tracing();
    let file = write_fixture()?;
    let repo = SnapshotRepository::load(file.path())?;

    let by_status = repo
        .get_all(Collection::Properties, &ContentFilter::new().param("status", "draft"))
        .await?;
    let by_taxonomy = repo
        .get_all(
            Collection::Properties,
            &ContentFilter::new().params("property_type", [4]),
        )
        .await?;
    let excluded = repo
        .get_all(Collection::Properties, &ContentFilter::new().param("exclude", "101,999"))
        .await?;
    let searched = repo
        .get_all(Collection::Posts, &ContentFilter::new().param("search", "outlook"))
        .await?;
    let with_unknown = repo
        .get_all(
            Collection::Properties,
            &ContentFilter::new().param("orderby", "title").with_embed(),
        )
        .await?;

    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].slug, "palm-villas");
    assert_eq!(by_taxonomy.len(), 1);
    assert_eq!(by_taxonomy[0].id, 101);
    assert_eq!(excluded.len(), 1);
    assert_eq!(excluded[0].id, 102);
    assert_eq!(searched.len(), 1);
    assert_eq!(with_unknown.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_terms_and_enrichment() -> Result<()> {
    setup_tracing();
    let file = write_fixture()?;
    let repo = SnapshotRepository::load(file.path())?;

    let categories = repo
        .get_terms(Taxonomy::Categories, &ContentFilter::new())
        .await?;
    let guides = repo
        .get_terms(Taxonomy::Categories, &ContentFilter::new().param("slug", "guides"))
        .await?;
    let tags = repo.get_terms(Taxonomy::Tags, &ContentFilter::new()).await?;

    assert_eq!(categories.len(), 2);
    assert_eq!(guides[0].id, 2);
    assert!(tags.is_empty());
    assert_eq!(repo.seo_payload(101).await, Enrichment::Absent);
    assert_eq!(repo.media(55).await, Enrichment::Absent);
    Ok(())
}

#[tokio::test]
async fn test_facade_over_snapshot_uses_embedded_yoast() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let file = write_fixture()?;
    let repo = SnapshotRepository::load(file.path())?;
    let facade = ContentFacade::new(Arc::new(repo), SiteConfig::default().identity());

    // --- 2. Act ---
    let entry = facade
        .entry(Collection::Properties, "marina-heights", None)
        .await?
        .expect("fixture property should be present");
    let featured = facade.featured("home").await?.unwrap_or_default();

    // --- 3. Assert ---
    assert_eq!(entry.seo.title, "Marina Heights - Yoast");
    assert_eq!(entry.micro.overview_list.map(|l| l.len()), Some(2));
    assert_eq!(featured.len(), 2);
    Ok(())
}

#[test]
fn test_save_then_load() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let original: Snapshot = serde_json::from_value(fixtures::snapshot_json())?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("snapshot.json");

    // --- 2. Act ---
    original.save(&path)?;
    let reloaded = Snapshot::load(&path)?;

    // --- 3. Assert ---
    assert_eq!(reloaded.fetched_at, original.fetched_at);
    assert_eq!(reloaded.properties.len(), 2);
    assert_eq!(reloaded.properties[0].term_ids("property_type"), Some(vec![4]));
    assert_eq!(
        reloaded.properties[0].content.rendered,
        original.properties[0].content.rendered
    );
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert!(raw.get("fetchedAt").is_some());
    Ok(())
}

#[test]
fn test_load_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let missing = Snapshot::load(dir.path().join("nope.json"));
    assert!(matches!(missing, Err(SnapshotError::Io(_))));

    let mut garbage = NamedTempFile::new()?;
    garbage.write_all(b"{\"posts\": [")?;
    assert!(matches!(
        Snapshot::load(garbage.path()),
        Err(SnapshotError::Parse(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_empty_snapshot() -> Result<()> {
    let repo = SnapshotRepository::new(Arc::new(Snapshot::empty(chrono::Utc::now())));

    for collection in Collection::ALL {
        assert!(repo.get_all(collection, &ContentFilter::new()).await?.is_empty());
        assert!(repo.get_by_slug(collection, "anything").await?.is_none());
    }
    Ok(())
}
