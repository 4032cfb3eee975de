//! # Facade Tests
//!
//! SEO source resolution, enrichment settling and entry assembly over an
//! in-memory repository.

use propcontent::seo::{RankMathSeo, SeoFallback};
use propcontent::{Collection, ContentError, ContentFacade, Enrichment, SiteConfig};
use propcontent_test_utils::{fixtures, setup_tracing, FakeRepository};
use serde_json::json;
use std::sync::Arc;

fn facade_with(repo: &FakeRepository) -> ContentFacade {
    ContentFacade::new(Arc::new(repo.clone()), SiteConfig::default().identity())
}

fn seeded_repo() -> FakeRepository {
    let repo = FakeRepository::new();
    repo.add_item(Collection::Properties, fixtures::item(fixtures::property_json()));
    repo.add_item(Collection::Developers, fixtures::item(fixtures::developer_json()));
    repo.add_item(Collection::Pages, fixtures::item(fixtures::home_page_json()));
    repo
}

#[tokio::test]
async fn test_seo_prefers_enrichment_payload_over_yoast() {
    // --- Arrange ---
    setup_tracing();
    let repo = seeded_repo();
    let payload: RankMathSeo = serde_json::from_value(fixtures::rank_math_json()).unwrap();
    repo.set_seo(101, Enrichment::Found(payload));
    let facade = facade_with(&repo);
    let item = fixtures::item(fixtures::property_json());

    // --- Act ---
    let record = facade.seo_for(&item, None).await;

    // --- Assert ---
    assert_eq!(record.title, "Marina Heights | Prime Estates");
    assert_eq!(record.twitter.card_type.as_deref(), Some("summary"));
}

#[tokio::test]
async fn test_seo_falls_back_to_yoast_when_enrichment_fails() {
    // --- Arrange ---
    setup_tracing();
    let repo = seeded_repo();
    repo.set_seo(
        101,
        Enrichment::Failed(ContentError::RemoteFetch {
            status: 500,
            url: "https://cms/seo/101".to_string(),
        }),
    );
    let facade = facade_with(&repo);
    let item = fixtures::item(fixtures::property_json());

    // --- Act ---
    let record = facade.seo_for(&item, None).await;

    // --- Assert ---
    assert_eq!(record.title, "Marina Heights - Yoast");
    assert_eq!(record.open_graph.locale, "en_GB");
    assert!(repo.get_calls().contains(&"seo_payload:101".to_string()));
}

#[tokio::test]
async fn test_seo_without_any_payload_derives_fallback_from_item() {
    setup_tracing();
    let repo = seeded_repo();
    let facade = facade_with(&repo);
    let item = fixtures::item(fixtures::developer_json());

    let record = facade.seo_for(&item, None).await;

    assert_eq!(record.title, "Emaar");
    assert_eq!(record.description, "About Emaar");
    assert_eq!(record.canonical, SiteConfig::default().site_url);
}

#[tokio::test]
async fn test_caller_fallback_replaces_item_fallback() {
    let repo = seeded_repo();
    let facade = facade_with(&repo);
    let item = fixtures::item(fixtures::developer_json());
    let fallback = SeoFallback::titled("Developers", "All developers");

    let record = facade.seo_for(&item, Some(&fallback)).await;

    assert_eq!(record.title, "Developers");
    assert_eq!(record.description, "All developers");
}

#[tokio::test]
async fn test_entry_assembles_seo_and_micro_content() {
    // --- Arrange ---
    setup_tracing();
    let repo = seeded_repo();
    let facade = facade_with(&repo);

    // --- Act ---
    let entry = facade
        .entry(Collection::Properties, "marina-heights", None)
        .await
        .unwrap()
        .expect("property should exist");

    // --- Assert ---
    assert_eq!(entry.item.id, 101);
    assert_eq!(
        entry.micro.subtitle.as_deref(),
        Some("Waterfront living in Dubai Marina")
    );
    assert_eq!(entry.seo.title, "Marina Heights - Yoast");

    let developer = facade
        .entry(Collection::Developers, "emaar", None)
        .await
        .unwrap()
        .unwrap();
    assert!(developer.micro.subtitle.is_none());
    assert_eq!(developer.micro.logo_image.unwrap().src, "https://cdn.example/logo.png");
}

#[tokio::test]
async fn test_missing_entry_is_none() {
    let repo = seeded_repo();
    let facade = facade_with(&repo);

    let entry = facade
        .entry(Collection::Guides, "missing", None)
        .await
        .unwrap();

    assert!(entry.is_none());
    assert_eq!(repo.get_calls(), vec!["get_by_slug:guides:missing".to_string()]);
}

#[tokio::test]
async fn test_featured_reads_page_content() {
    let repo = seeded_repo();
    let facade = facade_with(&repo);

    let entries = facade.featured("home").await.unwrap().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].slug, "marina-heights");

    assert!(facade.featured("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_featured_image_prefers_embedded_then_lookup() {
    // --- Arrange ---
    setup_tracing();
    let repo = seeded_repo();
    repo.set_media(
        55,
        Enrichment::Found(serde_json::from_value(fixtures::media_json(55)).unwrap()),
    );
    let facade = facade_with(&repo);

    let mut embedded = fixtures::property_json();
    embedded["_embedded"] = json!({
        "wp:featuredmedia": [{"id": 55, "source_url": "https://cdn.example/embedded.jpg"}]
    });

    // --- Act ---
    let from_embed = facade.featured_image(&fixtures::item(embedded)).await;
    let from_lookup = facade
        .featured_image(&fixtures::item(fixtures::property_json()))
        .await;

    // --- Assert ---
    assert_eq!(from_embed.unwrap().source_url, "https://cdn.example/embedded.jpg");
    assert_eq!(from_lookup.unwrap().source_url, "https://cdn.example/media-55.jpg");
    assert_eq!(
        repo.get_calls().iter().filter(|c| c.starts_with("media:")).count(),
        1
    );
}

#[tokio::test]
async fn test_featured_image_lookup_failure_is_swallowed() {
    setup_tracing();
    let repo = seeded_repo();
    repo.set_media(55, Enrichment::Failed(ContentError::Fetch("timeout".to_string())));
    let facade = facade_with(&repo);

    let image = facade
        .featured_image(&fixtures::item(fixtures::property_json()))
        .await;

    assert!(image.is_none());
}

#[tokio::test]
async fn test_collection_views() {
    let repo = seeded_repo();
    let facade = facade_with(&repo);

    let all = facade.properties().get_all(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(facade.developers().get_by_id(201).await.unwrap().is_some());
    assert!(facade.posts().get_by_slug("marina-heights").await.unwrap().is_none());
}
