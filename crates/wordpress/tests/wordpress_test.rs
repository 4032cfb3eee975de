//! # Live Backend Tests
//!
//! Exercises `WordPressRepository` against a mock CMS: query composition,
//! not-found handling, enrichment outcomes, pagination and the revalidation cache.

use anyhow::Result;
use propcontent::{
    Collection, ContentError, ContentFilter, ContentRepository, Enrichment, SiteConfig, Taxonomy,
};
use propcontent_test_utils::{fixtures, setup_tracing, MockCms};
use propcontent_wordpress::WordPressRepository;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn repo_for(cms: &MockCms) -> WordPressRepository {
    let config = SiteConfig::default().with_api_base_url(cms.api_base_url());
    WordPressRepository::new(&config).unwrap()
}

#[tokio::test]
async fn test_get_all_sends_repeated_params_and_embed() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/properties"))
        .and(query_param("property_type", "4"))
        .and(query_param("property_type", "5"))
        .and(query_param("_embed", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::property_json()])))
        .expect(1)
        .mount(&cms.server)
        .await;
    let repo = repo_for(&cms);
    let filter = ContentFilter::new()
        .params("property_type", [4, 5])
        .with_embed();

    // --- 2. Act ---
    let items = repo.get_all(Collection::Properties, &filter).await?;

    // --- 3. Assert ---
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].slug, "marina-heights");
    assert_eq!(items[0].term_ids("property_type"), Some(vec![4]));
    Ok(())
}

#[tokio::test]
async fn test_get_by_slug_takes_first_of_one_item_list() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/developers"))
        .and(query_param("slug", "emaar"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::developer_json()])))
        .mount(&cms.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/developers"))
        .and(query_param("slug", "nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&cms.server)
        .await;
    let repo = repo_for(&cms);

    // --- 2. Act ---
    let found = repo.get_by_slug(Collection::Developers, "emaar").await?;
    let missing = repo.get_by_slug(Collection::Developers, "nobody").await?;

    // --- 3. Assert ---
    assert_eq!(found.map(|item| item.id), Some(201));
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_get_by_id_treats_404_as_absent() -> Result<()> {
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_item("pages", 301, fixtures::home_page_json()).await;
    cms.mount_status("wp/v2/pages/999", 404).await;
    let repo = repo_for(&cms);

    let page = repo.get_by_id(Collection::Pages, 301).await?;
    let missing = repo.get_by_id(Collection::Pages, 999).await?;

    assert_eq!(page.unwrap().slug, "home");
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_remote_fetch_error() {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_status("wp/v2/posts", 503).await;
    cms.mount_status("wp/v2/guides/7", 500).await;
    let repo = repo_for(&cms);

    // --- 2. Act ---
    let list = repo.get_all(Collection::Posts, &ContentFilter::new()).await;
    let by_id = repo.get_by_id(Collection::Guides, 7).await;

    // --- 3. Assert ---
    assert_eq!(list.unwrap_err().status(), Some(503));
    match by_id {
        Err(ContentError::RemoteFetch { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/wp-json/wp/v2/guides/7"));
        }
        other => panic!("Expected RemoteFetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    setup_tracing();
    let cms = MockCms::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&cms.server)
        .await;
    let repo = repo_for(&cms);

    let result = repo.get_all(Collection::Posts, &ContentFilter::new()).await;

    assert!(matches!(result, Err(ContentError::Decode(_))));
}

#[tokio::test]
async fn test_seo_payload_outcomes() {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_seo(101, fixtures::rank_math_json()).await;
    cms.mount_status("rankmath/v1/seo/102", 404).await;
    cms.mount_status("rankmath/v1/seo/103", 500).await;
    let repo = repo_for(&cms);

    // --- 2. Act ---
    let found = repo.seo_payload(101).await;
    let absent = repo.seo_payload(102).await;
    let failed = repo.seo_payload(103).await;

    // --- 3. Assert ---
    match found {
        Enrichment::Found(payload) => {
            assert_eq!(payload.title.as_deref(), Some("Marina Heights | Prime Estates"))
        }
        other => panic!("Expected a payload, got {other:?}"),
    }
    assert_eq!(absent, Enrichment::Absent);
    assert!(matches!(
        failed,
        Enrichment::Failed(ContentError::RemoteFetch { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_seo_payload_null_body_is_absent() {
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_seo(5, serde_json::Value::Null).await;
    let repo = repo_for(&cms);

    assert_eq!(repo.seo_payload(5).await, Enrichment::Absent);
}

#[tokio::test]
async fn test_media_and_author_lookups() -> Result<()> {
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_item("media", 55, fixtures::media_json(55)).await;
    cms.mount_item("users", 1, json!({"id": 1, "name": "Sara", "slug": "sara"}))
        .await;
    cms.mount_status("wp/v2/media/56", 404).await;
    let repo = repo_for(&cms);

    let media = repo.media(55).await;
    let author = repo.get_author(1).await?;

    assert!(media.is_found());
    assert_eq!(repo.media(56).await, Enrichment::Absent);
    assert_eq!(author.unwrap().name, "Sara");
    Ok(())
}

#[tokio::test]
async fn test_fetch_all_walks_every_page() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    cms.mount_list_page("posts", 1, json!([fixtures::item_json(1, "a", "A", "")]), 2)
        .await;
    cms.mount_list_page("posts", 2, json!([fixtures::item_json(2, "b", "B", "")]), 2)
        .await;
    cms.mount_list(
        "categories",
        json!([fixtures::category_json(1, "news"), fixtures::category_json(2, "guides")]),
        1,
    )
    .await;
    let repo = repo_for(&cms);

    // --- 2. Act ---
    let posts = repo.fetch_all(Collection::Posts).await?;
    let categories = repo.fetch_all_terms(Taxonomy::Categories).await?;

    // --- 3. Assert ---
    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a", "b"]);
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].slug, "guides");
    Ok(())
}

#[tokio::test]
async fn test_responses_are_reused_within_revalidation_window() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let cms = MockCms::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/pages/301"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::home_page_json()))
        .expect(1)
        .mount(&cms.server)
        .await;
    let repo = repo_for(&cms);

    // --- 2. Act ---
    let first = repo.get_by_id(Collection::Pages, 301).await?;
    let second = repo.get_by_id(Collection::Pages, 301).await?;

    // --- 3. Assert ---
    assert_eq!(first, second);
    cms.server.verify().await;
    Ok(())
}

#[tokio::test]
async fn test_zero_window_disables_reuse() -> Result<()> {
    setup_tracing();
    let cms = MockCms::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/pages/301"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::home_page_json()))
        .expect(2)
        .mount(&cms.server)
        .await;
    let mut config = SiteConfig::default().with_api_base_url(cms.api_base_url());
    config.revalidate_secs = 0;
    let repo = WordPressRepository::new(&config)?;

    repo.get_by_id(Collection::Pages, 301).await?;
    repo.get_by_id(Collection::Pages, 301).await?;

    cms.server.verify().await;
    Ok(())
}
