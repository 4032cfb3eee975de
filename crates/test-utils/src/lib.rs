use async_trait::async_trait;
use propcontent::filter::ContentFilter;
use propcontent::seo::RankMathSeo;
use propcontent::{
    Collection, ContentError, ContentRepository, Enrichment, Media, RawContentItem, Taxonomy, Term,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Fixtures ---

pub mod fixtures {
    use super::*;

    /// Rendered HTML of a property page using every marker.
    pub const PROPERTY_HTML: &str = r#"<p>Waterfront living in Dubai Marina</p>
<p>HERO_LEFT_IMAGE</p>
<figure class="wp-block-image size-large"><img src="https://cdn.example/left.jpg" alt="Left view"/></figure>
<p>HERO_RIGHT_IMAGE</p>
<figure class="wp-block-image"><img alt="Right view" decoding="async" src="https://cdn.example/right.jpg"/></figure>
<p>OVERVIEW:</p>
<p>A 42-storey tower with 380 residences &amp; a private marina.</p>
<p>OVERVIEW_LIST:</p>
<ul class="wp-block-list"><li>Type: Apartment</li><li>Status: Off-plan</li><li>Handover Q4 2026</li></ul>"#;

    /// Rendered HTML of a developer page.
    pub const DEVELOPER_HTML: &str = r#"<p>Building since 1998</p>
<p>DEVELOPER_LOGO</p>
<figure class="wp-block-image"><img src="https://cdn.example/logo.png" alt="Emaar"/></figure>
<p>OVERVIEW:</p>
<p>One of the region&#8217;s largest developers.</p>"#;

    /// Rendered HTML of the homepage carousel list.
    pub const FEATURED_HTML: &str = r#"<ul class="wp-block-list">
<li>marina-heights : <a href="https://cdn.example/1.jpg">image</a></li>
<li>palm-villas : <a href="https://cdn.example/2.jpg" target="_blank">image</a></li>
<li> : <a href="https://cdn.example/3.jpg">image</a></li>
</ul>"#;

    pub fn item_json(id: u64, slug: &str, title: &str, content: &str) -> Value {
        json!({
            "id": id,
            "slug": slug,
            "status": "publish",
            "type": "post",
            "date": "2024-03-01T10:00:00",
            "link": format!("https://cms.example/{slug}/"),
            "title": {"rendered": title},
            "content": {"rendered": content, "protected": false},
            "excerpt": {"rendered": format!("<p>About {title}</p>\n")},
            "featured_media": 0,
            "author": 1,
            "categories": [1],
            "tags": [],
            "_links": {"self": [{"href": format!("https://cms.example/wp-json/wp/v2/posts/{id}")}]}
        })
    }

    pub fn property_json() -> Value {
        let mut item = item_json(101, "marina-heights", "Marina Heights", PROPERTY_HTML);
        item["type"] = json!("properties");
        item["property_type"] = json!([4]);
        item["featured_media"] = json!(55);
        item["yoast_head_json"] = yoast_json();
        item
    }

    pub fn developer_json() -> Value {
        let mut item = item_json(201, "emaar", "Emaar", DEVELOPER_HTML);
        item["type"] = json!("developers");
        item
    }

    pub fn home_page_json() -> Value {
        item_json(301, "home", "Home", FEATURED_HTML)
    }

    pub fn category_json(id: u64, slug: &str) -> Value {
        json!({"id": id, "name": slug.to_uppercase(), "slug": slug, "taxonomy": "category", "count": 3})
    }

    pub fn media_json(id: u64) -> Value {
        json!({
            "id": id,
            "source_url": format!("https://cdn.example/media-{id}.jpg"),
            "alt_text": "Media",
            "media_details": {"width": 1600, "height": 900}
        })
    }

    pub fn rank_math_json() -> Value {
        json!({
            "title": "Marina Heights | Prime Estates",
            "description": "Off-plan apartments in Dubai Marina.",
            "canonical": "https://primeestates.com/properties/marina-heights",
            "robots": ["index", "follow"],
            "og_title": "Marina Heights",
            "og_description": "Waterfront apartments.",
            "og_url": "https://primeestates.com/properties/marina-heights",
            "og_image": "https://cdn.example/og.jpg",
            "og_type": "article",
            "twitter_card": "summary",
            "article_published_time": "2024-03-01T10:00:00+00:00",
            "article_author": {"name": "Prime Estates"},
            "schema": {"@context": "https://schema.org", "@type": "Residence"}
        })
    }

    pub fn yoast_json() -> Value {
        json!({
            "title": "Marina Heights - Yoast",
            "description": "Yoast description.",
            "canonical": "https://primeestates.com/properties/marina-heights",
            "robots": {
                "index": "index",
                "follow": "follow",
                "max-snippet": "max-snippet:-1",
                "max-image-preview": "max-image-preview:large",
                "max-video-preview": "max-video-preview:-1"
            },
            "og_title": "Marina Heights OG",
            "og_image": [{"url": "https://cdn.example/yoast.jpg", "width": 1200, "height": 630, "type": "image/jpeg"}],
            "og_locale": "en_GB",
            "author": "Sara",
            "schema": {"@context": "https://schema.org", "@graph": []}
        })
    }

    /// A complete snapshot document.
    pub fn snapshot_json() -> Value {
        let mut second = item_json(102, "palm-villas", "Palm Villas", "<p>Beachfront villas</p>");
        second["categories"] = json!([2]);
        second["property_type"] = json!([5]);
        second["status"] = json!("draft");
        json!({
            "posts": [item_json(1, "market-report", "Market Report &amp; Outlook", "<p>Prices are up.</p>")],
            "pages": [home_page_json()],
            "categories": [category_json(1, "news"), category_json(2, "guides")],
            "properties": [property_json(), second],
            "developers": [developer_json()],
            "guides": [],
            "fetchedAt": "2024-05-01T12:00:00Z"
        })
    }

    pub fn item(value: Value) -> RawContentItem {
        serde_json::from_value(value).expect("fixture should deserialize")
    }
}

// --- Fake Repository ---

/// An in-memory repository with programmable enrichment outcomes.
#[derive(Clone, Default)]
pub struct FakeRepository {
    items: Arc<Mutex<HashMap<Collection, Vec<RawContentItem>>>>,
    seo: Arc<Mutex<HashMap<u64, Enrichment<RankMathSeo>>>>,
    media: Arc<Mutex<HashMap<u64, Enrichment<Media>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, collection: Collection, item: RawContentItem) {
        let mut items = self.items.lock().unwrap();
        items.entry(collection).or_default().push(item);
    }

    pub fn set_seo(&self, id: u64, outcome: Enrichment<RankMathSeo>) {
        self.seo.lock().unwrap().insert(id, outcome);
    }

    pub fn set_media(&self, id: u64, outcome: Enrichment<Media>) {
        self.media.lock().unwrap().insert(id, outcome);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn collection(&self, collection: Collection) -> Vec<RawContentItem> {
        self.items
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentRepository for FakeRepository {
    async fn get_all(
        &self,
        collection: Collection,
        _filter: &ContentFilter,
    ) -> Result<Vec<RawContentItem>, ContentError> {
        self.record(format!("get_all:{collection}"));
        Ok(self.collection(collection))
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<RawContentItem>, ContentError> {
        self.record(format!("get_by_id:{collection}:{id}"));
        Ok(self.collection(collection).into_iter().find(|i| i.id == id))
    }

    async fn get_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<RawContentItem>, ContentError> {
        self.record(format!("get_by_slug:{collection}:{slug}"));
        Ok(self.collection(collection).into_iter().find(|i| i.slug == slug))
    }

    async fn get_terms(
        &self,
        _taxonomy: Taxonomy,
        _filter: &ContentFilter,
    ) -> Result<Vec<Term>, ContentError> {
        Ok(Vec::new())
    }

    async fn seo_payload(&self, id: u64) -> Enrichment<RankMathSeo> {
        self.record(format!("seo_payload:{id}"));
        self.seo
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or(Enrichment::Absent)
    }

    async fn media(&self, id: u64) -> Enrichment<Media> {
        self.record(format!("media:{id}"));
        self.media
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or(Enrichment::Absent)
    }
}

// --- Mock CMS ---

/// A wiremock server speaking the CMS REST routes under `/wp-json`.
pub struct MockCms {
    pub server: MockServer,
}

impl MockCms {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// The API base URL to configure a live backend with.
    pub fn api_base_url(&self) -> String {
        format!("{}/wp-json", self.server.uri())
    }

    /// Serves a list response for a collection, with the pagination headers the
    /// CMS sends.
    pub async fn mount_list(&self, rest_base: &str, items: Value, total_pages: u32) {
        let count = items.as_array().map_or(0, Vec::len);
        Mock::given(method("GET"))
            .and(path(format!("/wp-json/wp/v2/{rest_base}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(items)
                    .insert_header("X-WP-Total", count.to_string().as_str())
                    .insert_header("X-WP-TotalPages", total_pages.to_string().as_str()),
            )
            .mount(&self.server)
            .await;
    }

    /// Serves one page of a paginated list response.
    pub async fn mount_list_page(&self, rest_base: &str, page: u32, items: Value, total_pages: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/wp-json/wp/v2/{rest_base}")))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(items)
                    .insert_header("X-WP-TotalPages", total_pages.to_string().as_str()),
            )
            .mount(&self.server)
            .await;
    }

    /// Serves a single-item response at `/{rest_base}/{id}`.
    pub async fn mount_item(&self, rest_base: &str, id: u64, item: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/wp-json/wp/v2/{rest_base}/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(item))
            .mount(&self.server)
            .await;
    }

    /// Serves a bare status code at any path under the API.
    pub async fn mount_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/wp-json/{route}")))
            .respond_with(ResponseTemplate::new(status).set_body_string("error"))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_seo(&self, id: u64, payload: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/wp-json/rankmath/v1/seo/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&self.server)
            .await;
    }
}
