//! # `propcontent-wordpress`: Live CMS Backend
//!
//! This crate reads content straight from the CMS REST API. It implements the
//! `ContentRepository` trait from the core `propcontent` library, and adds the
//! paginated bulk reads the snapshot build step relies on.

use async_trait::async_trait;
use propcontent::filter::ContentFilter;
use propcontent::seo::RankMathSeo;
use propcontent::types::Author;
use propcontent::{
    Collection, ContentError, ContentRepository, Enrichment, Media, RawContentItem, SiteConfig,
    Taxonomy, Term,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Page size used when walking a whole collection.
const PAGE_SIZE: u32 = 100;
const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// Custom error types for the live backend.
#[derive(Error, Debug)]
pub enum WordPressError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("CMS returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid CMS URL: {0}")]
    Url(#[from] url::ParseError),
}

impl WordPressError {
    fn is_not_found(&self) -> bool {
        matches!(self, WordPressError::Status { status: 404, .. })
    }
}

/// A helper to convert the specific `WordPressError` into the generic `propcontent::ContentError`.
impl From<WordPressError> for ContentError {
    fn from(err: WordPressError) -> Self {
        match err {
            WordPressError::Request(e) => ContentError::Fetch(e.to_string()),
            WordPressError::Status { status, url } => ContentError::RemoteFetch { status, url },
            WordPressError::Decode(e) => ContentError::Decode(e.to_string()),
            WordPressError::Url(e) => ContentError::InvalidUrl(e.to_string()),
        }
    }
}

/// A successful response body together with its pagination header.
#[derive(Debug, Clone)]
struct Page {
    body: String,
    total_pages: u32,
}

#[derive(Debug, Clone)]
struct CachedPage {
    page: Page,
    stored_at: Instant,
}

/// The `ContentRepository` implementation backed by the CMS REST API.
///
/// Successful responses are kept for the configured revalidation window, keyed
/// by the full request URL. Expired entries are dropped whenever a new response
/// is stored.
pub struct WordPressRepository {
    client: reqwest::Client,
    api_base_url: String,
    seo_endpoint: String,
    revalidate: Duration,
    cache: RwLock<HashMap<String, CachedPage>>,
}

impl WordPressRepository {
    /// Creates a new `WordPressRepository` for the CMS named in `config`.
    pub fn new(config: &SiteConfig) -> Result<Self, WordPressError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            seo_endpoint: config.seo_endpoint.trim_matches('/').to_string(),
            revalidate: config.revalidate_window(),
            cache: RwLock::new(HashMap::new()),
        })
    }

    fn url(&self, route: &str, query: &[(String, String)]) -> Result<Url, WordPressError> {
        let mut url = Url::parse(&format!("{}/{}", self.api_base_url, route))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Page, WordPressError> {
        let key = url.to_string();
        if !self.revalidate.is_zero() {
            if let Some(cached) = self.cache.read().await.get(&key) {
                if cached.stored_at.elapsed() < self.revalidate {
                    debug!("Serving {} from the revalidation cache.", key);
                    return Ok(cached.page.clone());
                }
            }
        }

        info!("Fetching {}", key);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WordPressError::Status {
                status: status.as_u16(),
                url: key,
            });
        }

        let total_pages = response
            .headers()
            .get(TOTAL_PAGES_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(1);
        let page = Page {
            body: response.text().await?,
            total_pages,
        };

        if !self.revalidate.is_zero() {
            let cached = CachedPage {
                page: page.clone(),
                stored_at: Instant::now(),
            };
            let mut cache = self.cache.write().await;
            cache.retain(|_, entry| entry.stored_at.elapsed() < self.revalidate);
            cache.insert(key, cached);
        }
        Ok(page)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WordPressError> {
        let page = self.get(url).await?;
        Ok(serde_json::from_str(&page.body)?)
    }

    /// Fetches a single resource. A 404 means the resource does not exist.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        route: &str,
    ) -> Result<Option<T>, WordPressError> {
        let url = self.url(route, &[])?;
        match self.get_json(url).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        rest_base: &str,
    ) -> Result<Vec<T>, WordPressError> {
        let route = format!("wp/v2/{rest_base}");
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let filter = ContentFilter::new()
                .param("per_page", PAGE_SIZE)
                .param("page", page);
            let response = self.get(self.url(&route, &filter.to_query_pairs())?).await?;
            let batch: Vec<T> = serde_json::from_str(&response.body)?;
            records.extend(batch);

            if page >= response.total_pages {
                break;
            }
            page += 1;
        }
        info!("Fetched {} records from '{}'.", records.len(), rest_base);
        Ok(records)
    }

    /// Reads every item of a collection, following the CMS pagination headers.
    pub async fn fetch_all(&self, collection: Collection) -> Result<Vec<RawContentItem>, ContentError> {
        Ok(self.fetch_pages(collection.rest_base()).await?)
    }

    /// Reads every term of a taxonomy, following the CMS pagination headers.
    pub async fn fetch_all_terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>, ContentError> {
        Ok(self.fetch_pages(taxonomy.rest_base()).await?)
    }

    pub async fn get_author(&self, id: u64) -> Result<Option<Author>, ContentError> {
        Ok(self.get_optional(&format!("wp/v2/users/{id}")).await?)
    }
}

#[async_trait]
impl ContentRepository for WordPressRepository {
    async fn get_all(
        &self,
        collection: Collection,
        filter: &ContentFilter,
    ) -> Result<Vec<RawContentItem>, ContentError> {
        let route = format!("wp/v2/{}", collection.rest_base());
        let url = self.url(&route, &filter.to_query_pairs())?;
        Ok(self.get_json(url).await?)
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<RawContentItem>, ContentError> {
        let route = format!("wp/v2/{}/{id}", collection.rest_base());
        Ok(self.get_optional(&route).await?)
    }

    /// Requests a one-item list filtered by slug and takes its first element.
    async fn get_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<RawContentItem>, ContentError> {
        let filter = ContentFilter::new()
            .param("slug", slug)
            .param("per_page", 1)
            .with_embed();
        let items = self.get_all(collection, &filter).await?;
        Ok(items.into_iter().next())
    }

    async fn get_terms(
        &self,
        taxonomy: Taxonomy,
        filter: &ContentFilter,
    ) -> Result<Vec<Term>, ContentError> {
        let route = format!("wp/v2/{}", taxonomy.rest_base());
        let url = self.url(&route, &filter.to_query_pairs())?;
        Ok(self.get_json(url).await?)
    }

    async fn seo_payload(&self, id: u64) -> Enrichment<RankMathSeo> {
        let route = format!("{}/{id}", self.seo_endpoint);
        let result = self
            .get_optional::<Option<RankMathSeo>>(&route)
            .await
            .map(Option::flatten)
            .map_err(ContentError::from);
        Enrichment::from_result(result)
    }

    async fn media(&self, id: u64) -> Enrichment<Media> {
        let result = self
            .get_optional::<Media>(&format!("wp/v2/media/{id}"))
            .await
            .map_err(ContentError::from);
        Enrichment::from_result(result)
    }
}
