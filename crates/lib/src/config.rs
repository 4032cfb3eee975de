//! # Site Configuration
//!
//! The configuration value injected into the normalizer, the backends and the facade.
//! Nothing in this crate reads process state; the binary decides where the values
//! come from (file, environment) and hands a finished [`SiteConfig`] down.

use crate::constants::*;
use serde::Deserialize;
use std::time::Duration;

/// The root site configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path of the SEO enrichment endpoint, relative to `api_base_url`.
    #[serde(default = "default_seo_endpoint")]
    pub seo_endpoint: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Staleness window for live responses. `0` disables reuse.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_seo_endpoint() -> String {
    DEFAULT_SEO_ENDPOINT.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_revalidate_secs() -> u64 {
    DEFAULT_REVALIDATE_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            site_url: default_site_url(),
            api_base_url: default_api_base_url(),
            seo_endpoint: default_seo_endpoint(),
            locale: default_locale(),
            revalidate_secs: default_revalidate_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SiteConfig {
    /// Returns a copy pointing at a different CMS API, keeping everything else.
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn revalidate_window(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The subset of the configuration the SEO normalizer depends on.
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity {
            site_name: self.site_name.clone(),
            site_url: self.site_url.clone(),
            locale: self.locale.clone(),
        }
    }
}

/// Site-level constants used as the last link of every SEO precedence chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    pub site_name: String,
    pub site_url: String,
    pub locale: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        SiteConfig::default().identity()
    }
}
