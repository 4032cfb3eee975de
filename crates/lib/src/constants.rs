//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! the crates in the `propcontent` workspace. Using these constants helps to avoid
//! "magic strings" and ensures that every backend and the normalizer agree on defaults.

/// The site name used whenever no title or site name is available.
pub const DEFAULT_SITE_NAME: &str = "Prime Estates";

/// The public base URL of the site, used as the canonical URL of last resort.
pub const DEFAULT_SITE_URL: &str = "https://primeestates.com";

/// The base URL of the CMS REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://cms.primeestates.com/wp-json";

/// Path of the SEO enrichment endpoint, relative to the API base URL.
pub const DEFAULT_SEO_ENDPOINT: &str = "rankmath/v1/seo";

/// Open Graph locale used when neither payload nor fallback provide one.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Open Graph object type used when neither payload nor fallback provide one.
pub const DEFAULT_OG_TYPE: &str = "website";

/// Twitter card type used when neither payload nor fallback provide one.
pub const DEFAULT_TWITTER_CARD: &str = "summary_large_image";

/// Staleness window applied to every live request, in seconds (one hour).
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;

/// Timeout for a single live request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sentinel used for numeric robots directives that are absent or unparseable.
pub const ROBOTS_NUMERIC_SENTINEL: i64 = -1;
