//! # propcontent
//!
//! The content layer of the brokerage website. Content comes from a headless CMS,
//! either live over REST or from a pre-fetched snapshot, through the
//! [`ContentRepository`] trait. This crate normalizes it for rendering: SEO
//! payloads into a single [`SeoRecord`], marker-tagged rich text into
//! [`ParsedMicroContent`], and curated lists into [`FeaturedEntry`] sequences.

pub mod config;
pub mod constants;
pub mod errors;
pub mod facade;
pub mod filter;
pub mod markup;
pub mod repository;
pub mod seo;
mod serde_util;
pub mod types;

pub use config::{SiteConfig, SiteIdentity};
pub use errors::ContentError;
pub use facade::{ContentEntry, ContentFacade};
pub use filter::{ContentFilter, FilterValue};
pub use markup::{FeaturedEntry, ParsedMicroContent};
pub use repository::{CollectionView, ContentRepository, Enrichment};
pub use seo::{SeoFallback, SeoNormalizer, SeoRecord, SeoSource};
pub use types::{Collection, Media, RawContentItem, Taxonomy, Term};
