//! # CLI Configuration
//!
//! Loads the CLI configuration in layers: built-in site defaults, then an
//! optional `propcontent.yml` (or the file passed with `--config`), then
//! `PROPCONTENT_*` environment variables. `${VAR}` references inside the YAML
//! file are substituted from the environment before parsing.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use propcontent::SiteConfig;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::info;

/// The file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "propcontent.yml";

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("Failed to compile env var regex")
});

/// A custom error type for configuration issues.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error from the underlying `config` crate or from reading the file.
    #[error("Configuration error: {0}")]
    General(String),
    /// An explicitly requested configuration file does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `propcontent.yml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    /// Serve reads from this snapshot file instead of the live CMS.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

// Reads a file and substitutes `${VAR}` references from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded = ENV_VAR_RE.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

/// Loads the CLI configuration.
///
/// - A `--config` path must exist; the default `propcontent.yml` is optional.
/// - Nested keys are overridden by `PROPCONTENT_...` variables with `__` as the
///   separator (e.g. `PROPCONTENT_SITE__API_BASE_URL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let defaults = SiteConfig::default();
    let mut builder = ConfigBuilder::builder()
        // Layer 1: built-in site defaults.
        .set_default("site.site_name", defaults.site_name)?
        .set_default("site.site_url", defaults.site_url)?
        .set_default("site.api_base_url", defaults.api_base_url)?
        .set_default("site.seo_endpoint", defaults.seo_endpoint)?
        .set_default("site.locale", defaults.locale)?
        .set_default("site.revalidate_secs", defaults.revalidate_secs as i64)?
        .set_default("site.request_timeout_secs", defaults.request_timeout_secs as i64)?;

    // Layer 2: the YAML file.
    let config_path = config_path_override.unwrap_or(DEFAULT_CONFIG_FILE);
    match read_and_substitute(config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => info!("No '{config_path}' found, using defaults and environment."),
    }

    // Layer 3: prefixed environment variables.
    let settings = builder
        .add_source(
            Environment::with_prefix("PROPCONTENT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
