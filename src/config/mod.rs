//! Configuration module for Catalog-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at this level: callers fall back to
//! [`Config::default`], which targets the stock collection.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Collecting {} records", config.catalog.target);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, DetailSelectors, FetcherConfig, ListingSelectors, OutputConfig,
    SelectorConfig, DEFAULT_BASE_URL, DEFAULT_TARGET, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;

use crate::ConfigError;
use std::time::Duration;
use url::Url;

impl Config {
    /// Parsed collection URL
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.catalog.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("base-url '{}': {}", self.catalog.base_url, e)))
    }

    /// Site root used to absolutize links
    ///
    /// Uses `catalog.origin` when set, otherwise the scheme, host and port of
    /// the base URL.
    pub fn origin(&self) -> Result<Url, ConfigError> {
        match &self.catalog.origin {
            Some(origin) => Url::parse(origin)
                .map_err(|e| ConfigError::InvalidUrl(format!("origin '{}': {}", origin, e))),
            None => {
                let base = self.base_url()?;
                base.join("/")
                    .map_err(|e| ConfigError::InvalidUrl(format!("origin of '{}': {}", base, e)))
            }
        }
    }
}

impl FetcherConfig {
    pub fn wait_bound(&self) -> Duration {
        Duration::from_secs(self.wait_bound_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_millis)
    }
}
