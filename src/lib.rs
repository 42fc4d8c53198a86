//! Catalog-Harvest: a paginated storefront catalog extractor
//!
//! This crate walks the listing pages of an e-commerce collection, visits every
//! product's detail page to enrich the listing summary with prices and
//! descriptions, and writes the aggregated records as a CSV file.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for {name} ('{selector}'): {message}")]
    InvalidSelector {
        name: String,
        selector: String,
        message: String,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Empty link")]
    Empty,
}

/// Reasons a page could not be delivered by a [`crawler::PageFetcher`]
///
/// Every variant means "page unavailable" to the crawl; none of them abort a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Landmark {landmark} not present on {url} after {waited:?}")]
    LandmarkMissing {
        url: String,
        landmark: String,
        waited: Duration,
    },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Returns true if the failure is transient and worth another attempt
    ///
    /// Network failures, HTTP 429 and HTTP 5xx are retriable. A missing
    /// landmark already consumed the full wait bound, so it is not.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http { .. } | Self::Body { .. } => true,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::LandmarkMissing { .. } => false,
        }
    }

    /// The URL the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Status { url, .. }
            | Self::LandmarkMissing { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, CrawlOrchestrator, CrawlReport};
pub use model::{DetailEnrichment, ItemSummary, ProductRecord, NOT_AVAILABLE};
pub use state::{CrawlPhase, StopReason};
