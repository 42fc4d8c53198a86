use crate::config::types::{
    CatalogConfig, Config, DetailSelectors, FetcherConfig, ListingSelectors, OutputConfig,
};
use crate::extract::compile_selector;
use crate::ConfigError;
use url::Url;

/// Largest accepted detail-page fan-out
const MAX_DETAIL_CONCURRENCY: usize = 16;

/// Shortest accepted delay between readiness polls
const MIN_POLL_INTERVAL_MILLIS: u64 = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    validate_listing_selectors(&config.selectors.listing)?;
    validate_detail_selectors(&config.selectors.detail)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;

    if let Some(origin) = &config.origin {
        validate_http_url("origin", origin)?;
    }

    if config.target < 1 {
        return Err(ConfigError::Validation(format!(
            "target must be >= 1, got {}",
            config.target
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.wait_bound_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "wait-bound-secs must be >= 1, got {}",
            config.wait_bound_secs
        )));
    }

    if config.poll_interval_millis < MIN_POLL_INTERVAL_MILLIS {
        return Err(ConfigError::Validation(format!(
            "poll-interval-millis must be >= {}, got {}",
            MIN_POLL_INTERVAL_MILLIS, config.poll_interval_millis
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.detail_concurrency < 1 || config.detail_concurrency > MAX_DETAIL_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "detail-concurrency must be between 1 and {}, got {}",
            MAX_DETAIL_CONCURRENCY, config.detail_concurrency
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_listing_selectors(selectors: &ListingSelectors) -> Result<(), ConfigError> {
    validate_selector("listing.item", &selectors.item)?;
    validate_selector("listing.name", &selectors.name)?;
    validate_selector("listing.link", &selectors.link)?;
    validate_selector("listing.image", &selectors.image)?;
    Ok(())
}

fn validate_detail_selectors(selectors: &DetailSelectors) -> Result<(), ConfigError> {
    validate_selector("detail.ready", &selectors.ready)?;
    validate_selector("detail.sale-price", &selectors.sale_price)?;
    validate_selector("detail.original-price", &selectors.original_price)?;
    validate_selector("detail.discount", &selectors.discount)?;
    validate_selector("detail.description", &selectors.description)?;
    validate_selector("detail.details", &selectors.details)?;
    Ok(())
}

/// Checks that a CSS selector compiles
fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    compile_selector(name, selector).map(|_| ())
}

/// Checks that a URL parses and uses HTTP(S)
fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use HTTP or HTTPS",
            name, value
        )));
    }

    Ok(())
}
