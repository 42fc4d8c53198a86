use serde::{Deserialize, Serialize};

/// Default collection the harvester walks when no config is given
pub const DEFAULT_BASE_URL: &str = "https://soufeel.com/collections/all";

/// Default number of records to collect
pub const DEFAULT_TARGET: usize = 500;

/// Desktop browser identity presented to the catalog
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

/// Main configuration structure for Catalog-Harvest
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Which catalog to walk and when to stop
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Collection URL; the `page=<n>` query parameter is appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Site root used to absolutize relative links (derived from base-url if unset)
    pub origin: Option<String>,

    /// Number of records wanted
    pub target: usize,

    /// Hard bound on listing pages visited
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Stop when a listing page repeats the previous one exactly
    #[serde(rename = "stop-on-repeated-listing")]
    pub stop_on_repeated_listing: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: None,
            target: DEFAULT_TARGET,
            max_pages: None,
            stop_on_repeated_listing: true,
        }
    }
}

/// Page fetching behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// How long to wait for a page's landmark element (seconds)
    #[serde(rename = "wait-bound-secs")]
    pub wait_bound_secs: u64,

    /// Pause after the landmark appears, before the markup is returned (milliseconds)
    #[serde(rename = "settle-millis")]
    pub settle_millis: u64,

    /// Delay between readiness polls while the landmark is absent (milliseconds)
    #[serde(rename = "poll-interval-millis")]
    pub poll_interval_millis: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Extra attempts after a transient failure
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff (milliseconds)
    #[serde(rename = "backoff-base-millis")]
    pub backoff_base_millis: u64,

    /// Detail pages fetched at once; 1 is fully sequential
    #[serde(rename = "detail-concurrency")]
    pub detail_concurrency: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            wait_bound_secs: 15,
            settle_millis: 2000,
            poll_interval_millis: 500,
            request_timeout_secs: 30,
            max_retries: 2,
            backoff_base_millis: 500,
            detail_concurrency: 1,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file to write
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "products.csv".to_string(),
        }
    }
}

/// CSS selectors for both page kinds
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
}

/// Selectors for listing pages
///
/// `item` doubles as the readiness landmark; `name`, `link` and `image` are
/// matched inside each item.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub item: String,
    pub name: String,
    pub link: String,
    pub image: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: "div.product-item-list".to_string(),
            name: "div.product-card__name".to_string(),
            link: "a.product-card".to_string(),
            image: "img.defaultImage".to_string(),
        }
    }
}

/// Selectors for detail pages
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetailSelectors {
    /// Readiness landmark (the main product-info block)
    pub ready: String,

    #[serde(rename = "sale-price")]
    pub sale_price: String,

    #[serde(rename = "original-price")]
    pub original_price: String,

    pub discount: String,
    pub description: String,
    pub details: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            ready: "#ProductInfo-main-product-info".to_string(),
            sale_price: "#ProductPriceproduct-page-price".to_string(),
            original_price: "#ProductComparePriceproduct-page-price".to_string(),
            discount: "#ProductDiscountPriceproduct-page-price".to_string(),
            description: "#description_tab".to_string(),
            details: "#details_tab".to_string(),
        }
    }
}
