//! Detail page extraction
//!
//! Each of the five enrichment fields is looked up on its own. A missing node
//! only costs that field; a page that never arrived costs all five.

use crate::config::{Config, DetailSelectors};
use crate::extract::{compile_selector, select_text};
use crate::model::DetailEnrichment;
use crate::{ConfigError, FetchError};
use scraper::{Html, Selector};

/// Parses detail pages into [`DetailEnrichment`] records
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    sale_price: Selector,
    original_price: Selector,
    discount: Selector,
    description: Selector,
    details: Selector,
}

impl DetailExtractor {
    pub fn new(selectors: &DetailSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            sale_price: compile_selector("detail.sale-price", &selectors.sale_price)?,
            original_price: compile_selector("detail.original-price", &selectors.original_price)?,
            discount: compile_selector("detail.discount", &selectors.discount)?,
            description: compile_selector("detail.description", &selectors.description)?,
            details: compile_selector("detail.details", &selectors.details)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.selectors.detail)
    }

    /// Extracts the enrichment fields from detail page markup
    ///
    /// Never fails: each absent field becomes `"N/A"` independently.
    pub fn extract(&self, markup: &str) -> DetailEnrichment {
        let document = Html::parse_document(markup);

        DetailEnrichment::from_fields(
            select_text(&document, &self.sale_price),
            select_text(&document, &self.original_price),
            select_text(&document, &self.discount),
            select_text(&document, &self.description),
            select_text(&document, &self.details),
        )
    }

    /// Enriches from a fetch outcome
    ///
    /// A failed fetch (including a landmark that never appeared) yields the
    /// all-sentinel record; the item is still kept by the caller.
    pub fn enrich(&self, fetched: Result<String, FetchError>) -> DetailEnrichment {
        match fetched {
            Ok(markup) => self.extract(&markup),
            Err(e) => {
                tracing::warn!("Detail page unavailable, degrading record: {}", e);
                DetailEnrichment::degraded()
            }
        }
    }
}
