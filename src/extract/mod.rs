//! HTML extraction for listing and detail pages
//!
//! This module turns rendered markup into records:
//! - [`ListingExtractor`]: one listing page → item summaries
//! - [`DetailExtractor`]: one detail page → enrichment fields
//!
//! Both are built once from the configured selectors and reused for every
//! page of the run.

mod detail;
mod listing;

pub use detail::DetailExtractor;
pub use listing::{ListingExtractor, ListingPage, SkipReason};

use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiles a configured CSS selector, naming it in the error
pub(crate) fn compile_selector(name: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        name: name.to_string(),
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Text content of an element with every text node trimmed and the pieces
/// concatenated
pub fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Normalized text of the first element matching `selector`, if any
pub fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(normalized_text)
}
