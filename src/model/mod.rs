//! Product records produced by the harvester
//!
//! A listing page yields [`ItemSummary`] values, a detail page yields a
//! [`DetailEnrichment`], and the two merge into one [`ProductRecord`] per item.
//! The record is fixed-width: every enrichment field is always populated,
//! falling back to [`NOT_AVAILABLE`].

use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder for any field that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// One product as seen on a listing page
///
/// Both URLs are absolute by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub name: String,
    pub detail_url: Url,
    pub image_url: Url,
}

/// Fields scraped from a product's detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEnrichment {
    pub sale_price: String,
    pub original_price: String,
    pub discount: String,
    pub description: String,
    pub spec_text: String,
}

impl DetailEnrichment {
    /// The all-sentinel record used when a detail page is unavailable
    pub fn degraded() -> Self {
        Self {
            sale_price: NOT_AVAILABLE.to_string(),
            original_price: NOT_AVAILABLE.to_string(),
            discount: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            spec_text: NOT_AVAILABLE.to_string(),
        }
    }

    /// Builds a record from per-field outcomes, substituting the sentinel
    /// for each missing field independently
    pub fn from_fields(
        sale_price: Option<String>,
        original_price: Option<String>,
        discount: Option<String>,
        description: Option<String>,
        spec_text: Option<String>,
    ) -> Self {
        let or_sentinel = |field: Option<String>| field.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            sale_price: or_sentinel(sale_price),
            original_price: or_sentinel(original_price),
            discount: or_sentinel(discount),
            description: or_sentinel(description),
            spec_text: or_sentinel(spec_text),
        }
    }

    /// Returns true if every field holds the sentinel
    pub fn is_degraded(&self) -> bool {
        [
            &self.sale_price,
            &self.original_price,
            &self.discount,
            &self.description,
            &self.spec_text,
        ]
        .iter()
        .all(|field| field.as_str() == NOT_AVAILABLE)
    }
}

impl Default for DetailEnrichment {
    fn default() -> Self {
        Self::degraded()
    }
}

/// One output row: a summary merged with its enrichment
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Link")]
    pub link: String,

    #[serde(rename = "Image")]
    pub image: String,

    #[serde(rename = "Sale Price")]
    pub sale_price: String,

    #[serde(rename = "Original Price")]
    pub original_price: String,

    #[serde(rename = "Discount")]
    pub discount: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Product Details")]
    pub product_details: String,
}

/// CSV header, in column order
pub const COLUMNS: [&str; 8] = [
    "Name",
    "Link",
    "Image",
    "Sale Price",
    "Original Price",
    "Discount",
    "Description",
    "Product Details",
];

impl ProductRecord {
    pub fn merge(summary: ItemSummary, enrichment: DetailEnrichment) -> Self {
        Self {
            name: summary.name,
            link: summary.detail_url.into(),
            image: summary.image_url.into(),
            sale_price: enrichment.sale_price,
            original_price: enrichment.original_price,
            discount: enrichment.discount,
            description: enrichment.description,
            product_details: enrichment.spec_text,
        }
    }

    /// Returns true if the enrichment half is all sentinels
    pub fn is_degraded(&self) -> bool {
        [
            &self.sale_price,
            &self.original_price,
            &self.discount,
            &self.description,
            &self.product_details,
        ]
        .iter()
        .all(|field| field.as_str() == NOT_AVAILABLE)
    }
}
