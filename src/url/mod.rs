//! URL handling module for Catalog-Harvest
//!
//! Every URL that leaves the extractors is absolute. This module owns the
//! rules for getting there, plus the listing page URL scheme used by the
//! crawl loop.

mod normalize;
mod pagination;

// Re-export main functions
pub use normalize::{absolutize_image, absolutize_link};
pub use pagination::{listing_page_url, PAGE_PARAM};
