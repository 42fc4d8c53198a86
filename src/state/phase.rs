//! Crawl phase definitions for the pagination state machine
//!
//! The orchestrator moves through these phases once per listing page:
//! `Paginating → FetchingListing → ExtractingListing → EnrichingItems`,
//! then back to `Paginating` or into the terminal `Stopped`.

use crate::model::ItemSummary;
use std::fmt;
use url::Url;

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The accumulated record count reached the target
    TargetReached,

    /// A listing page held no product cards
    EndOfCatalog,

    /// A listing page could not be fetched
    ListingUnavailable,

    /// The configured page bound was hit
    PageLimit,

    /// A listing page repeated the previous page exactly
    RepeatedListing,
}

impl StopReason {
    /// Returns true if the crawl ended because something went wrong
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ListingUnavailable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetReached => "target_reached",
            Self::EndOfCatalog => "end_of_catalog",
            Self::ListingUnavailable => "listing_unavailable",
            Self::PageLimit => "page_limit",
            Self::RepeatedListing => "repeated_listing",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current phase of the crawl, carrying whatever the next step consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Deciding whether another listing page should be requested
    Paginating,

    /// Requesting the listing page at `url`
    FetchingListing { url: Url },

    /// Turning listing markup into summaries
    ExtractingListing { markup: String },

    /// Fetching and merging detail pages for `items`, in order
    EnrichingItems { items: Vec<ItemSummary> },

    /// Terminal
    Stopped(StopReason),
}

impl CrawlPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }

    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paginating => "paginating",
            Self::FetchingListing { .. } => "fetching_listing",
            Self::ExtractingListing { .. } => "extracting_listing",
            Self::EnrichingItems { .. } => "enriching_items",
            Self::Stopped(_) => "stopped",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped(reason) => write!(f, "stopped ({})", reason),
            other => write!(f, "{}", other.name()),
        }
    }
}
