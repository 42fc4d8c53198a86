use crate::model::ProductRecord;
use url::Url;

/// Mutable state of one harvest run
///
/// Owned by the orchestrator and only changed by its main loop.
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Records in listing order
    accumulated: Vec<ProductRecord>,

    /// 1-based page number of the next listing request
    current_page: u32,

    /// Number of records wanted
    target: usize,

    /// Listing pages that were fetched successfully
    pages_visited: u32,

    /// Product cards skipped by the listing extractor
    skipped_items: usize,

    /// Detail URLs of the last extracted listing page, for repeat detection
    previous_listing: Option<Vec<Url>>,
}

impl CrawlState {
    /// Creates a fresh state starting at page 1
    ///
    /// A target of 0 is treated as 1.
    pub fn new(target: usize) -> Self {
        Self {
            accumulated: Vec::new(),
            current_page: 1,
            target: target.max(1),
            pages_visited: 0,
            skipped_items: 0,
            previous_listing: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn collected(&self) -> usize {
        self.accumulated.len()
    }

    pub fn pages_visited(&self) -> u32 {
        self.pages_visited
    }

    pub fn skipped_items(&self) -> usize {
        self.skipped_items
    }

    /// Returns true once at least `target` records are held
    pub fn is_satisfied(&self) -> bool {
        self.accumulated.len() >= self.target
    }

    pub fn record_listing_visit(&mut self, skipped: usize) {
        self.pages_visited += 1;
        self.skipped_items += skipped;
    }

    /// Remembers this page's detail URLs; returns true if they repeat the
    /// previous page exactly
    pub fn is_repeat_of_previous(&mut self, listing: Vec<Url>) -> bool {
        let repeated = self.previous_listing.as_ref() == Some(&listing);
        self.previous_listing = Some(listing);
        repeated
    }

    /// Appends one page's records, keeping their order
    pub fn append(&mut self, records: Vec<ProductRecord>) {
        self.accumulated.extend(records);
    }

    /// Moves on to the next listing page
    pub fn advance_page(&mut self) {
        self.current_page += 1;
    }

    /// Consumes the state, returning at most `target` records
    pub fn into_records(self) -> Vec<ProductRecord> {
        let mut records = self.accumulated;
        records.truncate(self.target);
        records
    }
}
