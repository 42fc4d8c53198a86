//! Crawl coordinator - main harvest orchestration logic
//!
//! This module contains the pagination loop that coordinates all aspects of
//! a harvest run, including:
//! - Building listing page URLs and fetching them
//! - Extracting item summaries and enriching them from detail pages
//! - Applying the stopping policy and the target bound
//! - Handing the final records to a result sink

use crate::config::Config;
use crate::crawler::fetcher::{HttpSession, PageFetcher};
use crate::crawler::landmark::Landmark;
use crate::extract::{DetailExtractor, ListingExtractor};
use crate::model::{ItemSummary, ProductRecord};
use crate::output::{CsvSink, ResultSink};
use crate::state::{CrawlPhase, CrawlState, StopReason};
use crate::url::listing_page_url;
use crate::{ConfigError, HarvestError};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use url::Url;

/// Outcome of a harvest run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Collected records in listing order, at most `target` of them
    pub records: Vec<ProductRecord>,

    /// Why pagination ended
    pub stop_reason: StopReason,

    /// Listing pages fetched successfully
    pub pages_visited: u32,

    /// Product cards skipped for missing parts
    pub skipped_items: usize,

    /// Records whose enrichment is entirely "N/A"
    pub degraded_records: usize,

    /// Number of records wanted
    pub target: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Returns true if fewer records than the target were collected
    pub fn is_short(&self) -> bool {
        self.records.len() < self.target
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main harvest orchestrator
///
/// Borrows the fetch session for the whole run; owns the extractors and the
/// crawl state.
pub struct CrawlOrchestrator<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    listing: ListingExtractor,
    detail: DetailExtractor,
    base_url: Url,
    listing_landmark: Landmark,
    detail_landmark: Landmark,
    wait_bound: Duration,
    max_pages: Option<u32>,
    stop_on_repeated_listing: bool,
    detail_concurrency: usize,
    state: CrawlState,
}

impl<'a, F: PageFetcher + ?Sized> CrawlOrchestrator<'a, F> {
    /// Creates a new orchestrator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `fetcher` - The page fetcher shared by every request of the run
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOrchestrator)` - Successfully created orchestrator
    /// * `Err(ConfigError)` - A URL or selector in the config is unusable
    pub fn new(config: &Config, fetcher: &'a F) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            listing: ListingExtractor::from_config(config)?,
            detail: DetailExtractor::from_config(config)?,
            base_url: config.base_url()?,
            listing_landmark: Landmark::css(&config.selectors.listing.item)?,
            detail_landmark: Landmark::css(&config.selectors.detail.ready)?,
            wait_bound: config.fetcher.wait_bound(),
            max_pages: config.catalog.max_pages,
            stop_on_repeated_listing: config.catalog.stop_on_repeated_listing,
            detail_concurrency: config.fetcher.detail_concurrency.max(1),
            state: CrawlState::new(config.catalog.target),
        })
    }

    /// Runs the pagination loop to completion
    ///
    /// Never fails: listing failures stop pagination and detail failures
    /// degrade single records. The records collected so far are always kept.
    pub async fn run(mut self) -> CrawlReport {
        let started_at = Utc::now();
        tracing::info!(
            "Starting harvest of {} (target: {} records)",
            self.base_url,
            self.state.target()
        );

        let mut phase = CrawlPhase::Paginating;
        let stop_reason = loop {
            phase = match phase {
                CrawlPhase::Stopped(reason) => break reason,
                CrawlPhase::Paginating => self.paginate(),
                CrawlPhase::FetchingListing { url } => self.fetch_listing(&url).await,
                CrawlPhase::ExtractingListing { markup } => self.extract_listing(&markup),
                CrawlPhase::EnrichingItems { items } => self.enrich_items(items).await,
            };
            tracing::trace!("Phase -> {}", phase);
        };

        let pages_visited = self.state.pages_visited();
        let skipped_items = self.state.skipped_items();
        let target = self.state.target();
        let records = self.state.into_records();
        let degraded_records = records.iter().filter(|r| r.is_degraded()).count();

        if stop_reason.is_failure() {
            tracing::warn!(
                "Harvest stopped early ({}): {} of {} records collected",
                stop_reason,
                records.len(),
                target
            );
        } else {
            tracing::info!(
                "Harvest stopped ({}): {} of {} records collected",
                stop_reason,
                records.len(),
                target
            );
        }

        CrawlReport {
            records,
            stop_reason,
            pages_visited,
            skipped_items,
            degraded_records,
            target,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn paginate(&self) -> CrawlPhase {
        let page = self.state.current_page();

        if let Some(max_pages) = self.max_pages {
            if page > max_pages {
                tracing::info!("Page limit of {} reached", max_pages);
                return CrawlPhase::Stopped(StopReason::PageLimit);
            }
        }

        CrawlPhase::FetchingListing {
            url: listing_page_url(&self.base_url, page),
        }
    }

    async fn fetch_listing(&mut self, url: &Url) -> CrawlPhase {
        tracing::info!("Fetching listing page {}: {}", self.state.current_page(), url);

        match self
            .fetcher
            .fetch(url, &self.listing_landmark, self.wait_bound)
            .await
        {
            Ok(markup) => CrawlPhase::ExtractingListing { markup },
            Err(e) => {
                tracing::warn!("Listing page unavailable, stopping pagination: {}", e);
                CrawlPhase::Stopped(StopReason::ListingUnavailable)
            }
        }
    }

    fn extract_listing(&mut self, markup: &str) -> CrawlPhase {
        let page = self.listing.extract_page(markup);
        self.state.record_listing_visit(page.skipped);

        if page.is_empty() {
            tracing::info!("No more products on page {}", self.state.current_page());
            return CrawlPhase::Stopped(StopReason::EndOfCatalog);
        }

        if self.stop_on_repeated_listing {
            let links = page.items.iter().map(|item| item.detail_url.clone()).collect();
            if self.state.is_repeat_of_previous(links) {
                tracing::warn!(
                    "Listing page {} repeats the previous page, stopping pagination",
                    self.state.current_page()
                );
                return CrawlPhase::Stopped(StopReason::RepeatedListing);
            }
        }

        tracing::debug!(
            "Page {}: {} items, {} skipped",
            self.state.current_page(),
            page.items.len(),
            page.skipped
        );

        CrawlPhase::EnrichingItems { items: page.items }
    }

    async fn enrich_items(&mut self, items: Vec<ItemSummary>) -> CrawlPhase {
        let records = self.enrich(items).await;
        self.state.append(records);

        tracing::info!(
            "Collected {} of {} records",
            self.state.collected(),
            self.state.target()
        );

        if self.state.is_satisfied() {
            return CrawlPhase::Stopped(StopReason::TargetReached);
        }

        self.state.advance_page();
        CrawlPhase::Paginating
    }

    /// Fetches and merges every item's detail page
    ///
    /// Up to `detail_concurrency` fetches run at once; the output keeps the
    /// input order regardless of completion order.
    async fn enrich(&self, items: Vec<ItemSummary>) -> Vec<ProductRecord> {
        let fetcher = self.fetcher;
        let detail = &self.detail;
        let landmark = &self.detail_landmark;
        let wait = self.wait_bound;

        stream::iter(items)
            .map(move |summary| async move {
                let fetched = fetcher.fetch(&summary.detail_url, landmark, wait).await;
                let enrichment = detail.enrich(fetched);
                ProductRecord::merge(summary, enrichment)
            })
            .buffered(self.detail_concurrency)
            .collect()
            .await
    }
}

/// Runs a harvest with the given fetcher and sink
///
/// The sink is only called when at least one record was collected.
pub async fn harvest_with<F, S>(
    config: &Config,
    fetcher: &F,
    sink: &mut S,
) -> Result<CrawlReport, HarvestError>
where
    F: PageFetcher + ?Sized,
    S: ResultSink + ?Sized,
{
    let report = CrawlOrchestrator::new(config, fetcher)?.run().await;

    if report.records.is_empty() {
        tracing::info!("Nothing collected, no output written");
    } else {
        let written = sink.persist(&report.records)?;
        tracing::info!("Saved {} records to {}", written, sink.describe());
    }

    Ok(report)
}

/// Runs a complete harvest with an HTTP session and a CSV sink
///
/// The session is acquired once here and released on every exit path,
/// including configuration errors and sink failures.
pub async fn run_harvest(config: &Config) -> Result<CrawlReport, HarvestError> {
    let session = HttpSession::open(&config.fetcher)?;
    let mut sink = CsvSink::new(&config.output.csv_path);

    let result = harvest_with(config, &session, &mut sink).await;
    session.close();

    result
}
