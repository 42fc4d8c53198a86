//! Crawler module for catalog page fetching and harvest orchestration
//!
//! This module contains the core harvesting logic, including:
//! - The page fetcher contract and its HTTP session implementation
//! - Readiness landmarks
//! - Retry with backoff
//! - Overall pagination and enrichment coordination

mod coordinator;
mod fetcher;
mod landmark;
mod retry;

pub use coordinator::{harvest_with, run_harvest, CrawlOrchestrator, CrawlReport};
pub use fetcher::{build_http_client, HttpSession, PageFetcher};
pub use landmark::Landmark;
pub use retry::{retry_with_backoff, RetryPolicy};
