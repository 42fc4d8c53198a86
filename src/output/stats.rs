//! Run statistics derived from a crawl report
//!
//! This module provides functionality for summarizing and displaying the
//! outcome of a harvest run.

use crate::crawler::CrawlReport;
use crate::state::StopReason;

/// Harvest statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestStatistics {
    /// Records written
    pub records: usize,

    /// Records wanted
    pub target: usize,

    /// Records whose detail page could not be used
    pub degraded_records: usize,

    /// Product cards skipped on listing pages
    pub skipped_items: usize,

    /// Listing pages fetched
    pub pages_visited: u32,

    pub stop_reason: StopReason,

    /// Wall-clock duration of the run in seconds
    pub duration_seconds: i64,
}

impl HarvestStatistics {
    pub fn from_report(report: &CrawlReport) -> Self {
        Self {
            records: report.records.len(),
            target: report.target,
            degraded_records: report.degraded_records,
            skipped_items: report.skipped_items,
            pages_visited: report.pages_visited,
            stop_reason: report.stop_reason,
            duration_seconds: report.duration().num_seconds(),
        }
    }

    /// Share of the target that was collected, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        (self.records as f64 / self.target as f64) * 100.0
    }

    /// Share of collected records that were fully enriched, as a percentage
    pub fn enrichment_rate(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        ((self.records - self.degraded_records) as f64 / self.records as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Stopped because: {}", stats.stop_reason);
    println!("  Listing pages visited: {}", stats.pages_visited);
    println!("  Duration: {}s", stats.duration_seconds);
    println!();

    println!("Records:");
    println!(
        "  Collected: {} / {} ({:.1}%)",
        stats.records,
        stats.target,
        stats.completion_rate()
    );
    println!(
        "  Fully enriched: {:.1}% ({} degraded)",
        stats.enrichment_rate(),
        stats.degraded_records
    );
    println!("  Skipped product cards: {}", stats.skipped_items);
}
