//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing collected records as CSV
//! - Reading a written file back
//! - Summarizing run statistics

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{read_records, CsvSink};
pub use stats::{print_statistics, HarvestStatistics};
pub use traits::{OutputError, OutputResult, ResultSink};
