//! Result sink trait and output errors
//!
//! A sink receives the final, truncated record sequence once per run.

use crate::model::ProductRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result sinks
///
/// Implementations persist records in the order given. An empty slice must
/// leave no artifact behind.
pub trait ResultSink {
    /// Persists the records
    ///
    /// # Arguments
    ///
    /// * `records` - The collected records in listing order
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records written
    /// * `Err(OutputError)` - Writing failed
    fn persist(&mut self, records: &[ProductRecord]) -> OutputResult<usize>;

    /// Human-readable destination, used in log lines
    fn describe(&self) -> String;
}
