//! CSV output for collected product records

use crate::model::ProductRecord;
use crate::output::traits::{OutputError, OutputResult, ResultSink};
use std::path::{Path, PathBuf};

/// Writes records to a CSV file, one row per record after a header row
///
/// The file is created (or truncated) only when there is something to write.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvSink {
    fn persist(&mut self, records: &[ProductRecord]) -> OutputResult<usize> {
        if records.is_empty() {
            tracing::debug!("No records, not creating {}", self.path.display());
            return Ok(0);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer
            .flush()
            .map_err(|e| OutputError::Write(format!("{}: {}", self.path.display(), e)))?;

        Ok(records.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a CSV file written by [`CsvSink`] back into records
pub fn read_records(path: impl AsRef<Path>) -> OutputResult<Vec<ProductRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<ProductRecord>, csv::Error>>()?;
    Ok(records)
}
