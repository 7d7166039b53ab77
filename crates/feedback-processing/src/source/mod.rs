//! Raw feedback table sources.
//!
//! A source hands the pipeline one fully materialized table. Fetching,
//! transport and caching live here so the pipeline itself never performs IO:
//!
//! - [`CsvFileSource`] reads a local CSV export
//! - [`HttpCsvSource`] downloads the CSV over HTTP(S) (feature `remote`)
//! - [`DataFrameSource`] wraps a table that is already in memory
//! - [`TableCache`] memoizes fetched tables per source, owned by the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use feedback_processing::source::{CsvFileSource, TableCache};
//!
//! let source = CsvFileSource::new("feedback.csv");
//! let mut cache = TableCache::new();
//! let table = cache.get_or_fetch(&source)?;
//! ```

mod cache;
mod csv;
pub mod schema;

pub use cache::{CachedTable, TableCache};
pub use csv::{CsvFileSource, read_csv_bytes};
#[cfg(feature = "remote")]
pub use csv::HttpCsvSource;
pub use schema::{REQUIRED_COLUMNS, read_raw_rows};

use polars::prelude::DataFrame;

use crate::error::Result;

/// Supplies the unprocessed feedback table.
pub trait RawTableSource {
    /// Stable identifier used as the cache key.
    fn id(&self) -> &str;

    /// Fetch the complete, current table.
    ///
    /// Fails with [`crate::FeedbackError::SourceUnavailable`] when the table cannot
    /// be obtained.
    fn fetch(&self) -> Result<DataFrame>;
}

/// A table that is already loaded.
#[derive(Debug, Clone)]
pub struct DataFrameSource {
    id: String,
    table: DataFrame,
}

impl DataFrameSource {
    pub fn new(id: impl Into<String>, table: DataFrame) -> Self {
        Self {
            id: id.into(),
            table,
        }
    }
}

impl RawTableSource for DataFrameSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<DataFrame> {
        Ok(self.table.clone())
    }
}

/// Pick a source for a location: `http(s)://` URLs are downloaded,
/// everything else is treated as a file path.
pub fn source_for_location(location: &str) -> Result<Box<dyn RawTableSource>> {
    let is_url = location.starts_with("http://") || location.starts_with("https://");

    if !is_url {
        return Ok(Box::new(CsvFileSource::new(location)));
    }

    #[cfg(feature = "remote")]
    {
        return Ok(Box::new(HttpCsvSource::new(location)?));
    }

    #[cfg(not(feature = "remote"))]
    {
        Err(crate::error::FeedbackError::InvalidConfig(format!(
            "cannot load '{}': built without the 'remote' feature",
            location
        )))
    }
}
