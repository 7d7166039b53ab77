//! CSV-backed raw table sources.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use tracing::{debug, info, warn};

use super::RawTableSource;
use crate::error::{FeedbackError, Result};

/// Read CSV bytes with every column as text.
///
/// Tries a standard quoted read first, then retries on content with blank
/// lines removed. Escaped quotes (`""`) are never rewritten.
pub fn read_csv_bytes(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    match text_csv_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(bytes.clone()))
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            warn!("Standard CSV loading failed, retrying without blank lines: {}", e);
        }
    }

    let cleaned = clean_csv_content(&String::from_utf8_lossy(&bytes));
    text_csv_options()
        .into_reader_with_file_handle(Cursor::new(cleaned.into_bytes()))
        .finish()
}

// Schema inference is disabled so every column arrives as a string
fn text_csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Feedback table stored in a local CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    id: String,
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawTableSource for CsvFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<DataFrame> {
        info!("Loading feedback table from file: {}", self.path.display());

        let bytes = std::fs::read(&self.path)
            .map_err(|e| FeedbackError::source_unavailable(&self.id, e))?;
        let df = read_csv_bytes(bytes).map_err(|e| FeedbackError::source_unavailable(&self.id, e))?;

        debug!("Loaded table with shape {:?}", df.shape());
        Ok(df)
    }
}

/// Feedback table published as CSV over HTTP(S).
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpCsvSource {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpCsvSource {
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "remote")]
impl RawTableSource for HttpCsvSource {
    fn id(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<DataFrame> {
        info!("Downloading feedback table from: {}", self.url);

        let bytes = self
            .client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|e| FeedbackError::source_unavailable(&self.url, e))?;

        let df = read_csv_bytes(bytes.to_vec())
            .map_err(|e| FeedbackError::source_unavailable(&self.url, e))?;

        debug!("Downloaded table with shape {:?}", df.shape());
        Ok(df)
    }
}
