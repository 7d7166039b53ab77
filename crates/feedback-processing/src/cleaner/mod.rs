//! Row normalization for raw feedback tables.
//!
//! This module provides functionality for:
//! - Deriving the sentiment from the `IsHappy` flag
//! - Formatting the `Datum` column as `DD.MM.YYYY`
//! - Stripping the organisational prefix from application names
//! - Labelling version strings
//! - Trimming feedback messages

mod converters;
mod sanitizers;

use std::fmt::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{FeedbackError, Result};
use crate::source::schema::DATE;
use crate::types::{NormalizedFeedbackRow, RawFeedbackRow, Sentiment};
use crate::version::VersionLabeler;

use converters::parse_calendar_date;

/// Per-row cleaner producing [`NormalizedFeedbackRow`]s.
///
/// Rows are processed independently; the output has the same length and
/// order as the input.
pub struct Normalizer {
    app_prefix: String,
    date_output_format: String,
    labeler: Arc<dyn VersionLabeler>,
}

impl Normalizer {
    pub fn new(config: &PipelineConfig, labeler: Arc<dyn VersionLabeler>) -> Self {
        Self {
            app_prefix: config.app_prefix.clone(),
            date_output_format: config.date_output_format.clone(),
            labeler,
        }
    }

    /// Normalize every row.
    ///
    /// Fails with a parse error on the first date that cannot be parsed; a
    /// malformed date column means the table does not have the expected schema.
    pub fn normalize(&self, rows: &[RawFeedbackRow]) -> Result<Vec<NormalizedFeedbackRow>> {
        info!("Normalizing {} feedback rows...", rows.len());

        let normalized = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.normalize_row(idx, row))
            .collect::<Result<Vec<_>>>()?;

        let unlabeled = normalized
            .iter()
            .filter(|row| row.version_label.is_none())
            .count();
        debug!("{} rows have a version that could not be labeled", unlabeled);

        Ok(normalized)
    }

    /// Normalize a single row. `idx` is only used in error messages.
    pub fn normalize_row(&self, idx: usize, row: &RawFeedbackRow) -> Result<NormalizedFeedbackRow> {
        let date = parse_calendar_date(&row.date).ok_or_else(|| {
            FeedbackError::parse(
                DATE,
                format!("row {}: '{}' is not a calendar date", idx, row.date),
            )
        })?;

        let version_label = row
            .app_version
            .as_deref()
            .and_then(|raw| self.labeler.label(raw));

        let mut formatted_date = String::new();
        write!(formatted_date, "{}", date.format(&self.date_output_format)).map_err(|_| {
            FeedbackError::InvalidConfig(format!(
                "invalid date output format '{}'",
                self.date_output_format
            ))
        })?;

        Ok(NormalizedFeedbackRow {
            date,
            formatted_date,
            canonical_app: sanitizers::strip_app_prefix(&row.app_name, &self.app_prefix)
                .to_string(),
            app_version: row.app_version.clone(),
            version_label,
            sentiment: Sentiment::from_flag(row.is_happy),
            message: sanitizers::clean_message(row.message.as_deref()),
        })
    }
}
