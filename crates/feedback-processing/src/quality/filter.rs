//! Message and version quality checks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::WorkingDataset;
use crate::types::{FeedbackRecord, NormalizedFeedbackRow};
use crate::utils::{char_len, has_alphabetic};

/// Counts of rows removed by the quality filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Rows whose message failed the length/alphabetic check.
    pub rejected_messages: usize,
    /// Rows whose version could not be labeled.
    pub rejected_versions: usize,
}

impl QualityReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Decides which normalized rows form the working dataset.
#[derive(Debug, Clone, Copy)]
pub struct QualityFilter {
    min_message_length: usize,
}

impl QualityFilter {
    pub fn new(min_message_length: usize) -> Self {
        Self { min_message_length }
    }

    /// A message is usable when it is long enough and contains a letter.
    pub fn accepts_message(&self, message: &str) -> bool {
        char_len(message) >= self.min_message_length && has_alphabetic(message)
    }

    /// Turn a row into a record if both its message and version pass.
    pub fn check(&self, row: NormalizedFeedbackRow) -> Option<FeedbackRecord> {
        let feedback = Some(row.message).filter(|m| self.accepts_message(m))?;
        let version_label = row.version_label?;

        Some(FeedbackRecord {
            date: row.date,
            formatted_date: row.formatted_date,
            canonical_app: row.canonical_app,
            version_label,
            sentiment: row.sentiment,
            feedback,
        })
    }

    /// Drop every row failing either check, keeping the order of the rest.
    pub fn apply(&self, rows: Vec<NormalizedFeedbackRow>) -> (WorkingDataset, QualityReport) {
        let mut report = QualityReport {
            rows_before: rows.len(),
            ..QualityReport::default()
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            if !self.accepts_message(&row.message) {
                report.rejected_messages += 1;
            }
            if row.version_label.is_none() {
                report.rejected_versions += 1;
            }
            if let Some(record) = self.check(row) {
                records.push(record);
            }
        }

        report.rows_after = records.len();
        debug!(
            "Quality filter rejected {} messages and {} versions",
            report.rejected_messages, report.rejected_versions
        );
        info!(
            "Kept {} of {} feedback rows",
            report.rows_after, report.rows_before
        );

        (WorkingDataset::new(records), report)
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new(3)
    }
}
