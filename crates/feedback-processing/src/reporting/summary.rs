//! Scalar statistics over the working dataset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{FeedbackRecord, Sentiment};

/// Headline figures shown above the feedback list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of rows in the working dataset
    pub total_feedbacks: usize,
    /// Distinct canonical application names
    pub distinct_apps: usize,
    /// Distinct version labels
    pub distinct_versions: usize,
    /// Rows with the happy glyph
    pub positive: usize,
    /// Rows without the happy glyph (includes unrated rows)
    pub non_positive: usize,
    /// Rows whose raw `IsHappy` cell was empty
    pub unrated: usize,
}

/// Compute the summary for a set of records. An empty input yields zeros.
pub fn summarize(records: &[FeedbackRecord]) -> SummaryStats {
    let mut apps = HashSet::new();
    let mut versions = HashSet::new();
    let mut stats = SummaryStats {
        total_feedbacks: records.len(),
        ..SummaryStats::default()
    };

    for record in records {
        apps.insert(record.canonical_app.as_str());
        versions.insert(record.version_label.as_str());

        match record.sentiment {
            Sentiment::Positive => stats.positive += 1,
            Sentiment::Negative => stats.non_positive += 1,
            Sentiment::Unrated => {
                stats.non_positive += 1;
                stats.unrated += 1;
            }
        }
    }

    stats.distinct_apps = apps.len();
    stats.distinct_versions = versions.len();
    stats
}
