//! The cleaned, analysis-ready feedback dataset.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::select;
use crate::types::{FeedbackRecord, SelectionCriterion};

/// Column headers of the list view.
pub const LIST_VIEW_COLUMNS: [&str; 5] =
    ["Datum", "Anwendung", "Version", "Begeistert", "Kunden-Feedback"];

/// Rows that passed normalization and quality filtering, in input order.
///
/// The dataset is never mutated after construction; selections borrow from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDataset {
    records: Vec<FeedbackRecord>,
}

impl WorkingDataset {
    pub fn new(records: Vec<FeedbackRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedbackRecord> {
        self.records.iter()
    }

    /// Rows matching `criterion`, in dataset order.
    pub fn select(&self, criterion: SelectionCriterion) -> Vec<&FeedbackRecord> {
        select(&self.records, criterion)
    }

    /// The whole dataset as a list view table.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        list_view(&self.records)
    }
}

impl<'a> IntoIterator for &'a WorkingDataset {
    type Item = &'a FeedbackRecord;
    type IntoIter = std::slice::Iter<'a, FeedbackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Render records as the list view table (`Datum`, `Anwendung`, `Version`,
/// `Begeistert`, `Kunden-Feedback`).
pub fn list_view<'a>(
    records: impl IntoIterator<Item = &'a FeedbackRecord>,
) -> PolarsResult<DataFrame> {
    let mut dates = Vec::new();
    let mut apps = Vec::new();
    let mut versions = Vec::new();
    let mut glyphs = Vec::new();
    let mut messages = Vec::new();

    for record in records {
        dates.push(record.formatted_date.as_str());
        apps.push(record.canonical_app.as_str());
        versions.push(record.version_label.as_str());
        glyphs.push(record.sentiment_glyph());
        messages.push(record.feedback.as_str());
    }

    let [date_col, app_col, version_col, glyph_col, message_col] = LIST_VIEW_COLUMNS;
    DataFrame::new(vec![
        Column::new(date_col.into(), dates),
        Column::new(app_col.into(), apps),
        Column::new(version_col.into(), versions),
        Column::new(glyph_col.into(), glyphs),
        Column::new(message_col.into(), messages),
    ])
}
