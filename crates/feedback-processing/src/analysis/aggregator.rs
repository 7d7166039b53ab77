//! Category × sentiment counting for charts.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::types::{CategoryField, FeedbackRecord, SentimentLabel};

/// Dense count table keyed by `(category value, sentiment label)`.
///
/// Categories are kept in ascending lexicographic order. Every category that
/// occurs has a count for both sentiment labels, zero when the pair was never
/// observed. An empty input gives an empty result.
///
/// Densification always covers both labels, not only the labels observed in
/// the input: a positive-only selection still carries a zero `Negativ` count
/// per category, so chart tables keep a fixed column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    field: CategoryField,
    counts: BTreeMap<String, BTreeMap<SentimentLabel, usize>>,
}

impl AggregationResult {
    pub fn field(&self) -> CategoryField {
        self.field
    }

    /// Count for a cell, `None` if the category does not occur.
    pub fn get(&self, category: &str, label: SentimentLabel) -> Option<usize> {
        self.counts.get(category)?.get(&label).copied()
    }

    /// Count for a cell, zero if the category does not occur.
    pub fn count(&self, category: &str, label: SentimentLabel) -> usize {
        self.get(category, label).unwrap_or(0)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Sentiment labels present in the result.
    pub fn labels(&self) -> Vec<SentimentLabel> {
        if self.counts.is_empty() {
            Vec::new()
        } else {
            SentimentLabel::ALL.to_vec()
        }
    }

    /// All cells as `(category, label, count)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SentimentLabel, usize)> {
        self.counts.iter().flat_map(|(category, cells)| {
            cells
                .iter()
                .map(move |(label, count)| (category.as_str(), *label, *count))
        })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.counts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all cells; equals the number of aggregated rows.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, _, count)| count).sum()
    }

    /// Wide table with one row per category and one count column per label,
    /// the shape chart widgets expect.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let categories: Vec<&str> = self.categories().collect();
        let mut columns = vec![Column::new(self.field.column_name().into(), categories)];

        for label in SentimentLabel::ALL {
            let counts: Vec<u64> = self
                .counts
                .values()
                .map(|cells| cells.get(&label).copied().unwrap_or(0) as u64)
                .collect();
            columns.push(Column::new(label.as_str().into(), counts));
        }

        DataFrame::new(columns)
    }
}

/// Count `rows` per category value and sentiment label, then densify.
pub fn aggregate<I>(rows: I, field: CategoryField) -> AggregationResult
where
    I: IntoIterator,
    I::Item: Borrow<FeedbackRecord>,
{
    let mut counts: BTreeMap<String, BTreeMap<SentimentLabel, usize>> = BTreeMap::new();

    for row in rows {
        let record = row.borrow();
        *counts
            .entry(field.value_of(record).to_string())
            .or_default()
            .entry(record.sentiment.label())
            .or_default() += 1;
    }

    for cells in counts.values_mut() {
        for label in SentimentLabel::ALL {
            cells.entry(label).or_insert(0);
        }
    }

    debug!("Aggregated {} categories by {}", counts.len(), field);
    AggregationResult { field, counts }
}

/// Like [`aggregate`], with the category given by name (`"app"`, `"version"`,
/// `"Anwendung"`, ...).
///
/// Fails with [`crate::FeedbackError::InvalidCategory`] for any other name.
pub fn aggregate_by_name<I>(rows: I, field_name: &str) -> Result<AggregationResult>
where
    I: IntoIterator,
    I::Item: Borrow<FeedbackRecord>,
{
    let field: CategoryField = field_name.parse()?;
    Ok(aggregate(rows, field))
}
