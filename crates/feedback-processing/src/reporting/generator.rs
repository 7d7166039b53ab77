use chrono::Local;
use serde::Serialize;
use tracing::debug;

use super::summary::{SummaryStats, summarize};
use crate::analysis::{AggregationResult, aggregate};
use crate::dataset::WorkingDataset;
use crate::quality::QualityReport;
use crate::types::{CategoryField, FeedbackRecord, SelectionCriterion};

// ============================================================================
// Report Types
// ============================================================================

/// Everything a frontend needs to render one view of the feedback table.
///
/// Use this for JSON output (`--json`) and programmatic access.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Identifier of the raw table source
    pub source: String,
    /// Sentiment filter applied to the list and the chart
    pub criterion: SelectionCriterion,
    /// Field the chart is grouped by
    pub group_by: CategoryField,
    /// Rows removed while cleaning
    pub quality: QualityReport,
    /// Figures over the whole working dataset (not the selection)
    pub summary: SummaryStats,
    /// Number of rows matching the criterion
    pub selected_rows: usize,
    /// Counts of the selection per category and sentiment
    pub aggregation: AggregationResult,
    /// The selected rows, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<FeedbackRecord>,
}

/// Parameters for building a report.
pub struct ReportParams<'a> {
    pub source: &'a str,
    pub dataset: &'a WorkingDataset,
    pub quality: QualityReport,
    pub criterion: SelectionCriterion,
    pub group_by: CategoryField,
    /// Include at most this many selected rows (0 = none)
    pub row_limit: usize,
}

/// Builds [`FeedbackReport`]s from a working dataset.
#[derive(Debug, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn build_report(params: ReportParams<'_>) -> FeedbackReport {
        let selection = params.dataset.select(params.criterion);
        let aggregation = aggregate(selection.iter().copied(), params.group_by);

        debug!(
            "Building report: {} of {} rows selected",
            selection.len(),
            params.dataset.len()
        );

        FeedbackReport {
            generated_at: Local::now().to_rfc3339(),
            source: params.source.to_string(),
            criterion: params.criterion,
            group_by: params.group_by,
            quality: params.quality,
            summary: summarize(params.dataset.records()),
            selected_rows: selection.len(),
            aggregation,
            rows: selection
                .into_iter()
                .take(params.row_limit)
                .cloned()
                .collect(),
        }
    }
}
