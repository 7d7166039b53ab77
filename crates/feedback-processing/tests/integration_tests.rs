//! Integration tests for the feedback pipeline.
//!
//! These tests verify end-to-end behavior from a CSV table to selections,
//! aggregations and summaries.

use feedback_processing::source::{CsvFileSource, DataFrameSource, TableCache};
use feedback_processing::{
    CategoryField, FeedbackError, HAPPY_GLYPH, Pipeline, PipelineConfig, RawTableSource,
    ReportGenerator, ReportParams, SelectionCriterion, Sentiment, SentimentLabel, WorkingDataset,
    aggregate, aggregate_by_name, select, summarize,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn sample_source() -> CsvFileSource {
    CsvFileSource::new(fixtures_path().join("feedback_sample.csv"))
}

fn sample_source_table() -> DataFrame {
    sample_source().fetch().unwrap()
}

fn load_sample_dataset() -> WorkingDataset {
    let pipeline = Pipeline::builder().build().unwrap();
    let mut cache = TableCache::new();
    pipeline
        .run(&sample_source(), &mut cache)
        .expect("sample fixture should process")
        .dataset
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_sample_fixture() {
    let pipeline = Pipeline::builder().build().unwrap();
    let mut cache = TableCache::new();
    let result = pipeline.run(&sample_source(), &mut cache).unwrap();

    assert_eq!(result.quality.rows_before, 9);
    assert_eq!(result.quality.rows_after, 5);
    assert_eq!(result.quality.rejected_messages, 2);
    assert_eq!(result.quality.rejected_versions, 2);

    let apps: Vec<&str> = result
        .dataset
        .iter()
        .map(|r| r.canonical_app.as_str())
        .collect();
    assert_eq!(apps, vec!["Build", "Build", "AVA", "AVA", "Finance"]);

    let versions: Vec<&str> = result
        .dataset
        .iter()
        .map(|r| r.version_label.as_str())
        .collect();
    assert_eq!(versions, vec!["12.3", "12.3", "2023.1", "2023.1", "13.0"]);
}

#[test]
fn test_first_row_is_fully_normalized() {
    let dataset = load_sample_dataset();
    let first = &dataset.records()[0];

    assert_eq!(first.canonical_app, "Build");
    assert_eq!(first.sentiment_glyph(), HAPPY_GLYPH);
    assert_eq!(first.formatted_date, "15.01.2024");
    assert_eq!(first.feedback, "Great tool!");
}

#[test]
fn test_quoted_message_survives_loading() {
    let dataset = load_sample_dataset();
    let finance = dataset
        .iter()
        .find(|r| r.canonical_app == "Finance")
        .unwrap();

    assert_eq!(finance.feedback, "Slow, but works");
    assert_eq!(finance.sentiment, Sentiment::Negative);
    assert_eq!(finance.sentiment_glyph(), "");
}

#[test]
fn test_every_kept_row_passes_quality_checks() {
    let dataset = load_sample_dataset();

    for record in &dataset {
        assert!(record.feedback.chars().count() >= 3);
        assert!(record.feedback.chars().any(char::is_alphabetic));
        assert!(!record.version_label.is_empty());
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let pipeline = Pipeline::builder().build().unwrap();
    let table = sample_source_table();

    let first = pipeline.process(&table).unwrap();
    let second = pipeline.process(&table).unwrap();

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.quality, second.quality);
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_selection_partitions_dataset() {
    let dataset = load_sample_dataset();

    let all = dataset.select(SelectionCriterion::All);
    let positive = dataset.select(SelectionCriterion::PositiveOnly);
    let negative = dataset.select(SelectionCriterion::NegativeOnly);

    assert_eq!(all.len(), dataset.len());
    assert_eq!(positive.len(), 2);
    assert_eq!(negative.len(), 3);
    assert_eq!(positive.len() + negative.len(), all.len());
}

#[test]
fn test_unrated_feedback_is_selected_as_negative() {
    let dataset = load_sample_dataset();
    let negative = select(dataset.records(), SelectionCriterion::NegativeOnly);

    assert!(negative.iter().any(|r| r.sentiment == Sentiment::Unrated));
    assert!(negative.iter().all(|r| r.sentiment_glyph().is_empty()));
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[test]
fn test_aggregate_all_by_app() {
    let dataset = load_sample_dataset();
    let result = aggregate(dataset.records(), CategoryField::App);

    let categories: Vec<&str> = result.categories().collect();
    assert_eq!(categories, vec!["AVA", "Build", "Finance"]);

    assert_eq!(result.count("AVA", SentimentLabel::Positive), 1);
    assert_eq!(result.count("AVA", SentimentLabel::Negative), 1);
    assert_eq!(result.count("Build", SentimentLabel::Positive), 1);
    assert_eq!(result.count("Build", SentimentLabel::Negative), 1);
    assert_eq!(result.count("Finance", SentimentLabel::Negative), 1);
    assert_eq!(result.total(), dataset.len());
}

#[test]
fn test_aggregation_is_dense() {
    let dataset = load_sample_dataset();
    let negative = dataset.select(SelectionCriterion::NegativeOnly);
    let result = aggregate(negative.iter().copied(), CategoryField::Version);

    let categories: Vec<&str> = result.categories().collect();
    assert_eq!(categories, vec!["12.3", "13.0", "2023.1"]);

    for category in categories {
        assert_eq!(result.get(category, SentimentLabel::Positive), Some(0));
        assert_eq!(result.get(category, SentimentLabel::Negative), Some(1));
    }
}

#[test]
fn test_aggregation_chart_frame() {
    let dataset = load_sample_dataset();
    let positive = dataset.select(SelectionCriterion::PositiveOnly);
    let frame = aggregate(positive, CategoryField::App)
        .to_dataframe()
        .unwrap();

    assert_eq!(frame.shape(), (2, 3));
    assert_eq!(
        frame.get_column_names_str(),
        vec!["Anwendung", "Negativ", "Positiv"]
    );
}

#[test]
fn test_aggregate_by_unknown_field_fails() {
    let dataset = load_sample_dataset();
    let err = aggregate_by_name(dataset.records(), "Kunde").unwrap_err();

    assert!(matches!(err, FeedbackError::InvalidCategory(ref name) if name == "Kunde"));
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_of_sample() {
    let dataset = load_sample_dataset();
    let stats = summarize(dataset.records());

    assert_eq!(stats.total_feedbacks, 5);
    assert_eq!(stats.distinct_apps, 3);
    assert_eq!(stats.distinct_versions, 3);
    assert_eq!(stats.positive, 2);
    assert_eq!(stats.non_positive, 3);
    assert_eq!(stats.unrated, 1);
}

#[test]
fn test_summary_of_empty_dataset() {
    let stats = summarize(&[]);

    assert_eq!(stats.total_feedbacks, 0);
    assert_eq!(stats.distinct_apps, 0);
    assert_eq!(stats.distinct_versions, 0);
    assert_eq!(stats.positive, 0);
    assert_eq!(stats.non_positive, 0);
}

#[test]
fn test_report_json() {
    let dataset = load_sample_dataset();
    let report = ReportGenerator::build_report(ReportParams {
        source: "feedback_sample.csv",
        dataset: &dataset,
        quality: Default::default(),
        criterion: SelectionCriterion::PositiveOnly,
        group_by: CategoryField::App,
        row_limit: 10,
    });

    assert_eq!(report.selected_rows, 2);
    assert_eq!(report.rows.len(), 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["total_feedbacks"], 5);
    assert_eq!(json["rows"][0]["canonical_app"], "Build");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_missing_file_is_source_unavailable() {
    let pipeline = Pipeline::builder().build().unwrap();
    let mut cache = TableCache::new();
    let source = CsvFileSource::new(fixtures_path().join("does_not_exist.csv"));

    let err = pipeline.run(&source, &mut cache).err().unwrap();
    assert_eq!(err.error_code(), "SOURCE_UNAVAILABLE");
    assert!(cache.is_empty());
}

#[test]
fn test_missing_column_is_parse_error() {
    let pipeline = Pipeline::builder().build().unwrap();
    let mut cache = TableCache::new();
    let source = CsvFileSource::new(fixtures_path().join("missing_column.csv"));

    let err = pipeline.run(&source, &mut cache).err().unwrap();
    assert_eq!(err.error_code(), "PARSE_ERROR");
}

#[test]
fn test_unparseable_date_is_parse_error() {
    let table = df!(
        "AppName" => &["NEVARIS Build"],
        "AppVersion" => &["12.3"],
        "IsHappy" => &[1i64],
        "Message" => &["Great tool!"],
        "Datum" => &["yesterday"]
    )
    .unwrap();

    let pipeline = Pipeline::builder().build().unwrap();
    let err = pipeline.process(&table).err().unwrap();
    assert_eq!(err.error_code(), "PARSE_ERROR");
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_custom_prefix_and_message_length() {
    let config = PipelineConfig::builder()
        .app_prefix("")
        .min_message_length(12)
        .build()
        .unwrap();
    let pipeline = Pipeline::builder().config(config).build().unwrap();
    let mut cache = TableCache::new();
    let result = pipeline.run(&sample_source(), &mut cache).unwrap();

    // "Great tool!" and "Nice update" are now too short
    assert_eq!(result.dataset.len(), 4);
    assert!(
        result
            .dataset
            .iter()
            .all(|r| r.canonical_app.starts_with("NEVARIS "))
    );
}

#[test]
fn test_cache_reuses_fetched_table() {
    let table = sample_source_table();
    let source = DataFrameSource::new("sample", table);
    let pipeline = Pipeline::builder().build().unwrap();
    let mut cache = TableCache::new();

    let first = pipeline.run(&source, &mut cache).unwrap();
    let fetched_at = cache.fetched_at("sample").unwrap();
    let second = pipeline.run(&source, &mut cache).unwrap();

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(cache.fetched_at("sample"), Some(fetched_at));
}
