//! Feedback Processing Library
//!
//! Turns a flat table of end-user feedback into an analysis-ready dataset,
//! sentiment slices and grouped counts for charting. Built with Rust and Polars.
//!
//! # Overview
//!
//! - **Sources**: Load the raw table from a CSV file, an HTTP(S) URL or memory,
//!   with an explicit caller-owned cache
//! - **Normalization**: Sentiment glyph, `DD.MM.YYYY` dates, canonical app names,
//!   version labels and trimmed messages
//! - **Quality Filtering**: Drop rows without meaningful text or a labelable version
//! - **Selection**: Slice by sentiment (all / positive / negative)
//! - **Aggregation**: Dense category × sentiment counts
//! - **Summary**: Totals, distinct apps and versions, sentiment tallies
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use feedback_processing::{CategoryField, Pipeline, SelectionCriterion};
//! use feedback_processing::analysis::aggregate;
//! use feedback_processing::reporting::summarize;
//! use feedback_processing::source::{CsvFileSource, TableCache};
//!
//! let pipeline = Pipeline::builder().build()?;
//! let mut cache = TableCache::new();
//! let result = pipeline.run(&CsvFileSource::new("feedback.csv"), &mut cache)?;
//!
//! let stats = summarize(result.dataset.records());
//! let unhappy = result.dataset.select(SelectionCriterion::NegativeOnly);
//! let chart = aggregate(unhappy, CategoryField::App);
//!
//! println!("{} feedbacks, {} positive", stats.total_feedbacks, stats.positive);
//! for (app, label, count) in chart.iter() {
//!     println!("{app} {label}: {count}");
//! }
//! ```
//!
//! # Sentiment
//!
//! The raw `IsHappy` flag is kept as a three-valued [`Sentiment`]
//! (`Positive`, `Negative`, `Unrated`). Selection and aggregation use the
//! two-valued projection ([`Sentiment::glyph`], [`Sentiment::label`]), in which
//! unrated feedback counts as negative. [`reporting::SummaryStats::unrated`]
//! still reports the rows without a rating.

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod source;
pub mod types;
pub mod utils;
pub mod version;

// Re-exports for convenient access
pub use analysis::{AggregationResult, aggregate, aggregate_by_name, select};
pub use cleaner::Normalizer;
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use dataset::WorkingDataset;
pub use error::{FeedbackError, Result as FeedbackResult, ResultExt};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineResult};
pub use quality::{QualityFilter, QualityReport};
pub use reporting::{FeedbackReport, ReportGenerator, ReportParams, SummaryStats, summarize};
pub use source::{CsvFileSource, DataFrameSource, RawTableSource, TableCache};
pub use types::{
    CategoryField, FeedbackRecord, HAPPY_GLYPH, NormalizedFeedbackRow, RawFeedbackRow,
    SelectionCriterion, Sentiment, SentimentLabel,
};
pub use version::{DottedVersionLabeler, VersionLabeler};
