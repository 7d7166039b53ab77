//! Report generation module.
//!
//! This module provides the summary statistics shown above the feedback list
//! and the combined [`FeedbackReport`] used for JSON output.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedback_processing::reporting::{ReportGenerator, ReportParams};
//!
//! let report = ReportGenerator::build_report(ReportParams {
//!     source: "feedback.csv",
//!     dataset: &dataset,
//!     quality,
//!     criterion: SelectionCriterion::All,
//!     group_by: CategoryField::Version,
//!     row_limit: 0,
//! });
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod generator;
mod summary;

pub use generator::{FeedbackReport, ReportGenerator, ReportParams};
pub use summary::{SummaryStats, summarize};
