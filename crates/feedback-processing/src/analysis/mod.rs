//! Views over the working dataset.
//!
//! Both operations are pure and can be called any number of times against
//! the same dataset:
//!
//! - [`select`] slices the dataset by sentiment
//! - [`aggregate`] counts a slice per category and sentiment label
//!
//! # Example
//!
//! ```rust,ignore
//! use feedback_processing::analysis::{aggregate, select};
//! use feedback_processing::{CategoryField, SelectionCriterion};
//!
//! let unhappy = select(dataset.records(), SelectionCriterion::NegativeOnly);
//! let per_version = aggregate(unhappy, CategoryField::Version);
//! ```

mod aggregator;
mod selector;

pub use aggregator::{AggregationResult, aggregate, aggregate_by_name};
pub use selector::select;
