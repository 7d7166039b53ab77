//! Feedback quality filtering.
//!
//! This module decides which normalized rows are usable for analysis:
//! the message must be meaningful text and the version must be labelable.

mod filter;

pub use filter::{QualityFilter, QualityReport};
