//! Pipeline module.
//!
//! This module provides the pipeline that chains ingestion, normalization
//! and quality filtering.

mod builder;

pub use builder::{Pipeline, PipelineBuilder, PipelineResult};
