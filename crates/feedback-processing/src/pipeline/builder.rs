//! Main feedback pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! turning a raw feedback table into a working dataset.

use std::sync::Arc;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, error, info};

use crate::cleaner::Normalizer;
use crate::config::PipelineConfig;
use crate::dataset::WorkingDataset;
use crate::error::{FeedbackError, Result};
use crate::quality::{QualityFilter, QualityReport};
use crate::source::{RawTableSource, TableCache, read_raw_rows};
use crate::types::NormalizedFeedbackRow;
use crate::version::{DottedVersionLabeler, VersionLabeler};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub dataset: WorkingDataset,
    pub quality: QualityReport,
}

/// The feedback preparation pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
/// A pipeline holds no state between runs; every call to
/// [`process`](Self::process) derives a fresh dataset.
///
/// # Example
///
/// ```rust,ignore
/// use feedback_processing::{Pipeline, PipelineConfig};
/// use feedback_processing::source::{CsvFileSource, TableCache};
///
/// let pipeline = Pipeline::builder()
///     .config(PipelineConfig::builder().app_prefix("NEVARIS ").build()?)
///     .build()?;
///
/// let mut cache = TableCache::new();
/// let result = pipeline.run(&CsvFileSource::new("feedback.csv"), &mut cache)?;
/// println!("{} usable feedbacks", result.dataset.len());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
    filter: QualityFilter,
}

// Sessions may run pipelines on worker threads
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the raw table through `cache` and process it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::SourceUnavailable`] if the table cannot be
    /// fetched and [`FeedbackError::Parse`] if it does not match the schema.
    pub fn run(
        &self,
        source: &dyn RawTableSource,
        cache: &mut TableCache,
    ) -> Result<PipelineResult> {
        let table = cache.get_or_fetch(source)?;
        self.process(&table)
    }

    /// Normalize and filter a raw table.
    pub fn process(&self, table: &DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting feedback pipeline on {} rows...", table.height());

        let result = self.process_internal(table);
        match &result {
            Ok(result) => info!(
                "Pipeline completed in {} ms: {} usable feedbacks",
                start_time.elapsed().as_millis(),
                result.dataset.len()
            ),
            Err(e) => error!("Pipeline error: {}", e),
        }
        result
    }

    /// Run only the normalization step.
    pub fn normalize(&self, table: &DataFrame) -> Result<Vec<NormalizedFeedbackRow>> {
        let raw_rows = read_raw_rows(table)?;
        self.normalizer.normalize(&raw_rows)
    }

    fn process_internal(&self, table: &DataFrame) -> Result<PipelineResult> {
        // Step 1: Normalize every row
        let normalized = self.normalize(table)?;
        debug!("Step 1 complete: {} rows normalized", normalized.len());

        // Step 2: Drop rows without usable message or version
        let (dataset, quality) = self.filter.apply(normalized);
        debug!(
            "Step 2 complete: {} rows dropped by quality filter",
            quality.rows_dropped()
        );

        Ok(PipelineResult { dataset, quality })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    labeler: Option<Arc<dyn VersionLabeler>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the version labeler.
    ///
    /// Defaults to a [`DottedVersionLabeler`] keeping
    /// `config.version_components` components.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pipeline = Pipeline::builder()
    ///     .version_labeler(Arc::new(|raw: &str| release_name(raw)))
    ///     .build()?;
    /// ```
    pub fn version_labeler(mut self, labeler: Arc<dyn VersionLabeler>) -> Self {
        self.labeler = Some(labeler);
        self
    }

    /// Build the pipeline.
    ///
    /// Fails with [`FeedbackError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| FeedbackError::InvalidConfig(e.to_string()))?;

        let labeler = self
            .labeler
            .unwrap_or_else(|| Arc::new(DottedVersionLabeler::new(config.version_components)));

        Ok(Pipeline {
            normalizer: Normalizer::new(&config, labeler),
            filter: QualityFilter::new(config.min_message_length),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataFrameSource;
    use crate::types::{HAPPY_GLYPH, Sentiment};
    use polars::prelude::*;

    fn raw_table() -> DataFrame {
        df!(
            "AppName" => &["NEVARIS Build", "NEVARIS Build"],
            "AppVersion" => &["12.3.4.5", "bad"],
            "IsHappy" => &[1i64, 0],
            "Message" => &["Great tool!", "x"],
            "Datum" => &["2024-01-15", "2024-01-16"]
        )
        .unwrap()
    }

    #[test]
    fn test_process_keeps_only_usable_rows() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(&raw_table()).unwrap();

        assert_eq!(result.dataset.len(), 1);
        let record = &result.dataset.records()[0];
        assert_eq!(record.canonical_app, "Build");
        assert_eq!(record.sentiment_glyph(), HAPPY_GLYPH);
        assert_eq!(record.formatted_date, "15.01.2024");
        assert_eq!(result.quality.rows_dropped(), 1);
    }

    #[test]
    fn test_nan_rating_stays_unrated() {
        let table = df!(
            "AppName" => &["NEVARIS Build", "NEVARIS Build"],
            "AppVersion" => &["12.3", "12.3"],
            "IsHappy" => &[Some(1.0), Some(f64::NAN)],
            "Message" => &["Great tool!", "No rating given"],
            "Datum" => &["2024-01-15", "2024-01-16"]
        )
        .unwrap();

        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(&table).unwrap();
        let stats = crate::reporting::summarize(result.dataset.records());

        assert_eq!(result.dataset.records()[1].sentiment, Sentiment::Unrated);
        assert_eq!(stats.unrated, 1);
        assert_eq!(stats.non_positive, 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig {
            version_components: 0,
            ..PipelineConfig::default()
        };
        let err = Pipeline::builder().config(config).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_custom_labeler() {
        let labeler = |raw: &str| (raw == "bad").then(|| "Legacy".to_string());
        let pipeline = Pipeline::builder()
            .version_labeler(Arc::new(labeler))
            .build()
            .unwrap();

        // "bad" is now labelable but its message is still too short
        let result = pipeline.process(&raw_table()).unwrap();
        assert!(result.dataset.is_empty());

        let normalized = pipeline.normalize(&raw_table()).unwrap();
        assert_eq!(normalized[1].version_label.as_deref(), Some("Legacy"));
    }

    #[test]
    fn test_run_goes_through_cache() {
        let pipeline = Pipeline::builder().build().unwrap();
        let source = DataFrameSource::new("memory", raw_table());
        let mut cache = TableCache::new();

        let first = pipeline.run(&source, &mut cache).unwrap();
        let second = pipeline.run(&source, &mut cache).unwrap();

        assert_eq!(first.dataset, second.dataset);
        assert_eq!(cache.len(), 1);
    }
}
