//! Configuration types for the feedback pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};

/// Organisational prefix removed from application names.
pub const DEFAULT_APP_PREFIX: &str = "NEVARIS ";

/// Output format of the `Datum` column (`DD.MM.YYYY`).
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Configuration for the feedback pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use feedback_processing::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .app_prefix("ACME ")
///     .min_message_length(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Literal prefix stripped from the application name when present.
    /// Default: "NEVARIS "
    pub app_prefix: String,

    /// Minimum number of characters a trimmed message needs to count as feedback.
    /// Default: 3
    pub min_message_length: usize,

    /// chrono format string used for the formatted date.
    /// Default: "%d.%m.%Y"
    pub date_output_format: String,

    /// Number of dotted version components kept in a version label.
    /// Default: 2 (e.g. "12.3.4.5" -> "12.3")
    pub version_components: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            app_prefix: DEFAULT_APP_PREFIX.to_string(),
            min_message_length: 3,
            date_output_format: DEFAULT_DATE_FORMAT.to_string(),
            version_components: 2,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.min_message_length == 0 {
            return Err(ConfigValidationError::InvalidMessageLength(
                self.min_message_length,
            ));
        }

        if self.date_output_format.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDateFormat);
        }

        if !(1..=4).contains(&self.version_components) {
            return Err(ConfigValidationError::InvalidVersionComponents(
                self.version_components,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid minimum message length: {0} (must be at least 1)")]
    InvalidMessageLength(usize),

    #[error("Date output format must not be empty")]
    EmptyDateFormat,

    #[error("Invalid version components: {0} (must be between 1 and 4)")]
    InvalidVersionComponents(usize),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    app_prefix: Option<String>,
    min_message_length: Option<usize>,
    date_output_format: Option<String>,
    version_components: Option<usize>,
}

impl PipelineConfigBuilder {
    /// Set the prefix stripped from application names.
    ///
    /// An empty prefix disables stripping.
    pub fn app_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app_prefix = Some(prefix.into());
        self
    }

    /// Set the minimum message length in characters.
    pub fn min_message_length(mut self, length: usize) -> Self {
        self.min_message_length = Some(length);
        self
    }

    /// Set the chrono format used for the formatted date.
    pub fn date_output_format(mut self, format: impl Into<String>) -> Self {
        self.date_output_format = Some(format.into());
        self
    }

    /// Set how many dotted components a version label keeps.
    pub fn version_components(mut self, components: usize) -> Self {
        self.version_components = Some(components);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            app_prefix: self
                .app_prefix
                .unwrap_or_else(|| DEFAULT_APP_PREFIX.to_string()),
            min_message_length: self.min_message_length.unwrap_or(3),
            date_output_format: self
                .date_output_format
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            version_components: self.version_components.unwrap_or(2),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.app_prefix, "NEVARIS ");
        assert_eq!(config.min_message_length, 3);
        assert_eq!(config.date_output_format, "%d.%m.%Y");
        assert_eq!(config.version_components, 2);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .app_prefix("ACME ")
            .min_message_length(5)
            .date_output_format("%Y-%m-%d")
            .version_components(3)
            .build()
            .unwrap();

        assert_eq!(config.app_prefix, "ACME ");
        assert_eq!(config.min_message_length, 5);
        assert_eq!(config.date_output_format, "%Y-%m-%d");
        assert_eq!(config.version_components, 3);
    }

    #[test]
    fn test_validation_invalid_message_length() {
        let result = PipelineConfig::builder().min_message_length(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMessageLength(0)
        ));
    }

    #[test]
    fn test_validation_invalid_version_components() {
        let result = PipelineConfig::builder().version_components(5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidVersionComponents(5)
        ));
    }

    #[test]
    fn test_validation_empty_date_format() {
        let result = PipelineConfig::builder().date_output_format("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyDateFormat
        ));
    }

    #[test]
    fn test_pipeline_config_from_json() {
        let json = r#"{
            "app_prefix": "NEVARIS ",
            "min_message_length": 4,
            "date_output_format": "%d/%m/%Y",
            "version_components": 1
        }"#;

        let config: PipelineConfig =
            serde_json::from_str(json).expect("Should deserialize from frontend JSON");

        assert_eq!(config.min_message_length, 4);
        assert_eq!(config.date_output_format, "%d/%m/%Y");
        assert_eq!(config.version_components, 1);
        assert!(config.validate().is_ok());
    }
}
