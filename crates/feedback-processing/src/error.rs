//! Custom error types for the feedback pipeline.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Row-level exclusions (short messages, unparseable versions) are never
//! errors; only table-level and contract problems end up here.
//!
//! Errors are serializable so a frontend can show a `{code, message}` pair.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the feedback pipeline.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// The raw table could not be fetched.
    #[error("Data source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    /// A required column is missing or a value in it cannot be parsed.
    #[error("Failed to parse column '{column}': {reason}")]
    Parse { column: String, reason: String },

    /// Aggregation was requested for a field that is not a category.
    #[error("Invalid category field '{0}' (expected 'app' or 'version')")]
    InvalidCategory(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with "remote" feature).
    #[cfg(feature = "remote")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FeedbackError>,
    },
}

impl FeedbackError {
    /// Shorthand for a [`FeedbackError::Parse`] error.
    pub fn parse(column: impl Into<String>, reason: impl Into<String>) -> Self {
        FeedbackError::Parse {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`FeedbackError::SourceUnavailable`] error.
    pub fn source_unavailable(source_id: impl Into<String>, reason: impl ToString) -> Self {
        FeedbackError::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FeedbackError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::InvalidCategory(_) => "INVALID_CATEGORY",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "remote")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the input table rather than the caller.
    ///
    /// Source and schema failures are input problems; an invalid category or
    /// configuration is a programming error on the caller side.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::SourceUnavailable { .. } | Self::Parse { .. } => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for FeedbackError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("FeedbackError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FeedbackError::Polars(e).with_context(context))
    }
}
