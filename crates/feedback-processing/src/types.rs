use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// Glyph shown for feedback submitted by a happy user.
pub const HAPPY_GLYPH: &str = "😊";

// ============================================================================
// Raw and normalized rows
// ============================================================================

/// One row of the unprocessed feedback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeedbackRow {
    pub app_name: String,
    pub app_version: Option<String>,
    /// `None` when the flag cell was empty.
    pub is_happy: Option<i64>,
    pub message: Option<String>,
    pub date: String,
}

/// Recorded sentiment of a feedback row.
///
/// The raw table only knows "happy" (`1`), any other value, or nothing at all.
/// The distinction between an explicit non-happy value and a missing one is
/// kept here; [`Sentiment::glyph`] and [`Sentiment::label`] collapse it to
/// two values for selection and charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Unrated,
}

impl Sentiment {
    /// Derive the sentiment from the raw `IsHappy` flag.
    pub fn from_flag(flag: Option<i64>) -> Self {
        match flag {
            Some(1) => Sentiment::Positive,
            Some(_) => Sentiment::Negative,
            None => Sentiment::Unrated,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Sentiment::Positive)
    }

    /// Two-valued display glyph: the happy glyph or an empty string.
    pub fn glyph(self) -> &'static str {
        if self.is_positive() { HAPPY_GLYPH } else { "" }
    }

    /// Two-valued label used for grouping.
    pub fn label(self) -> SentimentLabel {
        if self.is_positive() {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }
}

/// Sentiment label used as the second grouping key of an aggregation.
///
/// Ordered `Negative` before `Positive`, matching the alphabetical order of
/// their display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Negativ")]
    Negative,
    #[serde(rename = "Positiv")]
    Positive,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 2] = [SentimentLabel::Negative, SentimentLabel::Positive];

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negativ",
            SentimentLabel::Positive => "Positiv",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw row after per-row normalization, before quality filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFeedbackRow {
    pub date: NaiveDate,
    pub formatted_date: String,
    pub canonical_app: String,
    pub app_version: Option<String>,
    /// `None` when the version labeler could not parse `app_version`.
    pub version_label: Option<String>,
    pub sentiment: Sentiment,
    /// Trimmed message text; empty when the raw cell was empty.
    pub message: String,
}

impl NormalizedFeedbackRow {
    pub fn sentiment_glyph(&self) -> &'static str {
        self.sentiment.glyph()
    }
}

/// A row that passed the quality filter.
///
/// Message and version label are guaranteed to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub date: NaiveDate,
    pub formatted_date: String,
    pub canonical_app: String,
    pub version_label: String,
    pub sentiment: Sentiment,
    pub feedback: String,
}

impl FeedbackRecord {
    pub fn sentiment_glyph(&self) -> &'static str {
        self.sentiment.glyph()
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// Sentiment predicate applied by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionCriterion {
    #[default]
    All,
    PositiveOnly,
    NegativeOnly,
}

impl SelectionCriterion {
    pub fn matches(self, sentiment: Sentiment) -> bool {
        match self {
            SelectionCriterion::All => true,
            SelectionCriterion::PositiveOnly => sentiment.is_positive(),
            SelectionCriterion::NegativeOnly => !sentiment.is_positive(),
        }
    }
}

impl FromStr for SelectionCriterion {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "alle" => Ok(SelectionCriterion::All),
            "positive" | "ja" => Ok(SelectionCriterion::PositiveOnly),
            "negative" | "nein" => Ok(SelectionCriterion::NegativeOnly),
            other => Err(FeedbackError::InvalidConfig(format!(
                "unknown selection criterion '{}'",
                other
            ))),
        }
    }
}

/// Field a selection can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryField {
    App,
    Version,
}

impl CategoryField {
    /// Column header used in list and chart views.
    pub fn column_name(self) -> &'static str {
        match self {
            CategoryField::App => "Anwendung",
            CategoryField::Version => "Version",
        }
    }

    /// Value of this field for a record.
    pub fn value_of(self, record: &FeedbackRecord) -> &str {
        match self {
            CategoryField::App => &record.canonical_app,
            CategoryField::Version => &record.version_label,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for CategoryField {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "app" | "application" | "anwendung" | "canonical_app" => Ok(CategoryField::App),
            "version" | "version_label" => Ok(CategoryField::Version),
            _ => Err(FeedbackError::InvalidCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_from_flag() {
        assert_eq!(Sentiment::from_flag(Some(1)), Sentiment::Positive);
        assert_eq!(Sentiment::from_flag(Some(0)), Sentiment::Negative);
        assert_eq!(Sentiment::from_flag(Some(7)), Sentiment::Negative);
        assert_eq!(Sentiment::from_flag(None), Sentiment::Unrated);
    }

    #[test]
    fn test_unrated_collapses_to_negative() {
        assert_eq!(Sentiment::Unrated.glyph(), "");
        assert_eq!(Sentiment::Unrated.label(), SentimentLabel::Negative);
        assert_eq!(Sentiment::Positive.glyph(), HAPPY_GLYPH);
        assert_eq!(Sentiment::Positive.label().to_string(), "Positiv");
    }

    #[test]
    fn test_category_field_parsing() {
        assert_eq!("Anwendung".parse::<CategoryField>().unwrap(), CategoryField::App);
        assert_eq!("version".parse::<CategoryField>().unwrap(), CategoryField::Version);

        let err = "Datum".parse::<CategoryField>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATEGORY");
    }

    #[test]
    fn test_selection_criterion_parsing() {
        assert_eq!("Ja".parse::<SelectionCriterion>().unwrap(), SelectionCriterion::PositiveOnly);
        assert_eq!("negative".parse::<SelectionCriterion>().unwrap(), SelectionCriterion::NegativeOnly);
        assert!("maybe".parse::<SelectionCriterion>().is_err());
    }

    #[test]
    fn test_sentiment_label_serializes_display_name() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"Positiv\"");
    }
}
