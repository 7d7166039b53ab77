//! Shared utilities for the feedback pipeline.
//!
//! This module contains small helpers used by ingestion and the cleaner.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Common missing value markers in exported tables.
pub const ERROR_MARKERS: [&str; 8] = [
    "error", "unknown", "n/a", "na", "null", "missing", "none", "nan",
];

/// String values treated as a set boolean flag.
pub const BOOLEAN_TRUE_VALUES: [&str; 3] = ["true", "yes", "ja"];

/// String values treated as an unset boolean flag.
pub const BOOLEAN_FALSE_VALUES: [&str; 3] = ["false", "no", "nein"];

/// Check if a string is a missing value marker.
///
/// ```rust,ignore
/// assert!(is_error_marker("N/A"));
/// assert!(!is_error_marker("42"));
/// ```
pub fn is_error_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    ERROR_MARKERS.iter().any(|&marker| lower == marker)
}

/// Convert a float flag to an integer flag.
///
/// NaN marks a missing rating and yields `None`. Fractional and infinite
/// values are never equal to `1`, so they map to `0`.
pub fn flag_from_float(value: f64) -> Option<i64> {
    if value.is_nan() {
        None
    } else if value.fract() == 0.0 && value.is_finite() {
        Some(value as i64)
    } else {
        Some(0)
    }
}

/// Parse a textual `IsHappy` cell.
///
/// Empty cells and missing markers are `None`. Integers, floats and boolean
/// words are converted; any other text is an explicit (non-happy) value.
pub fn parse_flag_string(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_error_marker(trimmed) {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if BOOLEAN_TRUE_VALUES.contains(&lower.as_str()) {
        return Some(1);
    }
    if BOOLEAN_FALSE_VALUES.contains(&lower.as_str()) {
        return Some(0);
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) => flag_from_float(value),
        Err(_) => Some(0),
    }
}

/// Number of characters (not bytes) in a string.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Check if a string contains at least one alphabetic character.
#[inline]
pub fn has_alphabetic(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

// =============================================================================
// Tests
// =============================================================================
