//! Column layout of the raw feedback table and typed row extraction.

use polars::prelude::*;
use tracing::debug;

use crate::error::{FeedbackError, Result, ResultExt};
use crate::types::RawFeedbackRow;
use crate::utils::{flag_from_float, is_numeric_dtype, parse_flag_string};

pub const APP_NAME: &str = "AppName";
pub const APP_VERSION: &str = "AppVersion";
pub const IS_HAPPY: &str = "IsHappy";
pub const MESSAGE: &str = "Message";
pub const DATE: &str = "Datum";

/// Columns every raw feedback table must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [APP_NAME, APP_VERSION, IS_HAPPY, MESSAGE, DATE];

/// Fail with a parse error naming every required column that is missing.
pub fn check_required_columns(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.iter().any(|p| p.as_str() == *col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FeedbackError::parse(
            missing.join(", "),
            format!("required column missing (found: {})", present.join(", ")),
        ))
    }
}

/// Convert a raw table into typed rows.
///
/// Text columns of any dtype are read through a cast to string. A missing
/// date is a parse error; a missing app name becomes an empty string.
pub fn read_raw_rows(df: &DataFrame) -> Result<Vec<RawFeedbackRow>> {
    check_required_columns(df)?;

    let app_names = text_values(df, APP_NAME)?;
    let versions = text_values(df, APP_VERSION)?;
    let flags = flag_values(df, IS_HAPPY)?;
    let messages = text_values(df, MESSAGE)?;
    let dates = text_values(df, DATE)?;

    let mut rows = Vec::with_capacity(df.height());
    let columns = app_names
        .into_iter()
        .zip(versions)
        .zip(flags)
        .zip(messages)
        .zip(dates)
        .enumerate();

    for (idx, ((((app_name, app_version), is_happy), message), date)) in columns {
        let date = date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| FeedbackError::parse(DATE, format!("row {} has no date", idx)))?;

        rows.push(RawFeedbackRow {
            app_name: app_name.unwrap_or_default(),
            app_version,
            is_happy,
            message,
            date,
        });
    }

    debug!("Read {} raw feedback rows", rows.len());
    Ok(rows)
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .context(format!("Reading column '{}'", name))?
        .as_materialized_series();

    let text = series
        .cast(&DataType::String)
        .map_err(|e| FeedbackError::parse(name, e.to_string()))?;

    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df
        .column(name)
        .context(format!("Reading column '{}'", name))?
        .as_materialized_series();

    let flags: Vec<Option<i64>> = match series.dtype() {
        DataType::Boolean => series.bool()?.into_iter().map(|v| v.map(i64::from)).collect(),
        dtype if is_numeric_dtype(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            floats
                .f64()?
                .into_iter()
                .map(|v| v.and_then(flag_from_float))
                .collect()
        }
        _ => {
            let text = series
                .cast(&DataType::String)
                .map_err(|e| FeedbackError::parse(name, e.to_string()))?;
            text.str()?
                .into_iter()
                .map(|v| v.and_then(parse_flag_string))
                .collect()
        }
    };

    Ok(flags)
}
