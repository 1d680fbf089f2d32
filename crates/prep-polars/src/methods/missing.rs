//! Missing-value audit

use polars::prelude::*;
use prep_core::utils::missing_count;
use tracing::{debug, info};

use super::classify::{is_float_dtype, numeric_values};
use crate::{MissingValueThreshold, Result};

/// Nulls, plus NaN for float columns
fn column_missing(column: &Column) -> Result<usize> {
    if is_float_dtype(column.dtype()) {
        if let Some(values) = numeric_values(column)? {
            return Ok(missing_count(&values));
        }
    }
    Ok(column.null_count())
}

/// Missing share of each column in percent, in column order
///
/// A zero-row frame has no defined ratio and yields NaN for every column.
fn missing_percentages(df: &DataFrame) -> Result<Vec<(String, usize, f64)>> {
    let rows = df.height();
    df.get_columns()
        .iter()
        .map(|column| -> Result<(String, usize, f64)> {
            let missing = column_missing(column)?;
            let pct = if rows == 0 {
                f64::NAN
            } else {
                missing as f64 / rows as f64 * 100.0
            };
            Ok((column.name().to_string(), missing, pct))
        })
        .collect()
}

pub(crate) fn missing_columns_impl(
    df: &DataFrame,
    threshold: MissingValueThreshold,
) -> Result<Vec<String>> {
    let cutoff = threshold.as_percent();
    let mut above = Vec::new();

    for (name, missing, pct) in missing_percentages(df)? {
        debug!("Column '{}': {} missing ({}%)", name, missing, pct);
        // NaN never compares greater, so empty frames flag nothing
        if pct > cutoff {
            above.push(name);
        }
    }

    info!(
        "{} columns above the missing-value threshold of {}%",
        above.len(),
        cutoff
    );
    Ok(above)
}

pub(crate) fn missing_value_report_impl(df: &DataFrame) -> Result<DataFrame> {
    let stats = missing_percentages(df)?;

    let names: Vec<String> = stats.iter().map(|(name, _, _)| name.clone()).collect();
    let counts: Vec<u64> = stats.iter().map(|(_, missing, _)| *missing as u64).collect();
    let pcts: Vec<f64> = stats.iter().map(|(_, _, pct)| *pct).collect();

    Ok(df![
        "column" => names,
        "missing" => counts,
        "missing_pct" => pcts,
    ]?)
}
