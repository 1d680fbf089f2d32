//! IQR fence filtering

use polars::prelude::*;
use prep_core::IqrFence;
use tracing::{debug, info, warn};

use super::classify::{numeric_values, requested_columns};
use crate::{IqrFilterMode, OutlierConfig, Result};

pub(crate) fn iqr_fence_impl(
    df: &DataFrame,
    column: &str,
    multiplier: f64,
) -> Result<Option<IqrFence>> {
    let Ok(col) = df.column(column) else {
        warn!("Column '{}' not found in DataFrame", column);
        return Ok(None);
    };
    let Some(values) = numeric_values(col)? else {
        warn!("Column '{}' is not numeric, skipping outlier detection", column);
        return Ok(None);
    };
    Ok(IqrFence::with_multiplier(&values, multiplier)?)
}

pub(crate) fn iqr_outlier_filter_impl(
    df: &DataFrame,
    columns: &[&str],
    config: &OutlierConfig,
) -> Result<Option<DataFrame>> {
    // Running keep-mask; `None` until a numeric column has been processed
    let mut keep: Option<Vec<bool>> = None;

    for name in requested_columns(df, columns) {
        let Ok(column) = df.column(&name) else {
            warn!("Column '{}' not found in DataFrame, skipping", name);
            continue;
        };
        let Some(values) = numeric_values(column)? else {
            warn!("Column '{}' is not numeric, skipping outlier detection", name);
            continue;
        };

        let inside = match IqrFence::with_multiplier(&values, config.iqr_multiplier)? {
            Some(fence) => {
                debug!(
                    "Column '{}': q1={}, q3={}, bounds=[{}, {}]",
                    name, fence.q1, fence.q3, fence.lower, fence.upper
                );
                let outliers = fence.outlier_count(&values);
                if outliers > 0 {
                    info!("Found {} outliers in column '{}' using IQR method", outliers, name);
                } else {
                    info!("No outliers found in column '{}' using IQR method", name);
                }
                fence.inside_mask(&values)
            }
            None => {
                // Nothing present, so no row lies inside the fence
                info!("No outliers found in column '{}' using IQR method", name);
                vec![false; values.len()]
            }
        };

        keep = Some(match (config.iqr_mode, keep) {
            (IqrFilterMode::Intersect, Some(running)) => running
                .iter()
                .zip(&inside)
                .map(|(&a, &b)| a && b)
                .collect(),
            _ => inside,
        });
    }

    let Some(keep) = keep else {
        return Ok(None);
    };
    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("iqr_keep"), &keep);
    Ok(Some(df.filter(&mask)?))
}
