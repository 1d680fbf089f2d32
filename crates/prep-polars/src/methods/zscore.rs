//! Z-score outlier detection and median replacement

use polars::prelude::*;
use prep_core::utils::median;
use prep_core::{IqrFence, ZScoreDetector, ZScoreMask};
use tracing::{debug, info, warn};

use super::classify::{is_float_dtype, numeric_values};
use crate::{MissingValueThreshold, OutlierConfig, PrepStatsExt, Result};

/// Score one column, logging why it was skipped
///
/// Returns `None` for non-numeric and unscorable columns.
fn score_column(
    column: &Column,
    detector: &ZScoreDetector,
) -> Result<Option<(Vec<Option<f64>>, ZScoreMask)>> {
    let name = column.name();
    let Some(values) = numeric_values(column)? else {
        warn!("Column '{}' is not numeric, skipping outlier detection", name);
        return Ok(None);
    };

    match detector.score(&values) {
        Ok(scored) => {
            debug!(
                "Column '{}': mean={}, std={}",
                name, scored.moments.mean, scored.moments.std_dev
            );
            Ok(Some((values, scored)))
        }
        Err(reason) => {
            warn!("Column '{}': {}, skipping outlier detection", name, reason);
            Ok(None)
        }
    }
}

/// Detector for `threshold`; a negative cutoff is accepted but flags every present value
fn detector(threshold: f64) -> Result<ZScoreDetector> {
    let detector = ZScoreDetector::new(threshold)?;
    if threshold < 0.0 {
        warn!(
            "Negative z-score threshold {}, every present value will be flagged",
            threshold
        );
    }
    Ok(detector)
}

/// Overwrite the flagged rows of `original` with `fill`
///
/// Unflagged rows are taken from the original buffer, so they keep their exact
/// value. Integer columns whose median is fractional are promoted to Float64.
fn replace_flagged(original: &Column, flagged: &[bool], fill: f64) -> Result<Series> {
    let name = original.name().clone();
    let dtype = original.dtype();

    let source = if is_float_dtype(dtype) || fill.fract() == 0.0 {
        original.as_materialized_series().clone()
    } else {
        debug!(
            "Column '{}' promoted from {:?} to Float64 for median {}",
            name, dtype, fill
        );
        original.as_materialized_series().cast(&DataType::Float64)?
    };

    let fill_series = Series::new(name.clone(), vec![fill; source.len()]).cast(source.dtype())?;
    let keep: Vec<bool> = flagged.iter().map(|&f| !f).collect();
    let keep = BooleanChunked::from_slice(name, &keep);

    Ok(source.zip_with(&keep, &fill_series)?)
}

impl PrepStatsExt for DataFrame {
    fn find_outliers(&self, threshold: f64) -> Result<Vec<String>> {
        let detector = detector(threshold)?;
        let mut flagged = Vec::new();

        for column in self.get_columns() {
            let Some((_, scored)) = score_column(column, &detector)? else {
                continue;
            };

            let count = scored.outlier_count();
            if count == 0 {
                info!(
                    "No outliers found in column '{}' using z-score threshold {}",
                    column.name(),
                    threshold
                );
                continue;
            }
            info!("Found {} outliers in column '{}'", count, column.name());
            flagged.push(column.name().to_string());
        }

        Ok(flagged)
    }

    fn zscore_outlier_mask(&self, column: &str, threshold: f64) -> Result<Option<BooleanChunked>> {
        let detector = detector(threshold)?;
        let Ok(col) = self.column(column) else {
            warn!("Column '{}' not found in DataFrame", column);
            return Ok(None);
        };

        Ok(score_column(col, &detector)?
            .map(|(_, scored)| BooleanChunked::from_slice(col.name().clone(), &scored.mask)))
    }

    fn zscore_outlier_indices(&self, column: &str, threshold: f64) -> Result<Vec<usize>> {
        let detector = detector(threshold)?;
        let Ok(col) = self.column(column) else {
            warn!("Column '{}' not found in DataFrame", column);
            return Ok(Vec::new());
        };

        Ok(score_column(col, &detector)?
            .map(|(_, scored)| scored.indices())
            .unwrap_or_default())
    }

    fn find_and_replace_outliers_with_median(
        &self,
        columns: &[&str],
        threshold: f64,
    ) -> Result<DataFrame> {
        let detector = detector(threshold)?;
        // Polars buffers are immutable; replacing a column in the clone never touches `self`
        let mut cleaned = self.clone();

        info!("Processing columns: {:?}", columns);

        for &name in columns {
            let Ok(column) = self.column(name) else {
                warn!("Column '{}' not found in DataFrame, skipping", name);
                continue;
            };
            let Some((values, scored)) = score_column(column, &detector)? else {
                continue;
            };

            let count = scored.outlier_count();
            if count == 0 {
                info!(
                    "No outliers found in column '{}' using z-score threshold {}",
                    name, threshold
                );
                continue;
            }
            info!("Found {} outliers in column '{}'", count, name);

            // At least two present values exist once a column has been scored
            let Some(fill) = median(&values) else {
                continue;
            };
            info!("Median value for '{}' (used for replacement): {}", name, fill);

            cleaned.with_column(replace_flagged(column, &scored.mask, fill)?)?;
            info!("Outliers in column '{}' replaced with median", name);
        }

        Ok(cleaned)
    }

    fn iqr_fence(&self, column: &str) -> Result<Option<IqrFence>> {
        super::iqr::iqr_fence_impl(self, column, prep_core::DEFAULT_IQR_MULTIPLIER)
    }

    fn iqr_outlier_filter(&self, columns: &[&str]) -> Result<Option<DataFrame>> {
        super::iqr::iqr_outlier_filter_impl(self, columns, &OutlierConfig::default())
    }

    fn iqr_outlier_filter_with(
        &self,
        columns: &[&str],
        config: &OutlierConfig,
    ) -> Result<Option<DataFrame>> {
        super::iqr::iqr_outlier_filter_impl(self, columns, config)
    }

    fn find_columns_with_missing_value(&self, threshold: f64) -> Result<Vec<String>> {
        super::missing::missing_columns_impl(self, MissingValueThreshold::Percent(threshold))
    }

    fn find_columns_with_missing_value_with(
        &self,
        threshold: MissingValueThreshold,
    ) -> Result<Vec<String>> {
        super::missing::missing_columns_impl(self, threshold)
    }

    fn missing_value_report(&self) -> Result<DataFrame> {
        super::missing::missing_value_report_impl(self)
    }

    fn correlation_matrix(&self, columns: &[&str]) -> Result<DataFrame> {
        super::correlation::correlation_matrix_impl(self, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_integer_dtype_for_integral_median() {
        let df = df!["i" => [1i64, 2, 3]].unwrap();
        let col = df.column("i").unwrap();
        let replaced = replace_flagged(col, &[false, false, true], 2.0).unwrap();
        assert_eq!(replaced.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = replaced.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn test_replace_promotes_integer_for_fractional_median() {
        let df = df!["i" => [1i64, 2, 3, 4]].unwrap();
        let col = df.column("i").unwrap();
        let replaced = replace_flagged(col, &[false, true, false, false], 2.5).unwrap();
        assert_eq!(replaced.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = replaced.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.0), Some(2.5), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_replace_keeps_float32() {
        let df = df!["f" => [1.0f32, 2.0]].unwrap();
        let col = df.column("f").unwrap();
        let replaced = replace_flagged(col, &[false, true], 1.5).unwrap();
        assert_eq!(replaced.dtype(), &DataType::Float32);
    }

    #[test]
    fn test_replace_keeps_unflagged_nulls() {
        let df = df!["i" => [Some(1i64), None, Some(9)]].unwrap();
        let col = df.column("i").unwrap();
        let replaced = replace_flagged(col, &[false, false, true], 1.0).unwrap();
        let values: Vec<Option<i64>> = replaced.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1), None, Some(1)]);
    }
}
