//! Extension traits for data preparation on Polars DataFrames

use polars::prelude::*;
use prep_core::IqrFence;

use crate::{MissingValueThreshold, OutlierConfig, Result};

/// Outlier detection, imputation and auditing on a DataFrame
///
/// None of these methods mutate `self`. Methods returning a DataFrame build a
/// new one.
pub trait PrepStatsExt {
    /// Names of numeric columns holding at least one value with `|z| > threshold`
    ///
    /// Non-numeric columns and columns with zero or undefined standard
    /// deviation are skipped with a warning. Names keep column order.
    ///
    /// A negative `threshold` flags every present value and is logged. Only a
    /// NaN threshold is an error.
    fn find_outliers(&self, threshold: f64) -> Result<Vec<String>>;

    /// Per-row z-score outlier mask for one column
    ///
    /// # Returns
    /// `None` when the column is not numeric or cannot be scored
    fn zscore_outlier_mask(&self, column: &str, threshold: f64) -> Result<Option<BooleanChunked>>;

    /// Row positions flagged by the z-score rule, empty when the column is skipped
    fn zscore_outlier_indices(&self, column: &str, threshold: f64) -> Result<Vec<usize>>;

    /// Copy of the frame with z-score outliers in `columns` replaced by the column median
    ///
    /// The median is taken over the original values of each column. Absent,
    /// non-numeric and zero-variance columns are skipped with a warning. Row
    /// count, row order and the set of columns never change, and unflagged
    /// rows keep their exact stored value.
    fn find_and_replace_outliers_with_median(
        &self,
        columns: &[&str],
        threshold: f64,
    ) -> Result<DataFrame>;

    /// Interquartile fence of a numeric column, `None` for non-numeric or empty columns
    fn iqr_fence(&self, column: &str) -> Result<Option<IqrFence>>;

    /// Rows inside the IQR fence, legacy semantics
    ///
    /// Only the fence of the **last** numeric column in `columns` filters the
    /// result; earlier columns are reported but do not restrict it. Use
    /// [`PrepStatsExt::iqr_outlier_filter_with`] with
    /// [`IqrFilterMode::Intersect`](crate::IqrFilterMode::Intersect) to apply
    /// every column.
    ///
    /// # Arguments
    /// * `columns` - Columns to check; empty means every column
    ///
    /// # Returns
    /// `None` when no numeric column was processed
    fn iqr_outlier_filter(&self, columns: &[&str]) -> Result<Option<DataFrame>>;

    /// Rows inside the IQR fence using the mode and multiplier of `config`
    fn iqr_outlier_filter_with(
        &self,
        columns: &[&str],
        config: &OutlierConfig,
    ) -> Result<Option<DataFrame>>;

    /// Columns whose missing ratio exceeds `threshold`, legacy scaling
    ///
    /// The ratio is computed in percent (`missing / rows * 100`) and compared
    /// against `threshold` as given, so the customary `0.05` flags any column
    /// with more than 0.05% missing values.
    fn find_columns_with_missing_value(&self, threshold: f64) -> Result<Vec<String>>;

    /// Columns whose missing ratio exceeds an explicitly unit-tagged threshold
    fn find_columns_with_missing_value_with(
        &self,
        threshold: MissingValueThreshold,
    ) -> Result<Vec<String>>;

    /// Missing count and percentage for every column
    ///
    /// # Returns
    /// DataFrame with columns `column`, `missing` and `missing_pct`
    fn missing_value_report(&self) -> Result<DataFrame>;

    /// Pairwise Pearson correlation of numeric columns
    ///
    /// # Returns
    /// Square DataFrame: a `column` name column followed by one Float64
    /// column per input, null where the coefficient is undefined
    fn correlation_matrix(&self, columns: &[&str]) -> Result<DataFrame>;
}

/// Column-level cleaning helpers
pub trait CleaningExt {
    /// Copy of the frame with `column` parsed to datetimes truncated to midnight
    fn normalize_date(&self, column: &str) -> Result<DataFrame>;

    /// Copy of the frame without `columns`; unknown names are ignored
    fn drop_columns(&self, columns: &[&str]) -> Result<DataFrame>;

    /// Copy of the frame with a currency-formatted string column parsed to Float64
    fn parse_money_column(&self, column: &str) -> Result<DataFrame>;
}
