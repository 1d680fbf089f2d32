//! Utility functions for working with data slices
//!
//! Column values arrive as `Option<f64>` so that missing entries survive the
//! trip from a dataframe. Every summary here ignores missing entries and NaN.

use statrs::statistics::Statistics;

use crate::{Error, Result};

/// Collect the present (non-missing, non-NaN) values of a column
///
/// # Examples
///
/// ```rust
/// use prep_core::utils::present_values;
///
/// let values = [Some(1.0), None, Some(f64::NAN), Some(3.0)];
/// assert_eq!(present_values(&values), vec![1.0, 3.0]);
/// ```
pub fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .collect()
}

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use prep_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Mean of the present values, `None` when there are none
///
/// # Examples
///
/// ```rust
/// use prep_core::utils::mean;
///
/// assert_eq!(mean(&[Some(1.0), None, Some(3.0)]), Some(2.0));
/// assert_eq!(mean(&[None]), None);
/// ```
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present = present_values(values);
    if present.is_empty() {
        return None;
    }
    Some(present.iter().mean())
}

/// Sample standard deviation (divisor n - 1) of the present values
///
/// Undefined, and therefore `None`, with fewer than two present values.
///
/// # Examples
///
/// ```rust
/// use prep_core::utils::std_dev;
///
/// let data = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
/// let sd = std_dev(&data).unwrap();
/// assert!((sd - 1.58113883).abs() < 1e-6);
/// assert_eq!(std_dev(&[Some(42.0)]), None);
/// ```
pub fn std_dev(values: &[Option<f64>]) -> Option<f64> {
    let present = present_values(values);
    if present.len() < 2 {
        return None;
    }
    Some(present.iter().std_dev())
}

/// Linear-interpolated quantile of already sorted data
///
/// Uses `h = (n - 1) * p` and interpolates between the two closest ranks.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_quantile(p));
    }
    if sorted.is_empty() {
        return Err(Error::empty_input());
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Linear-interpolated quantile of the present values
///
/// Returns `Ok(None)` when the column has no present values.
///
/// # Examples
///
/// ```rust
/// use prep_core::utils::quantile;
///
/// let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)];
/// assert_eq!(quantile(&x, 0.25).unwrap(), Some(2.0));
/// assert_eq!(quantile(&x, 0.75).unwrap(), Some(4.0));
/// ```
pub fn quantile(values: &[Option<f64>], p: f64) -> Result<Option<f64>> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_quantile(p));
    }
    let present = sorted(&present_values(values));
    if present.is_empty() {
        return Ok(None);
    }
    quantile_sorted(&present, p).map(Some)
}

/// Median of the present values
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let present = sorted(&present_values(values));
    if present.is_empty() {
        return None;
    }
    quantile_sorted(&present, 0.5).ok()
}

/// Number of missing entries (None or NaN)
pub fn missing_count(values: &[Option<f64>]) -> usize {
    values
        .iter()
        .filter(|v| v.map_or(true, |x| x.is_nan()))
        .count()
}
