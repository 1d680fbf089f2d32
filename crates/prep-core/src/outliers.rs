//! Outlier scoring kernels
//!
//! Two detectors operate on a single column of optional values:
//!
//! - [`ZScoreDetector`] flags values with `|x - mean| / std > threshold`
//! - [`IqrFence`] flags values outside `[Q1 - k * IQR, Q3 + k * IQR]`
//!
//! Missing values are never flagged by either detector.

use crate::utils::{mean, quantile, std_dev};
use crate::{Error, Result};

/// Default z-score cutoff
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// Default fence multiplier for the IQR rule
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Why a column could not be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two present values, so the deviation is undefined
    UndefinedDeviation,
    /// Every present value is identical
    ZeroDeviation,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UndefinedDeviation => write!(f, "standard deviation is undefined"),
            SkipReason::ZeroDeviation => write!(f, "standard deviation is zero"),
        }
    }
}

/// Mean and sample standard deviation of a scorable column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    /// Compute the moments, or the reason the column cannot be scored
    pub fn of(values: &[Option<f64>]) -> std::result::Result<Self, SkipReason> {
        let (Some(mean), Some(std_dev)) = (mean(values), std_dev(values)) else {
            return Err(SkipReason::UndefinedDeviation);
        };
        if !std_dev.is_finite() {
            return Err(SkipReason::UndefinedDeviation);
        }
        // Accumulated rounding can leave a constant column with a tiny non-zero deviation
        if std_dev == 0.0 || is_constant(values) {
            return Err(SkipReason::ZeroDeviation);
        }
        Ok(Self { mean, std_dev })
    }

    /// Standard score of a single value
    #[inline]
    pub fn z(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

fn is_constant(values: &[Option<f64>]) -> bool {
    let mut present = values.iter().flatten().filter(|x| !x.is_nan());
    match present.next() {
        Some(first) => present.all(|x| x == first),
        None => true,
    }
}

/// Result of scoring one column
#[derive(Debug, Clone, PartialEq)]
pub struct ZScoreMask {
    pub moments: Moments,
    /// One entry per row, true where the row is an outlier
    pub mask: Vec<bool>,
}

impl ZScoreMask {
    /// Number of flagged rows
    pub fn outlier_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Positions of flagged rows in ascending order
    pub fn indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect()
    }

    pub fn has_outliers(&self) -> bool {
        self.mask.iter().any(|&m| m)
    }
}

/// Z-score outlier detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreDetector {
    threshold: f64,
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ZSCORE_THRESHOLD,
        }
    }
}

impl ZScoreDetector {
    /// Create a detector with the given cutoff
    ///
    /// Any threshold other than NaN is accepted. A negative one flags every
    /// present value, since `|z| >= 0` always exceeds it.
    pub fn new(threshold: f64) -> Result<Self> {
        if threshold.is_nan() {
            return Err(Error::InvalidParameter(
                "z-score threshold must not be NaN".to_string(),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a column
    ///
    /// Returns the skip reason for columns whose deviation is zero or undefined.
    pub fn score(&self, values: &[Option<f64>]) -> std::result::Result<ZScoreMask, SkipReason> {
        let moments = Moments::of(values)?;
        let mask = values
            .iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => moments.z(*x).abs() > self.threshold,
                _ => false,
            })
            .collect();
        Ok(ZScoreMask { moments, mask })
    }
}

/// Interquartile fence of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFence {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFence {
    /// Build a fence with the standard 1.5 multiplier
    ///
    /// Returns `Ok(None)` when the column has no present values.
    pub fn from_values(values: &[Option<f64>]) -> Result<Option<Self>> {
        Self::with_multiplier(values, DEFAULT_IQR_MULTIPLIER)
    }

    /// Build a fence with a custom multiplier
    pub fn with_multiplier(values: &[Option<f64>], multiplier: f64) -> Result<Option<Self>> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "IQR multiplier {multiplier} must be finite and non-negative"
            )));
        }
        let (Some(q1), Some(q3)) = (quantile(values, 0.25)?, quantile(values, 0.75)?) else {
            return Ok(None);
        };
        let iqr = q3 - q1;
        Ok(Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }))
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whether a value lies inside the closed fence
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// True for rows inside the fence; missing rows are never inside
    pub fn inside_mask(&self, values: &[Option<f64>]) -> Vec<bool> {
        values
            .iter()
            .map(|v| v.map_or(false, |x| self.contains(x)))
            .collect()
    }

    /// Number of present values outside the fence
    pub fn outlier_count(&self, values: &[Option<f64>]) -> usize {
        values
            .iter()
            .filter(|v| matches!(v, Some(x) if !x.is_nan() && !self.contains(*x)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(data: &[f64]) -> Vec<Option<f64>> {
        data.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_small_sample_is_not_flagged() {
        let price = some(&[10.0, 12.0, 11.0, 1000.0, 9.0]);
        let scored = ZScoreDetector::default().score(&price).unwrap();
        assert_relative_eq!(scored.moments.mean, 208.4, epsilon = 1e-9);
        assert!(scored.moments.z(1000.0) < 3.0);
        assert!(!scored.has_outliers());
    }

    #[test]
    fn test_lower_threshold_flags_spike() {
        let price = some(&[10.0, 12.0, 11.0, 1000.0, 9.0]);
        let scored = ZScoreDetector::new(1.5).unwrap().score(&price).unwrap();
        assert_eq!(scored.indices(), vec![3]);
        assert_eq!(scored.outlier_count(), 1);
    }

    #[test]
    fn test_zero_deviation_is_skipped() {
        let flat = some(&[4.0, 4.0, 4.0]);
        assert_eq!(
            ZScoreDetector::new(0.0).unwrap().score(&flat),
            Err(SkipReason::ZeroDeviation)
        );
    }

    #[test]
    fn test_all_missing_is_skipped() {
        let empty = vec![None, None, Some(f64::NAN)];
        assert_eq!(
            ZScoreDetector::default().score(&empty),
            Err(SkipReason::UndefinedDeviation)
        );
    }

    #[test]
    fn test_missing_rows_never_flagged() {
        let mut data = some(&[1.0; 20]);
        data.push(Some(50.0));
        data.push(None);
        let scored = ZScoreDetector::default().score(&data).unwrap();
        assert_eq!(scored.mask.len(), data.len());
        assert!(scored.mask[20]);
        assert!(!scored.mask[21]);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(ZScoreDetector::new(f64::NAN).is_err());
    }

    #[test]
    fn test_negative_threshold_flags_every_present_value() {
        let data = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let scored = ZScoreDetector::new(-1.0).unwrap().score(&data).unwrap();
        assert_eq!(scored.mask, vec![true, true, false, true]);
    }

    #[test]
    fn test_iqr_fence() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        let fence = IqrFence::from_values(&x).unwrap().unwrap();
        assert_relative_eq!(fence.q1, 2.0);
        assert_relative_eq!(fence.q3, 4.0);
        assert_relative_eq!(fence.iqr(), 2.0);
        assert_relative_eq!(fence.lower, -1.0);
        assert_relative_eq!(fence.upper, 7.0);
        assert_eq!(fence.inside_mask(&x), vec![true, true, true, true, false]);
        assert_eq!(fence.outlier_count(&x), 1);
    }

    #[test]
    fn test_iqr_fence_boundaries_are_inside() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let fence = IqrFence::with_multiplier(&x, 0.0).unwrap().unwrap();
        assert!(fence.contains(2.0));
        assert!(fence.contains(4.0));
        assert!(!fence.contains(1.0));
    }

    #[test]
    fn test_iqr_missing_rows() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let fence = IqrFence::from_values(&x).unwrap().unwrap();
        assert_eq!(fence.inside_mask(&x), vec![true, false, true, true]);
        assert_eq!(fence.outlier_count(&x), 0);
        assert_eq!(IqrFence::from_values(&[None]).unwrap(), None);
    }
}
