//! Configuration types for outlier detection and missing-value audits

use prep_core::{DEFAULT_IQR_MULTIPLIER, DEFAULT_ZSCORE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Default missing-value cutoff, read in percent by the legacy audit
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.05;

/// How the IQR filter combines the fences of several columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IqrFilterMode {
    /// Each processed column replaces the running result, so only the fence of
    /// the last numeric column applies to the returned rows.
    #[default]
    LastColumn,

    /// A row is kept only if it lies inside the fence of every processed column.
    Intersect,
}

/// Unit of a missing-value threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueThreshold {
    /// Compared against `missing / rows * 100`
    Percent(f64),

    /// Compared against `missing / rows`
    Fraction(f64),
}

impl MissingValueThreshold {
    /// The threshold expressed in percent
    pub fn as_percent(&self) -> f64 {
        match *self {
            Self::Percent(p) => p,
            Self::Fraction(f) => f * 100.0,
        }
    }
}

impl Default for MissingValueThreshold {
    fn default() -> Self {
        Self::Percent(DEFAULT_MISSING_THRESHOLD)
    }
}

/// Parameters shared by the outlier detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// Absolute z-score above which a value is an outlier
    pub zscore_threshold: f64,

    /// Fence width in multiples of the IQR
    pub iqr_multiplier: f64,

    pub iqr_mode: IqrFilterMode,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            iqr_mode: IqrFilterMode::default(),
        }
    }
}

/// Parameters for the missing-value audit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingValueConfig {
    pub threshold: MissingValueThreshold,
}
