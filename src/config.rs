//! Combined configuration

use std::path::Path;

use prep_io::LoaderConfig;
use prep_polars::{MissingValueConfig, OutlierConfig};
#[cfg(feature = "viz")]
use prep_viz::PlotConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Settings for every preparation stage
///
/// Every section and field is optional in the JSON form and falls back to
/// its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub loader: LoaderConfig,

    pub outliers: OutlierConfig,

    pub missing: MissingValueConfig,

    #[cfg(feature = "viz")]
    pub plots: PlotConfig,
}

impl PrepConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!("Read configuration from '{}'", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Reject thresholds the detectors would refuse
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outliers.zscore_threshold.is_nan() {
            return Err(ConfigError::InvalidParameter(
                "zscore_threshold is NaN".to_string(),
            ));
        }
        let k = self.outliers.iqr_multiplier;
        if k.is_nan() || k < 0.0 {
            return Err(ConfigError::InvalidParameter(format!(
                "iqr_multiplier must be non-negative, got {k}"
            )));
        }
        if self.missing.threshold.as_percent().is_nan() {
            return Err(ConfigError::InvalidParameter(
                "missing-value threshold is NaN".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_polars::{IqrFilterMode, MissingValueThreshold};

    #[test]
    fn test_empty_document_is_default() {
        let config = PrepConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PrepConfig::default());
        assert_eq!(config.outliers.zscore_threshold, 3.0);
        assert_eq!(config.outliers.iqr_mode, IqrFilterMode::LastColumn);
    }

    #[test]
    fn test_partial_sections() {
        let config = PrepConfig::from_json_str(
            r#"{
                "loader": {"delimiter": ","},
                "outliers": {"iqr_mode": "intersect", "iqr_multiplier": 3.0},
                "missing": {"threshold": {"fraction": 0.1}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.loader.delimiter, ',');
        assert_eq!(config.outliers.iqr_mode, IqrFilterMode::Intersect);
        assert_eq!(config.outliers.iqr_multiplier, 3.0);
        assert_eq!(config.outliers.zscore_threshold, 3.0);
        assert_eq!(config.missing.threshold, MissingValueThreshold::Fraction(0.1));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let err = PrepConfig::from_json_str(r#"{"outliers": {"iqr_multiplier": -1.0}}"#);
        assert!(matches!(err, Err(ConfigError::InvalidParameter(_))));
    }

    #[test]
    fn test_negative_zscore_threshold_accepted() {
        let config =
            PrepConfig::from_json_str(r#"{"outliers": {"zscore_threshold": -1.0}}"#).unwrap();
        assert_eq!(config.outliers.zscore_threshold, -1.0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PrepConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
