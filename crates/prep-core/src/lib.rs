//! Slice-level statistics for data preparation
//!
//! This crate holds the numeric kernels behind the dataframe helpers in
//! `prep-polars`. Every function works on `&[Option<f64>]` so that missing
//! entries keep their row position.
//!
//! # Example
//!
//! ```rust
//! use prep_core::{IqrFence, ZScoreDetector};
//!
//! let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)];
//!
//! let fence = IqrFence::from_values(&x).unwrap().unwrap();
//! assert_eq!(fence.outlier_count(&x), 1);
//!
//! let scored = ZScoreDetector::default().score(&x).unwrap();
//! assert!(!scored.has_outliers());
//! ```

pub mod correlation;
pub mod density;
pub mod error;
pub mod outliers;
pub mod utils;

pub use error::{Error, Result};
pub use outliers::{
    IqrFence, Moments, SkipReason, ZScoreDetector, ZScoreMask, DEFAULT_IQR_MULTIPLIER,
    DEFAULT_ZSCORE_THRESHOLD,
};
