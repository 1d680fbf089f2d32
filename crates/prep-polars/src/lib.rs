//! Polars integration for data preparation
//!
//! This crate exposes outlier detection, median imputation and missing-value
//! audits on Polars DataFrames through the [`PrepStatsExt`] extension trait,
//! and date/currency/column cleaning through [`CleaningExt`].
//!
//! Columns that cannot be processed (not numeric, zero variance, absent) are
//! skipped with a `tracing` warning instead of failing the whole call.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use prep_polars::PrepStatsExt;
//!
//! let df = df!["x" => [1.0, 2.0, 3.0, 4.0, 100.0]]?;
//!
//! let filtered = df.iqr_outlier_filter(&[])?.unwrap();
//! assert_eq!(filtered.height(), 4);
//!
//! let cleaned = df.find_and_replace_outliers_with_median(&["x"], 1.5)?;
//! ```

mod config;
mod error;
mod methods;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use methods::classify::{column_kind, numeric_values, ColumnKind};
pub use methods::cleaning::money_to_numeric_string;
pub use traits::*;

// Re-export commonly used types from the kernel crate
pub use prep_core::{IqrFence, Moments, SkipReason};
