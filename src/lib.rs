//! Data preparation toolkit for financial time series
//!
//! Pulls the workspace crates together behind one dependency:
//!
//! - [`prep_core`]: slice statistics, z-score masks, IQR fences, correlation
//! - [`prep_polars`]: outlier detection, median imputation, IQR filtering,
//!   missing-value audits and cleaning on Polars DataFrames
//! - [`prep_io`]: delimited file loading, delimiter conversion, CSV output
//!   and per-ticker history download (HTTP client behind feature `fetch`)
//! - `prep_viz` (feature `viz`): box plots, histograms, correlation heatmaps
//!
//! [`PrepConfig`] gathers the configuration of every stage into one JSON
//! document.
//!
//! # Example
//!
//! ```rust,ignore
//! use market_prep::prelude::*;
//!
//! let config = PrepConfig::from_json_file("prep.json")?;
//! let df = Loader::new(config.loader.clone()).load("TSLA.csv")?;
//!
//! let sparse = df.find_columns_with_missing_value_with(config.missing.threshold)?;
//! let cleaned = df.find_and_replace_outliers_with_median(&[], config.outliers.zscore_threshold)?;
//! ```

mod config;

pub use config::{ConfigError, PrepConfig};

pub use prep_core;
pub use prep_io;
pub use prep_polars;
#[cfg(feature = "viz")]
pub use prep_viz;

/// Commonly used types and traits
pub mod prelude {
    pub use crate::{ConfigError, PrepConfig};
    pub use prep_io::{
        convert_delimiter, load_data, save_csv, ChartSource, HistoryFetcher, Loader, LoaderConfig,
    };
    #[cfg(feature = "fetch")]
    pub use prep_io::YahooClient;
    pub use prep_polars::{
        CleaningExt, ColumnKind, IqrFilterMode, MissingValueConfig, MissingValueThreshold,
        OutlierConfig, PrepStatsExt,
    };
    #[cfg(feature = "viz")]
    pub use prep_viz::{plot_boxplots, plot_correlation_heatmap, plot_histograms, PlotConfig};
}
