//! Loading and saving delimited market-data files
//!
//! The [`Loader`] reads files from a configured data directory instead of a
//! hard-coded folder. [`convert_delimiter`] rewrites a delimited file record
//! by record and [`save_csv`] writes a DataFrame back out. [`HistoryFetcher`]
//! downloads daily bars per ticker into the data directory.

mod convert;
mod error;
mod fetch;
mod loader;

pub use convert::{convert_delimiter, save_csv};
pub use error::{Error, Result};
#[cfg(feature = "fetch")]
pub use fetch::YahooClient;
pub use fetch::{epoch_seconds, parse_daily_chart, ChartSource, HistoryFetcher, DEFAULT_TICKERS};
pub use loader::{
    delimiter_byte, load_data, Loader, LoaderConfig, DEFAULT_DATA_DIR, DEFAULT_DELIMITER,
};
