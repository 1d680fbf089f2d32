//! Error types for prep-io

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error for '{ticker}': {message}")]
    Provider { ticker: String, message: String },

    #[error("Invalid date range: {start} is not before {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
