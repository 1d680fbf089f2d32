//! Error types for prep-viz

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Prep core error: {0}")]
    PrepCore(#[from] prep_core::Error),

    #[error("Statistics error: {0}")]
    Stats(#[from] prep_polars::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
