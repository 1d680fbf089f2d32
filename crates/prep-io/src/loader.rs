//! CSV loading

use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{Error, Result};

pub const DEFAULT_DATA_DIR: &str = "data";

/// Delimiter of the provider's raw exports
pub const DEFAULT_DELIMITER: char = '|';

/// Column parsed as dates by [`load_data`]
const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Validate a delimiter and return it as a byte
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(Error::InvalidDelimiter(delimiter))
    }
}

/// Where and how raw files are read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory that relative file names are resolved against
    pub data_dir: PathBuf,

    pub delimiter: char,

    pub has_header: bool,

    /// Parse date-like string columns into temporal dtypes
    pub try_parse_dates: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            delimiter: DEFAULT_DELIMITER,
            has_header: true,
            try_parse_dates: false,
        }
    }
}

/// Reads delimited files from a data directory
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Full path of a file inside the data directory
    pub fn resolve(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.config.data_dir.join(filename)
    }

    /// Load `<data_dir>/<filename>`
    pub fn load(&self, filename: impl AsRef<Path>) -> Result<DataFrame> {
        let path = self.resolve(filename);
        read_delimited(&path, &self.config)
    }

    /// Load a file, logging and swallowing any failure
    pub fn try_load(&self, filename: impl AsRef<Path>) -> Option<DataFrame> {
        let path = self.resolve(filename);
        match read_delimited(&path, &self.config) {
            Ok(df) => Some(df),
            Err(e) => {
                error!("Failed to load '{}': {}", path.display(), e);
                None
            }
        }
    }
}

fn read_delimited(path: &Path, config: &LoaderConfig) -> Result<DataFrame> {
    let separator = delimiter_byte(config.delimiter)?;
    debug!(
        "Reading '{}' with delimiter {:?}",
        path.display(),
        config.delimiter
    );

    let df = CsvReadOptions::default()
        .with_has_header(config.has_header)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_try_parse_dates(config.try_parse_dates),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(
        "Loaded '{}': {} rows x {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Load a comma-separated file whose `Timestamp` column holds dates
pub fn load_data(path: impl AsRef<Path>) -> Result<DataFrame> {
    let config = LoaderConfig {
        data_dir: PathBuf::new(),
        delimiter: ',',
        has_header: true,
        try_parse_dates: true,
    };
    let df = read_delimited(path.as_ref(), &config)?;

    match df.column(TIMESTAMP_COLUMN).map(|c| c.dtype()) {
        Ok(DataType::Date | DataType::Datetime(_, _)) => {}
        Ok(dt) => warn!(
            "Column '{}' was not parsed as a date (got {:?})",
            TIMESTAMP_COLUMN, dt
        ),
        Err(_) => warn!(
            "Column '{}' not found in '{}'",
            TIMESTAMP_COLUMN,
            path.as_ref().display()
        ),
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.delimiter, '|');
        assert!(config.has_header);
    }

    #[test]
    fn test_resolve_joins_data_dir() {
        let loader = Loader::new(LoaderConfig {
            data_dir: PathBuf::from("/srv/market"),
            ..Default::default()
        });
        assert_eq!(loader.resolve("TSLA.csv"), PathBuf::from("/srv/market/TSLA.csv"));
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte('|').unwrap(), b'|');
        assert!(matches!(delimiter_byte('¦'), Err(Error::InvalidDelimiter('¦'))));
    }
}
