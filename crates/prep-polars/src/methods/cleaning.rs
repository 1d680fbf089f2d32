//! Date, currency and column cleaning helpers

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, warn};

use super::classify::{column_kind, ColumnKind};
use crate::{CleaningExt, Error, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Calendar day of a date or timestamp string
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn midnight_millis(day: NaiveDate) -> Option<i64> {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Strip thousands separators from a currency value
///
/// Missing inputs (`None`, `"nan"`, `"None"`) become `"0.0"`.
///
/// # Examples
///
/// ```rust
/// use prep_polars::money_to_numeric_string;
///
/// assert_eq!(money_to_numeric_string(Some("1,234,567.89")), "1234567.89");
/// assert_eq!(money_to_numeric_string(Some("nan")), "0.0");
/// assert_eq!(money_to_numeric_string(None), "0.0");
/// ```
pub fn money_to_numeric_string(value: Option<&str>) -> String {
    match value {
        None | Some("nan") | Some("None") => "0.0".to_string(),
        Some(v) => v.replace(',', ""),
    }
}

impl CleaningExt for DataFrame {
    fn normalize_date(&self, column: &str) -> Result<DataFrame> {
        let col = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;

        let normalized: Column = match col.dtype() {
            DataType::Datetime(unit, tz) => col
                .cast(&DataType::Date)?
                .cast(&DataType::Datetime(*unit, tz.clone()))?,
            DataType::Date => col.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
            DataType::String => {
                let mut unparsed = 0usize;
                let millis: Vec<Option<i64>> = col
                    .str()?
                    .into_iter()
                    .map(|raw| {
                        let raw = raw?;
                        let day = parse_day(raw);
                        if day.is_none() {
                            unparsed += 1;
                        }
                        day.and_then(midnight_millis)
                    })
                    .collect();
                if unparsed > 0 {
                    warn!(
                        "Column '{}': {} values could not be parsed as dates",
                        column, unparsed
                    );
                }
                Series::new(col.name().clone(), millis)
                    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
                    .into()
            }
            dt => {
                return Err(Error::TypeMismatch {
                    expected: "string, date or datetime".to_string(),
                    got: format!("{:?}", dt),
                });
            }
        };

        let mut out = self.clone();
        out.with_column(normalized)?;
        Ok(out)
    }

    fn drop_columns(&self, columns: &[&str]) -> Result<DataFrame> {
        for name in columns {
            if self.column(name).is_err() {
                warn!("Column '{}' not found in DataFrame, nothing to drop", name);
            }
        }

        let keep: Vec<String> = self
            .get_column_names()
            .into_iter()
            .filter(|name| !columns.contains(&name.as_str()))
            .map(|name| name.to_string())
            .collect();
        debug!("Keeping columns: {:?}", keep);

        Ok(self.select(keep)?)
    }

    fn parse_money_column(&self, column: &str) -> Result<DataFrame> {
        let col = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;

        let parsed: Column = if column_kind(col) == ColumnKind::Numeric {
            col.cast(&DataType::Float64)?
        } else if col.dtype() == &DataType::String {
            let mut unparsed = 0usize;
            let values: Vec<Option<f64>> = col
                .str()?
                .into_iter()
                .map(|raw| {
                    let cleaned = money_to_numeric_string(raw.map(str::trim));
                    let value = cleaned.parse::<f64>().ok();
                    if value.is_none() {
                        unparsed += 1;
                    }
                    value
                })
                .collect();
            if unparsed > 0 {
                warn!(
                    "Column '{}': {} values could not be parsed as amounts",
                    column, unparsed
                );
            }
            Series::new(col.name().clone(), values).into()
        } else {
            return Err(Error::TypeMismatch {
                expected: "string or numeric".to_string(),
                got: format!("{:?}", col.dtype()),
            });
        };

        let mut out = self.clone();
        out.with_column(parsed)?;
        Ok(out)
    }
}
