//! Column classification
//!
//! Decides which columns are eligible for numeric processing and exposes
//! their values as `Option<f64>` for the kernels in `prep-core`.

use polars::prelude::*;

use crate::Result;

/// Statistical eligibility of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Signed/unsigned integers and floats
    Numeric,
    /// Strings, booleans, temporal and nested types
    ///
    /// Booleans count as flags, not measurements, and are never scored or
    /// imputed even though they cast cleanly to 0/1.
    NonNumeric,
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

pub(crate) fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Classify a column by its dtype
pub fn column_kind(column: &Column) -> ColumnKind {
    if is_numeric_dtype(column.dtype()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::NonNumeric
    }
}

/// Values of a numeric column widened to f64, `None` for non-numeric columns
///
/// Nulls become `None`; NaN is kept as `Some(NaN)` and treated as missing by
/// the kernels.
pub fn numeric_values(column: &Column) -> Result<Option<Vec<Option<f64>>>> {
    if column_kind(column) != ColumnKind::Numeric {
        return Ok(None);
    }
    let widened = column.cast(&DataType::Float64)?;
    let values = widened.f64()?.into_iter().collect();
    Ok(Some(values))
}

/// Resolve the requested names, or every column when `columns` is empty
pub(crate) fn requested_columns(df: &DataFrame, columns: &[&str]) -> Vec<String> {
    if columns.is_empty() {
        df.get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    } else {
        columns.iter().map(|name| name.to_string()).collect()
    }
}
