//! Correlation matrix

use polars::prelude::*;
use prep_core::correlation::pearson;

use super::classify::{numeric_values, requested_columns};
use crate::{Error, Result};

pub(crate) fn correlation_matrix_impl(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let names = requested_columns(df, columns);

    let mut values = Vec::with_capacity(names.len());
    for name in &names {
        let column = df
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.clone()))?;
        let Some(v) = numeric_values(column)? else {
            return Err(Error::TypeMismatch {
                expected: "numeric".to_string(),
                got: format!("{:?}", column.dtype()),
            });
        };
        values.push(v);
    }

    let mut result: Vec<Column> = Vec::with_capacity(names.len() + 1);
    result.push(Series::new(PlSmallStr::from_static("column"), names.clone()).into());

    for (j, name) in names.iter().enumerate() {
        let coefficients = values
            .iter()
            .map(|row| pearson(row, &values[j]))
            .collect::<prep_core::Result<Vec<Option<f64>>>>()?;
        result.push(Series::new(name.as_str().into(), coefficients).into());
    }

    Ok(DataFrame::new(result)?)
}
