//! Common test utilities for prep-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Helper function to create a single-column f64 test DataFrame
pub fn create_test_df(name: &str, values: &[f64]) -> DataFrame {
    DataFrame::new(vec![Series::new(name.into(), values).into()]).unwrap()
}

/// Helper function to extract a column as `Option<f64>` values
pub fn extract_f64(df: &DataFrame, col_name: &str) -> Vec<Option<f64>> {
    df.column(col_name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// A mostly flat series with one large spike at index `spike_at`
pub fn spiked(len: usize, spike_at: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if i == spike_at { 1_000.0 } else { 10.0 + (i % 3) as f64 })
        .collect()
}
