//! Tests for IQR fence filtering

mod common;

use approx::assert_relative_eq;
use common::{create_test_df, extract_f64};
use polars::prelude::*;
use prep_polars::{IqrFilterMode, OutlierConfig, PrepStatsExt};

#[test]
fn test_fence_values() {
    let df = create_test_df("x", &[1.0, 2.0, 3.0, 4.0, 100.0]);
    let fence = df.iqr_fence("x").unwrap().unwrap();
    assert_relative_eq!(fence.q1, 2.0);
    assert_relative_eq!(fence.q3, 4.0);
    assert_relative_eq!(fence.lower, -1.0);
    assert_relative_eq!(fence.upper, 7.0);
}

#[test]
fn test_filter_drops_single_outlier() {
    let df = create_test_df("x", &[1.0, 2.0, 3.0, 4.0, 100.0]);
    let filtered = df.iqr_outlier_filter(&[]).unwrap().unwrap();
    assert_eq!(filtered.height(), 4);
    assert_eq!(
        extract_f64(&filtered, "x"),
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
}

fn two_column_df() -> DataFrame {
    df![
        "a" => [1.0, 2.0, 3.0, 4.0, 100.0, 3.0],
        "b" => [-50.0, 2.0, 3.0, 4.0, 3.0, 2.0],
        "label" => ["p", "q", "r", "s", "t", "u"],
    ]
    .unwrap()
}

#[test]
fn test_legacy_mode_uses_last_column_only() {
    let df = two_column_df();
    let filtered = df.iqr_outlier_filter(&["a", "b", "label"]).unwrap().unwrap();

    // Only b's fence applies: the row holding a = 100 survives
    assert_eq!(filtered.height(), 5);
    assert!(extract_f64(&filtered, "a").contains(&Some(100.0)));
    assert!(!extract_f64(&filtered, "b").contains(&Some(-50.0)));
}

#[test]
fn test_intersect_mode_applies_every_column() {
    let df = two_column_df();
    let config = OutlierConfig {
        iqr_mode: IqrFilterMode::Intersect,
        ..Default::default()
    };
    let filtered = df.iqr_outlier_filter_with(&[], &config).unwrap().unwrap();

    assert_eq!(filtered.height(), 4);
    let labels: Vec<Option<&str>> = filtered
        .column("label")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, vec![Some("q"), Some("r"), Some("s"), Some("u")]);
}

#[test]
fn test_no_numeric_columns_is_absent() {
    let df = df!["label" => ["a", "b"]].unwrap();
    assert!(df.iqr_outlier_filter(&[]).unwrap().is_none());
    assert!(df.iqr_outlier_filter(&["unknown"]).unwrap().is_none());
}

#[test]
fn test_missing_rows_dropped_by_view() {
    let df = df!["x" => [Some(1.0), None, Some(2.0), Some(3.0)]].unwrap();
    let filtered = df.iqr_outlier_filter(&["x"]).unwrap().unwrap();
    assert_eq!(filtered.height(), 3);
}

#[test]
fn test_wider_multiplier_keeps_more_rows() {
    let df = create_test_df("x", &[1.0, 2.0, 3.0, 4.0, 9.0]);
    let narrow = df.iqr_outlier_filter(&[]).unwrap().unwrap();
    let wide = df
        .iqr_outlier_filter_with(
            &[],
            &OutlierConfig {
                iqr_multiplier: 3.0,
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(narrow.height(), 4);
    assert_eq!(wide.height(), 5);
}

#[test]
fn test_non_numeric_fence_is_absent() {
    let df = df!["label" => ["a"]].unwrap();
    assert!(df.iqr_fence("label").unwrap().is_none());
    assert!(df.iqr_fence("nope").unwrap().is_none());
}
