//! Tests for downloading ticker history through a canned chart source

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use prep_io::{load_data, ChartSource, Error, HistoryFetcher, LoaderConfig, Result};

const TSLA: &str = r#"{"chart": {"result": [{
    "meta": {"gmtoffset": -14400},
    "timestamp": [1433165400, 1433251800],
    "indicators": {
        "quote": [{
            "open": [50.0, 50.5],
            "high": [51.0, 52.0],
            "low": [49.5, 50.1],
            "close": [50.1, 51.3],
            "volume": [1000, 1200]
        }],
        "adjclose": [{"adjclose": [50.1, 51.3]}]
    }
}], "error": null}}"#;

const DELISTED: &str = r#"{"chart": {"result": null, "error": {
    "code": "Not Found",
    "description": "No data found, symbol may be delisted"
}}}"#;

/// Serves fixed documents and records the requests it saw
#[derive(Default)]
struct CannedSource {
    bodies: HashMap<&'static str, &'static str>,
    requests: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl ChartSource for CannedSource {
    fn daily_chart(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<String> {
        self.requests
            .borrow_mut()
            .push((ticker.to_string(), start, end));
        self.bodies
            .get(ticker)
            .map(|body| body.to_string())
            .ok_or_else(|| Error::Provider {
                ticker: ticker.to_string(),
                message: "unreachable".to_string(),
            })
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn source() -> CannedSource {
    CannedSource {
        bodies: HashMap::from([("TSLA", TSLA), ("ZZZZ", DELISTED)]),
        ..Default::default()
    }
}

#[test]
fn test_fetch_writes_one_file_per_ticker() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("data");
    let fetcher = HistoryFetcher::new(source(), ["TSLA", "ZZZZ", "SPY"]);

    let written = fetcher.fetch_historical_data(day(2015, 6, 1), day(2015, 6, 3), &out)?;

    // the delisted and unreachable tickers are logged and skipped
    assert_eq!(written, vec![out.join("TSLA.csv")]);
    let text = fs::read_to_string(&written[0])?;
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Ticker,Adj Close,Close,High,Low,Open,Volume")
    );
    assert!(lines.next().is_some_and(|l| l.starts_with("2015-06-01")));
    assert_eq!(text.lines().count(), 3);
    Ok(())
}

#[test]
fn test_requests_carry_the_range() {
    let fetcher = HistoryFetcher::new(source(), ["TSLA"]);
    let df = fetcher.fetch("TSLA", day(2015, 6, 1), day(2025, 7, 1)).unwrap();
    assert_eq!(df.height(), 2);

    let requests = fetcher.source().requests.borrow().clone();
    assert_eq!(
        requests,
        vec![("TSLA".to_string(), day(2015, 6, 1), day(2025, 7, 1))]
    );
}

#[test]
fn test_empty_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = HistoryFetcher::new(source(), ["TSLA"]);
    let result = fetcher.fetch_historical_data(day(2015, 6, 2), day(2015, 6, 2), dir.path());
    assert!(matches!(result, Err(Error::InvalidRange { .. })));
}

#[test]
fn test_fetched_file_reloads() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let fetcher = HistoryFetcher::new(source(), ["TSLA"]);
    fetcher.fetch_historical_data(day(2015, 6, 1), day(2015, 6, 3), dir.path())?;

    let config = LoaderConfig {
        data_dir: dir.path().to_path_buf(),
        delimiter: ',',
        ..Default::default()
    };
    let df = prep_io::Loader::new(config).load("TSLA.csv")?;
    assert_eq!(df.shape(), (2, 8));
    assert_eq!(df.column("Volume")?.i64()?.get(1), Some(1200));

    // a frame without a Timestamp column still loads, with a warning
    assert_eq!(load_data(dir.path().join("TSLA.csv"))?.height(), 2);
    Ok(())
}
