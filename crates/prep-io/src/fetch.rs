//! Daily price history from the provider's chart endpoint
//!
//! [`HistoryFetcher`] downloads daily bars per ticker and writes them to
//! `<output_dir>/<ticker>.csv`. The transport sits behind [`ChartSource`]; the
//! HTTP implementation [`YahooClient`] needs the `fetch` feature.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime};
use polars::prelude::*;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::{save_csv, Error, Result};

/// Tickers downloaded when none are configured
pub const DEFAULT_TICKERS: &[&str] = &["BND", "TSLA", "SPY"];

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Default, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Values padded or cut to `n` rows; short arrays end in nulls
fn aligned<T: Copy>(values: &[Option<T>], n: usize) -> Vec<Option<T>> {
    (0..n).map(|i| values.get(i).copied().flatten()).collect()
}

fn midnight(date: NaiveDate) -> chrono::NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Epoch seconds of midnight UTC on `date`
pub fn epoch_seconds(date: NaiveDate) -> i64 {
    midnight(date).and_utc().timestamp()
}

/// Parse a chart response into one row per trading day
///
/// Columns are `Date` (exchange-local day at midnight, `Datetime(ms)`),
/// `Ticker`, `Adj Close`, `Close`, `High`, `Low`, `Open` and `Volume`. Prices
/// the provider left blank stay null.
pub fn parse_daily_chart(ticker: &str, body: &str) -> Result<DataFrame> {
    let provider_error = |message: String| Error::Provider {
        ticker: ticker.to_string(),
        message,
    };

    let response: ChartResponse = serde_json::from_str(body)?;
    if let Some(err) = response.chart.error {
        return Err(provider_error(format!("{} - {}", err.code, err.description)));
    }
    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| provider_error("no data in response".to_string()))?;

    let n = data.timestamp.len();
    let offset = data.meta.gmtoffset;
    let dates = data
        .timestamp
        .iter()
        .map(|&ts| {
            DateTime::from_timestamp(ts + offset, 0)
                .map(|t| midnight(t.date_naive()).and_utc().timestamp_millis())
                .ok_or_else(|| provider_error(format!("timestamp {ts} out of range")))
        })
        .collect::<Result<Vec<i64>>>()?;

    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = data
        .indicators
        .adjclose
        .into_iter()
        .next()
        .unwrap_or_default();

    let date = Series::new("Date".into(), dates)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    let df = DataFrame::new(vec![
        date.into(),
        Series::new("Ticker".into(), vec![ticker; n]).into(),
        Series::new("Adj Close".into(), aligned(&adjclose.adjclose, n)).into(),
        Series::new("Close".into(), aligned(&quote.close, n)).into(),
        Series::new("High".into(), aligned(&quote.high, n)).into(),
        Series::new("Low".into(), aligned(&quote.low, n)).into(),
        Series::new("Open".into(), aligned(&quote.open, n)).into(),
        Series::new("Volume".into(), aligned(&quote.volume, n)).into(),
    ])?;

    debug!("Parsed {} daily bars for '{}'", n, ticker);
    Ok(df)
}

/// Where chart documents come from
pub trait ChartSource {
    /// Raw chart JSON with daily bars of `ticker` from `start` up to, not including, `end`
    fn daily_chart(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<String>;
}

/// Blocking HTTP client for the provider's v8 chart API
#[cfg(feature = "fetch")]
pub struct YahooClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
impl YahooClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[cfg(feature = "fetch")]
impl ChartSource for YahooClient {
    fn daily_chart(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<String> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}&events=history",
            self.base_url,
            ticker,
            epoch_seconds(start),
            epoch_seconds(end)
        );
        info!("Fetching daily bars from: {}", url);

        // Error statuses still carry a chart document with the reason
        Ok(self.client.get(&url).send()?.text()?)
    }
}

/// Downloads the daily history of a fixed ticker list
pub struct HistoryFetcher<S> {
    source: S,
    tickers: Vec<String>,
}

impl<S: ChartSource> HistoryFetcher<S> {
    pub fn new<T: Into<String>>(source: S, tickers: impl IntoIterator<Item = T>) -> Self {
        Self {
            source,
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Daily bars of one ticker from `start` up to, not including, `end`
    pub fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<DataFrame> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        let body = self.source.daily_chart(ticker, start, end)?;
        parse_daily_chart(ticker, &body)
    }

    /// Fetch every ticker and save each to `<output_dir>/<ticker>.csv`
    ///
    /// A ticker that fails to download or parse is logged and left out; the
    /// paths of the files written are returned in ticker order.
    pub fn fetch_historical_data(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        output_dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        std::fs::create_dir_all(output_dir.as_ref())?;

        let mut written = Vec::new();
        for ticker in &self.tickers {
            match self.fetch(ticker, start, end) {
                Ok(df) => {
                    let path = output_dir.as_ref().join(format!("{ticker}.csv"));
                    save_csv(&df, &path, ',')?;
                    written.push(path);
                }
                Err(e) => error!("Failed to fetch '{}': {}", ticker, e),
            }
        }

        info!(
            "Fetched {} of {} tickers into '{}'",
            written.len(),
            self.tickers.len(),
            output_dir.as_ref().display()
        );
        Ok(written)
    }
}
