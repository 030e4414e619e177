//! Yahoo Finance data provider.
//!
//! Fetches the full daily close history and the asset's short name from
//! Yahoo's v8 chart API. One request per call, no retries: failures go
//! straight back to the caller.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. The CSV provider is the offline fallback.

use super::provider::{DataError, MarketDataProvider};
use super::validate::canonicalize;
use crate::config::ProviderConfig;
use crate::domain::{AssetMetadata, DailyBar};
use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    short_name: Option<String>,
    long_name: Option<String>,
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Which part of the chart endpoint a request is for.
#[derive(Debug, Clone, Copy)]
enum ChartRange {
    /// Entire daily history.
    Max,
    /// Smallest window that still carries `meta`.
    Day,
}

impl ChartRange {
    fn as_query(self) -> &'static str {
        match self {
            ChartRange::Max => "max",
            ChartRange::Day => "1d",
        }
    }
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DataError::Other(format!("invalid base_url '{}': {e}", config.base_url)))?;

        Ok(Self { client, base_url })
    }

    /// Build the chart API URL for a ticker. The ticker goes in as a single
    /// path segment, so `/` and `?` in it are escaped.
    fn chart_url(&self, ticker: &str, range: ChartRange) -> Result<Url, DataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DataError::Other(format!("base_url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        url.query_pairs_mut()
            .append_pair("range", range.as_query())
            .append_pair("interval", "1d")
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    /// Execute one request. `Ok(None)` means Yahoo does not know the ticker.
    fn request(&self, ticker: &str, range: ChartRange) -> Result<Option<ChartData>, DataError> {
        let url = self.chart_url(ticker, range)?;
        debug!(ticker, %url, "requesting chart");

        let resp = self.client.get(url).send().map_err(|e| {
            warn!(ticker, error = %e, "chart request failed");
            DataError::NetworkUnreachable(e.to_string())
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(ticker, "ticker not found");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(ticker, status = status.as_u16(), "chart request rejected");
            return Err(DataError::Http {
                status: status.as_u16(),
                ticker: ticker.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {ticker}: {e}"))
        })?;

        unwrap_chart(chart)
    }
}

/// Pull the single result out of a chart response.
fn unwrap_chart(resp: ChartResponse) -> Result<Option<ChartData>, DataError> {
    match resp.chart.result {
        Some(results) => Ok(results.into_iter().next()),
        None => match resp.chart.error {
            Some(err) if err.code == "Not Found" => Ok(None),
            Some(err) => Err(DataError::ResponseFormatChanged(format!(
                "{}: {}",
                err.code,
                err.description.unwrap_or_default()
            ))),
            None => Err(DataError::ResponseFormatChanged(
                "empty result with no error".into(),
            )),
        },
    }
}

/// Parse chart data into daily bars.
///
/// Rows with a null close (holidays, halted days) are skipped. Timestamps are
/// shifted by the exchange's GMT offset before taking the date, so non-US
/// exchanges land on their local trading day.
fn parse_bars(data: ChartData) -> Result<Vec<DailyBar>, DataError> {
    let Some(timestamps) = data.timestamp else {
        // Listed but no trades yet
        return Ok(Vec::new());
    };

    let offset = data.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);

    let quote = data
        .indicators
        .and_then(|ind| ind.quote.into_iter().next())
        .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let date = to_local_date(ts, offset).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
        })?;
        bars.push(DailyBar { date, close });
    }

    Ok(canonicalize(bars))
}

fn to_local_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

fn parse_metadata(data: Option<ChartData>) -> AssetMetadata {
    let display_name = data
        .and_then(|d| d.meta)
        .and_then(|m| m.short_name.or(m.long_name))
        .filter(|name| !name.trim().is_empty());
    AssetMetadata { display_name }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_history(&self, ticker: &str) -> Result<Vec<DailyBar>, DataError> {
        match self.request(ticker, ChartRange::Max)? {
            Some(data) => parse_bars(data),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_metadata(&self, ticker: &str) -> Result<AssetMetadata, DataError> {
        Ok(parse_metadata(self.request(ticker, ChartRange::Day)?))
    }
}
