//! Quote Chart API Client
//!
//! Fetches historical OHLCV bars from the public chart endpoint
//! (https://query1.finance.yahoo.com/v8/finance/chart/{symbol}).
//!
//! Features:
//! - Epoch-second date windows with an inclusive end day
//! - Null-row filtering (a missing field drops the whole row)
//! - Traded-value estimate derived per row (volume x mean(open, close))
//! - Typed failures: DataUnavailable / NoHistory / ConnectionFailure / FetchFailure

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::constants::{
    PREDICT_HISTORY_DAYS, QUOTE_BASE_URL, QUOTE_TIMEOUT_SECS, QUOTE_USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::models::{Bar, Interval};

/// Chart API response envelope
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartNode,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteArrays>,
}

/// Parallel per-field arrays; a null at index i means the whole row i is unusable
#[derive(Debug, Default, Deserialize)]
struct QuoteArrays {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Strip an exchange prefix ("NASDAQ:AAPL" -> "AAPL")
pub fn normalize_ticker(ticker: &str) -> &str {
    ticker.rsplit(':').next().unwrap_or(ticker)
}

/// HTTP client for the chart endpoint
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(QUOTE_BASE_URL)
    }

    /// Create a client against a custom host (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(QUOTE_TIMEOUT_SECS))
            .user_agent(QUOTE_USER_AGENT)
            .build()
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch bars for a date window. The end date is inclusive: the bound
    /// sent to the API is pushed one day forward.
    pub async fn fetch_window(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Bar>> {
        let (period1, period2) = epoch_window(start, end);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        debug!(symbol, %interval, period1, period2, "requesting chart data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", interval.as_str().to_string()),
                ("includePrePost", "false".to_string()),
                ("events", "div,splits".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ConnectionFailure(format!(
                "chart endpoint returned HTTP {} for {}",
                status, symbol
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;

        let bars = parse_chart_body(symbol, &body)?;
        info!(symbol, %interval, records = bars.len(), "chart data fetched");
        Ok(bars)
    }

    /// Roughly two years of daily bars, for the forecast path
    pub async fn daily_history(&self, symbol: &str) -> Result<Vec<Bar>> {
        let end = Utc::now().date_naive();
        let start = end - chrono::Duration::days(PREDICT_HISTORY_DAYS);
        self.fetch_window(symbol, start, end, Interval::Day1).await
    }
}

/// Convert a date window to chart API epoch bounds (end day included)
fn epoch_window(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let period1 = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
    let period2 = end.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp() + 86_400;
    (period1, period2)
}

fn value_at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

/// Decode a chart API body into sorted, deduplicated bars.
///
/// Rows with a null in any field are dropped entirely, matching how the
/// endpoint reports halted or partial sessions.
fn parse_chart_body(symbol: &str, body: &str) -> Result<Vec<Bar>> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| AppError::FetchFailure(format!("chart decode error: {}", e)))?;

    let ChartNode { result, error } = envelope.chart;

    let result = result.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    });

    let result = match result {
        Some(r) => r,
        None => {
            let detail = error
                .map(|e| format!("{} ({})", e.description, e.code))
                .unwrap_or_else(|| "no chart result".to_string());
            return Err(AppError::DataUnavailable(format!("{}: {}", symbol, detail)));
        }
    };

    if result.timestamp.is_empty() {
        return Err(AppError::NoHistory(format!(
            "empty history for symbol: {}",
            symbol
        )));
    }

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<Bar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let open = value_at(&quote.open, i)?;
            let high = value_at(&quote.high, i)?;
            let low = value_at(&quote.low, i)?;
            let close = value_at(&quote.close, i)?;
            let volume = value_at(&quote.volume, i)?;

            let time = match DateTime::from_timestamp(ts, 0) {
                Some(dt) => dt,
                None => {
                    warn!("Invalid timestamp: {}", ts);
                    return None;
                }
            };

            Some(Bar::new(time, open, high, low, close, volume))
        })
        .collect();

    bars.sort_by_key(|b| b.time);
    bars.dedup_by_key(|b| b.time);

    Ok(bars)
}
