//! Data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over data sources (Yahoo Finance,
//! the synthetic generator) so implementations can be swapped and mocked in
//! tests. Failures are surfaced per kind and never retried here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily OHLCV bar from a data provider, before validation. Missing
/// fields arrive as NaN and are filtered out before `Series` construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Structured error kinds for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("ticker not found: {ticker}")]
    NotFound { ticker: String },

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single ticker.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub ticker: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Synthetic,
}

/// Trait for market data providers.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a ticker over a date range (inclusive).
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;
}

/// Progress callback for multi-ticker runs.
pub trait FetchProgress: Send {
    /// Called when starting to process a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker finishes, successfully or not.
    fn on_complete(&self, ticker: &str, index: usize, total: usize, error: Option<&str>);

    /// Called once when the whole run is done.
    fn on_run_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Analyzing {ticker}...", index + 1, total);
    }

    fn on_complete(&self, ticker: &str, _index: usize, _total: usize, error: Option<&str>) {
        match error {
            None => println!("  OK: {ticker}"),
            Some(e) => println!("  FAIL: {ticker}: {e}"),
        }
    }

    fn on_run_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nRun complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}

/// Silent progress reporter for tests and library callers.
pub struct NullProgress;

impl FetchProgress for NullProgress {
    fn on_start(&self, _ticker: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _ticker: &str, _index: usize, _total: usize, _error: Option<&str>) {}
    fn on_run_complete(&self, _succeeded: usize, _failed: usize, _total: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_kind() {
        let e = DataError::NotFound {
            ticker: "BOGUS".into(),
        };
        assert_eq!(e.to_string(), "ticker not found: BOGUS");

        let e = DataError::RateLimited {
            retry_after_secs: 60,
        };
        assert!(e.to_string().contains("retry after 60s"));
    }
}
