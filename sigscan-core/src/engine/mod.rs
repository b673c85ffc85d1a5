//! Analysis engine — runs the strategy suite over a ticker universe.
//!
//! Strictly sequential: one ticker is fetched, validated and analyzed
//! before the next begins. A failed ticker is recorded in the summary and
//! the run continues; per-ticker outputs share no state.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{DataError, FetchProgress, MarketDataProvider, RawBar, Universe};
use crate::domain::{Bar, Series, SeriesError};
use crate::signals::{run_strategy, Strategy, StrategyRun};

/// Why a single ticker's analysis failed. Fatal for that ticker only.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] DataError),

    #[error("malformed series: {0}")]
    Malformed(#[from] SeriesError),
}

/// Everything computed for one ticker.
#[derive(Debug)]
pub struct TickerAnalysis {
    pub ticker: String,
    pub display_name: String,
    pub series: Series,
    pub runs: Vec<StrategyRun>,
}

/// Outcome of a universe run.
#[derive(Debug)]
pub struct RunSummary {
    pub analyses: Vec<TickerAnalysis>,
    pub failures: Vec<(String, AnalysisError)>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.analyses.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.analyses.len() + self.failures.len()
    }
}

/// Providers hand back placeholder rows for halts and partial sessions;
/// anything with a NaN price is dropped before validation.
fn to_bars(raw: Vec<RawBar>) -> Vec<Bar> {
    raw.into_iter()
        .map(|r| Bar {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        })
        .filter(|bar| !bar.is_void())
        .collect()
}

/// Fetch one ticker, validate the series, and evaluate every strategy.
pub fn analyze_ticker(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    display_name: &str,
    start: NaiveDate,
    end: NaiveDate,
    strategies: &[Box<dyn Strategy>],
) -> Result<TickerAnalysis, AnalysisError> {
    let fetched = provider.fetch(ticker, start, end)?;
    let series = Series::new(ticker, to_bars(fetched.bars))?;

    let runs = strategies
        .iter()
        .map(|strategy| run_strategy(strategy.as_ref(), &series))
        .collect();

    Ok(TickerAnalysis {
        ticker: ticker.to_string(),
        display_name: display_name.to_string(),
        series,
        runs,
    })
}

/// Run the strategy suite over every ticker in the universe, in order.
/// Failures are recorded per ticker; the run always reaches the end.
pub fn analyze_universe(
    provider: &dyn MarketDataProvider,
    universe: &Universe,
    start: NaiveDate,
    end: NaiveDate,
    strategies: &[Box<dyn Strategy>],
    progress: &dyn FetchProgress,
) -> RunSummary {
    let total = universe.tickers.len();
    let mut analyses = Vec::new();
    let mut failures = Vec::new();

    for (index, ticker) in universe.tickers.iter().enumerate() {
        progress.on_start(ticker, index, total);

        match analyze_ticker(
            provider,
            ticker,
            universe.display_name(ticker),
            start,
            end,
            strategies,
        ) {
            Ok(analysis) => {
                progress.on_complete(ticker, index, total, None);
                analyses.push(analysis);
            }
            Err(err) => {
                progress.on_complete(ticker, index, total, Some(&err.to_string()));
                failures.push((ticker.clone(), err));
            }
        }
    }

    progress.on_run_complete(analyses.len(), failures.len(), total);

    RunSummary { analyses, failures }
}
