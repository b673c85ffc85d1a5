//! Indicator engine — pure transforms from a bar series to derived series.
//!
//! Every indicator implements the [`Indicator`] trait: full bar series in,
//! `Vec<f64>` of the same length out, `f64::NAN` wherever the value is
//! undefined (warm-up, or a division-by-zero edge such as a flat stochastic
//! range). NaN is a deliberate "undefined" marker — strategies guard it
//! explicitly and never compare through it.
//!
//! Multi-line indicators (Bollinger, MACD, Stochastic, Ichimoku, ADX/DI)
//! are exposed as separate named instances per line, keeping the
//! single-series trait unchanged.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod vwma;

pub use adx::{Adx, AdxLine};
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use ichimoku::{Ichimoku, IchimokuLine};
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stddev::StdDev;
pub use stochastic::{Stochastic, StochasticLine};
pub use vwma::Vwma;

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Implementations must be pure and deterministic: recomputing on an
/// unchanged series yields bit-identical output. No value at bar t may
/// depend on data from bar t+1 or later (the backward-shifted Ichimoku
/// lagging span is the one documented exception — it exists for the
/// reporting layer and no strategy reads it).
pub trait Indicator: Send + Sync {
    /// Stable key for this instance (e.g. "sma_50", "adx_14").
    fn name(&self) -> &str;

    /// Number of leading bars that are NaN before the first defined value.
    fn lookback(&self) -> usize;

    /// Compute the full output series, same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Precomputed indicator series, keyed by indicator name.
///
/// Built once per (series, strategy) pair, then queried per bar during
/// signal evaluation.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value at a bar index; `None` if the name is unknown or the index is
    /// out of range. A defined-but-warming-up value comes back as NaN.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Sorted indicator names, for stable artifact column order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Rolling mean over a raw slice: NaN until the window is full, NaN for any
/// window containing a NaN. Shared by ADX and the stochastic %D.
pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}

/// Create synthetic bars from close prices for testing.
///
/// open = previous close (or close for the first bar), high/low bracket
/// open and close by 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (high, low, close) triples for testing
/// indicators that read the full OHLC range.
#[cfg(test)]
pub fn make_hlc_bars(data: &[(f64, f64, f64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert("sma_3", vec![f64::NAN, f64::NAN, 11.0, 12.0]);
        assert!(iv.get("sma_3", 0).unwrap().is_nan());
        assert_eq!(iv.get("sma_3", 2), Some(11.0));
        assert_eq!(iv.get("sma_3", 4), None);
        assert_eq!(iv.get("missing", 0), None);
    }

    #[test]
    fn indicator_values_names_sorted() {
        let mut iv = IndicatorValues::new();
        iv.insert("vwma_20", vec![]);
        iv.insert("adx_14", vec![]);
        iv.insert("sma_20", vec![]);
        assert_eq!(iv.names(), vec!["adx_14", "sma_20", "vwma_20"]);
    }

    #[test]
    fn rolling_mean_basic() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_approx(out[1], 1.5, DEFAULT_EPSILON);
        assert_approx(out[2], 2.5, DEFAULT_EPSILON);
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_nan_window() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_short_input() {
        let out = rolling_mean(&[1.0, 2.0], 5);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
