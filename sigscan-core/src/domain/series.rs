//! Series — a validated, immutable, date-ordered bar sequence for one ticker.
//!
//! Validation happens once, at construction. Everything downstream
//! (indicators, strategies) can assume strictly increasing dates and sane
//! OHLC ranges. Calendar gaps are allowed and never interpolated.

use chrono::NaiveDate;
use thiserror::Error;

use super::Bar;

/// Rejection reasons for malformed input. These fire before any indicator
/// runs — a bad series never reaches the computation layer.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series for {ticker} is empty")]
    Empty { ticker: String },

    #[error("dates not strictly increasing at index {index}: {prev} then {next}")]
    NonMonotonicDates {
        index: usize,
        prev: NaiveDate,
        next: NaiveDate,
    },

    #[error("invalid bar at index {index} ({date}): {reason}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        reason: String,
    },
}

/// Ordered OHLCV series for a single ticker. Immutable after construction;
/// a run treats it as a frozen snapshot.
#[derive(Debug, Clone)]
pub struct Series {
    ticker: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Validate and freeze a bar sequence. Duplicate dates count as
    /// non-monotonic; bars failing [`Bar::is_sane`] are rejected outright.
    pub fn new(ticker: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let ticker = ticker.into();

        if bars.is_empty() {
            return Err(SeriesError::Empty { ticker });
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::InvalidBar {
                    index: i,
                    date: bar.date,
                    reason: format!(
                        "insane OHLC: open={} high={} low={} close={}",
                        bar.open, bar.high, bar.low, bar.close
                    ),
                });
            }
            if i > 0 && bars[i - 1].date >= bar.date {
                return Err(SeriesError::NonMonotonicDates {
                    index: i,
                    prev: bars[i - 1].date,
                    next: bar.date,
                });
            }
        }

        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_bars(n: usize) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        (0..n)
            .map(|i| Bar {
                date: base + Duration::days(i as i64),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.5,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn accepts_well_formed_bars() {
        let series = Series::new("AAPL", make_bars(5)).unwrap();
        assert_eq!(series.ticker(), "AAPL");
        assert_eq!(series.len(), 5);
    }

    #[test]
    fn rejects_empty() {
        let err = Series::new("AAPL", vec![]).unwrap_err();
        assert!(matches!(err, SeriesError::Empty { .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let mut bars = make_bars(3);
        bars[2].date = bars[1].date;
        let err = Series::new("AAPL", bars).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonicDates { index: 2, .. }));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let mut bars = make_bars(3);
        bars.swap(0, 2);
        let err = Series::new("AAPL", bars).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonicDates { .. }));
    }

    #[test]
    fn rejects_high_below_low() {
        let mut bars = make_bars(3);
        bars[1].high = 90.0;
        let err = Series::new("AAPL", bars).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidBar { index: 1, .. }));
    }

    #[test]
    fn allows_calendar_gaps() {
        let mut bars = make_bars(3);
        bars[2].date += Duration::days(10);
        assert!(Series::new("AAPL", bars).is_ok());
    }
}
