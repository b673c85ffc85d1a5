//! Synthetic data provider — deterministic random-walk OHLCV series.
//!
//! Generates one bar per weekday in the requested range with a seeded
//! random walk over the close. The per-ticker stream is derived from the
//! base seed and the ticker bytes, so the same (seed, ticker) pair always
//! yields the same series. Used for offline runs and integration tests.

use super::provider::{DataError, DataSource, FetchResult, MarketDataProvider, RawBar};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SyntheticProvider {
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, ticker: &str) -> StdRng {
        let mut seed = self.seed;
        for b in ticker.bytes() {
            seed = seed.wrapping_mul(0x100000001b3).wrapping_add(b as u64);
        }
        StdRng::seed_from_u64(seed)
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        if end < start {
            return Err(DataError::Other(format!(
                "invalid range: {start} after {end}"
            )));
        }

        let mut rng = self.rng_for(ticker);
        let mut close = rng.gen_range(50.0..500.0);
        let mut bars = Vec::new();
        let mut date = start;

        while date <= end {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let open = close;
                let drift: f64 = rng.gen_range(-0.02..0.021);
                close = (open * (1.0 + drift)).max(1.0);

                let spread_up: f64 = rng.gen_range(0.0..0.01);
                let spread_down: f64 = rng.gen_range(0.0..0.01);
                let high = open.max(close) * (1.0 + spread_up);
                let low = (open.min(close) * (1.0 - spread_down)).max(0.5);
                let volume = rng.gen_range(100_000..10_000_000);

                bars.push(RawBar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
            date += Duration::days(1);
        }

        if bars.is_empty() {
            return Err(DataError::NotFound {
                ticker: ticker.to_string(),
            });
        }

        Ok(FetchResult {
            ticker: ticker.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
        )
    }

    #[test]
    fn deterministic_per_seed_and_ticker() {
        let (start, end) = range();
        let a = SyntheticProvider::new(7).fetch("AAPL", start, end).unwrap();
        let b = SyntheticProvider::new(7).fetch("AAPL", start, end).unwrap();
        assert_eq!(a.bars.len(), b.bars.len());
        for (x, y) in a.bars.iter().zip(b.bars.iter()) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.close, y.close);
            assert_eq!(x.volume, y.volume);
        }
    }

    #[test]
    fn different_tickers_differ() {
        let (start, end) = range();
        let provider = SyntheticProvider::new(7);
        let a = provider.fetch("AAPL", start, end).unwrap();
        let b = provider.fetch("MSFT", start, end).unwrap();
        assert!(a
            .bars
            .iter()
            .zip(b.bars.iter())
            .any(|(x, y)| x.close != y.close));
    }

    #[test]
    fn skips_weekends() {
        let (start, end) = range();
        let result = SyntheticProvider::new(1).fetch("AAPL", start, end).unwrap();
        assert!(result
            .bars
            .iter()
            .all(|b| !matches!(b.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn bars_are_sane() {
        let (start, end) = range();
        let result = SyntheticProvider::new(42).fetch("GOOG", start, end).unwrap();
        for bar in &result.bars {
            assert!(bar.low <= bar.open && bar.open <= bar.high, "{bar:?}");
            assert!(bar.low <= bar.close && bar.close <= bar.high, "{bar:?}");
            assert!(bar.low > 0.0);
        }
    }

    #[test]
    fn weekend_only_range_is_not_found() {
        let sat = NaiveDate::from_ymd_opt(2023, 1, 7).unwrap();
        let sun = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
        assert!(matches!(
            SyntheticProvider::new(1).fetch("AAPL", sat, sun),
            Err(DataError::NotFound { .. })
        ));
    }
}
