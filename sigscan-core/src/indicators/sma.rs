//! Simple Moving Average (SMA).
//!
//! Trailing mean of close prices, inclusive of the current bar. Two window
//! conventions exist in the wild and both are needed here: the strict one
//! (undefined until the window is full) and the relaxed `min_periods = 1`
//! one (mean over however many bars exist so far). The relaxation is
//! selected per instance, never globally.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    min_periods: usize,
    name: String,
}

impl Sma {
    /// Strict SMA: first defined value at index `period - 1`.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            min_periods: period,
            name: format!("sma_{period}"),
        }
    }

    /// Relaxed SMA: defined as soon as `min_periods` bars exist, averaging
    /// over whatever portion of the window is available.
    pub fn with_min_periods(period: usize, min_periods: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        assert!(
            (1..=period).contains(&min_periods),
            "min_periods must be in 1..=period"
        );
        let name = if min_periods == period {
            format!("sma_{period}")
        } else {
            format!("sma_{period}_min{min_periods}")
        };
        Self {
            period,
            min_periods,
            name,
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.min_periods - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        for i in (self.min_periods - 1)..n {
            let avail = self.period.min(i + 1);
            let window = &bars[i + 1 - avail..=i];

            let mut sum = 0.0;
            let mut has_nan = false;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.close;
            }

            if !has_nan {
                result[i] = sum / avail as f64;
            }
        }

        result
    }
}
