//! Volume-Weighted Moving Average.
//!
//! VWMA = sum(close * volume) / sum(volume) over the trailing window. A
//! window with zero total volume has no defined weighting and yields NaN.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Vwma {
    period: usize,
    name: String,
}

impl Vwma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "VWMA period must be >= 1");
        Self {
            period,
            name: format!("vwma_{period}"),
        }
    }
}

impl Indicator for Vwma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];

            let mut weighted = 0.0;
            let mut volume = 0.0;
            let mut has_nan = false;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                weighted += bar.close * bar.volume as f64;
                volume += bar.volume as f64;
            }
            if has_nan || volume == 0.0 {
                continue;
            }
            result[i] = weighted / volume;
        }

        result
    }
}
