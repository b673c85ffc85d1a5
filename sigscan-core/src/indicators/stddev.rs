//! Rolling standard deviation of close price.
//!
//! Sample standard deviation (N-1 denominator). Undefined until the window
//! is full; never relaxed.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
    name: String,
}

impl StdDev {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "stddev period must be >= 2");
        Self {
            period,
            name: format!("stddev_{period}"),
        }
    }
}

/// Sample standard deviation of a full window of closes. NaN if the window
/// contains a NaN.
pub(crate) fn window_stddev(window: &[Bar]) -> f64 {
    let n = window.len();
    let mut sum = 0.0;
    for bar in window {
        if bar.close.is_nan() {
            return f64::NAN;
        }
        sum += bar.close;
    }
    let mean = sum / n as f64;
    let variance: f64 = window
        .iter()
        .map(|bar| {
            let diff = bar.close - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;
    variance.sqrt()
}

impl Indicator for StdDev {
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
            result[i] = window_stddev(&bars[i + 1 - self.period..=i]);
        }

        result
    }
}
