//! Relative Strength Index (RSI).
//!
//! Two-stage smoothing: rolling full-window means of gains and losses over
//! the daily close deltas, each then exponentially smoothed with
//! span = window. RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).
//!
//! Edge cases (never a raw division):
//! - avg_loss = 0 and avg_gain = 0 (flat series) -> 50
//! - avg_loss = 0 and avg_gain > 0 -> 100
//! Lookback: window (the first delta exists at index 1, so the first full
//! gains window completes at index `window`).

use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;
use crate::indicators::{rolling_mean, Indicator};

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
    name: String,
}

impl Rsi {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "RSI window must be >= 1");
        Self {
            window,
            name: format!("rsi_{window}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window + 1 {
            return result;
        }

        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];
        for i in 1..n {
            let curr = bars[i].close;
            let prev = bars[i - 1].close;
            if curr.is_nan() || prev.is_nan() {
                continue;
            }
            let delta = curr - prev;
            gains[i] = delta.max(0.0);
            losses[i] = (-delta).max(0.0);
        }

        let avg_gain = ema_of_series(&rolling_mean(&gains, self.window), self.window);
        let avg_loss = ema_of_series(&rolling_mean(&losses, self.window), self.window);

        for i in 0..n {
            let g = avg_gain[i];
            let l = avg_loss[i];
            if g.is_nan() || l.is_nan() {
                continue;
            }
            result[i] = if l == 0.0 && g == 0.0 {
                50.0
            } else if l == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + g / l)
            };
        }

        result
    }
}
