//! Stochastic oscillator (%K and %D).
//!
//! %K = 100 * (close - LL) / (HH - LL) over the trailing k-window, where
//! HH/LL are the highest high and lowest low of the window. %D is the
//! rolling mean of %K over the d-window.
//!
//! A flat window (HH == LL) makes %K undefined (NaN), never a division by
//! zero. Defaults 14/3.

use crate::domain::Bar;
use crate::indicators::{rolling_mean, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    /// Raw oscillator.
    PercentK,
    /// Rolling mean of %K.
    PercentD,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    pub fn percent_k(k_period: usize) -> Self {
        assert!(k_period >= 1, "stochastic %K period must be >= 1");
        Self {
            k_period,
            d_period: 0,
            line: StochasticLine::PercentK,
            name: format!("stoch_k_{k_period}"),
        }
    }

    pub fn percent_d(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1, "stochastic %K period must be >= 1");
        assert!(d_period >= 1, "stochastic %D period must be >= 1");
        Self {
            k_period,
            d_period,
            line: StochasticLine::PercentD,
            name: format!("stoch_d_{k_period}_{d_period}"),
        }
    }

    fn raw_k(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.k_period {
            return result;
        }

        for i in (self.k_period - 1)..n {
            let window = &bars[i + 1 - self.k_period..=i];

            let mut highest = f64::NEG_INFINITY;
            let mut lowest = f64::INFINITY;
            let mut has_nan = false;
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                highest = highest.max(bar.high);
                lowest = lowest.min(bar.low);
            }
            if has_nan || bars[i].close.is_nan() {
                continue;
            }

            let range = highest - lowest;
            if range == 0.0 {
                continue;
            }
            result[i] = 100.0 * (bars[i].close - lowest) / range;
        }

        result
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::PercentK => self.k_period - 1,
            StochasticLine::PercentD => self.k_period + self.d_period - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let k = self.raw_k(bars);
        match self.line {
            StochasticLine::PercentK => k,
            StochasticLine::PercentD => rolling_mean(&k, self.d_period),
        }
    }
}
