//! Bollinger Bands — SMA +/- a multiple of the rolling sample stddev.
//!
//! Three lines, each its own named instance:
//! - middle: SMA(close, period)
//! - upper:  middle + k * stddev(close, period)
//! - lower:  middle - k * stddev(close, period)
//!
//! Sample stddev (N-1), matching [`StdDev`](crate::indicators::StdDev).
//! Lookback: period - 1.

use crate::domain::Bar;
use crate::indicators::stddev::window_stddev;
use crate::indicators::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Upper, "upper")
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Middle, "middle")
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Lower, "lower")
    }

    fn make(period: usize, multiplier: f64, band: BollingerBand, label: &str) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        assert!(multiplier > 0.0, "Bollinger multiplier must be positive");
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}"),
        }
    }
}

impl Indicator for Bollinger {
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

            let mut sum = 0.0;
            let mut has_nan = false;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.close;
            }
            if has_nan {
                continue;
            }
            let mean = sum / self.period as f64;

            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper => mean + self.multiplier * window_stddev(window),
                BollingerBand::Lower => mean - self.multiplier * window_stddev(window),
            };
        }

        result
    }
}
