//! MACD — Moving Average Convergence/Divergence.
//!
//! line   = EMA(close, short) - EMA(close, long)
//! signal = EMA(line, signal span)
//!
//! Defaults 12/26/9. Both lines follow the crate EMA seeding convention
//! (seed = first defined value), so they are defined from bar 0.

use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;
use crate::indicators::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    /// EMA(short) - EMA(long).
    Line,
    /// EMA of the MACD line.
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    short: usize,
    long: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn line(short: usize, long: usize) -> Self {
        Self::make(short, long, 0, MacdLine::Line)
    }

    pub fn signal(short: usize, long: usize, signal: usize) -> Self {
        assert!(signal >= 1, "MACD signal span must be >= 1");
        Self::make(short, long, signal, MacdLine::Signal)
    }

    fn make(short: usize, long: usize, signal: usize, line: MacdLine) -> Self {
        assert!(short >= 1, "MACD short span must be >= 1");
        assert!(long > short, "MACD long span must be > short span");
        let name = match line {
            MacdLine::Line => format!("macd_{short}_{long}"),
            MacdLine::Signal => format!("macd_signal_{short}_{long}_{signal}"),
        };
        Self {
            short,
            long,
            signal,
            line,
            name,
        }
    }

    fn macd_line(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let short = ema_of_series(&closes, self.short);
        let long = ema_of_series(&closes, self.long);
        short
            .iter()
            .zip(long.iter())
            .map(|(s, l)| {
                if s.is_nan() || l.is_nan() {
                    f64::NAN
                } else {
                    s - l
                }
            })
            .collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let line = self.macd_line(bars);
        match self.line {
            MacdLine::Line => line,
            MacdLine::Signal => ema_of_series(&line, self.signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn macd_constant_series_is_zero() {
        let bars = make_bars(&[75.0; 10]);
        let line = Macd::line(3, 6).compute(&bars);
        let signal = Macd::signal(3, 6, 4).compute(&bars);
        for i in 0..10 {
            assert_approx(line[i], 0.0, DEFAULT_EPSILON);
            assert_approx(signal[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let line = Macd::line(5, 10).compute(&bars);
        // Short EMA hugs a rising series tighter than the long EMA.
        assert!(line[29] > 0.0);
    }

    #[test]
    fn macd_line_matches_ema_difference() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 13.0, 15.0, 14.0]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let short = ema_of_series(&closes, 2);
        let long = ema_of_series(&closes, 4);
        let line = Macd::line(2, 4).compute(&bars);
        for i in 0..bars.len() {
            assert_approx(line[i], short[i] - long[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_signal_is_ema_of_line() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 13.0, 15.0, 14.0]);
        let line = Macd::line(2, 4).compute(&bars);
        let expected = ema_of_series(&line, 3);
        let signal = Macd::signal(2, 4, 3).compute(&bars);
        for i in 0..bars.len() {
            assert_approx(signal[i], expected[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    #[should_panic(expected = "long span must be > short")]
    fn macd_rejects_long_leq_short() {
        Macd::line(26, 12);
    }

    #[test]
    fn macd_names() {
        assert_eq!(Macd::line(12, 26).name(), "macd_12_26");
        assert_eq!(Macd::signal(12, 26, 9).name(), "macd_signal_12_26_9");
    }
}
