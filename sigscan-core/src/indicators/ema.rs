//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (span + 1).
//!
//! Seeding convention, fixed for the whole crate: the EMA is seeded with
//! the first defined source value (EMA[0] = close[0]), so it is defined
//! from the start of the defined region. The alternative (seed with the
//! first window's SMA) changes early-series MACD and RSI values and delays
//! definedness; one convention is used everywhere and this is it.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.span)
    }
}

/// EMA over a raw slice, seeded at the first non-NaN value. A NaN after
/// the seed taints the remainder of the output (the recursion has no way
/// to recover a defined state).
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if span == 0 || n == 0 {
        return result;
    }

    let seed_index = match values.iter().position(|v| !v.is_nan()) {
        Some(i) => i,
        None => return result,
    };

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[seed_index];
    result[seed_index] = prev;

    for i in (seed_index + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_seeded_with_first_close() {
        // span 3 -> alpha 0.5. Closes 10, 11, 12:
        // EMA[0] = 10, EMA[1] = 10.5, EMA[2] = 11.25.
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let result = Ema::new(3).compute(&bars);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_span_1_tracks_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).compute(&bars);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_input_is_constant() {
        let bars = make_bars(&[42.0; 8]);
        let result = Ema::new(5).compute(&bars);
        for v in result {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_of_series_skips_nan_prefix() {
        let values = [f64::NAN, f64::NAN, 10.0, 12.0];
        let result = ema_of_series(&values, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 10.0, DEFAULT_EPSILON);
        assert_approx(result[3], 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_series_nan_after_seed_taints_rest() {
        let values = [10.0, f64::NAN, 12.0];
        let result = ema_of_series(&values, 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn ema_lookback_is_zero() {
        assert_eq!(Ema::new(26).lookback(), 0);
    }
}
