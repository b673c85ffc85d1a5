//! Average Directional Index with the +DI/-DI directional lines.
//!
//! Per-bar directional movement uses the larger-and-positive tie-break:
//! up-move = high[t] - high[t-1], down-move = low[t-1] - low[t];
//! +DM = up-move only when up-move > down-move and up-move > 0, else 0,
//! and symmetrically for -DM. Equal moves count for neither side.
//!
//! TR = max(high - low, |high - prevclose|, |low - prevclose|). DM and TR
//! are smoothed with a plain rolling mean over `window`, then
//! DI = 100 * smoothed(DM) / ATR, DX = 100 * |+DI - -DI| / (+DI + -DI),
//! ADX = rolling mean of DX. A zero DI sum makes DX undefined (NaN).

use crate::domain::Bar;
use crate::indicators::{rolling_mean, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    PlusDi,
    MinusDi,
    Adx,
}

#[derive(Debug, Clone)]
pub struct Adx {
    window: usize,
    line: AdxLine,
    name: String,
}

impl Adx {
    pub fn plus_di(window: usize) -> Self {
        Self::make(window, AdxLine::PlusDi, format!("plus_di_{window}"))
    }

    pub fn minus_di(window: usize) -> Self {
        Self::make(window, AdxLine::MinusDi, format!("minus_di_{window}"))
    }

    pub fn adx(window: usize) -> Self {
        Self::make(window, AdxLine::Adx, format!("adx_{window}"))
    }

    fn make(window: usize, line: AdxLine, name: String) -> Self {
        assert!(window >= 1, "ADX window must be >= 1");
        Self { window, line, name }
    }

    /// (+DM, -DM, TR) per bar; index 0 has no previous bar and is NaN.
    fn raw_components(bars: &[Bar]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let n = bars.len();
        let mut plus_dm = vec![f64::NAN; n];
        let mut minus_dm = vec![f64::NAN; n];
        let mut tr = vec![f64::NAN; n];

        for i in 1..n {
            let curr = &bars[i];
            let prev = &bars[i - 1];
            if curr.high.is_nan()
                || curr.low.is_nan()
                || prev.high.is_nan()
                || prev.low.is_nan()
                || prev.close.is_nan()
            {
                continue;
            }

            let up_move = curr.high - prev.high;
            let down_move = prev.low - curr.low;

            plus_dm[i] = if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            };
            minus_dm[i] = if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            };

            tr[i] = (curr.high - curr.low)
                .max((curr.high - prev.close).abs())
                .max((curr.low - prev.close).abs());
        }

        (plus_dm, minus_dm, tr)
    }

    fn directional_indexes(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let (plus_dm, minus_dm, tr) = Self::raw_components(bars);
        let atr = rolling_mean(&tr, self.window);
        let smoothed_plus = rolling_mean(&plus_dm, self.window);
        let smoothed_minus = rolling_mean(&minus_dm, self.window);

        let di = |dm: &[f64]| -> Vec<f64> {
            dm.iter()
                .zip(atr.iter())
                .map(|(d, a)| {
                    if d.is_nan() || a.is_nan() || *a == 0.0 {
                        f64::NAN
                    } else {
                        100.0 * d / a
                    }
                })
                .collect()
        };

        (di(&smoothed_plus), di(&smoothed_minus))
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::PlusDi | AdxLine::MinusDi => self.window,
            AdxLine::Adx => 2 * self.window - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (plus_di, minus_di) = self.directional_indexes(bars);
        match self.line {
            AdxLine::PlusDi => plus_di,
            AdxLine::MinusDi => minus_di,
            AdxLine::Adx => {
                let dx: Vec<f64> = plus_di
                    .iter()
                    .zip(minus_di.iter())
                    .map(|(p, m)| {
                        if p.is_nan() || m.is_nan() {
                            return f64::NAN;
                        }
                        let sum = p + m;
                        if sum == 0.0 {
                            f64::NAN
                        } else {
                            100.0 * (p - m).abs() / sum
                        }
                    })
                    .collect();
                rolling_mean(&dx, self.window)
            }
        }
    }
}
