//! Combined moving-average trend filter with RSI entry/exit timing.
//!
//! Enters LONG only when the short SMA is above the long SMA *and* RSI is
//! oversold (< 30); holds that LONG until RSI becomes overbought (> 70),
//! then drops to FLAT. The hold rule threads through the previous state.
//!
//! The moving averages here use the min_periods = 1 relaxation (defined
//! from the first bar), so definedness is governed by the RSI window.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Rsi, Sma};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct MaRsiStrategy {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_window: usize,
    short_key: String,
    long_key: String,
    rsi_key: String,
}

impl MaRsiStrategy {
    pub fn new(short_window: usize, long_window: usize, rsi_window: usize) -> Self {
        assert!(short_window >= 1, "short_window must be >= 1");
        assert!(
            long_window > short_window,
            "long_window must be > short_window"
        );
        assert!(rsi_window >= 1, "rsi_window must be >= 1");
        Self {
            short_window,
            long_window,
            rsi_window,
            short_key: format!("sma_{short_window}_min1"),
            long_key: format!("sma_{long_window}_min1"),
            rsi_key: format!("rsi_{rsi_window}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(50, 200, 14)
    }
}

impl Strategy for MaRsiStrategy {
    fn name(&self) -> &str {
        "ma_rsi"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Sma::with_min_periods(self.short_window, 1)),
            Box::new(Sma::with_min_periods(self.long_window, 1)),
            Box::new(Rsi::new(self.rsi_window)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        self.rsi_window
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let short = indicators.get(&self.short_key, bar_index)?;
        let long = indicators.get(&self.long_key, bar_index)?;
        let rsi = indicators.get(&self.rsi_key, bar_index)?;
        if short.is_nan() || long.is_nan() || rsi.is_nan() {
            return None;
        }

        if prev == Some(PositionState::Long) {
            // Hold until overbought.
            if rsi > 70.0 {
                return Some(PositionState::Flat);
            }
            return Some(PositionState::Long);
        }

        if short > long && rsi < 30.0 {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}
