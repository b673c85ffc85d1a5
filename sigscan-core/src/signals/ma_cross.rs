//! Moving-average cross strategy.
//!
//! LONG while the short SMA is above the long SMA, FLAT otherwise. No
//! SHORT state. Undefined while either average is still warming up.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Sma};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct MaCrossStrategy {
    pub short_window: usize,
    pub long_window: usize,
    short_key: String,
    long_key: String,
}

impl MaCrossStrategy {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        assert!(short_window >= 1, "short_window must be >= 1");
        assert!(
            long_window > short_window,
            "long_window must be > short_window"
        );
        Self {
            short_window,
            long_window,
            short_key: format!("sma_{short_window}"),
            long_key: format!("sma_{long_window}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(50, 200)
    }
}

impl Strategy for MaCrossStrategy {
    fn name(&self) -> &str {
        "ma_cross"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Sma::new(self.short_window)),
            Box::new(Sma::new(self.long_window)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        self.long_window - 1
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let short = indicators.get(&self.short_key, bar_index)?;
        let long = indicators.get(&self.long_key, bar_index)?;
        if short.is_nan() || long.is_nan() {
            return None;
        }

        if short > long {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}
