//! Volume-weighted versus plain moving average strategy.
//!
//! LONG while VWMA(window) is above SMA(window) over the same window
//! (volume concentrated on up-bars), FLAT otherwise.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Sma, Vwma};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct VwmaStrategy {
    pub window: usize,
    vwma_key: String,
    sma_key: String,
}

impl VwmaStrategy {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "window must be >= 1");
        Self {
            window,
            vwma_key: format!("vwma_{window}"),
            sma_key: format!("sma_{window}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(20)
    }
}

impl Strategy for VwmaStrategy {
    fn name(&self) -> &str {
        "vwma"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Vwma::new(self.window)),
            Box::new(Sma::new(self.window)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        self.window - 1
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let vwma = indicators.get(&self.vwma_key, bar_index)?;
        let sma = indicators.get(&self.sma_key, bar_index)?;
        if vwma.is_nan() || sma.is_nan() {
            return None;
        }

        if vwma > sma {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}
