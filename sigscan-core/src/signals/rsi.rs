//! RSI overbought/oversold strategy.
//!
//! RSI > 70 is overbought (SHORT), RSI < 30 oversold (LONG), FLAT between.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Rsi};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct RsiStrategy {
    pub window: usize,
    rsi_key: String,
}

impl RsiStrategy {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "window must be >= 1");
        Self {
            window,
            rsi_key: format!("rsi_{window}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14)
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> &str {
        "rsi"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![Box::new(Rsi::new(self.window))]
    }

    fn warmup_bars(&self) -> usize {
        self.window
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let rsi = indicators.get(&self.rsi_key, bar_index)?;
        if rsi.is_nan() {
            return None;
        }

        if rsi > 70.0 {
            Some(PositionState::Short)
        } else if rsi < 30.0 {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn make_rsi_values(rsi: f64, n: usize) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("rsi_14", vec![rsi; n]);
        iv
    }

    #[test]
    fn short_when_overbought() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_rsi_values(80.0, 3);
        let strat = RsiStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Short));
    }

    #[test]
    fn long_when_oversold() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_rsi_values(20.0, 3);
        let strat = RsiStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Long));
    }

    #[test]
    fn flat_between_thresholds() {
        let bars = make_bars(&[100.0; 3]);
        let strat = RsiStrategy::default_params();
        for rsi in [30.0, 50.0, 70.0] {
            let iv = make_rsi_values(rsi, 3);
            assert_eq!(
                strat.state_at(&bars, 2, &iv, None),
                Some(PositionState::Flat),
                "rsi = {rsi}"
            );
        }
    }

    #[test]
    fn undefined_while_warming_up() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_rsi_values(f64::NAN, 3);
        let strat = RsiStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 1, &iv, None), None);
    }
}
