//! Bollinger band mean-reversion strategy.
//!
//! Close above the upper band is treated as overbought (SHORT), close
//! below the lower band as oversold (LONG). Any bar without a band
//! crossing resets to FLAT — the state is re-derived per bar, never held.

use crate::domain::Bar;
use crate::indicators::{Bollinger, Indicator, IndicatorValues};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct BollingerStrategy {
    pub period: usize,
    pub multiplier: f64,
    upper_key: String,
    lower_key: String,
}

impl BollingerStrategy {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 2, "period must be >= 2");
        Self {
            period,
            multiplier,
            upper_key: format!("bollinger_upper_{period}"),
            lower_key: format!("bollinger_lower_{period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(20, 2.0)
    }
}

impl Strategy for BollingerStrategy {
    fn name(&self) -> &str {
        "bollinger"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Bollinger::upper(self.period, self.multiplier)),
            Box::new(Bollinger::middle(self.period, self.multiplier)),
            Box::new(Bollinger::lower(self.period, self.multiplier)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        self.period - 1
    }

    fn state_at(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let close = bars[bar_index].close;
        let upper = indicators.get(&self.upper_key, bar_index)?;
        let lower = indicators.get(&self.lower_key, bar_index)?;
        if close.is_nan() || upper.is_nan() || lower.is_nan() {
            return None;
        }

        if close > upper {
            Some(PositionState::Short)
        } else if close < lower {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}
