//! ADX trend-strength strategy.
//!
//! Takes a direction only when the trend is strong enough: +DI above -DI
//! with ADX over the threshold is LONG, -DI above +DI with ADX over the
//! threshold is SHORT, FLAT otherwise (including weak-trend bars).

use crate::domain::Bar;
use crate::indicators::{Adx, Indicator, IndicatorValues};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct AdxStrategy {
    pub window: usize,
    pub threshold: f64,
    plus_key: String,
    minus_key: String,
    adx_key: String,
}

impl AdxStrategy {
    pub fn new(window: usize, threshold: f64) -> Self {
        assert!(window >= 1, "window must be >= 1");
        assert!(threshold > 0.0, "threshold must be positive");
        Self {
            window,
            threshold,
            plus_key: format!("plus_di_{window}"),
            minus_key: format!("minus_di_{window}"),
            adx_key: format!("adx_{window}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 25.0)
    }
}

impl Strategy for AdxStrategy {
    fn name(&self) -> &str {
        "adx"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Adx::plus_di(self.window)),
            Box::new(Adx::minus_di(self.window)),
            Box::new(Adx::adx(self.window)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        2 * self.window - 1
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let plus = indicators.get(&self.plus_key, bar_index)?;
        let minus = indicators.get(&self.minus_key, bar_index)?;
        let adx = indicators.get(&self.adx_key, bar_index)?;
        if plus.is_nan() || minus.is_nan() || adx.is_nan() {
            return None;
        }

        if plus > minus && adx > self.threshold {
            Some(PositionState::Long)
        } else if plus < minus && adx > self.threshold {
            Some(PositionState::Short)
        } else {
            Some(PositionState::Flat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn make_values(plus: f64, minus: f64, adx: f64, n: usize) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("plus_di_14", vec![plus; n]);
        iv.insert("minus_di_14", vec![minus; n]);
        iv.insert("adx_14", vec![adx; n]);
        iv
    }

    #[test]
    fn long_on_strong_uptrend() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_values(30.0, 10.0, 40.0, 3);
        let strat = AdxStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Long));
    }

    #[test]
    fn short_on_strong_downtrend() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_values(10.0, 30.0, 40.0, 3);
        let strat = AdxStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Short));
    }

    #[test]
    fn flat_when_trend_is_weak() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_values(30.0, 10.0, 20.0, 3);
        let strat = AdxStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
    }

    #[test]
    fn flat_on_di_tie_even_with_strong_adx() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_values(20.0, 20.0, 40.0, 3);
        let strat = AdxStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
    }

    #[test]
    fn undefined_while_adx_warming_up() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_values(30.0, 10.0, f64::NAN, 3);
        let strat = AdxStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), None);
    }

    #[test]
    fn warmup_covers_double_smoothing() {
        assert_eq!(AdxStrategy::default_params().warmup_bars(), 27);
    }
}
