//! Stochastic %K/%D strategy.
//!
//! %K above %D in the oversold zone (< 20) is LONG; %K below %D in the
//! overbought zone (> 80) is SHORT; FLAT otherwise. The zone test applies
//! to %K only.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Stochastic};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct StochasticStrategy {
    pub k_period: usize,
    pub d_period: usize,
    k_key: String,
    d_key: String,
}

impl StochasticStrategy {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1, "k_period must be >= 1");
        assert!(d_period >= 1, "d_period must be >= 1");
        Self {
            k_period,
            d_period,
            k_key: format!("stoch_k_{k_period}"),
            d_key: format!("stoch_d_{k_period}_{d_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 3)
    }
}

impl Strategy for StochasticStrategy {
    fn name(&self) -> &str {
        "stochastic"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Stochastic::percent_k(self.k_period)),
            Box::new(Stochastic::percent_d(self.k_period, self.d_period)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        self.k_period + self.d_period - 2
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let k = indicators.get(&self.k_key, bar_index)?;
        let d = indicators.get(&self.d_key, bar_index)?;
        if k.is_nan() || d.is_nan() {
            return None;
        }

        if k > d && k < 20.0 {
            Some(PositionState::Long)
        } else if k < d && k > 80.0 {
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

    fn make_stoch_values(k: f64, d: f64, n: usize) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("stoch_k_14", vec![k; n]);
        iv.insert("stoch_d_14_3", vec![d; n]);
        iv
    }

    #[test]
    fn long_when_k_over_d_in_oversold_zone() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_stoch_values(15.0, 10.0, 3);
        let strat = StochasticStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Long));
    }

    #[test]
    fn short_when_k_under_d_in_overbought_zone() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_stoch_values(85.0, 90.0, 3);
        let strat = StochasticStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Short));
    }

    #[test]
    fn flat_outside_the_zones() {
        let bars = make_bars(&[100.0; 3]);
        let strat = StochasticStrategy::default_params();
        // Cross without the zone.
        let iv = make_stoch_values(55.0, 50.0, 3);
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
        // Zone without the cross.
        let iv = make_stoch_values(15.0, 18.0, 3);
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
    }

    #[test]
    fn undefined_on_flat_range_nan() {
        let bars = make_bars(&[100.0; 3]);
        let iv = make_stoch_values(f64::NAN, 50.0, 3);
        let strat = StochasticStrategy::default_params();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), None);
    }

    #[test]
    fn warmup_spans_both_windows() {
        assert_eq!(StochasticStrategy::default_params().warmup_bars(), 15);
    }
}
