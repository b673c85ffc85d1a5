//! Ichimoku trend strategy.
//!
//! LONG when the conversion line is above the base line and the close sits
//! above both leading spans (price above the cloud), FLAT otherwise. The
//! lagging span is not consumed here; it looks into the future and exists
//! for the report artifacts only.

use crate::domain::Bar;
use crate::indicators::{Ichimoku, Indicator, IndicatorValues};

use super::{PositionState, Strategy};

#[derive(Debug, Clone, Default)]
pub struct IchimokuStrategy;

impl IchimokuStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for IchimokuStrategy {
    fn name(&self) -> &str {
        "ichimoku"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Ichimoku::conversion()),
            Box::new(Ichimoku::base()),
            Box::new(Ichimoku::leading_span_a()),
            Box::new(Ichimoku::leading_span_b()),
            Box::new(Ichimoku::lagging_span()),
        ]
    }

    fn warmup_bars(&self) -> usize {
        // Governed by span B: midpoint(52) shifted forward 26.
        Ichimoku::leading_span_b().lookback()
    }

    fn state_at(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let close = bars[bar_index].close;
        let conversion = indicators.get("ichimoku_conversion", bar_index)?;
        let base = indicators.get("ichimoku_base", bar_index)?;
        let span_a = indicators.get("ichimoku_span_a", bar_index)?;
        let span_b = indicators.get("ichimoku_span_b", bar_index)?;
        if close.is_nan()
            || conversion.is_nan()
            || base.is_nan()
            || span_a.is_nan()
            || span_b.is_nan()
        {
            return None;
        }

        if conversion > base && close > span_a && close > span_b {
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

    fn make_values(conversion: f64, base: f64, span_a: f64, span_b: f64, n: usize) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("ichimoku_conversion", vec![conversion; n]);
        iv.insert("ichimoku_base", vec![base; n]);
        iv.insert("ichimoku_span_a", vec![span_a; n]);
        iv.insert("ichimoku_span_b", vec![span_b; n]);
        iv
    }

    #[test]
    fn long_above_cloud_with_bullish_cross() {
        let bars = make_bars(&[110.0; 3]);
        let iv = make_values(108.0, 105.0, 100.0, 102.0, 3);
        let strat = IchimokuStrategy::new();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Long));
    }

    #[test]
    fn flat_when_close_inside_cloud() {
        // Close above span A but below span B.
        let bars = make_bars(&[101.0; 3]);
        let iv = make_values(108.0, 105.0, 100.0, 102.0, 3);
        let strat = IchimokuStrategy::new();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
    }

    #[test]
    fn flat_without_conversion_over_base() {
        let bars = make_bars(&[110.0; 3]);
        let iv = make_values(104.0, 105.0, 100.0, 102.0, 3);
        let strat = IchimokuStrategy::new();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), Some(PositionState::Flat));
    }

    #[test]
    fn undefined_while_spans_warming_up() {
        let bars = make_bars(&[110.0; 3]);
        let iv = make_values(108.0, 105.0, f64::NAN, 102.0, 3);
        let strat = IchimokuStrategy::new();
        assert_eq!(strat.state_at(&bars, 2, &iv, None), None);
    }

    #[test]
    fn warmup_governed_by_span_b() {
        assert_eq!(IchimokuStrategy::new().warmup_bars(), 77);
    }
}
