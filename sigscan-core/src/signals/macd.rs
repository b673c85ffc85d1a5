//! MACD line-versus-signal strategy: LONG while the MACD line is above
//! its signal line, FLAT otherwise.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues, Macd};

use super::{PositionState, Strategy};

#[derive(Debug, Clone)]
pub struct MacdStrategy {
    pub short_span: usize,
    pub long_span: usize,
    pub signal_span: usize,
    line_key: String,
    signal_key: String,
}

impl MacdStrategy {
    pub fn new(short_span: usize, long_span: usize, signal_span: usize) -> Self {
        assert!(short_span >= 1, "short_span must be >= 1");
        assert!(long_span > short_span, "long_span must be > short_span");
        assert!(signal_span >= 1, "signal_span must be >= 1");
        Self {
            short_span,
            long_span,
            signal_span,
            line_key: format!("macd_{short_span}_{long_span}"),
            signal_key: format!("macd_signal_{short_span}_{long_span}_{signal_span}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Strategy for MacdStrategy {
    fn name(&self) -> &str {
        "macd"
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Macd::line(self.short_span, self.long_span)),
            Box::new(Macd::signal(self.short_span, self.long_span, self.signal_span)),
        ]
    }

    fn warmup_bars(&self) -> usize {
        0
    }

    fn state_at(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        _prev: Option<PositionState>,
    ) -> Option<PositionState> {
        let line = indicators.get(&self.line_key, bar_index)?;
        let signal = indicators.get(&self.signal_key, bar_index)?;
        if line.is_nan() || signal.is_nan() {
            return None;
        }

        if line > signal {
            Some(PositionState::Long)
        } else {
            Some(PositionState::Flat)
        }
    }
}
