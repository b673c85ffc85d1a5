//! Signal generation — maps indicator series to per-bar position states
//! and the transitions between them.
//!
//! Strategies are pure: they receive bar history, precomputed indicator
//! values and the previously emitted state, never any portfolio or account
//! state. A strategy returns `None` at any bar where a contributing
//! indicator is undefined; the undefined region propagates into the signal
//! series as NaN instead of defaulting to FLAT.

pub mod adx;
pub mod bollinger;
pub mod factory;
pub mod ichimoku;
pub mod ma_cross;
pub mod ma_rsi;
pub mod macd;
pub mod rsi;
pub mod stochastic;
pub mod vwma;

pub use adx::AdxStrategy;
pub use bollinger::BollingerStrategy;
pub use factory::{create_strategy, default_suite, FactoryError, StrategyConfig};
pub use ichimoku::IchimokuStrategy;
pub use ma_cross::MaCrossStrategy;
pub use ma_rsi::MaRsiStrategy;
pub use macd::MacdStrategy;
pub use rsi::RsiStrategy;
pub use stochastic::StochasticStrategy;
pub use vwma::VwmaStrategy;

use crate::domain::{Bar, Series};
use crate::indicators::{Indicator, IndicatorValues};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete per-bar position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Long,
    Flat,
    Short,
}

impl PositionState {
    /// Numeric encoding used in the signal series: +1, 0, -1.
    pub fn value(self) -> f64 {
        match self {
            PositionState::Long => 1.0,
            PositionState::Flat => 0.0,
            PositionState::Short => -1.0,
        }
    }

    pub fn from_value(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(PositionState::Long)
        } else if value == 0.0 {
            Some(PositionState::Flat)
        } else if value == -1.0 {
            Some(PositionState::Short)
        } else {
            None
        }
    }
}

/// Trait for signal strategies.
///
/// # Architecture invariant
/// Strategies never reference portfolio state. `state_at` receives only the
/// bar history, the precomputed indicator values and the previously emitted
/// state (so hold-until rules stay pure), and must only use data from
/// `bars[0..=bar_index]`.
pub trait Strategy: Send + Sync {
    /// Registry name (e.g. "ma_cross").
    fn name(&self) -> &str;

    /// The indicator instances this strategy reads, precomputed once per
    /// series before evaluation.
    fn indicators(&self) -> Vec<Box<dyn Indicator>>;

    /// Number of bars before the first defined state.
    fn warmup_bars(&self) -> usize;

    /// State at `bar_index`, or `None` while any contributing indicator is
    /// undefined there.
    fn state_at(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        prev: Option<PositionState>,
    ) -> Option<PositionState>;
}

/// Classified state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Buy,
    Sell,
}

/// A buy/sell event derived from consecutive signal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvent {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub from: PositionState,
    pub to: PositionState,
}

/// Full output of evaluating one strategy against one series.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: String,
    pub indicators: IndicatorValues,
    /// Per-bar state encoding (+1/0/-1), NaN where undefined.
    pub signal: Vec<f64>,
    /// First difference of the signal; NaN where either side is undefined.
    pub positions: Vec<f64>,
    pub events: Vec<TradeEvent>,
}

/// `positions[t] = signal[t] - signal[t-1]`; NaN when either side is NaN,
/// and always NaN at index 0 (no prior state).
pub fn position_transitions(signal: &[f64]) -> Vec<f64> {
    let mut positions = vec![f64::NAN; signal.len()];
    for t in 1..signal.len() {
        if signal[t].is_nan() || signal[t - 1].is_nan() {
            continue;
        }
        positions[t] = signal[t] - signal[t - 1];
    }
    positions
}

/// Classify state changes into buy/sell events.
///
/// Buy: new state is LONG and the old state was not LONG. Sell: new state
/// is SHORT and the old state was not SHORT. A direct LONG<->SHORT flip is
/// one event, classified by the new state. An undefined previous bar is
/// treated as FLAT for classification (entering from no position); index 0
/// never produces an event. Transitions into FLAT are exits, not events.
pub fn trade_events(bars: &[Bar], signal: &[f64]) -> Vec<TradeEvent> {
    debug_assert_eq!(bars.len(), signal.len());
    let mut events = Vec::new();

    for t in 1..signal.len() {
        let Some(new) = PositionState::from_value(signal[t]) else {
            continue;
        };
        let old = PositionState::from_value(signal[t - 1]).unwrap_or(PositionState::Flat);

        let kind = match new {
            PositionState::Long if old != PositionState::Long => EventKind::Buy,
            PositionState::Short if old != PositionState::Short => EventKind::Sell,
            _ => continue,
        };

        events.push(TradeEvent {
            bar_index: t,
            date: bars[t].date,
            kind,
            from: old,
            to: new,
        });
    }

    events
}

/// Precompute the strategy's indicators, evaluate the per-bar state and
/// derive transitions and events.
pub fn run_strategy(strategy: &dyn Strategy, series: &Series) -> StrategyRun {
    let bars = series.bars();

    let mut indicators = IndicatorValues::new();
    for indicator in strategy.indicators() {
        indicators.insert(indicator.name().to_string(), indicator.compute(bars));
    }

    let mut signal = vec![f64::NAN; bars.len()];
    let mut prev: Option<PositionState> = None;
    for i in 0..bars.len() {
        prev = strategy.state_at(bars, i, &indicators, prev);
        if let Some(state) = prev {
            signal[i] = state.value();
        }
    }

    let positions = position_transitions(&signal);
    let events = trade_events(bars, &signal);

    StrategyRun {
        strategy: strategy.name().to_string(),
        indicators,
        signal,
        positions,
        events,
    }
}
