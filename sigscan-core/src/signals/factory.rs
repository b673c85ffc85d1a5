//! Factory — converts a `StrategyConfig` into a runtime `Strategy` trait
//! object, with defaulted parameters. Configs come from TOML (run config
//! files) or from CLI flags via the same struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    AdxStrategy, BollingerStrategy, IchimokuStrategy, MaCrossStrategy, MaRsiStrategy,
    MacdStrategy, RsiStrategy, StochasticStrategy, Strategy, VwmaStrategy,
};

/// Declarative strategy selection: a registry name plus numeric parameters.
/// Missing parameters fall back to the strategy's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub strategy: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl StrategyConfig {
    pub fn bare(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            params: BTreeMap::new(),
        }
    }
}

/// Errors that can occur during strategy construction.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Extract a named f64 parameter, falling back to `default`.
fn param(config: &StrategyConfig, name: &str, default: f64) -> f64 {
    config.params.get(name).copied().unwrap_or(default)
}

/// Extract a named usize parameter, falling back to `default`.
fn param_usize(config: &StrategyConfig, name: &str, default: usize) -> usize {
    config
        .params
        .get(name)
        .copied()
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Create a strategy from a `StrategyConfig`.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy>, FactoryError> {
    match config.strategy.as_str() {
        "bollinger" => {
            let period = param_usize(config, "period", 20);
            let multiplier = param(config, "multiplier", 2.0);
            Ok(Box::new(BollingerStrategy::new(period, multiplier)))
        }
        "ma_cross" => {
            let short_window = param_usize(config, "short_window", 50);
            let long_window = param_usize(config, "long_window", 200);
            Ok(Box::new(MaCrossStrategy::new(short_window, long_window)))
        }
        "ma_rsi" => {
            let short_window = param_usize(config, "short_window", 50);
            let long_window = param_usize(config, "long_window", 200);
            let rsi_window = param_usize(config, "rsi_window", 14);
            Ok(Box::new(MaRsiStrategy::new(
                short_window,
                long_window,
                rsi_window,
            )))
        }
        "rsi" => {
            let window = param_usize(config, "window", 14);
            Ok(Box::new(RsiStrategy::new(window)))
        }
        "macd" => {
            let short_span = param_usize(config, "short_span", 12);
            let long_span = param_usize(config, "long_span", 26);
            let signal_span = param_usize(config, "signal_span", 9);
            Ok(Box::new(MacdStrategy::new(short_span, long_span, signal_span)))
        }
        "stochastic" => {
            let k_period = param_usize(config, "k_period", 14);
            let d_period = param_usize(config, "d_period", 3);
            Ok(Box::new(StochasticStrategy::new(k_period, d_period)))
        }
        "vwma" => {
            let window = param_usize(config, "window", 20);
            Ok(Box::new(VwmaStrategy::new(window)))
        }
        "ichimoku" => Ok(Box::new(IchimokuStrategy::new())),
        "adx" => {
            let window = param_usize(config, "window", 14);
            let threshold = param(config, "threshold", 25.0);
            Ok(Box::new(AdxStrategy::new(window, threshold)))
        }
        other => Err(FactoryError::UnknownStrategy(other.to_string())),
    }
}

/// All registry names, in a stable order.
pub const STRATEGY_NAMES: [&str; 9] = [
    "bollinger",
    "ma_cross",
    "ma_rsi",
    "rsi",
    "macd",
    "stochastic",
    "vwma",
    "ichimoku",
    "adx",
];

/// The full bundled suite with default parameters.
pub fn default_suite() -> Vec<Box<dyn Strategy>> {
    STRATEGY_NAMES
        .iter()
        .map(|name| {
            create_strategy(&StrategyConfig::bare(*name))
                .expect("bundled strategy names are all known")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: &str, params: &[(&str, f64)]) -> StrategyConfig {
        let mut p = BTreeMap::new();
        for &(k, v) in params {
            p.insert(k.to_string(), v);
        }
        StrategyConfig {
            strategy: strategy.to_string(),
            params: p,
        }
    }

    #[test]
    fn param_returns_value_if_present() {
        let c = config("x", &[("window", 42.0)]);
        assert_eq!(param(&c, "window", 10.0), 42.0);
    }

    #[test]
    fn param_returns_default_if_missing() {
        let c = StrategyConfig::bare("x");
        assert_eq!(param(&c, "window", 10.0), 10.0);
        assert_eq!(param_usize(&c, "window", 14), 14);
    }

    #[test]
    fn every_registry_name_constructs() {
        for name in STRATEGY_NAMES {
            let strat = create_strategy(&StrategyConfig::bare(name)).unwrap();
            assert_eq!(strat.name(), name);
        }
    }

    #[test]
    fn unknown_strategy_returns_error() {
        let result = create_strategy(&StrategyConfig::bare("bogus"));
        match result.err().unwrap() {
            FactoryError::UnknownStrategy(name) => assert_eq!(name, "bogus"),
        }
    }

    #[test]
    fn default_suite_has_all_nine() {
        let suite = default_suite();
        assert_eq!(suite.len(), 9);
        let names: Vec<&str> = suite.iter().map(|s| s.name()).collect();
        assert_eq!(names, STRATEGY_NAMES);
    }

    #[test]
    fn custom_params_are_applied() {
        let strat =
            create_strategy(&config("ma_cross", &[("short_window", 10.0), ("long_window", 30.0)]))
                .unwrap();
        // warmup = long_window - 1
        assert_eq!(strat.warmup_bars(), 29);
    }

    #[test]
    fn config_toml_roundtrip() {
        let c = config("adx", &[("window", 20.0), ("threshold", 30.0)]);
        let text = toml::to_string(&c).unwrap();
        let back: StrategyConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn config_params_default_to_empty() {
        let back: StrategyConfig = toml::from_str("strategy = \"rsi\"").unwrap();
        assert_eq!(back.strategy, "rsi");
        assert!(back.params.is_empty());
    }
}
