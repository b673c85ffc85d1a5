//! Property tests for indicator and signal invariants.
//!
//! Uses proptest to verify:
//! 1. RSI bounds — 0 <= RSI <= 100 wherever defined
//! 2. Stochastic %K bounds — within [0, 100] when the range is nonzero
//! 3. Constant series — SMA = C, stddev = 0, Bollinger bands collapse
//! 4. Telescoping — transitions sum to the net signal change
//! 5. Idempotence — recomputation is bit-identical

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use sigscan_core::domain::Bar;
use sigscan_core::indicators::{Bollinger, Indicator, Rsi, Sma, StdDev, Stochastic};
use sigscan_core::signals::position_transitions;

// ── Strategies (proptest) ────────────────────────────────────────────

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base + Duration::days(i as i64),
            open: close,
            high: close * 1.02,
            low: close * 0.98,
            close,
            volume: 5_000,
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..1000.0_f64, 1..120)
}

fn arb_signal() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![Just(-1.0), Just(0.0), Just(1.0), Just(f64::NAN)],
        2..80,
    )
}

// ── 1. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(closes in arb_closes(), window in 1usize..20) {
        let bars = bars_from_closes(&closes);
        let rsi = Rsi::new(window).compute(&bars);
        prop_assert_eq!(rsi.len(), bars.len());
        for (i, &v) in rsi.iter().enumerate() {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0).contains(&v), "RSI {} at bar {}", v, i);
            }
        }
    }
}

// ── 2. Stochastic %K bounds ──────────────────────────────────────────

proptest! {
    #[test]
    fn percent_k_is_bounded(closes in arb_closes(), window in 1usize..20) {
        let bars = bars_from_closes(&closes);
        let k = Stochastic::percent_k(window).compute(&bars);
        for (i, &v) in k.iter().enumerate() {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0).contains(&v), "%K {} at bar {}", v, i);
            }
        }
    }
}

// ── 3. Constant series ───────────────────────────────────────────────

proptest! {
    #[test]
    fn constant_series_collapses(
        price in 10.0..1000.0_f64,
        n in 10usize..60,
        window in 2usize..10,
    ) {
        let bars = bars_from_closes(&vec![price; n]);

        let sma = Sma::new(window).compute(&bars);
        let stddev = StdDev::new(window).compute(&bars);
        let upper = Bollinger::upper(window, 2.0).compute(&bars);
        let lower = Bollinger::lower(window, 2.0).compute(&bars);

        for i in (window - 1)..n {
            prop_assert!((sma[i] - price).abs() < 1e-9);
            prop_assert!(stddev[i].abs() < 1e-9);
            prop_assert!((upper[i] - lower[i]).abs() < 1e-9);
            prop_assert!((upper[i] - price).abs() < 1e-9);
        }
    }
}

// ── 4. Telescoping transitions ───────────────────────────────────────

proptest! {
    /// Over any fully defined signal stretch, the transition sum equals the
    /// net signal change exactly (values are small integers, so float
    /// addition is exact).
    #[test]
    fn transitions_telescope(signal in arb_signal()) {
        let positions = position_transitions(&signal);
        prop_assert!(positions[0].is_nan());

        // Find the longest defined suffix and check it telescopes.
        let mut start = None;
        for (i, &v) in signal.iter().enumerate() {
            if v.is_nan() {
                start = None;
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(first) = start {
            let last = signal.len() - 1;
            let sum: f64 = positions[first + 1..=last].iter().sum();
            prop_assert_eq!(sum, signal[last] - signal[first]);
        }
    }
}

// ── 5. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn recomputation_is_bit_identical(closes in arb_closes(), window in 1usize..20) {
        let bars = bars_from_closes(&closes);
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(window)),
            Box::new(Rsi::new(window)),
            Box::new(Stochastic::percent_k(window)),
        ];
        for indicator in &indicators {
            let a = indicator.compute(&bars);
            let b = indicator.compute(&bars);
            for (x, y) in a.iter().zip(b.iter()) {
                prop_assert_eq!(x.to_bits(), y.to_bits(), "{}", indicator.name());
            }
        }
    }
}
