//! sigscan core — indicator and signal computation over OHLCV series.
//!
//! This crate contains the analysis pipeline:
//! - Domain types (bars, validated series)
//! - Indicator engine (pure series-to-series transforms, NaN for undefined)
//! - Signal strategies (per-bar LONG/FLAT/SHORT states, transitions, events)
//! - Market data providers (Yahoo Finance, deterministic synthetic)
//! - Ticker universe files and the sequential analysis engine

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;
