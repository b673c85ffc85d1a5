//! Ticker universe — the flat-text ticker list and the TOML ticker→name
//! lookup table. The core never hard-codes tickers into a computation; the
//! CLI decides which files to read and hands the result here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Tickers under analysis plus their display names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Universe {
    pub tickers: Vec<String>,
    /// Ticker to display name. Missing entries fall back to the ticker.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl Universe {
    /// Load the ticker list from a flat-text file, one ticker per line.
    /// Blank lines and `#` comments are skipped.
    pub fn load_tickers(path: &Path) -> io::Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect())
    }

    /// Write the ticker list, one per line.
    pub fn save_tickers(path: &Path, tickers: &[String]) -> io::Result<()> {
        let mut content = tickers.join("\n");
        content.push('\n');
        std::fs::write(path, content)
    }

    /// Load the name-lookup table from a TOML file.
    pub fn load_names(path: &Path) -> Result<BTreeMap<String, String>, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read names file: {e}"))?;
        let table: NameTable =
            toml::from_str(&content).map_err(|e| format!("parse names TOML: {e}"))?;
        Ok(table.names)
    }

    /// Write the name-lookup table as TOML.
    pub fn save_names(path: &Path, names: &BTreeMap<String, String>) -> Result<(), String> {
        let table = NameTable {
            names: names.clone(),
        };
        let content =
            toml::to_string_pretty(&table).map_err(|e| format!("serialize names: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("write names file: {e}"))
    }

    /// Assemble a universe from loaded parts.
    pub fn new(tickers: Vec<String>, names: BTreeMap<String, String>) -> Self {
        Self { tickers, names }
    }

    /// Display name for a ticker, falling back to the ticker itself.
    pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
        self.names.get(ticker).map(String::as_str).unwrap_or(ticker)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Built-in default universe: a mix of KRX and US large caps.
    pub fn default_universe() -> Self {
        let entries = [
            ("000270.KS", "Kia Corporation"),
            ("AAPL", "Apple Inc."),
            ("MSFT", "Microsoft Corporation"),
            ("GOOG", "Alphabet Inc."),
            ("AMZN", "Amazon.com Inc."),
            ("005930.KS", "Samsung Electronics"),
            ("000660.KS", "SK Hynix"),
            ("011200.KS", "HMM"),
            ("012330.KS", "Hyundai Mobis"),
        ];

        let tickers = entries.iter().map(|(t, _)| t.to_string()).collect();
        let names = entries
            .iter()
            .map(|(t, n)| (t.to_string(), n.to_string()))
            .collect();

        Self { tickers, names }
    }
}

/// Wrapper so the TOML file has a `[names]` table rather than a bare map.
#[derive(Debug, Serialize, Deserialize)]
struct NameTable {
    names: BTreeMap<String, String>,
}
