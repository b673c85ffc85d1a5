//! sigscan CLI — universe setup, strategy listing, and analysis runs.
//!
//! Commands:
//! - `init` — write the default ticker list and name-lookup files
//! - `strategies` — list available strategy names and default parameters
//! - `analyze` — run the strategy suite over a ticker universe and write
//!   per-ticker CSV artifacts plus a run summary JSON

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sigscan_core::data::{
    MarketDataProvider, StdoutProgress, SyntheticProvider, Universe, YahooProvider,
};
use sigscan_core::engine::{analyze_universe, RunSummary, TickerAnalysis};
use sigscan_core::signals::{
    create_strategy, default_suite, factory::STRATEGY_NAMES, EventKind, PositionState, Strategy,
    StrategyConfig, StrategyRun,
};

#[derive(Parser)]
#[command(
    name = "sigscan",
    about = "sigscan CLI — indicator and signal analysis over OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default ticker list and name-lookup files.
    Init {
        /// Directory to write tickers.txt and names.toml into.
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing files.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// List available strategy names and their default parameters.
    Strategies,
    /// Run strategies over a ticker universe and write artifacts.
    Analyze {
        /// Ticker list file, one ticker per line.
        #[arg(long, default_value = "tickers.txt")]
        tickers: PathBuf,

        /// Ticker-to-name lookup TOML. Missing file means bare tickers.
        #[arg(long, default_value = "names.toml")]
        names: PathBuf,

        /// Start date (YYYY-MM-DD). Defaults to 2020-01-01.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Strategy to run, repeatable (e.g. --strategy ma_cross --strategy rsi).
        /// Defaults to the full bundled suite.
        #[arg(long = "strategy")]
        strategies: Vec<String>,

        /// TOML config file with [[strategies]] entries (name + params).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data provider.
        #[arg(long, value_enum, default_value_t = ProviderKind::Yahoo)]
        provider: ProviderKind,

        /// Base seed for the synthetic provider.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory for CSV artifacts and the run summary.
        #[arg(long, default_value = "results")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Yahoo,
    Synthetic,
}

/// TOML run config: a list of strategy selections.
#[derive(Debug, Deserialize)]
struct RunConfig {
    strategies: Vec<StrategyConfig>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => run_init(&dir, force),
        Commands::Strategies => {
            run_strategies();
            Ok(())
        }
        Commands::Analyze {
            tickers,
            names,
            start,
            end,
            strategies,
            config,
            provider,
            seed,
            out,
        } => run_analyze(
            &tickers, &names, start, end, strategies, config, provider, seed, &out,
        ),
    }
}

fn run_init(dir: &Path, force: bool) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create directory {}", dir.display()))?;

    let tickers_path = dir.join("tickers.txt");
    let names_path = dir.join("names.toml");

    if !force {
        for path in [&tickers_path, &names_path] {
            if path.exists() {
                bail!("{} already exists (pass --force to overwrite)", path.display());
            }
        }
    }

    let universe = Universe::default_universe();
    Universe::save_tickers(&tickers_path, &universe.tickers)
        .with_context(|| format!("write {}", tickers_path.display()))?;
    Universe::save_names(&names_path, &universe.names).map_err(anyhow::Error::msg)?;

    println!("Wrote {} ({} tickers)", tickers_path.display(), universe.len());
    println!("Wrote {}", names_path.display());
    Ok(())
}

fn run_strategies() {
    println!("{:<12} Default parameters", "Strategy");
    println!("{}", "-".repeat(52));
    for name in STRATEGY_NAMES {
        let params = match name {
            "bollinger" => "period=20, multiplier=2.0",
            "ma_cross" => "short_window=50, long_window=200",
            "ma_rsi" => "short_window=50, long_window=200, rsi_window=14",
            "rsi" => "window=14",
            "macd" => "short_span=12, long_span=26, signal_span=9",
            "stochastic" => "k_period=14, d_period=3",
            "vwma" => "window=20",
            "ichimoku" => "(none)",
            "adx" => "window=14, threshold=25.0",
            _ => unreachable!(),
        };
        println!("{name:<12} {params}");
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    tickers_path: &Path,
    names_path: &Path,
    start: Option<String>,
    end: Option<String>,
    strategy_flags: Vec<String>,
    config_path: Option<PathBuf>,
    provider_kind: ProviderKind,
    seed: u64,
    out: &Path,
) -> Result<()> {
    if config_path.is_some() && !strategy_flags.is_empty() {
        bail!("--config and --strategy are mutually exclusive");
    }

    let start_date = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date")?
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    if end_date < start_date {
        bail!("end date {end_date} is before start date {start_date}");
    }

    // Universe
    let tickers = Universe::load_tickers(tickers_path)
        .with_context(|| format!("read ticker list {}", tickers_path.display()))?;
    if tickers.is_empty() {
        bail!("ticker list {} is empty", tickers_path.display());
    }
    let names = if names_path.exists() {
        Universe::load_names(names_path).map_err(anyhow::Error::msg)?
    } else {
        Default::default()
    };
    let universe = Universe::new(tickers, names);

    // Strategies
    let strategies = build_strategies(&strategy_flags, config_path.as_deref())?;

    // Provider
    let yahoo;
    let synthetic;
    let provider: &dyn MarketDataProvider = match provider_kind {
        ProviderKind::Yahoo => {
            yahoo = YahooProvider::new();
            &yahoo
        }
        ProviderKind::Synthetic => {
            synthetic = SyntheticProvider::new(seed);
            &synthetic
        }
    };

    let summary = analyze_universe(
        provider,
        &universe,
        start_date,
        end_date,
        &strategies,
        &StdoutProgress,
    );

    write_artifacts(&summary, out)?;
    println!("Artifacts saved to: {}", out.display());

    if summary.succeeded() == 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn build_strategies(
    flags: &[String],
    config_path: Option<&Path>,
) -> Result<Vec<Box<dyn Strategy>>> {
    let configs: Vec<StrategyConfig> = if let Some(path) = config_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let run_config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        if run_config.strategies.is_empty() {
            bail!("config {} selects no strategies", path.display());
        }
        run_config.strategies
    } else if !flags.is_empty() {
        flags
            .iter()
            .map(|name| StrategyConfig::bare(name.as_str()))
            .collect()
    } else {
        return Ok(default_suite());
    };

    configs
        .iter()
        .map(|config| {
            create_strategy(config).with_context(|| {
                format!(
                    "valid strategies: {}",
                    STRATEGY_NAMES.join(", ")
                )
            })
        })
        .collect()
}

// ── Artifacts ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Summary {
    total: usize,
    succeeded: usize,
    failed: usize,
    start: String,
    end: String,
    tickers: Vec<TickerSummary>,
    failures: Vec<FailureSummary>,
}

#[derive(Serialize)]
struct TickerSummary {
    ticker: String,
    name: String,
    bars: usize,
    strategies: usize,
    events: usize,
}

#[derive(Serialize)]
struct FailureSummary {
    ticker: String,
    error: String,
}

fn write_artifacts(summary: &RunSummary, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("create output directory {}", out.display()))?;

    for analysis in &summary.analyses {
        let ticker_dir = out.join(&analysis.ticker);
        std::fs::create_dir_all(&ticker_dir)
            .with_context(|| format!("create {}", ticker_dir.display()))?;

        for run in &analysis.runs {
            let path = ticker_dir.join(format!("{}.csv", run.strategy));
            write_run_csv(&path, analysis, run)?;
        }
        write_events_csv(&ticker_dir.join("events.csv"), analysis)?;
    }

    write_summary_json(&out.join("summary.json"), summary)?;
    Ok(())
}

/// Per-strategy series CSV: date, OHLCV, every indicator column (sorted by
/// name), then signal and position transition. NaN cells are left empty.
fn write_run_csv(path: &Path, analysis: &TickerAnalysis, run: &StrategyRun) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;

    let indicator_names = run.indicators.names();

    let mut header = vec!["date", "open", "high", "low", "close", "volume"];
    header.extend(indicator_names.iter().copied());
    header.push("signal");
    header.push("position");
    writer.write_record(&header)?;

    for (i, bar) in analysis.series.bars().iter().enumerate() {
        let mut record = vec![
            bar.date.to_string(),
            format_cell(bar.open),
            format_cell(bar.high),
            format_cell(bar.low),
            format_cell(bar.close),
            bar.volume.to_string(),
        ];
        for name in &indicator_names {
            let value = run.indicators.get(name, i).unwrap_or(f64::NAN);
            record.push(format_cell(value));
        }
        record.push(format_cell(run.signal[i]));
        record.push(format_cell(run.positions[i]));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// All buy/sell events for a ticker, across every strategy run.
fn write_events_csv(path: &Path, analysis: &TickerAnalysis) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;

    writer.write_record(["strategy", "date", "bar_index", "kind", "from", "to"])?;
    for run in &analysis.runs {
        for event in &run.events {
            let date = event.date.to_string();
            let bar_index = event.bar_index.to_string();
            writer.write_record([
                run.strategy.as_str(),
                date.as_str(),
                bar_index.as_str(),
                match event.kind {
                    EventKind::Buy => "buy",
                    EventKind::Sell => "sell",
                },
                state_label(event.from),
                state_label(event.to),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let tickers = summary
        .analyses
        .iter()
        .map(|analysis| TickerSummary {
            ticker: analysis.ticker.clone(),
            name: analysis.display_name.clone(),
            bars: analysis.series.len(),
            strategies: analysis.runs.len(),
            events: analysis.runs.iter().map(|run| run.events.len()).sum(),
        })
        .collect();

    let failures = summary
        .failures
        .iter()
        .map(|(ticker, error)| FailureSummary {
            ticker: ticker.clone(),
            error: error.to_string(),
        })
        .collect();

    let (start, end) = date_span(summary);
    let doc = Summary {
        total: summary.total(),
        succeeded: summary.succeeded(),
        failed: summary.failed(),
        start,
        end,
        tickers,
        failures,
    };

    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Actual date span covered by the fetched series (providers may return
/// fewer days than requested).
fn date_span(summary: &RunSummary) -> (String, String) {
    let starts = summary
        .analyses
        .iter()
        .filter_map(|a| a.series.bars().first().map(|b| b.date));
    let ends = summary
        .analyses
        .iter()
        .filter_map(|a| a.series.bars().last().map(|b| b.date));

    (
        starts.min().map(|d| d.to_string()).unwrap_or_default(),
        ends.max().map(|d| d.to_string()).unwrap_or_default(),
    )
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn state_label(state: PositionState) -> &'static str {
    match state {
        PositionState::Long => "LONG",
        PositionState::Flat => "FLAT",
        PositionState::Short => "SHORT",
    }
}
