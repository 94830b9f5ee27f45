//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest;
use crate::domain::bar::PriceBar;
use crate::domain::config_validation::{
    grid_axis, validate_data_config, validate_grid_config, validate_strategy_config,
};
use crate::domain::error::MeanrevError;
use crate::domain::optimizer::{self, ParameterGrid, SweepOutcome};
use crate::domain::params::ParameterSet;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "meanrev", about = "Mean-reversion backtester and optimizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Sweep the parameter grid and rank the combinations
    Optimize {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        /// Skip the CSV export of the ranked results
        #[arg(long)]
        no_csv: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored data range for a symbol
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            symbol,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest(&config, output.as_ref(), symbol.as_deref())
            }
        }
        Command::Optimize {
            config,
            output,
            symbol,
            no_csv,
        } => run_optimize(&config, output.as_ref(), symbol.as_deref(), no_csv),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = MeanrevError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Reads the `[strategy]` section into a parameter set. Every key has a
/// default, so an empty section yields [`ParameterSet::default`].
pub fn build_parameter_set(adapter: &dyn ConfigPort) -> ParameterSet {
    let defaults = ParameterSet::default();
    ParameterSet {
        period: adapter.get_int("strategy", "period", defaults.period as i64) as usize,
        z_entry: adapter.get_double("strategy", "z_entry", defaults.z_entry),
        z_exit: adapter.get_double("strategy", "z_exit", defaults.z_exit),
        sl_distance: adapter.get_double("strategy", "sl_distance", defaults.sl_distance),
        tp_distance: adapter.get_double("strategy", "tp_distance", defaults.tp_distance),
        stake: adapter.get_int("strategy", "stake", defaults.stake),
        initial_cash: adapter.get_double("strategy", "initial_cash", defaults.initial_cash),
    }
}

/// Reads the `[optimize]` axes. Absent axes fall back to the default grid;
/// present axes must already have passed [`validate_grid_config`].
pub fn build_grid(adapter: &dyn ConfigPort) -> Result<ParameterGrid, MeanrevError> {
    let defaults = ParameterGrid::default();
    Ok(ParameterGrid {
        z_entry: grid_axis(adapter, "z_entry")?.unwrap_or(defaults.z_entry),
        sl_distance: grid_axis(adapter, "sl_distance")?.unwrap_or(defaults.sl_distance),
        tp_distance: grid_axis(adapter, "tp_distance")?.unwrap_or(defaults.tp_distance),
    })
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    match symbol_override {
        Some(s) => Some(s.to_string()),
        None => config.get_string("data", "symbol"),
    }
}

/// Where the sweep results land when nothing else is configured.
pub const DEFAULT_SWEEP_OUTPUT: &str = "results/optimization_results.csv";

/// CSV destination for the sweep: `--output` wins, then `[report]
/// output_path`, then [`DEFAULT_SWEEP_OUTPUT`]. `None` when the export is
/// suppressed, either by `--no-csv` or `[report] export = false`.
pub fn resolve_sweep_output(
    output_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
    no_csv: bool,
) -> Option<PathBuf> {
    if no_csv || !config.get_bool("report", "export", true) {
        return None;
    }
    if let Some(path) = output_override {
        return Some(path.clone());
    }
    let configured = config
        .get_string("report", "output_path")
        .unwrap_or_else(|| DEFAULT_SWEEP_OUTPUT.to_string());
    Some(PathBuf::from(configured))
}

fn resolve_dates(config: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), MeanrevError> {
    let start = required_date(config, "start_date")?;
    let end = required_date(config, "end_date")?;
    Ok((start, end))
}

fn required_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, MeanrevError> {
    let raw = config
        .get_string("data", key)
        .ok_or_else(|| MeanrevError::ConfigMissing {
            section: "data".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| MeanrevError::ConfigInvalid {
        section: "data".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

/// Stages shared by `backtest` and `optimize`: config load, validation,
/// symbol/date resolution, and the bar fetch. Every config check runs before
/// any data is touched, so a bad `[optimize]` axis fails ahead of the fetch.
fn load_pipeline_inputs(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    validate_grid: bool,
) -> Result<(FileConfigAdapter, String, Vec<PriceBar>), ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    if validate_grid {
        if let Err(e) = validate_grid_config(&adapter) {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    }

    let symbol = match resolve_symbol(symbol_override, &adapter) {
        Some(s) => s,
        None => {
            eprintln!("error: no symbol configured");
            return Err(ExitCode::from(2));
        }
    };

    let (start_date, end_date) = match resolve_dates(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    let data_path = adapter
        .get_string("data", "path")
        .expect("validated above");
    let data_port = CsvDataAdapter::new(PathBuf::from(data_path));

    eprintln!("Fetching {} bars from {} to {}", symbol, start_date, end_date);
    let bars = match data_port.fetch_bars(&symbol, start_date, end_date) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };
    eprintln!("Loaded {} bars", bars.len());

    Ok((adapter, symbol, bars))
}

fn run_backtest(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    symbol_override: Option<&str>,
) -> ExitCode {
    let (adapter, symbol, bars) = match load_pipeline_inputs(config_path, symbol_override, false)
    {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let params = build_parameter_set(&adapter);

    let summary = match backtest::run_backtest(&bars, &params) {
        Ok(s) => s,
        Err(e) => {
            let err = MeanrevError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let report = TextReportAdapter::new();
    if let Err(e) = report.write_run(&symbol, &params, &summary) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    if let Some(path) = output_path {
        let csv_report = CsvReportAdapter::new(path.clone());
        if let Err(e) = csv_report.write_run(&symbol, &params, &summary) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Summary written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_optimize(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    symbol_override: Option<&str>,
    no_csv: bool,
) -> ExitCode {
    let (adapter, symbol, bars) = match load_pipeline_inputs(config_path, symbol_override, true) {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let base = build_parameter_set(&adapter);
    let grid = match build_grid(&adapter) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Sweeping {} combinations for {}",
        grid.combination_count(),
        symbol
    );
    let outcome = optimizer::run_grid(&bars, &base, &grid);
    report_sweep_failures(&outcome);

    if outcome.results.is_empty() && !outcome.failures.is_empty() {
        eprintln!("error: every parameter combination failed");
        return ExitCode::from(4);
    }

    let report = TextReportAdapter::new();
    if let Err(e) = report.write_sweep(&outcome.results) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    if let Some(path) = resolve_sweep_output(output_path, &adapter, no_csv) {
        let csv_report = CsvReportAdapter::new(path.clone());
        if let Err(e) = csv_report.write_sweep(&outcome.results) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Results written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn report_sweep_failures(outcome: &SweepOutcome) {
    for failure in &outcome.failures {
        eprintln!(
            "warning: combination z_entry={} sl_distance={} tp_distance={} failed: {}",
            failure.z_entry, failure.sl_distance, failure.tp_distance, failure.reason
        );
    }
}

fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Dry run: validating {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_grid_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = build_parameter_set(&adapter);
    eprintln!("Symbol:       {}", adapter.get_string("data", "symbol").unwrap_or_default());
    eprintln!("Period:       {}", params.period);
    eprintln!("Z-Entry:      {:.2}", params.z_entry);
    eprintln!("Z-Exit:       {:.2}", params.z_exit);
    eprintln!("SL Distance:  {:.2}", params.sl_distance);
    eprintln!("TP Distance:  {:.2}", params.tp_distance);
    eprintln!("Stake:        {}", params.stake);
    eprintln!("Initial Cash: {:.2}", params.initial_cash);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_grid_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_path = match config.get_string("data", "path") {
        Some(p) => p,
        None => {
            let err = MeanrevError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            };
            eprintln!("error: {err}");
            return ExitCode::from(&err);
        }
    };

    let adapter = CsvDataAdapter::new(PathBuf::from(data_path));
    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let symbol = match resolve_symbol(symbol_override, &config) {
        Some(s) => s,
        None => {
            eprintln!("error: no symbol configured");
            return ExitCode::from(2);
        }
    };

    let data_path = match config.get_string("data", "path") {
        Some(p) => p,
        None => {
            let err = MeanrevError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            };
            eprintln!("error: {err}");
            return ExitCode::from(&err);
        }
    };

    let adapter = CsvDataAdapter::new(PathBuf::from(data_path));
    match adapter.data_range(&symbol) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars from {} to {}", symbol, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("No data stored for {}", symbol);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
