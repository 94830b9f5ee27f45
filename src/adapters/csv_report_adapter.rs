//! CSV report adapter.
//!
//! Exports the sweep ranking (or a single-run summary) to a CSV file,
//! creating parent directories as needed. Rows arrive already ranked and are
//! written in the given order.

use crate::domain::error::MeanrevError;
use crate::domain::metrics::RunSummary;
use crate::domain::optimizer::OptimizationResult;
use crate::domain::params::ParameterSet;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvReportAdapter {
    output_path: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn writer(&self) -> Result<csv::Writer<fs::File>, MeanrevError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        csv::Writer::from_path(&self.output_path).map_err(|e| MeanrevError::Data {
            reason: format!("failed to open {}: {}", self.output_path.display(), e),
        })
    }
}

fn write_error(path: &PathBuf, e: csv::Error) -> MeanrevError {
    MeanrevError::Data {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_run(
        &self,
        symbol: &str,
        params: &ParameterSet,
        summary: &RunSummary,
    ) -> Result<(), MeanrevError> {
        let mut wtr = self.writer()?;

        wtr.write_record([
            "symbol",
            "period",
            "z_entry",
            "z_exit",
            "sl_distance",
            "tp_distance",
            "stake",
            "initial_cash",
            "total_trades",
            "wins",
            "losses",
            "winrate",
            "max_drawdown_pct",
            "end_capital",
        ])
        .map_err(|e| write_error(&self.output_path, e))?;

        wtr.write_record([
            symbol.to_string(),
            params.period.to_string(),
            format!("{:.2}", params.z_entry),
            format!("{:.2}", params.z_exit),
            format!("{:.2}", params.sl_distance),
            format!("{:.2}", params.tp_distance),
            params.stake.to_string(),
            format!("{:.2}", params.initial_cash),
            summary.total_trades.to_string(),
            summary.wins.to_string(),
            summary.losses.to_string(),
            format!("{:.2}", summary.winrate),
            format!("{:.2}", summary.max_drawdown_pct),
            format!("{:.2}", summary.end_capital),
        ])
        .map_err(|e| write_error(&self.output_path, e))?;

        wtr.flush()?;
        Ok(())
    }

    fn write_sweep(&self, results: &[OptimizationResult]) -> Result<(), MeanrevError> {
        let mut wtr = self.writer()?;

        wtr.write_record([
            "z_entry",
            "sl_distance",
            "tp_distance",
            "total_trades",
            "winrate",
            "max_drawdown_pct",
            "end_capital",
        ])
        .map_err(|e| write_error(&self.output_path, e))?;

        for result in results {
            wtr.write_record([
                format!("{:.2}", result.z_entry),
                format!("{:.2}", result.sl_distance),
                format!("{:.2}", result.tp_distance),
                result.summary.total_trades.to_string(),
                format!("{:.2}", result.summary.winrate),
                format!("{:.2}", result.summary.max_drawdown_pct),
                format!("{:.2}", result.summary.end_capital),
            ])
            .map_err(|e| write_error(&self.output_path, e))?;
        }

        wtr.flush()?;
        Ok(())
    }
}
