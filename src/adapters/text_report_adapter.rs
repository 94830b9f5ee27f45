//! Console report adapter.
//!
//! Formats runs and sweeps as plain text and prints them to stdout; the
//! formatting functions are separate so tests can assert on the exact text.

use crate::domain::error::MeanrevError;
use crate::domain::metrics::RunSummary;
use crate::domain::optimizer::OptimizationResult;
use crate::domain::params::ParameterSet;
use crate::ports::report_port::ReportPort;

const SWEEP_HEADERS: [&str; 7] = [
    "z_entry",
    "sl_distance",
    "tp_distance",
    "total_trades",
    "winrate",
    "max_drawdown_pct",
    "end_capital",
];

#[derive(Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for TextReportAdapter {
    fn write_run(
        &self,
        symbol: &str,
        params: &ParameterSet,
        summary: &RunSummary,
    ) -> Result<(), MeanrevError> {
        print!("{}", format_run_summary(symbol, params, summary));
        Ok(())
    }

    fn write_sweep(&self, results: &[OptimizationResult]) -> Result<(), MeanrevError> {
        print!("{}", format_sweep_table(results));
        Ok(())
    }
}

pub fn format_run_summary(
    symbol: &str,
    params: &ParameterSet,
    summary: &RunSummary,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Backtest Summary: {} ===\n", symbol));
    out.push_str(&format!("Period:        {}\n", params.period));
    out.push_str(&format!("Z-Entry:       {:.2}\n", params.z_entry));
    out.push_str(&format!("Z-Exit:        {:.2}\n", params.z_exit));
    out.push_str(&format!("SL Distance:   {:.2}\n", params.sl_distance));
    out.push_str(&format!("TP Distance:   {:.2}\n", params.tp_distance));
    out.push_str(&format!("Stake:         {}\n", params.stake));
    out.push_str(&format!("Initial Cash:  {:.2}\n", params.initial_cash));
    out.push_str(&format!(
        "Trades:        {} ({} won, {} lost)\n",
        summary.total_trades, summary.wins, summary.losses
    ));
    out.push_str(&format!("Win Rate:      {:.2}%\n", summary.winrate));
    out.push_str(&format!("Max Drawdown:  {:.2}%\n", summary.max_drawdown_pct));
    out.push_str(&format!("End Capital:   {:.2}\n", summary.end_capital));
    out
}

/// Right-aligned column table, one row per ranked combination. Column widths
/// grow to the widest cell so every separator lines up.
pub fn format_sweep_table(results: &[OptimizationResult]) -> String {
    if results.is_empty() {
        return "no successful parameter combinations\n".to_string();
    }

    let rows: Vec<[String; 7]> = results.iter().map(sweep_row).collect();

    let mut widths: [usize; 7] = SWEEP_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();

    let header: Vec<String> = SWEEP_HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:>width$}", h, width = w))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:>width$}", cell, width = w))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    out
}

fn sweep_row(result: &OptimizationResult) -> [String; 7] {
    [
        format!("{:.2}", result.z_entry),
        format!("{:.2}", result.sl_distance),
        format!("{:.2}", result.tp_distance),
        result.summary.total_trades.to_string(),
        format!("{:.2}", result.summary.winrate),
        format!("{:.2}", result.summary.max_drawdown_pct),
        format!("{:.2}", result.summary.end_capital),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary(end_capital: f64) -> RunSummary {
        RunSummary {
            total_trades: 3,
            wins: 2,
            losses: 1,
            winrate: 66.67,
            max_drawdown_pct: 1.25,
            end_capital,
        }
    }

    fn sample_result(z_entry: f64, end_capital: f64) -> OptimizationResult {
        OptimizationResult {
            z_entry,
            sl_distance: 2.0,
            tp_distance: 4.0,
            summary: sample_summary(end_capital),
        }
    }

    #[test]
    fn run_summary_lists_params_and_results() {
        let text = format_run_summary(
            "BHP",
            &ParameterSet::default(),
            &sample_summary(10_050.0),
        );
        assert!(text.contains("=== Backtest Summary: BHP ==="));
        assert!(text.contains("Period:        20"));
        assert!(text.contains("3 (2 won, 1 lost)"));
        assert!(text.contains("66.67%"));
        assert!(text.contains("10050.00"));
    }

    #[test]
    fn sweep_table_aligns_every_line() {
        let results = vec![
            sample_result(1.5, 10_250.75),
            sample_result(2.0, 9_800.0),
        ];
        let table = format_sweep_table(&results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("z_entry"));
        assert!(lines[0].contains("end_capital"));
        assert!(lines[1].contains("-+-"));
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width);
        }
    }

    #[test]
    fn sweep_rows_keep_the_given_order() {
        let results = vec![
            sample_result(1.5, 10_250.75),
            sample_result(2.0, 9_800.0),
        ];
        let table = format_sweep_table(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].contains("10250.75"));
        assert!(lines[3].contains("9800.00"));
    }

    #[test]
    fn empty_sweep_has_a_distinct_message() {
        let table = format_sweep_table(&[]);
        assert_eq!(table, "no successful parameter combinations\n");
    }
}
