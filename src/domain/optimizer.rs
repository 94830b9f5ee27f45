//! Cartesian parameter sweep ranking combinations by end capital.

use crate::domain::backtest;
use crate::domain::bar::PriceBar;
use crate::domain::metrics::RunSummary;
use crate::domain::params::ParameterSet;

/// Value axes swept by the optimizer. Fields not represented here (period,
/// stake, initial cash, z_exit) come from the base parameter set and stay
/// fixed across the whole sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    pub z_entry: Vec<f64>,
    pub sl_distance: Vec<f64>,
    pub tp_distance: Vec<f64>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            z_entry: vec![1.0, 1.5, 2.0],
            sl_distance: vec![1.0, 2.0],
            tp_distance: vec![2.0, 4.0],
        }
    }
}

impl ParameterGrid {
    pub fn combination_count(&self) -> usize {
        self.z_entry.len() * self.sl_distance.len() * self.tp_distance.len()
    }
}

/// One successful grid point: the swept values plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub z_entry: f64,
    pub sl_distance: f64,
    pub tp_distance: f64,
    pub summary: RunSummary,
}

/// One grid point whose run failed; the sweep carries on without it.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFailure {
    pub z_entry: f64,
    pub sl_distance: f64,
    pub tp_distance: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepOutcome {
    /// Successful runs, sorted by end capital descending; equal capital keeps
    /// grid enumeration order.
    pub results: Vec<OptimizationResult>,
    pub failures: Vec<SweepFailure>,
}

/// Runs one backtest per grid combination, z_entry as the outermost axis and
/// tp_distance as the innermost. Each combination is independent; a failure
/// is recorded with its parameter triple and the sweep continues.
pub fn run_grid(
    bars: &[PriceBar],
    base: &ParameterSet,
    grid: &ParameterGrid,
) -> SweepOutcome {
    let mut results = Vec::with_capacity(grid.combination_count());
    let mut failures = Vec::new();

    for &z_entry in &grid.z_entry {
        for &sl_distance in &grid.sl_distance {
            for &tp_distance in &grid.tp_distance {
                let params = ParameterSet {
                    z_entry,
                    sl_distance,
                    tp_distance,
                    ..base.clone()
                };
                match backtest::run_backtest(bars, &params) {
                    Ok(summary) => results.push(OptimizationResult {
                        z_entry,
                        sl_distance,
                        tp_distance,
                        summary,
                    }),
                    Err(e) => failures.push(SweepFailure {
                        z_entry,
                        sl_distance,
                        tp_distance,
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    // stable sort: ties stay in enumeration order
    results.sort_by(|a, b| b.summary.end_capital.total_cmp(&a.summary.end_capital));

    SweepOutcome { results, failures }
}
