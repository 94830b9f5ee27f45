//! Single-run backtest pipeline: indicators, simulation, summary.

use crate::domain::bar::PriceBar;
use crate::domain::error::SimulationError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::metrics::RunSummary;
use crate::domain::params::ParameterSet;
use crate::domain::simulator::{self, SimulationOutcome};

/// Runs the whole pipeline for one parameter set over one price series.
pub fn run_backtest(
    bars: &[PriceBar],
    params: &ParameterSet,
) -> Result<RunSummary, SimulationError> {
    let (_, summary) = run_backtest_detailed(bars, params)?;
    Ok(summary)
}

/// As [`run_backtest`], but also hands back the simulation outcome for
/// callers that want the equity curve.
pub fn run_backtest_detailed(
    bars: &[PriceBar],
    params: &ParameterSet,
) -> Result<(SimulationOutcome, RunSummary), SimulationError> {
    let indicators = IndicatorSet::compute(bars, params.period);
    let outcome = simulator::simulate(bars, &indicators, params)?;
    let summary = RunSummary::compute(&outcome);
    Ok((outcome, summary))
}
