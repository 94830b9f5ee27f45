//! Bar-by-bar trade simulation over a precomputed indicator set.
//!
//! The simulator walks the series once, holding at most one open position.
//! Entries require a full lookback window and a calm ADX reading; exits fire
//! on stop-loss, take-profit, or the z-score reverting toward the mean. All
//! fills happen at the close of the bar that triggered them.

use crate::domain::bar::PriceBar;
use crate::domain::error::SimulationError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::params::ParameterSet;
use crate::domain::position::{OpenPosition, TradeTally};

/// Entries are suppressed while ADX is at or above this level, on the view
/// that a trending market keeps running instead of reverting.
pub const ADX_TREND_CEILING: f64 = 20.0;

/// Everything a single simulation run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Cash after each bar, seeded with the starting cash before bar zero.
    /// Always `bars.len() + 1` entries.
    pub equity_curve: Vec<f64>,
    pub tally: TradeTally,
}

/// Runs the mean-reversion state machine over `bars`.
///
/// The bar that opens a position never closes it; exit rules apply from the
/// following bar. A position still open after the final bar is closed at the
/// final close price and the last equity entry is rewritten to match.
pub fn simulate(
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    params: &ParameterSet,
) -> Result<SimulationOutcome, SimulationError> {
    validate(bars, indicators, params)?;

    let mut cash = params.initial_cash;
    let mut equity_curve = Vec::with_capacity(bars.len() + 1);
    equity_curve.push(cash);

    let mut tally = TradeTally::default();
    let mut position: Option<OpenPosition> = None;

    for (idx, bar) in bars.iter().enumerate() {
        let price = bar.close;
        let z = indicators.zscore[idx];

        match position.take() {
            Some(pos) => {
                if pos.should_exit(price, z, params.z_exit) {
                    let pnl = pos.realized_pnl(price, params.stake);
                    cash += pnl;
                    tally.record(pnl);
                } else {
                    position = Some(pos);
                }
            }
            None => {
                let window_ready = idx + 1 >= params.period;
                if window_ready && indicators.adx[idx] < ADX_TREND_CEILING {
                    if z <= -params.z_entry {
                        position = Some(OpenPosition::long(
                            price,
                            params.sl_distance,
                            params.tp_distance,
                        ));
                    } else if z >= params.z_entry {
                        position = Some(OpenPosition::short(
                            price,
                            params.sl_distance,
                            params.tp_distance,
                        ));
                    }
                }
            }
        }

        equity_curve.push(cash);
    }

    if let Some(pos) = position {
        // close out at the final bar so the run ends flat
        let price = bars[bars.len() - 1].close;
        let pnl = pos.realized_pnl(price, params.stake);
        cash += pnl;
        tally.record(pnl);
        if let Some(last) = equity_curve.last_mut() {
            *last = cash;
        }
    }

    Ok(SimulationOutcome {
        equity_curve,
        tally,
    })
}

fn validate(
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    params: &ParameterSet,
) -> Result<(), SimulationError> {
    if bars.is_empty() {
        return Err(SimulationError::EmptySeries);
    }
    if params.period == 0 {
        return Err(SimulationError::InvalidPeriod);
    }
    let finite_checks = [
        ("z_entry", params.z_entry),
        ("z_exit", params.z_exit),
        ("sl_distance", params.sl_distance),
        ("tp_distance", params.tp_distance),
        ("initial_cash", params.initial_cash),
    ];
    for (name, value) in finite_checks {
        if !value.is_finite() {
            return Err(SimulationError::NonFiniteParameter { name, value });
        }
    }
    if indicators.zscore.len() != bars.len() || indicators.adx.len() != bars.len() {
        return Err(SimulationError::IndicatorMismatch {
            bars: bars.len(),
            zscore: indicators.zscore.len(),
            adx: indicators.adx.len(),
        });
    }
    Ok(())
}
