//! Run-level performance metrics.

use crate::domain::simulator::SimulationOutcome;

/// Aggregate figures for one simulation run. Percentages and capital are
/// rounded to two decimals; the raw trade counts are carried as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub winrate: f64,
    pub max_drawdown_pct: f64,
    pub end_capital: f64,
}

impl RunSummary {
    pub fn compute(outcome: &SimulationOutcome) -> Self {
        let tally = outcome.tally;

        let winrate = if tally.total_trades > 0 {
            tally.wins as f64 / tally.total_trades as f64 * 100.0
        } else {
            0.0
        };

        let end_capital = outcome.equity_curve.last().copied().unwrap_or(0.0);

        RunSummary {
            total_trades: tally.total_trades,
            wins: tally.wins,
            losses: tally.losses,
            winrate: round2(winrate),
            max_drawdown_pct: round2(max_drawdown_pct(&outcome.equity_curve)),
            end_capital: round2(end_capital),
        }
    }
}

/// Largest peak-to-trough decline as a percentage of the peak. A peak at or
/// below zero contributes nothing, so the result is never negative.
fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }

    let mut peak = equity_curve[0];
    let mut max_dd = 0.0_f64;

    for &value in equity_curve {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
