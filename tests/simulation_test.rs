//! End-to-end pipeline tests: indicators, simulation, metrics, and the grid
//! sweep driven together over engineered price series.

mod common;

use common::*;
use meanrev::domain::backtest::{run_backtest, run_backtest_detailed};
use meanrev::domain::indicator::{IndicatorSet, ADX_PERIOD};
use meanrev::domain::optimizer::{run_grid, ParameterGrid};
use meanrev::domain::params::ParameterSet;
use meanrev::domain::simulator::ADX_TREND_CEILING;

mod constant_series {
    use super::*;

    #[test]
    fn produces_no_signal_and_no_trades() {
        let bars = bars_from_closes(&[100.0; 25]);
        let params = ParameterSet::default();

        let indicators = IndicatorSet::compute(&bars, params.period);
        assert!(indicators.zscore.iter().all(|&v| v == 0.0));
        assert!(indicators.adx.iter().all(|&v| v == 0.0));

        let summary = run_backtest(&bars, &params).unwrap();
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.winrate, 0.0);
        assert_eq!(summary.max_drawdown_pct, 0.0);
        assert_eq!(summary.end_capital, 10_000.0);
    }

    #[test]
    fn equity_curve_stays_at_initial_cash() {
        let bars = bars_from_closes(&[100.0; 25]);
        let (outcome, _) = run_backtest_detailed(&bars, &ParameterSet::default()).unwrap();
        assert_eq!(outcome.equity_curve, vec![10_000.0; 26]);
    }
}

mod drop_and_recovery {
    use super::*;

    #[test]
    fn plunge_opens_a_long_that_takes_profit() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let params = ParameterSet::default();

        // the plunge bar carries an entry-grade z-score while ADX is still
        // far below the trend ceiling
        let indicators = IndicatorSet::compute(&bars, params.period);
        assert!(indicators.zscore[20] <= -params.z_entry);
        assert!(indicators.adx[20] < ADX_TREND_CEILING);

        let summary = run_backtest(&bars, &params).unwrap();
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.winrate, 100.0);
        // long at 90, take-profit at 94, filled at the 95 close: +5 x 10
        assert_eq!(summary.end_capital, 10_050.0);
        assert_eq!(summary.max_drawdown_pct, 0.0);
    }

    #[test]
    fn equity_only_moves_on_the_exit_bar() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let (outcome, _) = run_backtest_detailed(&bars, &ParameterSet::default()).unwrap();

        assert_eq!(outcome.equity_curve.len(), bars.len() + 1);
        // seed + bars 0..=20 untouched, exit on bar 21 banks the profit
        assert!(outcome.equity_curve[..22].iter().all(|&v| v == 10_000.0));
        assert!(outcome.equity_curve[22..].iter().all(|&v| v == 10_050.0));
    }
}

mod spike_short {
    use super::*;

    #[test]
    fn upward_spike_opens_a_short() {
        let mut closes = vec![100.0; 20];
        closes.extend([110.0, 105.0, 100.0]);
        let bars = bars_from_closes(&closes);
        let params = ParameterSet {
            tp_distance: 5.0,
            ..ParameterSet::default()
        };

        let summary = run_backtest(&bars, &params).unwrap();
        // short at 110, take-profit at 105, filled at the 105 close
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.end_capital, 10_050.0);
    }
}

mod forced_close {
    use super::*;

    #[test]
    fn position_open_at_series_end_is_closed_at_the_last_bar() {
        // the plunge is the final bar, so the entry and the forced close
        // share a price and the trade moves nothing
        let mut closes = vec![100.0; 20];
        closes.push(90.0);
        let bars = bars_from_closes(&closes);

        let summary = run_backtest(&bars, &ParameterSet::default()).unwrap();
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.end_capital, 10_000.0);
    }

    #[test]
    fn forced_close_realizes_an_open_loss() {
        // plunge, then a drift further down that never touches the stop and
        // never pulls z inside the exit band before the series ends
        let mut closes = vec![100.0; 20];
        closes.extend([90.0, 89.0]);
        let bars = bars_from_closes(&closes);
        let params = ParameterSet {
            sl_distance: 5.0,
            ..ParameterSet::default()
        };

        let (outcome, summary) = run_backtest_detailed(&bars, &params).unwrap();
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.losses, 1);
        // long at 90 closed at 89: -1 x 10
        assert_eq!(summary.end_capital, 9_990.0);
        // the forced close rewrites the final equity entry in place
        assert_eq!(outcome.equity_curve.len(), bars.len() + 1);
        assert_eq!(*outcome.equity_curve.last().unwrap(), 9_990.0);
    }
}

mod indicator_alignment {
    use super::*;

    #[test]
    fn warmup_boundaries_hold_zero() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let params = ParameterSet::default();
        let indicators = IndicatorSet::compute(&bars, params.period);

        assert_eq!(indicators.zscore.len(), bars.len());
        assert_eq!(indicators.adx.len(), bars.len());
        for i in 0..params.period - 1 {
            assert_eq!(indicators.zscore[i], 0.0);
        }
        for i in 0..ADX_PERIOD {
            assert_eq!(indicators.adx[i], 0.0);
        }
    }
}

mod grid_sweep {
    use super::*;

    #[test]
    fn default_grid_produces_twelve_distinct_rows() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let grid = ParameterGrid::default();

        let outcome = run_grid(&bars, &ParameterSet::default(), &grid);
        assert_eq!(outcome.results.len(), 12);
        assert!(outcome.failures.is_empty());

        let mut triples: Vec<(u64, u64, u64)> = outcome
            .results
            .iter()
            .map(|r| {
                (
                    r.z_entry.to_bits(),
                    r.sl_distance.to_bits(),
                    r.tp_distance.to_bits(),
                )
            })
            .collect();
        triples.sort();
        triples.dedup();
        assert_eq!(triples.len(), 12);
    }

    #[test]
    fn results_are_ranked_by_end_capital() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let outcome = run_grid(&bars, &ParameterSet::default(), &ParameterGrid::default());

        for pair in outcome.results.windows(2) {
            assert!(pair[0].summary.end_capital >= pair[1].summary.end_capital);
        }
    }

    #[test]
    fn a_poisoned_axis_fails_only_its_own_combinations() {
        let bars = bars_from_closes(&drop_and_recover_closes());
        let grid = ParameterGrid {
            z_entry: vec![1.5, f64::INFINITY],
            sl_distance: vec![2.0],
            tp_distance: vec![4.0],
        };

        let outcome = run_grid(&bars, &ParameterSet::default(), &grid);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].z_entry.is_infinite());
        assert!(outcome.failures[0].reason.contains("z_entry"));
    }

    #[test]
    fn empty_series_fails_every_combination() {
        let outcome = run_grid(&[], &ParameterSet::default(), &ParameterGrid::default());
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.failures.len(), 12);
    }
}
