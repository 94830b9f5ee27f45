//! Strategy parameter set.

/// Immutable inputs for one simulation run. `period` is the z-score lookback
/// window; `z_entry`/`z_exit` are thresholds on the z-score; the stop and
/// take-profit distances are absolute price offsets from the entry price.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub period: usize,
    pub z_entry: f64,
    pub z_exit: f64,
    pub sl_distance: f64,
    pub tp_distance: f64,
    pub stake: i64,
    pub initial_cash: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            period: 20,
            z_entry: 1.5,
            z_exit: 0.5,
            sl_distance: 2.0,
            tp_distance: 4.0,
            stake: 10,
            initial_cash: 10_000.0,
        }
    }
}
