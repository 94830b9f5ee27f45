//! Technical indicator implementations.
//!
//! Each indicator is a pure function from a bar slice to one value per bar,
//! index-aligned with the input. Warm-up indices hold 0.0 rather than being
//! absent, so consumers never deal with missing values.

pub mod adx;
pub mod zscore;

pub use adx::{ADX_PERIOD, calculate_adx};
pub use zscore::calculate_zscore;

use crate::domain::bar::PriceBar;

/// The two indicator series one simulation consumes, index-aligned with the
/// bars they were computed from.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub zscore: Vec<f64>,
    pub adx: Vec<f64>,
}

impl IndicatorSet {
    /// Compute both series for `bars`. The z-score window is `period`; ADX
    /// always uses [`ADX_PERIOD`].
    pub fn compute(bars: &[PriceBar], period: usize) -> Self {
        Self {
            zscore: calculate_zscore(bars, period),
            adx: calculate_adx(bars, ADX_PERIOD),
        }
    }
}
