//! Rolling z-score of closing prices.
//!
//! Z(n)[i] = (C[i] - mean) / stddev over the trailing n closes ending at i,
//! with the population standard deviation (divide by n, not n-1).
//! Warmup: first (n-1) bars yield 0.0, as does any flat window (stddev 0).

use crate::domain::bar::PriceBar;

pub fn calculate_zscore(bars: &[PriceBar], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![0.0; bars.len()];
    }

    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        if i + 1 < period {
            values.push(0.0);
            continue;
        }

        let start = i + 1 - period;
        let window = &bars[start..=i];

        let mean: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        let variance: f64 = window
            .iter()
            .map(|b| {
                let diff = b.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        if stddev == 0.0 {
            values.push(0.0);
        } else {
            values.push((bars[i].close - mean) / stddev);
        }
    }

    values
}
