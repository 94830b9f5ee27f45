//! ADX (Average Directional Index), Wilder's trend-strength oscillator.
//!
//! Directional moves per bar: +DM = high[i]-high[i-1] when that exceeds the
//! down move and is positive, -DM symmetric. Seed at index n: ATR = simple
//! mean of TR over the first n moves, smoothed ±DM = plain sums over the same
//! window. ±DI = 100*DM/ATR, DX = 100*|+DI - -DI|/(+DI + -DI), ADX[n] = DX[n].
//! After the seed, Wilder recursion:
//!   ATR[i] = (ATR[i-1]*(n-1) + TR[i]) / n
//!   smDM[i] = smDM[i-1] - smDM[i-1]/n + DM[i]
//!   ADX[i] = (ADX[i-1]*(n-1) + DX[i]) / n
//! Warmup: indices before n hold 0.0; a series of n bars or fewer is all 0.0.

use crate::domain::bar::PriceBar;

/// Wilder's standard smoothing period.
pub const ADX_PERIOD: usize = 14;

pub fn calculate_adx(bars: &[PriceBar], period: usize) -> Vec<f64> {
    let len = bars.len();
    if period == 0 || len <= period {
        return vec![0.0; len];
    }

    let mut plus_dm = vec![0.0; len];
    let mut minus_dm = vec![0.0; len];
    let mut tr = vec![0.0; len];

    for i in 1..len {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
        tr[i] = bars[i].true_range(bars[i - 1].close);
    }

    let mut adx = vec![0.0; len];

    let mut atr = tr[1..=period].iter().sum::<f64>() / period as f64;
    let mut plus_smooth: f64 = plus_dm[1..=period].iter().sum();
    let mut minus_smooth: f64 = minus_dm[1..=period].iter().sum();

    let mut prev_adx = directional_index(atr, plus_smooth, minus_smooth);
    adx[period] = prev_adx;

    for i in period + 1..len {
        atr = (atr * (period - 1) as f64 + tr[i]) / period as f64;
        plus_smooth = plus_smooth - plus_smooth / period as f64 + plus_dm[i];
        minus_smooth = minus_smooth - minus_smooth / period as f64 + minus_dm[i];

        let dx = directional_index(atr, plus_smooth, minus_smooth);
        prev_adx = (prev_adx * (period - 1) as f64 + dx) / period as f64;
        adx[i] = prev_adx;
    }

    adx
}

/// DX from one bar's smoothed values. 0.0 whenever ATR or the DI sum is
/// zero, so a dead market contributes nothing to the ADX average.
fn directional_index(atr: f64, plus_smooth: f64, minus_smooth: f64) -> f64 {
    if atr == 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * plus_smooth / atr;
    let minus_di = 100.0 * minus_smooth / atr;
    let denom = plus_di + minus_di;
    if denom == 0.0 {
        return 0.0;
    }
    100.0 * (plus_di - minus_di).abs() / denom
}
