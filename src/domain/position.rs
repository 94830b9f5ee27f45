//! Position state for the mean-reversion trade lifecycle.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

/// An open position. Stop and take-profit levels are absolute prices fixed
/// when the position opens and never recomputed.
#[derive(Debug, Clone)]
pub struct OpenPosition {
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl OpenPosition {
    pub fn long(entry_price: f64, sl_distance: f64, tp_distance: f64) -> Self {
        Self {
            direction: Direction::Long,
            entry_price,
            stop_loss: entry_price - sl_distance,
            take_profit: entry_price + tp_distance,
        }
    }

    pub fn short(entry_price: f64, sl_distance: f64, tp_distance: f64) -> Self {
        Self {
            direction: Direction::Short,
            entry_price,
            stop_loss: entry_price + sl_distance,
            take_profit: entry_price - tp_distance,
        }
    }

    pub fn is_long(&self) -> bool {
        self.direction == Direction::Long
    }

    pub fn should_stop_loss(&self, price: f64) -> bool {
        if self.is_long() {
            price <= self.stop_loss
        } else {
            price >= self.stop_loss
        }
    }

    pub fn should_take_profit(&self, price: f64) -> bool {
        if self.is_long() {
            price >= self.take_profit
        } else {
            price <= self.take_profit
        }
    }

    /// True when any exit rule fires: stop, target, or the z-score reverting
    /// to within `z_exit` of the mean.
    pub fn should_exit(&self, price: f64, zscore: f64, z_exit: f64) -> bool {
        self.should_stop_loss(price) || self.should_take_profit(price) || zscore.abs() <= z_exit
    }

    /// Realized profit when closing at `exit_price` with a fixed unit stake.
    pub fn realized_pnl(&self, exit_price: f64, stake: i64) -> f64 {
        match self.direction {
            Direction::Long => (exit_price - self.entry_price) * stake as f64,
            Direction::Short => (self.entry_price - exit_price) * stake as f64,
        }
    }
}

/// Win/loss counts over the closed trades of one run. A zero-pnl trade
/// counts toward the total but is neither a win nor a loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeTally {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
}

impl TradeTally {
    pub fn record(&mut self, pnl: f64) {
        self.total_trades += 1;
        if pnl > 0.0 {
            self.wins += 1;
        } else if pnl < 0.0 {
            self.losses += 1;
        }
    }
}
