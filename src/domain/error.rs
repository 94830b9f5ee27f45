//! Domain error types.

use chrono::NaiveDate;

/// A rejected simulation input. During a grid sweep these fail a single
/// combination; the sweep records the failure and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("z-score period must be at least 1")]
    InvalidPeriod,

    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("indicator series length {zscore}/{adx} does not match {bars} bars")]
    IndicatorMismatch {
        bars: usize,
        zscore: usize,
        adx: usize,
    },
}

/// Top-level error type for meanrev.
#[derive(Debug, thiserror::Error)]
pub enum MeanrevError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no price data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MeanrevError> for std::process::ExitCode {
    fn from(err: &MeanrevError) -> Self {
        let code: u8 = match err {
            MeanrevError::Io(_) => 1,
            MeanrevError::ConfigParse { .. }
            | MeanrevError::ConfigMissing { .. }
            | MeanrevError::ConfigInvalid { .. } => 2,
            MeanrevError::Data { .. } => 3,
            MeanrevError::Simulation(_) => 4,
            MeanrevError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
