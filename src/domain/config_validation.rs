//! Configuration validation.
//!
//! Checks every config field before any data is touched. Strategy keys all
//! have defaults, so a missing key passes; a present key must hold a sane
//! value.

use crate::domain::error::MeanrevError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_path(config)?;
    validate_symbol(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_period(config)?;
    validate_z_entry(config)?;
    validate_z_exit(config)?;
    validate_sl_distance(config)?;
    validate_tp_distance(config)?;
    validate_stake(config)?;
    validate_initial_cash(config)?;
    Ok(())
}

pub fn validate_grid_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    grid_axis(config, "z_entry")?;
    grid_axis(config, "sl_distance")?;
    grid_axis(config, "tp_distance")?;
    Ok(())
}

/// Reads an `[optimize]` axis as a comma-separated list of positive numbers.
/// A missing key yields `Ok(None)` so the caller can fall back to defaults.
pub fn grid_axis(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<Vec<f64>>, MeanrevError> {
    let raw = match config.get_string("optimize", key) {
        Some(v) => v,
        None => return Ok(None),
    };

    let mut values = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let value: f64 = part.parse().map_err(|_| MeanrevError::ConfigInvalid {
            section: "optimize".to_string(),
            key: key.to_string(),
            reason: format!("'{}' is not a number", part),
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(MeanrevError::ConfigInvalid {
                section: "optimize".to_string(),
                key: key.to_string(),
                reason: format!("axis values must be positive, got {}", value),
            });
        }
        values.push(value);
    }

    if values.is_empty() {
        return Err(MeanrevError::ConfigInvalid {
            section: "optimize".to_string(),
            key: key.to_string(),
            reason: "axis must contain at least one value".to_string(),
        });
    }

    Ok(Some(values))
}

fn validate_path(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(MeanrevError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    match config.get_string("data", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(MeanrevError::ConfigMissing {
            section: "data".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let start_str = config.get_string("data", "start_date");
    let end_str = config.get_string("data", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(MeanrevError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, MeanrevError> {
    match value {
        None => Err(MeanrevError::ConfigMissing {
            section: "data".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MeanrevError::ConfigInvalid {
                section: "data".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_period(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "period", 20);
    if value < 1 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "period".to_string(),
            reason: "period must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_z_entry(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "z_entry", 1.5);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "z_entry".to_string(),
            reason: "z_entry must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_z_exit(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "z_exit", 0.5);
    if value < 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "z_exit".to_string(),
            reason: "z_exit must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_sl_distance(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "sl_distance", 2.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "sl_distance".to_string(),
            reason: "sl_distance must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_tp_distance(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "tp_distance", 4.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "tp_distance".to_string(),
            reason: "tp_distance must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_stake(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "stake", 10);
    if value < 1 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stake".to_string(),
            reason: "stake must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "initial_cash", 10_000.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}
