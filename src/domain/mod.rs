//! Core domain types and logic.

pub mod bar;
pub mod params;
pub mod position;
pub mod indicator;
pub mod simulator;
pub mod backtest;
pub mod metrics;
pub mod optimizer;
pub mod config_validation;
pub mod error;
