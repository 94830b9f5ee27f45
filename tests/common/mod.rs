#![allow(dead_code)]

use chrono::NaiveDate;
use meanrev::domain::bar::PriceBar;
use meanrev::domain::error::MeanrevError;
use meanrev::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, MeanrevError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(MeanrevError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<PriceBar> = self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if bars.is_empty() {
            return Err(MeanrevError::NoData {
                symbol: symbol.to_string(),
                start: start_date,
                end: end_date,
            });
        }
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, MeanrevError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(MeanrevError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A zero-range bar: high = low = close, so TR and both directional moves
/// stay at 0 between equal closes. Keeps ADX quiet in scenario fixtures.
pub fn flat_bar(date: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        date,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1000.0,
    }
}

/// One bar per close, dated consecutively from 2024-01-01, zero-range.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            flat_bar(date(2024, 1, 1) + chrono::Days::new(i as u64), close)
        })
        .collect()
}

/// Scenario fixture: a 20-bar flat run at 100, a plunge to 90, and a
/// recovery. With default-ish parameters the plunge opens a long and the
/// recovery takes profit.
pub fn drop_and_recover_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 20];
    closes.extend([90.0, 95.0, 100.0, 100.0, 100.0]);
    closes
}

/// Serializes bars into the CSV layout the data adapter reads.
pub fn bars_to_csv(bars: &[PriceBar]) -> String {
    let mut out = String::from("datetime,Open,High,Low,Close,Volume\n");
    for bar in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    out
}
