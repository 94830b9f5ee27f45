//! CSV snapshot data adapter.
//!
//! Reads one file per symbol (`<dir>/<SYMBOL>.csv`) with a header row of
//! `datetime,Open,High,Low,Close,Volume`. Columns are resolved by header
//! name, so extra columns and reordered files still load.

use crate::domain::bar::PriceBar;
use crate::domain::error::MeanrevError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Parses every row of the symbol's file, in file order, unfiltered.
    fn read_symbol(&self, symbol: &str) -> Result<Vec<PriceBar>, MeanrevError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| MeanrevError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| MeanrevError::Data {
                reason: format!("CSV header error in {}: {}", path.display(), e),
            })?
            .clone();

        let date_col = column_index(&headers, "datetime", &path)?;
        let open_col = column_index(&headers, "Open", &path)?;
        let high_col = column_index(&headers, "High", &path)?;
        let low_col = column_index(&headers, "Low", &path)?;
        let close_col = column_index(&headers, "Close", &path)?;
        let volume_col = column_index(&headers, "Volume", &path)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MeanrevError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = field(&record, date_col, "datetime")?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                    MeanrevError::Data {
                        reason: format!("invalid datetime value '{}': {}", date_str, e),
                    }
                })?;

            bars.push(PriceBar {
                date,
                open: numeric_field(&record, open_col, "Open")?,
                high: numeric_field(&record, high_col, "High")?,
                low: numeric_field(&record, low_col, "Low")?,
                close: numeric_field(&record, close_col, "Close")?,
                volume: numeric_field(&record, volume_col, "Volume")?,
            });
        }

        Ok(bars)
    }
}

fn column_index(
    headers: &StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, MeanrevError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| MeanrevError::Data {
            reason: format!("missing {} column in {}", name, path.display()),
        })
}

fn field<'a>(
    record: &'a StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, MeanrevError> {
    record.get(index).ok_or_else(|| MeanrevError::Data {
        reason: format!("missing {} value", name),
    })
}

fn numeric_field(
    record: &StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, MeanrevError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| MeanrevError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvDataAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, MeanrevError> {
        let mut bars: Vec<PriceBar> = self
            .read_symbol(symbol)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();

        bars.sort_by_key(|b| b.date);

        if bars.is_empty() {
            return Err(MeanrevError::NoData {
                symbol: symbol.to_string(),
                start: start_date,
                end: end_date,
            });
        }

        // the simulator treats each index as one clock tick, so two rows on
        // the same date cannot be meaningfully ordered
        for pair in bars.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(MeanrevError::Data {
                    reason: format!("duplicate timestamp {} for {}", pair[0].date, symbol),
                });
            }
        }

        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, MeanrevError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| MeanrevError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MeanrevError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        let bars = self.read_symbol(symbol)?;
        if bars.is_empty() {
            return Ok(None);
        }

        let mut first = bars[0].date;
        let mut last = bars[0].date;
        for bar in &bars {
            if bar.date < first {
                first = bar.date;
            }
            if bar.date > last {
                last = bar.date;
            }
        }

        Ok(Some((first, last, bars.len())))
    }
}
