//! Market data access port.

use crate::domain::bar::PriceBar;
use crate::domain::error::MeanrevError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol` within `[start_date, end_date]` inclusive, sorted
    /// ascending. An empty window is a `NoData` error, not an empty vec.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, MeanrevError>;

    fn list_symbols(&self) -> Result<Vec<String>, MeanrevError>;

    /// First date, last date, and bar count for `symbol`, or `None` when no
    /// rows are stored at all.
    fn data_range(&self, symbol: &str) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError>;
}
