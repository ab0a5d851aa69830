//! Daily price records for a single instrument

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day (one CSV row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Trading date
    pub date: NaiveDate,

    /// Opening price
    pub open: Option<f64>,

    /// Highest price
    pub high: Option<f64>,

    /// Lowest price
    pub low: Option<f64>,

    /// Closing price
    pub close: Option<f64>,

    /// Closing price adjusted for splits and dividends
    pub adj_close: Option<f64>,

    /// Traded volume
    pub volume: Option<f64>,
}

impl PriceRecord {
    /// Creates a record that only carries an adjusted close
    pub fn new(date: NaiveDate, adj_close: Option<f64>) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: None,
            adj_close,
            volume: None,
        }
    }
}

/// Chronologically ordered price history of one instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Instrument identifier, e.g. "AAPL"
    pub ticker: String,
    /// Records with strictly increasing dates
    pub records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Builds a series, sorting records by date and dropping duplicate dates
    ///
    /// The first record seen for a date wins. Returns the series and the
    /// number of duplicates removed.
    pub fn new(ticker: impl Into<String>, mut records: Vec<PriceRecord>) -> (Self, usize) {
        records.sort_by_key(|r| r.date);
        let before = records.len();
        records.dedup_by_key(|r| r.date);
        let duplicates = before - records.len();

        (
            Self {
                ticker: ticker.into(),
                records,
            },
            duplicates,
        )
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adjusted closes with missing values dropped
    pub fn adj_closes(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.adj_close).collect()
    }

    /// Adjusted closes with missing values kept as NaN
    pub fn adj_closes_raw(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.adj_close.unwrap_or(f64::NAN))
            .collect()
    }

    /// Number of records with a missing adjusted close
    pub fn missing_adj_close(&self) -> usize {
        self.records.iter().filter(|r| r.adj_close.is_none()).count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_sorted_and_deduplicated() {
        let records = vec![
            PriceRecord::new(day(3), Some(3.0)),
            PriceRecord::new(day(1), Some(1.0)),
            PriceRecord::new(day(2), Some(2.0)),
            PriceRecord::new(day(2), Some(20.0)),
        ];

        let (series, duplicates) = PriceSeries::new("TEST", records);

        assert_eq!(duplicates, 1);
        let dates: Vec<NaiveDate> = series.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_missing_adj_close() {
        let records = vec![
            PriceRecord::new(day(1), Some(1.0)),
            PriceRecord::new(day(2), None),
            PriceRecord::new(day(3), Some(3.0)),
        ];
        let (series, _) = PriceSeries::new("TEST", records);

        assert_eq!(series.adj_closes(), vec![1.0, 3.0]);
        assert_eq!(series.missing_adj_close(), 1);
        assert!(series.adj_closes_raw()[1].is_nan());
    }
}
