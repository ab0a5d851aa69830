//! CSV loading for daily price files
//!
//! Expects a header row with at least `Date` and `Adj Close`. `Open`, `High`,
//! `Low`, `Close` and `Volume` are picked up when present.

use super::types::{PriceRecord, PriceSeries};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DATE_COLUMN: &str = "Date";
pub const ADJ_CLOSE_COLUMN: &str = "Adj Close";

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    adj_close: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            date: find(DATE_COLUMN).ok_or_else(|| Error::MissingColumn(DATE_COLUMN.to_string()))?,
            adj_close: find(ADJ_CLOSE_COLUMN)
                .ok_or_else(|| Error::MissingColumn(ADJ_CLOSE_COLUMN.to_string()))?,
            open: find("Open"),
            high: find("High"),
            low: find("Low"),
            close: find("Close"),
            volume: find("Volume"),
        })
    }
}

/// Loads a price file and tags it with a ticker taken from the file stem
///
/// Rows are sorted by date; rows with an unparseable date are dropped and
/// duplicate dates keep their first row.
///
/// # Errors
///
/// `Error::FileNotFound` when `path` does not exist, `Error::MissingColumn`
/// when a required column is absent, `Error::Csv` for malformed input.
pub fn load_price_series<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let ticker = ticker_from_path(path);
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let series = read_records(&mut reader, &ticker)?;

    info!(
        "Loaded {} rows for {} from {}",
        series.len(),
        series.ticker,
        path.display()
    );
    Ok(series)
}

/// Parses price rows from any CSV reader
pub fn read_records<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    ticker: &str,
) -> Result<PriceSeries> {
    let columns = Columns::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    let mut bad_dates = 0usize;

    for row in reader.records() {
        let row = row?;

        let Some(date) = row.get(columns.date).and_then(parse_date) else {
            bad_dates += 1;
            continue;
        };

        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(parse_price);

        records.push(PriceRecord {
            date,
            open: field(columns.open),
            high: field(columns.high),
            low: field(columns.low),
            close: field(columns.close),
            adj_close: field(Some(columns.adj_close)),
            volume: field(columns.volume),
        });
    }

    if bad_dates > 0 {
        warn!("Dropped {} rows with an unparseable date", bad_dates);
    }

    let (series, duplicates) = PriceSeries::new(ticker, records);
    if duplicates > 0 {
        warn!("Dropped {} rows with a duplicate date", duplicates);
    }
    debug!(
        "{}: {} rows, {} missing adjusted closes",
        ticker,
        series.len(),
        series.missing_adj_close()
    );

    Ok(series)
}

/// Ticker symbol from a file name: `data/AAPL.csv` -> `AAPL`
pub fn ticker_from_path(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or_default()
        .to_string()
}

/// Parses `YYYY-MM-DD`, tolerating a trailing time component
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = match raw.char_indices().nth(10) {
        Some((idx, sep)) if sep == ' ' || sep == 'T' => &raw[..idx],
        Some(_) => return None,
        None => raw,
    };
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Parses a numeric cell; empty, `null` and non-numeric cells are missing
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-04,12.0,13.0,11.0,12.5,12.4,1000
2024-01-02,10.0,11.0,9.0,10.5,10.4,1200
2024-01-03,11.0,12.0,10.0,11.5,,1100
not-a-date,1,1,1,1,1,1
";

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_read_records_sorts_and_cleans() {
        let series = read_records(&mut reader(SAMPLE), "TEST").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(series.records[0].adj_close, Some(10.4));
        assert_eq!(series.records[0].volume, Some(1200.0));
        assert_eq!(series.records[1].adj_close, None);
        assert_eq!(series.adj_closes(), vec![10.4, 12.4]);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Date,Close\n2024-01-02,10.0\n";
        let err = read_records(&mut reader(data), "TEST").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == ADJ_CLOSE_COLUMN));
    }

    #[test]
    fn test_only_required_columns() {
        let data = "Date,Adj Close\n2024-01-02,10.0\n2024-01-03,null\n";
        let series = read_records(&mut reader(data), "TEST").unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.records[0].open, None);
        assert_eq!(series.missing_adj_close(), 1);
    }

    #[test]
    fn test_ragged_rows_are_csv_errors() {
        let data = "Date,Adj Close\n2024-01-02,10.0,extra\n";
        let err = read_records(&mut reader(data), "TEST").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AAPL.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let series = load_price_series(&path).unwrap();
        assert_eq!(series.ticker, "AAPL");
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_load_named_temp_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let series = load_price_series(file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_price_series("/definitely/not/here/AAPL.csv").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert!(err.to_string().contains("/definitely/not/here/AAPL.csv"));
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 15);
        assert_eq!(parse_date("2021-03-15"), expected);
        assert_eq!(parse_date("2021-03-15 00:00:00"), expected);
        assert_eq!(parse_date("2021-03-15T00:00:00Z"), expected);
        assert_eq!(parse_date("15/03/2021"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_ticker_from_path() {
        assert_eq!(ticker_from_path(Path::new("/data/stocks/AAPL.csv")), "AAPL");
        assert_eq!(ticker_from_path(Path::new("MSFT")), "MSFT");
    }
}
