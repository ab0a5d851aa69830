//! I/O Utilities
//!
//! CSV and JSON output of run results.

use crate::error::Result;
use crate::evaluation::Evaluation;
use crate::forecast::Forecast;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
struct PredictionRow {
    actual: f64,
    predicted: f64,
    error: f64,
}

#[derive(Serialize)]
struct ForecastRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Forecast")]
    price: f64,
}

/// Save held-out predictions next to their targets
pub fn save_predictions_csv<P: AsRef<Path>>(evaluation: &Evaluation, path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    for (actual, predicted) in evaluation.targets.iter().zip(evaluation.predictions.iter()) {
        writer.serialize(PredictionRow {
            actual: *actual,
            predicted: *predicted,
            error: predicted - actual,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Save forecast prices with their dates
pub fn save_forecast_csv<P: AsRef<Path>>(forecast: &Forecast, path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    // Header even for an empty forecast
    if forecast.is_empty() {
        writer.write_record(["Date", "Forecast"])?;
    }
    for (date, price) in forecast.points() {
        writer.serialize(ForecastRow { date, price })?;
    }

    writer.flush()?;
    Ok(())
}

/// Save any serializable data to JSON
pub fn save_json<T: Serialize, P: AsRef<Path>>(data: &T, path: P) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_save_forecast_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.csv");
        let forecast = Forecast {
            ticker: "AAPL".into(),
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ],
            prices: vec![101.5, 102.25],
        };

        save_forecast_csv(&forecast, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Date,Forecast", "2024-03-04,101.5", "2024-03-05,102.25"]);
    }

    #[test]
    fn test_save_empty_forecast_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let forecast = Forecast {
            ticker: "AAPL".into(),
            dates: vec![],
            prices: vec![],
        };

        save_forecast_csv(&forecast, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "Date,Forecast");
    }

    #[test]
    fn test_save_predictions_csv() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let evaluation = Evaluation {
            predictions: array![10.0, 12.0],
            targets: array![11.0, 12.0],
            mse: Some(0.5),
            rmse: None,
            mae: None,
            mape: None,
            r2: None,
        };

        save_predictions_csv(&evaluation, file.path()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["actual", "predicted", "error"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "-1.0");
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        save_json(&vec![1, 2, 3], &path).unwrap();
        let back: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
