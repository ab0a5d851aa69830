//! Descriptive statistics for a loaded price series

use super::types::{PriceRecord, PriceSeries};
use std::fmt;

/// count / mean / std / min / quartiles / max of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: &'static str,
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Statistics over the present values; NaN fields when nothing is present
    pub fn compute(name: &'static str, values: &[Option<f64>]) -> Self {
        let mut present: Vec<f64> = values.iter().flatten().copied().collect();
        present.sort_by(|a, b| a.total_cmp(b));

        let count = present.len();
        let mean = if count > 0 {
            present.iter().sum::<f64>() / count as f64
        } else {
            f64::NAN
        };
        // Sample standard deviation (ddof = 1)
        let std = if count > 1 {
            let var = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            f64::NAN
        };

        Self {
            name,
            count,
            missing: values.len() - count,
            mean,
            std,
            min: present.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&present, 0.25),
            median: quantile(&present, 0.5),
            q75: quantile(&present, 0.75),
            max: present.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Linear-interpolated quantile of sorted values
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Overview of a series: date range plus per-column statistics
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub ticker: String,
    pub rows: usize,
    pub first_date: Option<chrono::NaiveDate>,
    pub last_date: Option<chrono::NaiveDate>,
    pub columns: Vec<ColumnStats>,
}

type Getter = fn(&PriceRecord) -> Option<f64>;

/// Summarises every numeric column of the series
pub fn describe(series: &PriceSeries) -> SeriesSummary {
    let getters: [(&'static str, Getter); 6] = [
        ("Open", |r| r.open),
        ("High", |r| r.high),
        ("Low", |r| r.low),
        ("Close", |r| r.close),
        ("Adj Close", |r| r.adj_close),
        ("Volume", |r| r.volume),
    ];

    let columns = getters
        .into_iter()
        .map(|(name, get)| {
            let values: Vec<Option<f64>> = series.records.iter().map(get).collect();
            ColumnStats::compute(name, &values)
        })
        .collect();

    SeriesSummary {
        ticker: series.ticker.clone(),
        rows: series.len(),
        first_date: series.first_date(),
        last_date: series.last_date(),
        columns,
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticker: {}", self.ticker)?;
        writeln!(f, "Rows:   {}", self.rows)?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            writeln!(f, "Dates:  {} .. {}", first, last)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<10} {:>7} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Column", "count", "missing", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        writeln!(f, "{:-<120}", "")?;
        for c in &self.columns {
            writeln!(
                f,
                "{:<10} {:>7} {:>7} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                c.name, c.count, c.missing, c.mean, c.std, c.min, c.q25, c.median, c.q75, c.max
            )?;
        }
        Ok(())
    }
}
