//! # Autoregressive forecasting
//!
//! Rolls a fitted model forward over future business days: each prediction
//! is appended to the input window and the oldest price is dropped. Errors
//! compound with the horizon; no confidence bands are produced.

mod calendar;

pub use calendar::{is_business_day, next_business_days};

use crate::data::PriceSeries;
use crate::error::{Error, Result};
use crate::evaluation::impute_non_finite;
use crate::model::PricePredictor;
use chrono::NaiveDate;
use ndarray::Array2;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Forecasted prices with their business dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub ticker: String,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `(date, price)` pairs
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.prices.iter().copied())
    }
}

/// Forecasts `horizon` business days past the end of `series`
///
/// The seed window is the last `window_size` adjusted closes; missing values
/// in it are replaced by the mean of the others.
pub fn forecast_future_prices<P: PricePredictor>(
    model: &P,
    series: &PriceSeries,
    horizon: usize,
) -> Result<Forecast> {
    let window_size = model.window_size();
    let raw = series.adj_closes_raw();
    if raw.len() < window_size {
        return Err(Error::InsufficientData(format!(
            "need at least {} rows to forecast, got {}",
            window_size,
            raw.len()
        )));
    }
    let last_date = series
        .last_date()
        .ok_or_else(|| Error::InsufficientData("empty series".to_string()))?;

    let mut last_points = raw[raw.len() - window_size..].to_vec();
    let replaced = impute_non_finite(&mut last_points)?;
    if replaced > 0 {
        warn!(
            "NaN values found in input data, replaced {} with the window mean",
            replaced
        );
    }

    let prices = rollout(model, last_points, horizon)?;
    let dates = next_business_days(last_date, horizon);

    info!(
        "Forecast {} business days for {} ({} .. {})",
        horizon,
        series.ticker,
        dates.first().map(ToString::to_string).unwrap_or_default(),
        dates.last().map(ToString::to_string).unwrap_or_default()
    );

    Ok(Forecast {
        ticker: series.ticker.clone(),
        dates,
        prices,
    })
}

/// Repeated one-step prediction starting from a finite seed window
///
/// A non-finite step output is fed back as the window mean so later steps
/// stay defined; in the returned prices it is replaced by the mean of the
/// finite forecasts.
pub fn rollout<P: PricePredictor>(
    model: &P,
    seed: Vec<f64>,
    horizon: usize,
) -> Result<Vec<f64>> {
    let window_size = model.window_size();
    if seed.len() != window_size {
        return Err(Error::InsufficientData(format!(
            "seed window has {} prices, model expects {}",
            seed.len(),
            window_size
        )));
    }

    let mut window: VecDeque<f64> = seed.into();
    let mut forecast = Vec::with_capacity(horizon);

    for step in 0..horizon {
        let input = Array2::from_shape_vec((1, window_size), window.iter().copied().collect())
            .map_err(|e| Error::Model(e.to_string()))?;
        let next = model
            .predict(&input)?
            .first()
            .copied()
            .ok_or_else(|| Error::Model("model returned no prediction".to_string()))?;

        let fed_back = if next.is_finite() {
            next
        } else {
            debug!("Step {} produced a non-finite value", step);
            window.iter().sum::<f64>() / window.len().max(1) as f64
        };

        forecast.push(next);
        window.pop_front();
        window.push_back(fed_back);
    }

    let replaced = impute_non_finite(&mut forecast)?;
    if replaced > 0 {
        warn!(
            "Replaced {} non-finite forecast values with the forecast mean",
            replaced
        );
    }

    Ok(forecast)
}
