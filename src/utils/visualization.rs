//! Terminal charts for price history, test predictions and forecasts

use crate::data::PriceSeries;
use crate::evaluation::Evaluation;
use crate::forecast::Forecast;

/// Default chart size in characters
pub const CHART_WIDTH: usize = 80;
pub const CHART_HEIGHT: usize = 16;

/// Sparkline of a series, NaN rendered as a space
pub fn sparkline(data: &[f64]) -> String {
    let chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let (min_val, max_val) = bounds(data.iter().copied());
    let range = max_val - min_val;

    data.iter()
        .map(|&v| {
            if !v.is_finite() {
                return ' ';
            }
            let normalized = if range > 1e-10 {
                (v - min_val) / range
            } else {
                0.5
            };
            let idx = (normalized * (chars.len() - 1) as f64) as usize;
            chars[idx.min(chars.len() - 1)]
        })
        .collect()
}

/// Single series chart drawn with `*`
pub fn ascii_chart(values: &[f64], width: usize, height: usize) -> String {
    line_chart(&[(values, '*')], width, height)
}

/// Several series on one canvas sharing the x axis
///
/// Each series is `(values, marker)`; series are sampled to `width` columns by
/// their index in the longest one, so shorter series occupy the left part.
/// Later series draw over earlier ones.
pub fn line_chart(series: &[(&[f64], char)], width: usize, height: usize) -> String {
    let longest = series.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    if longest == 0 || width == 0 || height == 0 {
        return String::new();
    }

    let (min, max) = bounds(series.iter().flat_map(|(v, _)| v.iter().copied()));
    if !min.is_finite() {
        return String::from("No finite values to plot");
    }
    let range = max - min;
    if range < 1e-10 {
        return format!("Constant value: {:.4}", min);
    }

    let width = width.min(longest);
    let step = longest as f64 / width as f64;
    let mut canvas = vec![vec![' '; width]; height];

    for (values, marker) in series {
        for x in 0..width {
            let idx = (x as f64 * step) as usize;
            let Some(v) = values.get(idx).copied().filter(|v| v.is_finite()) else {
                continue;
            };
            let y = ((v - min) / range * (height - 1) as f64).round() as usize;
            canvas[(height - 1).saturating_sub(y)][x] = *marker;
        }
    }

    let mut out = String::new();
    for (i, row) in canvas.iter().enumerate() {
        let label = match i {
            0 => format!("{:>10.2} ┤", max),
            i if i == height - 1 => format!("{:>10.2} ┤", min),
            _ => format!("{:>10} │", ""),
        };
        out.push_str(&label);
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// Adjusted close over the whole series
pub fn plot_price_history(series: &PriceSeries) -> String {
    let prices = series.adj_closes_raw();
    let title = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => format!(
            "{} Stock Price ({} .. {})",
            series.ticker, first, last
        ),
        _ => format!("{} Stock Price", series.ticker),
    };

    let recent = &prices[prices.len().saturating_sub(CHART_WIDTH)..];

    format!(
        "{}\n{}Adjusted Close Price, {} points\nLast {}: {}\n",
        title,
        ascii_chart(&prices, CHART_WIDTH, CHART_HEIGHT),
        prices.len(),
        recent.len(),
        sparkline(recent)
    )
}

/// Actual (`*`) against predicted (`o`) test prices
pub fn plot_predictions(evaluation: &Evaluation) -> String {
    let actual = evaluation.targets.to_vec();
    let predicted = evaluation.predictions.to_vec();

    format!(
        "Actual vs Predicted Stock Prices\n{}* actual   o predicted   ({} test samples)\n",
        line_chart(&[(actual.as_slice(), '*'), (predicted.as_slice(), 'o')], CHART_WIDTH, CHART_HEIGHT),
        actual.len()
    )
}

/// Last `history_points` prices (`*`) followed by the forecast (`+`)
pub fn plot_forecast(series: &PriceSeries, forecast: &Forecast, history_points: usize) -> String {
    let prices = series.adj_closes_raw();
    let tail = &prices[prices.len().saturating_sub(history_points)..];

    let mut past = tail.to_vec();
    past.extend(std::iter::repeat(f64::NAN).take(forecast.len()));

    let mut future = vec![f64::NAN; tail.len()];
    future.extend_from_slice(&forecast.prices);

    let range = match (forecast.dates.first(), forecast.dates.last()) {
        (Some(first), Some(last)) => format!("{} .. {}", first, last),
        _ => String::from("empty"),
    };

    format!(
        "{} Stock Price Forecast for the next {} business days\n{}* history ({} points)   + forecast ({})\n",
        forecast.ticker,
        forecast.len(),
        line_chart(&[(past.as_slice(), '*'), (future.as_slice(), '+')], CHART_WIDTH, CHART_HEIGHT),
        tail.len(),
        range
    )
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
