//! Metrics, terminal charts and file output

pub mod io;
pub mod metrics;
pub mod visualization;

pub use io::{save_forecast_csv, save_json, save_predictions_csv};
pub use metrics::{mae, mape, mse, r2_score, rmse};
pub use visualization::{
    ascii_chart, line_chart, plot_forecast, plot_predictions, plot_price_history, sparkline,
};
