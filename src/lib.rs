//! # Stock RNN
//!
//! Next-day price prediction and multi-day forecasting for a single stock
//! with a stacked LSTM.
//!
//! ## Modules
//!
//! - `data` - Loading daily price CSV files
//! - `preprocessing` - Windowing, scaling and splits
//! - `model` - LSTM regressor, training and persistence
//! - `evaluation` - Test-set scoring and imputation of non-finite values
//! - `forecast` - Autoregressive forecasting over business days
//! - `pipeline` - The whole run, stage by stage
//! - `utils` - Metrics, terminal charts and file output
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use stock_rnn::{pipeline, PipelineConfig};
//!
//! let config = PipelineConfig {
//!     horizon: 30,
//!     ..Default::default()
//! };
//! let report = pipeline::run(&config, "data/AAPL.csv")?;
//! println!("MSE: {:?}", report.evaluation.mse);
//! # Ok::<(), stock_rnn::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod forecast;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod utils;

pub use config::PipelineConfig;
pub use data::{load_price_series, PriceRecord, PriceSeries};
pub use error::{Error, Result};
pub use evaluation::{evaluate, impute_non_finite, Evaluation};
pub use forecast::{forecast_future_prices, Forecast};
pub use model::{train, LstmRegressorConfig, PricePredictor, TrainedModel, TrainingConfig};
pub use preprocessing::{create_sequences, MinMaxScaler, Sequences};
