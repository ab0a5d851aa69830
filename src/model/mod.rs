//! # Recurrent price model
//!
//! Stacked LSTM regressor on Burn, its training loop and the fitted model
//! wrapper used for evaluation and forecasting.
//!
//! ```rust,no_run
//! use burn::backend::{Autodiff, NdArray};
//! use stock_rnn::model::{train, LstmRegressorConfig, PricePredictor, TrainingConfig};
//! use stock_rnn::preprocessing::{create_sequences, Sequences};
//!
//! let prices: Vec<f64> = (0..200).map(|i| 100.0 + (i as f64 * 0.1).sin()).collect();
//! let (x, y) = create_sequences(&prices, 20);
//!
//! let device = Default::default();
//! let (model, history) = train::<Autodiff<NdArray<f32>>>(
//!     &Sequences::new(x.clone(), y),
//!     &LstmRegressorConfig::default(),
//!     &TrainingConfig::default(),
//!     true,
//!     &device,
//! )?;
//! let next = model.predict(&x)?;
//! # Ok::<(), stock_rnn::Error>(())
//! ```

mod config;
mod lstm;
mod predictor;
mod training;

pub use config::{LstmRegressorConfig, TrainingConfig};
pub use lstm::LstmRegressor;
pub use predictor::{PricePredictor, TrainedModel};
pub use training::{train, TrainingHistory};

/// CPU backend used for inference
pub type InferenceBackend = burn::backend::NdArray<f32>;

/// CPU backend with autodiff, used for training
pub type TrainingBackend = burn::backend::Autodiff<InferenceBackend>;
