//! # Data preparation
//!
//! Turning a price series into supervised pairs for the network:
//! - windowing
//! - min-max scaling
//! - train/test and train/validation splits
//!
//! ```rust
//! use stock_rnn::preprocessing::{create_sequences, train_test_split, Sequences};
//!
//! let prices: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
//! let (x, y) = create_sequences(&prices, 20);
//! assert_eq!(x.nrows(), 80);
//!
//! let (train, test) = train_test_split(&Sequences::new(x, y), 0.1, true, 42);
//! assert_eq!(train.len() + test.len(), 80);
//! ```

mod normalizer;
mod sequences;
mod split;

pub use normalizer::MinMaxScaler;
pub use sequences::{create_sequences, Sequences};
pub use split::{train_test_split, validation_split};
