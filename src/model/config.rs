//! Network and training configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Shape of the stacked LSTM regressor
///
/// `LSTM(hidden) -> Dropout -> LSTM(hidden) -> Dense(dense) -> Dense(output)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LstmRegressorConfig {
    /// Features per time step (1: the adjusted close)
    pub input_size: usize,
    /// Units in each recurrent layer
    pub hidden_size: usize,
    /// Dropout between the recurrent layers
    pub dropout: f64,
    /// Units in the hidden dense layer
    pub dense_size: usize,
    /// Number of outputs
    pub output_size: usize,
}

impl LstmRegressorConfig {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            ..Default::default()
        }
    }

    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn with_dense_size(mut self, dense_size: usize) -> Self {
        self.dense_size = dense_size;
        self
    }

    /// Smaller network for quick experiments and tests
    pub fn small() -> Self {
        Self::new(1, 8, 1).with_dense_size(4)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.dense_size == 0 {
            return Err(Error::Config("layer sizes must be > 0".to_string()));
        }
        if self.output_size != 1 {
            return Err(Error::Config(
                "output_size must be 1 for next-price regression".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(Error::Config("dropout must be in [0, 1)".to_string()));
        }
        Ok(())
    }
}

impl Default for LstmRegressorConfig {
    fn default() -> Self {
        Self {
            input_size: 1,
            hidden_size: 50,
            dropout: 0.2,
            dense_size: 25,
            output_size: 1,
        }
    }
}

/// Optimisation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of epochs
    pub epochs: usize,
    /// Batch size
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Trailing fraction of the training pairs used for validation
    pub validation_split: f64,
    /// Reshuffle training pairs every epoch
    pub shuffle: bool,
    /// Seed for weight init and shuffling
    pub seed: u64,
    /// Show a progress bar while fitting
    pub progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 64,
            learning_rate: 0.001,
            validation_split: 0.1,
            shuffle: true,
            seed: 42,
            progress: true,
        }
    }
}

impl TrainingConfig {
    /// A single silent epoch, for smoke tests
    pub fn quick() -> Self {
        Self {
            epochs: 1,
            progress: false,
            ..Default::default()
        }
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(Error::Config(
                "validation_split must be in [0, 1)".to_string(),
            ));
        }
        if self.learning_rate <= 0.0 {
            return Err(Error::Config("learning_rate must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_architecture() {
        let config = LstmRegressorConfig::default();
        assert_eq!(config.hidden_size, 50);
        assert_eq!(config.dense_size, 25);
        assert_eq!(config.dropout, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_training() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 50);
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.validation_split, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TrainingConfig::default()
            .with_epochs(3)
            .with_batch_size(16)
            .with_learning_rate(0.01)
            .with_seed(7);

        assert_eq!(config.epochs, 3);
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(TrainingConfig::default().with_batch_size(0).validate().is_err());
        assert!(LstmRegressorConfig::default().with_dropout(1.0).validate().is_err());
        assert!(LstmRegressorConfig::new(1, 50, 3).validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: TrainingConfig = serde_json::from_str(r#"{"epochs": 5}"#).unwrap();
        assert_eq!(config.epochs, 5);
        assert_eq!(config.batch_size, 64);
    }
}
