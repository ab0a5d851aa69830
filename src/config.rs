//! Run configuration

use crate::error::{Error, Result};
use crate::model::{LstmRegressorConfig, TrainingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a pipeline run needs besides the data file
///
/// Every field has a default, so a JSON file only has to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Prices per input window
    pub window_size: usize,
    /// Fraction of window pairs held out for testing
    pub test_split: f64,
    /// Shuffle pairs before the train/test split
    pub shuffle_split: bool,
    /// Business days to forecast
    pub horizon: usize,
    /// Min-max scale prices before training
    pub scale: bool,
    /// Historical prices shown before the forecast in the chart
    pub history_points: usize,
    /// Print terminal charts
    pub plot: bool,
    /// Where CSV results are written, if anywhere
    pub output_dir: Option<PathBuf>,
    /// Where the fitted model is saved, if anywhere
    pub save_model: Option<PathBuf>,
    pub model: LstmRegressorConfig,
    pub training: TrainingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            test_split: 0.1,
            shuffle_split: true,
            horizon: 90,
            scale: true,
            history_points: 252,
            plot: true,
            output_dir: None,
            save_model: None,
            model: LstmRegressorConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let config: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::Config("window_size must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.test_split) {
            return Err(Error::Config("test_split must be in [0, 1)".to_string()));
        }
        self.model.validate()?;
        self.training.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.window_size, 20);
        assert_eq!(config.test_split, 0.1);
        assert_eq!(config.horizon, 90);
        assert!(config.scale);
        assert_eq!(config.history_points, 252);
        assert_eq!(config.training.epochs, 50);
        assert_eq!(config.training.batch_size, 64);
        assert_eq!(config.model.hidden_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"window_size": 30, "horizon": 10, "training": {{"epochs": 5}}}}"#
        )
        .unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.window_size, 30);
        assert_eq!(config.horizon, 10);
        assert_eq!(config.training.epochs, 5);
        assert_eq!(config.training.batch_size, 64);
        assert_eq!(config.test_split, 0.1);
    }

    #[test]
    fn test_from_file_missing() {
        let err = PipelineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PipelineConfig {
            horizon: 5,
            ..Default::default()
        };
        let back: PipelineConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects() {
        let bad_window = PipelineConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(matches!(bad_window.validate(), Err(Error::Config(_))));

        let bad_split = PipelineConfig {
            test_split: 1.0,
            ..Default::default()
        };
        assert!(bad_split.validate().is_err());

        let mut bad_batch = PipelineConfig::default();
        bad_batch.training.batch_size = 0;
        assert!(bad_batch.validate().is_err());

        let mut bad_dropout = PipelineConfig::default();
        bad_dropout.model.dropout = 1.0;
        assert!(bad_dropout.validate().is_err());
    }
}
