//! Fitted model used for evaluation and forecasting

use super::config::LstmRegressorConfig;
use super::lstm::LstmRegressor;
use crate::error::{Error, Result};
use crate::preprocessing::MinMaxScaler;
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder},
    tensor::{backend::Backend, Tensor, TensorData},
};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Anything that maps price windows to the next price
pub trait PricePredictor {
    /// Number of prices in one input window
    fn window_size(&self) -> usize;

    /// One prediction per row of `windows` (`[n, window_size]`)
    fn predict(&self, windows: &Array2<f64>) -> Result<Array1<f64>>;
}

/// Windows per forward pass during inference
const INFERENCE_BATCH: usize = 512;

/// Trained network plus everything needed to feed it raw prices
#[derive(Debug, Clone)]
pub struct TrainedModel<B: Backend> {
    model: LstmRegressor<B>,
    config: LstmRegressorConfig,
    window_size: usize,
    scaler: Option<MinMaxScaler>,
    device: B::Device,
}

/// JSON sidecar stored next to the weights
#[derive(Debug, Serialize, Deserialize)]
struct ModelMetadata {
    config: LstmRegressorConfig,
    window_size: usize,
    scaler: Option<MinMaxScaler>,
}

impl<B: Backend> TrainedModel<B> {
    pub fn new(
        model: LstmRegressor<B>,
        config: LstmRegressorConfig,
        window_size: usize,
        scaler: Option<MinMaxScaler>,
        device: B::Device,
    ) -> Self {
        Self {
            model,
            config,
            window_size,
            scaler,
            device,
        }
    }

    pub fn config(&self) -> &LstmRegressorConfig {
        &self.config
    }

    pub fn scaler(&self) -> Option<&MinMaxScaler> {
        self.scaler.as_ref()
    }

    /// Saves weights to `<path>.mpk` and metadata to `<path>.json`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let metadata = ModelMetadata {
            config: self.config.clone(),
            window_size: self.window_size,
            scaler: self.scaler,
        };
        std::fs::write(
            path.with_extension("json"),
            serde_json::to_string_pretty(&metadata)?,
        )?;

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        self.model
            .clone()
            .save_file(path.to_path_buf(), &recorder)
            .map_err(|e| Error::Model(format!("failed to save weights: {e:?}")))?;

        info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Loads a model written by [`TrainedModel::save`]
    pub fn load<P: AsRef<Path>>(path: P, device: &B::Device) -> Result<Self> {
        let path = path.as_ref();
        let meta_path = path.with_extension("json");
        if !meta_path.exists() {
            return Err(Error::FileNotFound { path: meta_path });
        }

        let metadata: ModelMetadata = serde_json::from_str(&std::fs::read_to_string(&meta_path)?)?;
        metadata.config.validate()?;

        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let model = LstmRegressor::new(&metadata.config, device)
            .load_file(path.to_path_buf(), &recorder, device)
            .map_err(|e| Error::Model(format!("failed to load weights: {e:?}")))?;

        info!("Model loaded from {}", path.display());
        Ok(Self::new(
            model,
            metadata.config,
            metadata.window_size,
            metadata.scaler,
            device.clone(),
        ))
    }
}

impl<B: Backend> PricePredictor for TrainedModel<B> {
    fn window_size(&self) -> usize {
        self.window_size
    }

    fn predict(&self, windows: &Array2<f64>) -> Result<Array1<f64>> {
        if windows.ncols() != self.window_size {
            return Err(Error::Model(format!(
                "expected windows of {} prices, got {}",
                self.window_size,
                windows.ncols()
            )));
        }

        let mut out = Vec::with_capacity(windows.nrows());
        for chunk in windows.axis_chunks_iter(Axis(0), INFERENCE_BATCH) {
            let raw = forward_windows(&self.model, &chunk.to_owned(), self.scaler.as_ref(), &self.device)?;
            out.extend(
                raw.into_iter()
                    .map(|v| self.scaler.map_or(v, |s| s.inverse_transform(v))),
            );
        }
        debug!("Predicted {} windows", out.len());

        Ok(Array1::from(out))
    }
}

/// Converts `[n, window]` prices into a `[n, window, 1]` tensor, scaled if a scaler is given
pub(crate) fn windows_to_tensor<B: Backend>(
    windows: &Array2<f64>,
    scaler: Option<&MinMaxScaler>,
    device: &B::Device,
) -> Tensor<B, 3> {
    let (n, w) = windows.dim();
    let data: Vec<f32> = windows
        .iter()
        .map(|&v| scaler.map_or(v, |s| s.transform(v)) as f32)
        .collect();

    Tensor::from_data(TensorData::new(data, [n, w, 1]), device)
}

/// Converts targets into a `[n, 1]` tensor, scaled if a scaler is given
pub(crate) fn targets_to_tensor<B: Backend>(
    targets: &Array1<f64>,
    scaler: Option<&MinMaxScaler>,
    device: &B::Device,
) -> Tensor<B, 2> {
    let data: Vec<f32> = targets
        .iter()
        .map(|&v| scaler.map_or(v, |s| s.transform(v)) as f32)
        .collect();

    Tensor::from_data(TensorData::new(data, [targets.len(), 1]), device)
}

/// Network outputs in scaled units, one per window
pub(crate) fn forward_windows<B: Backend>(
    model: &LstmRegressor<B>,
    windows: &Array2<f64>,
    scaler: Option<&MinMaxScaler>,
    device: &B::Device,
) -> Result<Vec<f64>> {
    if windows.nrows() == 0 {
        return Ok(Vec::new());
    }

    let output = model.forward(windows_to_tensor(windows, scaler, device));
    let values = output
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| Error::Model(format!("failed to read predictions: {e:?}")))?;

    Ok(values.into_iter().map(f64::from).collect())
}
