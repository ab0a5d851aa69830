//! Fitting the regressor with Adam against MSE

use super::config::{LstmRegressorConfig, TrainingConfig};
use super::lstm::LstmRegressor;
use super::predictor::{forward_windows, targets_to_tensor, windows_to_tensor, TrainedModel};
use crate::error::{Error, Result};
use crate::preprocessing::{validation_split, MinMaxScaler, Sequences};
use burn::{
    module::{AutodiffModule, Module},
    nn::loss::{MseLoss, Reduction},
    optim::{AdamConfig, GradientsParams, Optimizer},
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

/// Per-epoch loss curves
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingHistory {
    /// Mean training batch loss
    pub loss: Vec<f64>,
    /// Validation loss (empty when nothing was held out)
    pub val_loss: Vec<f64>,
}

impl TrainingHistory {
    pub fn final_loss(&self) -> Option<f64> {
        self.loss.last().copied()
    }

    pub fn final_val_loss(&self) -> Option<f64> {
        self.val_loss.last().copied()
    }

    /// Epoch (0-based) with the lowest validation loss
    pub fn best_epoch(&self) -> Option<usize> {
        self.val_loss
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Fits a fresh [`LstmRegressor`] on the given pairs
///
/// The trailing `validation_split` fraction of `data` is held out and scored
/// after every epoch. When `scale` is set, a min-max scaler is fitted on the
/// remaining training pairs and applied to inputs and targets; losses are
/// then reported in scaled units.
pub fn train<B: AutodiffBackend>(
    data: &Sequences,
    model_config: &LstmRegressorConfig,
    config: &TrainingConfig,
    scale: bool,
    device: &B::Device,
) -> Result<(TrainedModel<B::InnerBackend>, TrainingHistory)> {
    model_config.validate()?;
    config.validate()?;

    let (fit_data, val_data) = validation_split(data, config.validation_split);
    if fit_data.is_empty() {
        return Err(Error::InsufficientData(format!(
            "no training pairs left out of {} after the validation split",
            data.len()
        )));
    }

    let scaler = if scale {
        let fitted = MinMaxScaler::fit(fit_data.windows.iter().chain(fit_data.targets.iter()))
            .ok_or(Error::NoFiniteValues)?;
        debug!("Scaler range: {:.4} .. {:.4}", fitted.min(), fitted.max());
        Some(fitted)
    } else {
        None
    };

    info!("Starting training for {} epochs", config.epochs);
    info!(
        "Train samples: {}, Val samples: {}",
        fit_data.len(),
        val_data.len()
    );

    B::seed(config.seed);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut model = LstmRegressor::<B>::new(model_config, device);
    let mut optimizer = AdamConfig::new()
        .with_epsilon(1e-7)
        .init::<B, LstmRegressor<B>>();
    let loss_fn = MseLoss::new();

    debug!("Model parameters: {}", model.num_params());

    let mut history = TrainingHistory::default();
    let mut indices: Vec<usize> = (0..fit_data.len()).collect();

    let pb = if config.progress {
        ProgressBar::new(config.epochs as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) Loss: {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for epoch in 0..config.epochs {
        if config.shuffle {
            indices.shuffle(&mut rng);
        }

        let mut loss_sum = 0.0;
        let mut batch_count = 0usize;

        for chunk in indices.chunks(config.batch_size) {
            let batch = fit_data.select(chunk);
            let x = windows_to_tensor::<B>(&batch.windows, scaler.as_ref(), device);
            let y = targets_to_tensor::<B>(&batch.targets, scaler.as_ref(), device);

            let predictions = model.forward(x);
            let loss = loss_fn.forward(predictions, y, Reduction::Mean);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batch_count += 1;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(config.learning_rate, model, grads);
        }

        let train_loss = loss_sum / batch_count as f64;
        history.loss.push(train_loss);

        if val_data.is_empty() {
            info!(
                "Epoch {}/{}: loss={:.6}",
                epoch + 1,
                config.epochs,
                train_loss
            );
        } else {
            let val_loss = scaled_mse(&model.valid(), &val_data, scaler.as_ref(), device)?;
            history.val_loss.push(val_loss);
            info!(
                "Epoch {}/{}: loss={:.6}, val_loss={:.6}",
                epoch + 1,
                config.epochs,
                train_loss,
                val_loss
            );
        }

        pb.set_message(format!("{:.6}", train_loss));
        pb.inc(1);
    }

    pb.finish_with_message("done");

    if let Some(loss) = history.final_loss() {
        info!("Training completed. Final loss: {:.6}", loss);
    }

    let trained = TrainedModel::new(
        model.valid(),
        model_config.clone(),
        data.window_size(),
        scaler,
        device.clone(),
    );
    Ok((trained, history))
}

/// MSE between network outputs and targets, both in scaled units
fn scaled_mse<B: burn::tensor::backend::Backend>(
    model: &LstmRegressor<B>,
    data: &Sequences,
    scaler: Option<&MinMaxScaler>,
    device: &B::Device,
) -> Result<f64> {
    let outputs = forward_windows(model, &data.windows, scaler, device)?;
    let sum: f64 = outputs
        .iter()
        .zip(data.targets.iter())
        .map(|(p, &t)| {
            let t = scaler.map_or(t, |s| s.transform(t));
            (p - t).powi(2)
        })
        .sum();

    Ok(sum / outputs.len().max(1) as f64)
}
