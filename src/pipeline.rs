//! End-to-end runs: load, window, split, train, evaluate, forecast, plot

use crate::config::PipelineConfig;
use crate::data::{describe, load_price_series, PriceSeries, SeriesSummary};
use crate::error::{Error, Result};
use crate::evaluation::{evaluate, Evaluation};
use crate::forecast::{forecast_future_prices, Forecast};
use crate::model::{train, InferenceBackend, TrainedModel, TrainingBackend, TrainingHistory};
use crate::preprocessing::{train_test_split, Sequences};
use crate::utils::{
    plot_forecast, plot_predictions, plot_price_history, save_forecast_csv, save_json,
    save_predictions_csv,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a full run
#[derive(Debug)]
pub struct PipelineReport {
    pub summary: SeriesSummary,
    /// Window pairs built from the series
    pub pairs: usize,
    pub train_pairs: usize,
    pub test_pairs: usize,
    pub history: TrainingHistory,
    pub evaluation: Evaluation,
    pub forecast: Forecast,
    pub model: TrainedModel<InferenceBackend>,
}

/// Loads the CSV at `data_path` and runs every stage with `config`
pub fn run<P: AsRef<Path>>(config: &PipelineConfig, data_path: P) -> Result<PipelineReport> {
    config.validate()?;
    debug!("Pipeline config: {}", config.to_json()?);

    let series = load_price_series(data_path)?;
    let summary = describe(&series);
    info!("Loaded {} rows for {}", series.len(), series.ticker);
    if config.plot {
        println!("{}", summary);
        println!("{}", plot_price_history(&series));
    }

    let data = Sequences::from_series(&series, config.window_size);
    if data.is_empty() {
        return Err(Error::InsufficientData(format!(
            "{} prices do not fill a single window of {}",
            series.adj_closes().len(),
            config.window_size
        )));
    }
    if series.missing_adj_close() > 0 {
        warn!(
            "Dropped {} rows without an adjusted close before windowing",
            series.missing_adj_close()
        );
    }

    let (train_data, test_data) = train_test_split(
        &data,
        config.test_split,
        config.shuffle_split,
        config.training.seed,
    );
    info!(
        "Window pairs: {} (train {}, test {})",
        data.len(),
        train_data.len(),
        test_data.len()
    );

    let device = Default::default();
    let (model, history) = train::<TrainingBackend>(
        &train_data,
        &config.model,
        &config.training,
        config.scale,
        &device,
    )?;

    let evaluation = evaluate(&model, &test_data)?;
    if let Some(mse) = evaluation.mse {
        println!("Mean Squared Error: {}", mse);
    }

    let forecast = forecast_future_prices(&model, &series, config.horizon)?;

    if config.plot {
        println!("{}", plot_predictions(&evaluation));
        println!("{}", plot_forecast(&series, &forecast, config.history_points));
    }

    if let Some(path) = &config.save_model {
        model.save(path)?;
    }
    if let Some(dir) = &config.output_dir {
        write_outputs(dir, &series, &evaluation, &forecast, &history)?;
    }

    Ok(PipelineReport {
        summary,
        pairs: data.len(),
        train_pairs: train_data.len(),
        test_pairs: test_data.len(),
        history,
        evaluation,
        forecast,
        model,
    })
}

/// Forecasts from a previously saved model without retraining
pub fn forecast_from_saved<P: AsRef<Path>, M: AsRef<Path>>(
    config: &PipelineConfig,
    data_path: P,
    model_path: M,
) -> Result<Forecast> {
    let series = load_price_series(data_path)?;
    let model = TrainedModel::<InferenceBackend>::load(model_path, &Default::default())?;

    let forecast = forecast_future_prices(&model, &series, config.horizon)?;
    if config.plot {
        println!("{}", plot_forecast(&series, &forecast, config.history_points));
    }
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
        save_forecast_csv(&forecast, dir.join(format!("{}_forecast.csv", series.ticker)))?;
    }

    Ok(forecast)
}

/// Summary statistics of a CSV file
pub fn describe_file<P: AsRef<Path>>(data_path: P) -> Result<SeriesSummary> {
    let series = load_price_series(data_path)?;
    Ok(describe(&series))
}

fn write_outputs(
    dir: &Path,
    series: &PriceSeries,
    evaluation: &Evaluation,
    forecast: &Forecast,
    history: &TrainingHistory,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    save_predictions_csv(evaluation, dir.join(format!("{}_predictions.csv", series.ticker)))?;
    save_forecast_csv(forecast, dir.join(format!("{}_forecast.csv", series.ticker)))?;
    save_json(history, dir.join(format!("{}_history.json", series.ticker)))?;

    info!("Results written to {}", dir.display());
    Ok(())
}
